use std::time::Duration;

pub const TYPE_DELAY: Duration = Duration::from_millis(50);
pub const DELETE_DELAY: Duration = Duration::from_millis(30);
pub const HOLD_DELAY: Duration = Duration::from_millis(2_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

/// Hero "typing" effect: types a phrase, holds it, deletes it, moves on.
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    fn current(&self) -> &str {
        self.phrases
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn current_len(&self) -> usize {
        self.current().chars().count()
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn visible_text(&self) -> String {
        self.current().chars().take(self.shown).collect()
    }

    /// Shows the first phrase in full and never moves again.
    pub fn settle(&mut self) {
        self.index = 0;
        self.shown = self.current_len();
        self.phase = Phase::Holding;
    }

    /// Delay before the first [`Typewriter::advance`].
    pub fn initial_delay(&self) -> Duration {
        TYPE_DELAY
    }

    /// Applies one edit and returns how long to wait before the next.
    pub fn advance(&mut self) -> Duration {
        if self.phrases.is_empty() {
            return HOLD_DELAY;
        }

        match self.phase {
            Phase::Typing if self.shown < self.current_len() => {
                self.shown += 1;
                if self.shown == self.current_len() {
                    self.phase = Phase::Holding;
                    HOLD_DELAY
                } else {
                    TYPE_DELAY
                }
            }
            Phase::Typing | Phase::Holding => {
                self.phase = Phase::Deleting;
                DELETE_DELAY
            }
            Phase::Deleting if self.shown > 0 => {
                self.shown -= 1;
                DELETE_DELAY
            }
            Phase::Deleting => {
                self.index = (self.index + 1) % self.phrases.len();
                self.phase = Phase::Typing;
                TYPE_DELAY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn types_holds_deletes_and_wraps() {
        let mut typewriter = writer(&["ab", "c"]);

        assert_eq!(typewriter.advance(), TYPE_DELAY);
        assert_eq!(typewriter.visible_text(), "a");
        assert_eq!(typewriter.advance(), HOLD_DELAY);
        assert_eq!(typewriter.visible_text(), "ab");

        assert_eq!(typewriter.advance(), DELETE_DELAY);
        assert_eq!(typewriter.visible_text(), "ab");
        assert_eq!(typewriter.advance(), DELETE_DELAY);
        assert_eq!(typewriter.visible_text(), "a");
        assert_eq!(typewriter.advance(), DELETE_DELAY);
        assert_eq!(typewriter.visible_text(), "");

        assert_eq!(typewriter.advance(), TYPE_DELAY);
        assert_eq!(typewriter.phrase_index(), 1);
        assert_eq!(typewriter.advance(), HOLD_DELAY);
        assert_eq!(typewriter.visible_text(), "c");

        for _ in 0..3 {
            typewriter.advance();
        }
        assert_eq!(typewriter.phrase_index(), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut typewriter = writer(&["1 → 2"]);
        for _ in 0..3 {
            typewriter.advance();
        }
        assert_eq!(typewriter.visible_text(), "1 →");
    }

    #[test]
    fn settle_shows_first_phrase() {
        let mut typewriter = writer(&["first", "second"]);
        typewriter.advance();
        typewriter.settle();
        assert_eq!(typewriter.visible_text(), "first");
    }

    #[test]
    fn empty_phrase_list_is_inert() {
        let mut typewriter = writer(&[]);
        assert_eq!(typewriter.advance(), HOLD_DELAY);
        assert_eq!(typewriter.visible_text(), "");
    }
}
