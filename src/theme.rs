pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Stored choice first, then the user agent's colour-scheme preference.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        stored
            .and_then(Self::parse)
            .unwrap_or(if prefers_dark { Self::Dark } else { Self::Light })
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        format!("Switch to {} theme", self.toggled().as_str())
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_beats_media_query() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn unknown_or_missing_value_uses_media_query() {
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn toggle_round_trips_and_labels_next_theme() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
    }
}
