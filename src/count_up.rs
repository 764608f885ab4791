/// Displayed value `elapsed_ms` into a count-up of `duration_ms` towards
/// `target`. A zero duration jumps straight to the target.
pub fn count_up_value(target: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    if duration_ms <= 0.0 {
        return target;
    }

    let progress = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    (target as f64 * progress).round() as u64
}

/// One-shot count-up driven by animation-frame timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    target: u64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms: duration_ms.max(0.0),
            started_at: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Starts the clock at `now_ms`. Later calls are ignored so the count
    /// never restarts.
    pub fn activate(&mut self, now_ms: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    pub fn value_at(&self, now_ms: f64) -> u64 {
        match self.started_at {
            Some(started_at) => count_up_value(self.target, now_ms - started_at, self.duration_ms),
            None => 0,
        }
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.started_at
            .is_some_and(|started_at| now_ms - started_at >= self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::{IntersectionSample, VisibilityTrigger};

    #[test]
    fn value_follows_rounded_linear_progress() {
        assert_eq!(count_up_value(2_000, 0.0, 2_000.0), 0);
        assert_eq!(count_up_value(2_000, 500.0, 2_000.0), 500);
        assert_eq!(count_up_value(200, 1.0, 2_000.0), 0);
        assert_eq!(count_up_value(200, 5.0, 2_000.0), 1);
        assert_eq!(count_up_value(100, 1_999.0, 2_000.0), 100);
        assert_eq!(count_up_value(100, 5_000.0, 2_000.0), 100);
    }

    #[test]
    fn zero_duration_shows_target() {
        assert_eq!(count_up_value(42, 0.0, 0.0), 42);
    }

    #[test]
    fn values_are_monotonic_and_end_at_target() {
        let counter = {
            let mut counter = CountUp::new(1_337, 2_000.0);
            counter.activate(10_000.0);
            counter
        };

        let mut previous = 0;
        let mut now = 10_000.0;
        while now <= 12_500.0 {
            let value = counter.value_at(now);
            assert!(value >= previous);
            previous = value;
            now += 16.7;
        }

        assert_eq!(counter.value_at(12_000.0), 1_337);
        assert!(counter.is_complete(12_000.0));
    }

    #[test]
    fn inactive_counter_stays_at_zero() {
        let counter = CountUp::new(100, 2_000.0);
        assert_eq!(counter.value_at(1_000_000.0), 0);
        assert!(!counter.is_complete(1_000_000.0));
    }

    #[test]
    fn second_activation_does_not_restart() {
        let mut counter = CountUp::new(100, 1_000.0);
        counter.activate(0.0);
        counter.activate(900.0);
        assert_eq!(counter.value_at(1_000.0), 100);
    }

    #[test]
    fn scrolled_section_counts_up_once_and_holds() {
        let mut trigger = VisibilityTrigger::new(0.2);
        let mut counter = CountUp::new(2_000, 2_000.0);
        trigger.attach();

        // below the fold
        assert!(!trigger.observe(IntersectionSample::new(false, 0.0)));
        assert!(!trigger.observe(IntersectionSample::new(true, 0.1)));

        assert!(trigger.observe(IntersectionSample::new(true, 0.25)));
        counter.activate(500.0);
        assert_eq!(counter.value_at(500.0), 0);
        assert_eq!(counter.value_at(2_500.0), 2_000);

        // scrolled away and back
        assert!(!trigger.observe(IntersectionSample::new(false, 0.0)));
        assert!(!trigger.observe(IntersectionSample::new(true, 0.6)));
        if trigger.is_visible() {
            counter.activate(9_000.0);
        }
        assert!(trigger.is_visible());
        assert_eq!(counter.value_at(9_000.0), 2_000);
    }
}
