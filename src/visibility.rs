//! One-shot "scrolled into view" trigger used to gate entrance animations.
//!
//! The trigger starts `Pending` and moves to `Triggered` the first time an
//! intersection sample covers at least `threshold` of the target. There is no
//! way back: scrolling the region out of view again leaves it `Triggered`.

/// Browsers report ratios that land a hair under the threshold they were
/// asked to notify on.
const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    Pending,
    Triggered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationPhase {
    /// The target element is not in the DOM yet.
    AwaitingTarget,
    Observing,
    /// Observation handed back to the browser: after firing, on failure, or
    /// on unmount.
    Released,
}

/// One intersection report for the target region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSample {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionSample {
    pub fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    state: TriggerState,
    phase: ObservationPhase,
}

impl VisibilityTrigger {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            threshold,
            state: TriggerState::Pending,
            phase: ObservationPhase::AwaitingTarget,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn phase(&self) -> ObservationPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TriggerState::Triggered)
    }

    /// The target element is attached; observation may begin.
    pub fn attach(&mut self) {
        if self.phase == ObservationPhase::AwaitingTarget {
            self.phase = ObservationPhase::Observing;
        }
    }

    /// Feeds one sample. Returns `true` only on the `Pending -> Triggered`
    /// transition, at which point the caller must stop observing.
    pub fn observe(&mut self, sample: IntersectionSample) -> bool {
        if self.phase != ObservationPhase::Observing || self.is_visible() {
            return false;
        }

        if !sample.is_intersecting || sample.ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }

        self.state = TriggerState::Triggered;
        self.phase = ObservationPhase::Released;
        true
    }

    /// Observation cannot run in this environment. Content is shown rather
    /// than left hidden. Returns `true` if this flipped the state.
    pub fn fail_open(&mut self) -> bool {
        self.phase = ObservationPhase::Released;
        if self.is_visible() {
            return false;
        }
        self.state = TriggerState::Triggered;
        true
    }

    /// Host is going away; whatever was being watched is dropped.
    pub fn release(&mut self) {
        self.phase = ObservationPhase::Released;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observing(threshold: f64) -> VisibilityTrigger {
        let mut trigger = VisibilityTrigger::new(threshold);
        trigger.attach();
        trigger
    }

    #[test]
    fn starts_pending_and_awaiting_target() {
        let trigger = VisibilityTrigger::new(0.1);
        assert_eq!(trigger.state(), TriggerState::Pending);
        assert_eq!(trigger.phase(), ObservationPhase::AwaitingTarget);
        assert!(!trigger.is_visible());
    }

    #[test]
    fn samples_before_attachment_are_ignored() {
        let mut trigger = VisibilityTrigger::new(0.1);
        assert!(!trigger.observe(IntersectionSample::new(true, 1.0)));
        assert!(!trigger.is_visible());

        trigger.attach();
        assert!(trigger.observe(IntersectionSample::new(true, 1.0)));
    }

    #[test]
    fn flips_exactly_once_for_every_threshold() {
        for step in 0..=10 {
            let threshold = f64::from(step) / 10.0;
            let mut trigger = observing(threshold);
            let mut transitions = 0;

            for ratio_step in 0..=20 {
                let ratio = f64::from(ratio_step) / 20.0;
                if trigger.observe(IntersectionSample::new(ratio > 0.0, ratio)) {
                    transitions += 1;
                    assert!(ratio + RATIO_TOLERANCE >= threshold);
                }
            }
            // scrolled back out
            trigger.observe(IntersectionSample::new(false, 0.0));

            assert_eq!(transitions, 1, "threshold {threshold}");
            assert!(trigger.is_visible());
            assert_eq!(trigger.phase(), ObservationPhase::Released);
        }
    }

    #[test]
    fn below_threshold_stays_pending() {
        let mut trigger = observing(0.2);
        assert!(!trigger.observe(IntersectionSample::new(true, 0.15)));
        assert_eq!(trigger.state(), TriggerState::Pending);
        assert_eq!(trigger.phase(), ObservationPhase::Observing);
    }

    #[test]
    fn non_intersecting_report_never_triggers_zero_threshold() {
        let mut trigger = observing(0.0);
        assert!(!trigger.observe(IntersectionSample::new(false, 0.0)));
        assert!(trigger.observe(IntersectionSample::new(true, 0.0)));
    }

    #[test]
    fn ratio_just_under_threshold_counts() {
        let mut trigger = observing(0.1);
        assert!(trigger.observe(IntersectionSample::new(true, 0.099_999_9)));
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(VisibilityTrigger::new(3.0).threshold(), 1.0);
        assert_eq!(VisibilityTrigger::new(-1.0).threshold(), 0.0);
        assert_eq!(VisibilityTrigger::new(f64::NAN).threshold(), 0.0);
    }

    #[test]
    fn fail_open_shows_content() {
        let mut trigger = VisibilityTrigger::new(0.5);
        assert!(trigger.fail_open());
        assert!(trigger.is_visible());
        assert!(!trigger.fail_open());
    }

    #[test]
    fn release_before_threshold_stops_observation() {
        let mut trigger = observing(0.3);
        trigger.release();
        assert!(!trigger.observe(IntersectionSample::new(true, 1.0)));
        assert_eq!(trigger.state(), TriggerState::Pending);
    }
}
