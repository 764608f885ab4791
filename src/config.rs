use log::LevelFilter;

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;
pub const DEFAULT_COUNT_UP_DURATION_MS: u64 = 2_000;
pub const DEFAULT_PARTICLE_AREA_PER_UNIT: u64 = 15_000;

pub const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
pub const COUNT_UP_DURATION_MS_BOUNDS: (u64, u64) = (0, 10_000);
pub const PARTICLE_AREA_PER_UNIT_BOUNDS: (u64, u64) = (2_000, 200_000);

pub const LOG_LEVEL_ATTR: &str = "data-log-level";
pub const VISIBILITY_THRESHOLD_ATTR: &str = "data-visibility-threshold";
pub const COUNT_UP_DURATION_ATTR: &str = "data-count-up-ms";
pub const PARTICLE_AREA_ATTR: &str = "data-particle-area";
pub const REDUCED_MOTION_ATTR: &str = "data-reduced-motion";

/// Tunables for the page, read once from the `data-*` attributes of the
/// mount element.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub log_level: LevelFilter,
    pub visibility_threshold: f64,
    pub count_up_duration_ms: u64,
    pub particle_area_per_unit: u64,
    /// `Some` when the mount element forces a motion preference, otherwise
    /// the user agent's media query decides.
    pub reduced_motion: Option<bool>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            count_up_duration_ms: DEFAULT_COUNT_UP_DURATION_MS,
            particle_area_per_unit: DEFAULT_PARTICLE_AREA_PER_UNIT,
            reduced_motion: None,
        }
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = parse_log_level(lookup(LOG_LEVEL_ATTR), DEFAULT_LOG_LEVEL);
        let visibility_threshold = parse_f64_with_bounds(
            lookup(VISIBILITY_THRESHOLD_ATTR),
            DEFAULT_VISIBILITY_THRESHOLD,
            VISIBILITY_THRESHOLD_BOUNDS,
        );
        let count_up_duration_ms = parse_u64_with_bounds(
            lookup(COUNT_UP_DURATION_ATTR),
            DEFAULT_COUNT_UP_DURATION_MS,
            COUNT_UP_DURATION_MS_BOUNDS,
        );
        let particle_area_per_unit = parse_u64_with_bounds(
            lookup(PARTICLE_AREA_ATTR),
            DEFAULT_PARTICLE_AREA_PER_UNIT,
            PARTICLE_AREA_PER_UNIT_BOUNDS,
        );
        let reduced_motion = parse_flag(lookup(REDUCED_MOTION_ATTR));

        Self {
            log_level,
            visibility_threshold,
            count_up_duration_ms,
            particle_area_per_unit,
            reduced_motion,
        }
    }

    /// Effective motion preference once the user agent has been asked.
    pub fn motion_reduced(&self, user_agent_prefers_reduced: bool) -> bool {
        self.reduced_motion.unwrap_or(user_agent_prefers_reduced)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    non_empty(value)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    non_empty(value)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<String>, default: LevelFilter) -> LevelFilter {
    match non_empty(value)
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => default,
    }
}

fn parse_flag(value: Option<String>) -> Option<bool> {
    match non_empty(value)?.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
