use log::{Level, LevelFilter};
use serde_json::{Map, Value};

/// Installs the console logger and panic hook. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    console_error_panic_hook::set_once();
    if let Some(level) = level.to_level() {
        console_log::init_with_level(level).ok();
    }
    log::set_max_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    log::set_max_level(level);
}

pub fn log_event(level: Level, event: &str, fields: Value) {
    if level > log::max_level() {
        return;
    }

    log::log!(level, "{}", event_payload(level, event, fields));
}

fn event_payload(level: Level, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert(
        "level".to_string(),
        Value::String(level.as_str().to_ascii_lowercase()),
    );
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}
