use crate::config;

/// Load settings, falling back to defaults when the file cannot be read or
/// holds values out of range. A bad config never blocks startup.
///
/// The fallback reason is returned rather than logged: logging itself is
/// configured from these settings and is not up yet.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(e) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {e}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
