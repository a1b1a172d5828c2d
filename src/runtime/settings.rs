use crate::config::Settings;

/// Settings to run with, plus why the defaults were used instead (if they were).
pub struct Loaded {
    pub settings: Settings,
    pub fallback_reason: Option<String>,
}

/// Load and validate settings. Never fails: bad or unreadable config means
/// defaults, and a line on stderr before the terminal is taken over.
pub fn load_settings() -> Loaded {
    let fallback_reason = match Settings::load() {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                return Loaded {
                    settings,
                    fallback_reason: None,
                };
            }
            Err(msg) => format!("invalid config: {msg}"),
        },
        Err(e) => format!("failed to load config: {e}"),
    };

    eprintln!("nocturne: {fallback_reason}, using defaults");
    Loaded {
        settings: Settings::default(),
        fallback_reason: Some(fallback_reason),
    }
}
