//! Page-level configuration: an optional JSON block rendered by the server.

use contracts::shared::dom_contract::{ControllerConfig, CONFIG_ELEMENT_ID};

use super::dom;

/// Reads the configuration block. No block means defaults; a malformed one
/// is reported back so it can be logged once logging is up.
pub fn load_config() -> Result<ControllerConfig, String> {
    let raw = dom::document()
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        None => Ok(ControllerConfig::default()),
        Some(raw) => ControllerConfig::from_json(&raw).map_err(|err| format!("{:#}", err)),
    }
}

/// Configured console log level; unknown names fall back to `debug`.
pub fn log_level(config: &ControllerConfig) -> log::Level {
    config.log_level.trim().parse().unwrap_or(log::Level::Debug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: &str) -> ControllerConfig {
        ControllerConfig {
            log_level: level.to_string(),
            ..ControllerConfig::default()
        }
    }

    #[test]
    fn log_level_names_use_log_parsing() {
        assert_eq!(log_level(&with_level("warn")), log::Level::Warn);
        assert_eq!(log_level(&with_level("TRACE")), log::Level::Trace);
        assert_eq!(log_level(&with_level(" info ")), log::Level::Info);
    }

    #[test]
    fn unknown_log_level_falls_back_to_debug() {
        assert_eq!(log_level(&with_level("loud")), log::Level::Debug);
        assert_eq!(log_level(&with_level("")), log::Level::Debug);
        assert_eq!(log_level(&ControllerConfig::default()), log::Level::Debug);
    }
}
