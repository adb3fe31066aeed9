//! Editor configuration.
//!
//! Every field has a default, so hosts only pass what they override:
//!
//! ```json
//! { "theme": { "handleSize": 16 }, "gestures": { "tapCount": 1 }, "logLevel": "debug" }
//! ```

use crate::input::GestureConfig;
use serde::Deserialize;
use sk_core::ItemDefaults;
use sk_render::CanvasTheme;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub defaults: ItemDefaults,
    pub theme: CanvasTheme,
    pub gestures: GestureConfig,
    pub log_level: log::LevelFilter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            defaults: ItemDefaults::default(),
            theme: CanvasTheme::default(),
            gestures: GestureConfig::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(EditorConfig::from_json("  ").unwrap(), EditorConfig::default());
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn nested_overrides() {
        let config = EditorConfig::from_json(
            r#"{"theme":{"handleSize":16},"gestures":{"tapCount":1},"logLevel":"debug"}"#,
        )
        .unwrap();
        assert_eq!(config.theme.handle_size, 16.0);
        assert_eq!(config.gestures.tap_count, 1);
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        assert_eq!(config.defaults, ItemDefaults::default());
    }

    #[test]
    fn malformed_config_reports_error() {
        let err = EditorConfig::from_json(r#"{"theme": 3}"#).unwrap_err();
        assert!(err.starts_with("invalid editor config"), "{err}");
    }
}
