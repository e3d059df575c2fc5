//! Processing configuration
//!
//! Settings are loaded from `quizmark.toml`:
//!
//! ```toml
//! locale = "pt-BR"
//!
//! [assets]
//! stylesheet = "static/quiz.css"
//! script = "static/quiz.js"
//!
//! [client]
//! auto_save = true
//! debug_mode = false
//! fallback_storage = true
//! ```
//!
//! Only `locale` influences the rewritten markup. `assets` and `client`
//! are read by the host that writes pages out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::i18n::Captions;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Locale used to pick button captions and placeholders
    pub locale: String,
    /// Static files injected into or copied next to pages
    pub assets: AssetSettings,
    /// Options forwarded to the page script
    pub client: ClientSettings,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            assets: AssetSettings::default(),
            client: ClientSettings::default(),
        }
    }
}

impl QuizConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Override the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Caption catalog for the configured locale
    pub fn captions(&self) -> Captions {
        Captions::for_locale(&self.locale)
    }
}

/// Locations of the quiz stylesheet and script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Stylesheet path
    pub stylesheet: Option<PathBuf>,
    /// Script path
    pub script: Option<PathBuf>,
}

impl AssetSettings {
    /// Make relative asset paths relative to `base`
    pub fn resolve_against(&mut self, base: &Path) {
        for path in [&mut self.stylesheet, &mut self.script].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Behaviour switches for the client-side quiz script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Save answers as soon as they are submitted
    pub auto_save: bool,
    /// Verbose console output
    pub debug_mode: bool,
    /// Fall back to in-memory storage when local storage is unavailable
    pub fallback_storage: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            debug_mode: false,
            fallback_storage: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.locale, "en");
        assert!(config.client.auto_save);
        assert!(!config.client.debug_mode);
        assert!(config.client.fallback_storage);
        assert!(config.assets.script.is_none());
    }

    #[test]
    fn test_load_config_from_toml() {
        let config = QuizConfig::from_toml_str(
            r#"
locale = "pt"

[assets]
script = "static/quiz.js"

[client]
debug_mode = true
"#,
        )
        .unwrap();

        assert_eq!(config.locale, "pt");
        assert_eq!(config.assets.script, Some(PathBuf::from("static/quiz.js")));
        assert!(config.assets.stylesheet.is_none());
        assert!(config.client.debug_mode);
        // Unset keys keep their defaults
        assert!(config.client.auto_save);
    }

    #[test]
    fn test_invalid_toml() {
        let err = QuizConfig::from_toml_str("locale = [").unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_resolve_asset_paths() {
        let mut assets = AssetSettings {
            stylesheet: Some(PathBuf::from("static/quiz.css")),
            script: Some(PathBuf::from("/abs/quiz.js")),
        };
        assets.resolve_against(Path::new("/site"));
        assert_eq!(assets.stylesheet, Some(PathBuf::from("/site/static/quiz.css")));
        assert_eq!(assets.script, Some(PathBuf::from("/abs/quiz.js")));
    }

    #[test]
    fn test_captions_follow_locale() {
        let config = QuizConfig::default().with_locale("de");
        assert_eq!(config.captions().submit, "Absenden");
    }
}
