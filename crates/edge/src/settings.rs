// crates/edge/src/settings.rs

use query::SegmentOptions;
use serde::Deserialize;
use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentSettings {
    /// Ignore braces inside string literals when splitting arrays
    pub quote_aware: bool,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self { quote_aware: true }
    }
}

impl From<&SegmentSettings> for SegmentOptions {
    fn from(s: &SegmentSettings) -> Self {
        SegmentOptions {
            quote_aware: s.quote_aware,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log: LogSettings,
    pub segment: SegmentSettings,
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no path is given.
    ///
    /// A path that is given but does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        if !path.is_file() {
            return Err(Error::Config(format!(
                "settings file not found at {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("Failed reading {}: {}", path.display(), err)))?;

        Self::parse(&text)
            .map_err(|err| Error::Config(format!("Invalid settings at {}: {}", path.display(), err)))
    }

    pub fn parse(text: &str) -> std::result::Result<Settings, toml::de::Error> {
        toml::from_str(text)
    }
}
