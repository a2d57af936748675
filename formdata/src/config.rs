//! Builder options and logging configuration.
//!
//! Config files may be TOML (`formdata.toml`), YAML or JSON:
//!
//! ```toml
//! [form]
//! select_min_items = 4
//! show_private = false
//!
//! [logging]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub form: FormOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config: Self = load_file(path.as_ref())?;
        config.form = config.form.normalized();
        Ok(config)
    }
}

/// Options of a `FormData` builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormOptions {
    /// Enumerations with fewer values render as radio buttons, larger ones
    /// as a select. Zero means the default.
    #[serde(default = "default_select_min_items", alias = "selectMinItems")]
    pub select_min_items: usize,
    /// List fields whose name starts with `_` when no fields are requested
    #[serde(default, alias = "showPrivate")]
    pub show_private: bool,
}

fn default_select_min_items() -> usize {
    5
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            select_min_items: default_select_min_items(),
            show_private: false,
        }
    }
}

impl FormOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file::<Self>(path.as_ref()).map(Self::normalized)
    }

    pub fn with_select_min_items(mut self, n: usize) -> Self {
        self.select_min_items = n;
        self.normalized()
    }

    pub fn with_show_private(mut self, show: bool) -> Self {
        self.show_private = show;
        self
    }

    /// Replace a zero `select_min_items` with the default
    pub fn normalized(mut self) -> Self {
        if self.select_min_items == 0 {
            self.select_min_items = default_select_min_items();
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(Error::Config(format!(
            "unsupported config format: {}",
            path.display()
        ))),
    }
}
