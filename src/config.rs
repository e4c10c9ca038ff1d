//! Grid configuration
//!
//! Loaded from YAML. Every field has a default so partial files work, and a
//! missing or broken file degrades to [`GridConfig::default`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grid::layout::MIN_COLUMN_WIDTH;
use crate::grid::parser::{DEFAULT_EMPTY_HEADER, DEFAULT_SCAFFOLD_HEADERS};
use crate::keymap::BindingConfig;

/// Number and date conventions used by the format renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub group_separator: char,
    pub currency_symbol: String,
    /// chrono format string for DATE columns
    pub date_format: String,
    pub hour_suffix: String,
    pub percent_suffix: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '.',
            currency_symbol: "R$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            hour_suffix: "h".to_string(),
            percent_suffix: "%".to_string(),
        }
    }
}

/// Grid behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width floor for a column during resize, in percent
    pub min_column_width: f64,
    /// Title given to empty header cells
    pub empty_header_title: String,
    /// Headers of the scaffold shown for an empty blob
    pub scaffold_headers: Vec<String>,
    /// Base name for inserted and paste-grown columns
    pub new_column_title: String,
    /// Value written into every row of an inserted column
    pub new_column_fill: String,
    pub locale: LocaleConfig,
    /// Keybinding overrides merged over the defaults
    pub keymap: Vec<BindingConfig>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_column_width: MIN_COLUMN_WIDTH,
            empty_header_title: DEFAULT_EMPTY_HEADER.to_string(),
            scaffold_headers: DEFAULT_SCAFFOLD_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            new_column_title: DEFAULT_EMPTY_HEADER.to_string(),
            new_column_fill: "0".to_string(),
            locale: LocaleConfig::default(),
            keymap: Vec::new(),
        }
    }
}

impl GridConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse grid config")?;
        Ok(config.sanitized())
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Load config from disk, or return defaults if missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_file(path) {
            Ok(config) => {
                tracing::info!("Loaded grid config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize grid config")
    }

    /// Save config to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        std::fs::write(path, self.to_yaml()?)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved grid config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.min_column_width.is_finite() || !(0.0..50.0).contains(&self.min_column_width) {
            tracing::warn!(
                "min_column_width {} out of range, using {}",
                self.min_column_width,
                defaults.min_column_width
            );
            self.min_column_width = defaults.min_column_width;
        }
        if self.empty_header_title.trim().is_empty() {
            self.empty_header_title = defaults.empty_header_title;
        }
        if self.new_column_title.trim().is_empty() {
            self.new_column_title = defaults.new_column_title;
        }
        if self.scaffold_headers.is_empty() {
            self.scaffold_headers = defaults.scaffold_headers;
        }
        self
    }
}
