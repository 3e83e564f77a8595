//! Configuration management for ecotrack
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/ecotrack/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::ui::chart::MAX_SAMPLES_PER_SEGMENT;
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub picker: PickerConfig,
    pub chart: ChartConfig,

    /// Where this config was loaded from; not serialized
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Eco,
            picker: PickerConfig::default(),
            chart: ChartConfig::default(),
            source: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("ecotrack");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`, or create a default one there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config {
                source: Some(path.to_path_buf()),
                ..Config::default()
            };
            config.save()?;
            info!(path = %path.display(), "created default config");
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.source = Some(path.to_path_buf());
        if config.chart.samples_per_segment > MAX_SAMPLES_PER_SEGMENT {
            warn!(
                requested = config.chart.samples_per_segment,
                max = MAX_SAMPLES_PER_SEGMENT,
                "chart.samples_per_segment too large, clamping"
            );
            config.chart.samples_per_segment = MAX_SAMPLES_PER_SEGMENT;
        }
        debug!(path = %path.display(), theme = config.theme.as_str(), "loaded config");
        Ok(config)
    }

    /// Save config to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(p) => p.clone(),
            None => Self::path()?,
        };

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Directory the media picker opens in
    pub fn picker_start_dir(&self) -> PathBuf {
        resolve_start_dir(self.picker.start_dir.clone(), dirs::picture_dir, dirs::home_dir)
    }
}

/// First available of the configured dir, pictures, home, then `.`
fn resolve_start_dir(
    configured: Option<PathBuf>,
    pictures: impl FnOnce() -> Option<PathBuf>,
    home: impl FnOnce() -> Option<PathBuf>,
) -> PathBuf {
    configured
        .or_else(pictures)
        .or_else(home)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Eco,
    Forest,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Eco => "Eco",
            ThemeName::Forest => "Forest",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Eco => ThemeName::Forest,
            ThemeName::Forest => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Eco,
        }
    }
}

/// Media picker options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Starting directory; falls back to the pictures dir, then home
    pub start_dir: Option<PathBuf>,
    pub show_hidden: bool,
}

/// Impact chart options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Draw a smoothed curve through the samples instead of straight segments
    pub smooth: bool,
    /// Interpolated points per segment, at most 64
    pub samples_per_segment: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            samples_per_segment: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Eco);
        assert!(config.chart.smooth);
        assert!(!config.picker.show_hidden);
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::Eco;
        assert_eq!(theme.next(), ThemeName::Forest);
        assert_eq!(theme.next().next(), ThemeName::Transparent);
        assert_eq!(theme.next().next().next(), ThemeName::Eco);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("theme = \"forest\"\n[chart]\nsmooth = false\n").unwrap();
        assert_eq!(config.theme, ThemeName::Forest);
        assert!(!config.chart.smooth);
        assert_eq!(config.chart.samples_per_segment, 8);
        assert_eq!(config.picker, PickerConfig::default());
    }

    #[test]
    fn test_load_creates_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, ThemeName::Eco);

        config.theme = ThemeName::Transparent;
        config.picker.start_dir = Some(dir.path().to_path_buf());
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = 42").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_picker_start_dir_override() {
        let mut config = Config::default();
        config.picker.start_dir = Some(PathBuf::from("/srv/photos"));
        assert_eq!(config.picker_start_dir(), PathBuf::from("/srv/photos"));
    }

    #[test]
    fn test_picker_start_dir_fallbacks() {
        let pictures = || Some(PathBuf::from("/home/u/Pictures"));
        let home = || Some(PathBuf::from("/home/u"));
        let none = || None;

        assert_eq!(
            resolve_start_dir(Some(PathBuf::from("/srv")), pictures, home),
            PathBuf::from("/srv")
        );
        assert_eq!(resolve_start_dir(None, pictures, home), PathBuf::from("/home/u/Pictures"));
        assert_eq!(resolve_start_dir(None, none, home), PathBuf::from("/home/u"));
        assert_eq!(resolve_start_dir(None, none, none), PathBuf::from("."));
    }

    #[test]
    fn test_oversized_chart_samples_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, format!("[chart]\nsamples_per_segment = {}\n", i64::MAX)).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.chart.samples_per_segment, MAX_SAMPLES_PER_SEGMENT);
    }
}
