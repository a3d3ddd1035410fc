//! User settings file
//!
//! TOML, loaded once at startup. Every field is optional; anything
//! missing falls back to the built-in splash defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use zeet_core::AnimationConfig;

use crate::cli::Cli;

const DEFAULT_USER: &str = "student";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub user: UserSettings,
    pub boot: BootSettings,
    pub splash: SplashSettings,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub name: Option<String>,
}

impl UserSettings {
    /// Display handle, e.g. `@ada`
    pub fn handle(&self) -> String {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_USER);
        format!("@{}", name.trim_start_matches('@'))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BootSettings {
    pub enabled: bool,
    pub duration_secs: f64,
}

impl Default for BootSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: 3.0,
        }
    }
}

impl BootSettings {
    pub fn duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.duration_secs)
            .with_context(|| format!("Invalid boot duration: {}", self.duration_secs))
    }
}

/// Splash options; intervals are in milliseconds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplashSettings {
    pub text: String,
    pub prompt: String,
    pub wave_amplitude: i32,
    pub wave_speed: f64,
    pub frame_interval_ms: u64,
    pub type_interval_ms: u64,
    pub spinner_interval_ms: u64,
    pub join_timeout_ms: u64,
    /// Each character is one spinner frame
    pub spinner_glyphs: Option<String>,
    /// Replaces the ZEET banner
    pub banner: Option<Vec<String>>,
    pub show_fps: bool,
}

impl Default for SplashSettings {
    fn default() -> Self {
        let defaults = AnimationConfig::default();
        Self {
            text: defaults.target_text,
            prompt: defaults.prompt,
            wave_amplitude: defaults.wave_amplitude,
            wave_speed: defaults.wave_speed,
            frame_interval_ms: defaults.frame_interval.as_millis() as u64,
            type_interval_ms: defaults.type_interval.as_millis() as u64,
            spinner_interval_ms: defaults.spinner_interval.as_millis() as u64,
            join_timeout_ms: defaults.join_timeout.as_millis() as u64,
            spinner_glyphs: None,
            banner: None,
            show_fps: defaults.show_fps,
        }
    }
}

impl SplashSettings {
    pub fn to_config(&self) -> AnimationConfig {
        let defaults = AnimationConfig::default();
        AnimationConfig {
            wave_amplitude: self.wave_amplitude,
            wave_speed: self.wave_speed,
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            type_interval: Duration::from_millis(self.type_interval_ms),
            spinner_interval: Duration::from_millis(self.spinner_interval_ms),
            target_text: self.text.clone(),
            wave_lines: self.banner.clone().unwrap_or(defaults.wave_lines),
            spinner_glyphs: self
                .spinner_glyphs
                .as_ref()
                .map(|glyphs| glyphs.chars().collect())
                .unwrap_or(defaults.spinner_glyphs),
            prompt: self.prompt.clone(),
            join_timeout: Duration::from_millis(self.join_timeout_ms),
            show_fps: self.show_fps,
        }
    }
}

impl Settings {
    /// Default settings location: `<config dir>/zeet/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zeet").join("config.toml"))
    }

    /// Load from an explicit path (must exist) or the default location
    /// (optional; missing means defaults)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Command-line flags win over the file
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(text) = &cli.text {
            self.splash.text = text.clone();
        }
        if let Some(user) = &cli.user {
            self.user.name = Some(user.clone());
        }
        if cli.no_boot {
            self.boot.enabled = false;
        }
        if let Some(secs) = cli.boot_secs {
            self.boot.duration_secs = secs;
        }
        if cli.fps {
            self.splash.show_fps = true;
        }
    }
}
