//! Effect configuration loaded once at startup.
//!
//! The config lives at `~/.voltaic/config.toml`. Every field has a default,
//! so a missing file or a partial file both work; only a malformed file is an
//! error. The loaded structs are handed to each engine by value; there is no
//! process-wide configuration singleton.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{CoreError, CoreResult};

/// Top-level configuration for both effect subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub particles: ParticleSettings,
    pub lightning: LightningSettings,
}

/// Tunables for the drifting particle field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Fixed number of particles in the field
    pub count: usize,
    /// Per-axis spawn velocity range is ±max_speed / 2
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Pairs closer than this get a proximity link
    pub connection_distance: f32,
    /// Pointer influence radius
    pub pointer_radius: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 80,
            max_speed: 0.5,
            min_size: 1.0,
            max_size: 3.0,
            connection_distance: 150.0,
            pointer_radius: 200.0,
        }
    }
}

/// Tunables for the lightning storm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningSettings {
    /// When false the scheduler starts stopped; `createBolt` still works
    pub enabled: bool,
    /// Base delay between ambient bolts; actual delays are jittered
    /// uniformly in [interval/2, 3·interval/2]
    pub interval_ms: u64,
    /// Branch attempts per main bolt
    pub branches: usize,
    /// Stroke color as a hex string
    pub color: String,
    /// Glow color as a hex string (alpha carried in the last byte)
    pub glow_color: String,
}

impl Default for LightningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 4000,
            branches: 3,
            color: "#ffd700".to_string(),
            glow_color: "#ffd70066".to_string(),
        }
    }
}

impl LightningSettings {
    /// Parsed stroke color.
    pub fn stroke_rgba(&self) -> CoreResult<Rgba> {
        Rgba::from_hex(&self.color)
    }

    /// Parsed glow color.
    pub fn glow_rgba(&self) -> CoreResult<Rgba> {
        Rgba::from_hex(&self.glow_color)
    }
}

impl EffectsConfig {
    /// Returns the config file path under the user's home directory.
    pub fn config_path() -> CoreResult<PathBuf> {
        let home = dirs::home_dir().ok_or(CoreError::NoHomeDir)?;
        Ok(home.join(".voltaic").join("config.toml"))
    }

    /// Loads the config from the default path, falling back to defaults when
    /// the file does not exist. A file that exists but fails to parse is an
    /// error; silently ignoring a user's config would be worse than failing.
    pub fn load_or_default() -> CoreResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Loads and validates the config from an explicit path.
    pub fn load(path: &std::path::Path) -> CoreResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        // Validate colors up front so render code never sees a bad value.
        config.lightning.stroke_rgba()?;
        config.lightning.glow_rgba()?;
        Ok(config)
    }

    /// Serializes the config to an explicit path, creating parent directories.
    pub fn save(&self, path: &std::path::Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
