//! Engine-level settings

use serde::{Deserialize, Serialize};

use super::Config;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window / viewport settings
    pub window: WindowConfig,
    /// Scene manager settings
    pub scenes: SceneSettings,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config for EngineConfig {}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cbit engine".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Scene manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Route scene activations through the splash scene
    pub show_splash: bool,
    /// Seconds the splash stays up before handing over
    pub splash_duration: f32,
    /// Scene activated when the engine starts
    pub start_scene: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_splash: true,
            splash_duration: 3.0,
            start_scene: "default_scene".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter
    pub fn level_filter(&self) -> log::LevelFilter {
        crate::foundation::logging::parse_level(&self.level)
    }
}
