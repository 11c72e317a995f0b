use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    video::VideoParams,
};

/// Main configuration for the Story-Compositor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Video output settings
    pub video: VideoParams,

    /// Camera-shake effect settings
    pub shake: ShakeConfig,

    /// Audio handling settings
    pub audio: AudioConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video: VideoParams::default(),
            shake: ShakeConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.video.fps <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "video.fps".to_string(),
                value: self.video.fps.to_string(),
            }
            .into());
        }

        if self.video.resolution.0 == 0 || self.video.resolution.1 == 0 {
            return Err(ConfigError::InvalidValue {
                key: "video.resolution".to_string(),
                value: format!("{}x{}", self.video.resolution.0, self.video.resolution.1),
            }
            .into());
        }

        if self.video.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "video.quality".to_string(),
                value: self.video.quality.to_string(),
            }
            .into());
        }

        self.shake.validate()?;
        self.audio.validate()?;
        Ok(())
    }
}

/// Camera-shake effect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShakeConfig {
    /// Whether the shake effect is applied to clips
    pub enabled: bool,

    /// Initial shake intensity in pixels per tick
    pub intensity: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 5.0,
        }
    }
}

impl ShakeConfig {
    fn validate(&self) -> Result<()> {
        if self.intensity < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "shake.intensity".to_string(),
                value: self.intensity.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Audio handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Duration in seconds substituted when an audio asset is missing or
    /// unreadable
    pub fallback_duration: f64,

    /// Sample rate of the rendered audio track (Hz)
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            fallback_duration: 5.0,
            sample_rate: 44100,
        }
    }
}

impl AudioConfig {
    fn validate(&self) -> Result<()> {
        if self.fallback_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "audio.fallback_duration".to_string(),
                value: self.fallback_duration.to_string(),
            }
            .into());
        }

        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "audio.sample_rate".to_string(),
                value: self.sample_rate.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
