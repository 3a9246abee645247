//! Boot Configuration
//!
//! Everything the gallery host needs before the first frame: locomotion
//! tuning, projectile tuning, the obstacle grid and the scripted session.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `GALLERY_POLICY=volume`, `GALLERY_FRAMES=600`
//! 2. Config file: the path in `GALLERY_CONFIG`, else `gallery.toml`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [locomotion]
//! speed = 4.0
//! step_mode = "continuous"
//! policy = "ray_resolve"
//! wall_limit = 1.3
//!
//! [projectiles]
//! cooldown = 0.5
//! max_range = 100.0
//!
//! [scene]
//! extent = 100.0
//! spacing = 10.0
//!
//! [session]
//! frames = 600
//! ```

use gallery_collision::CollisionError;
use gallery_combat::{CombatError, ProjectileConfig};
use gallery_locomotion::{CollisionPolicy, LocomotionConfig, LocomotionError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scene::SceneConfig;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

/// Boot errors
#[derive(Debug, Error)]
pub enum BootError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid locomotion settings
    #[error(transparent)]
    Locomotion(#[from] LocomotionError),

    /// Invalid projectile settings
    #[error(transparent)]
    Combat(#[from] CombatError),

    /// Invalid scene layout
    #[error(transparent)]
    Scene(#[from] CollisionError),
}

/// Scripted session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frames to simulate
    pub frames: u32,
    /// Seconds per frame
    pub frame_time: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_time: 1.0 / 60.0,
        }
    }
}

/// Complete boot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Movement tuning
    pub locomotion: LocomotionConfig,
    /// Projectile tuning
    pub projectiles: ProjectileConfig,
    /// Obstacle grid
    pub scene: SceneConfig,
    /// Scripted session
    pub session: SessionConfig,
    /// Config file path, if one was loaded
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl BootConfig {
    /// Load boot configuration from all sources
    pub fn load() -> Result<Self, BootError> {
        let mut config = match std::env::var_os("GALLERY_CONFIG") {
            // An explicitly named file must exist
            Some(path) => Self::load_from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                log::info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(
            std::env::var("GALLERY_POLICY").ok().as_deref(),
            std::env::var("GALLERY_FRAMES").ok().as_deref(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, BootError> {
        let content = std::fs::read_to_string(path).map_err(|source| BootError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|source| BootError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded boot config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text; missing tables and keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment-style overrides; unparseable values are ignored
    pub fn apply_overrides(&mut self, policy: Option<&str>, frames: Option<&str>) {
        if let Some(value) = policy {
            match value.parse::<CollisionPolicy>() {
                Ok(policy) => {
                    self.locomotion.policy = policy;
                    log::info!("Collision policy from env: {}", policy);
                }
                Err(e) => log::warn!("Ignoring GALLERY_POLICY: {}", e),
            }
        }

        if let Some(value) = frames {
            match value.trim().parse::<u32>() {
                Ok(frames) => {
                    self.session.frames = frames;
                    log::info!("Session frames from env: {}", frames);
                }
                Err(e) => log::warn!("Ignoring GALLERY_FRAMES={:?}: {}", value, e),
            }
        }
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), BootError> {
        self.locomotion.validate()?;
        self.projectiles.validate()?;
        if !(self.session.frame_time.is_finite() && self.session.frame_time > 0.0) {
            return Err(LocomotionError::InvalidConfig(format!(
                "session frame_time must be positive, got {}",
                self.session.frame_time
            ))
            .into());
        }
        if !self.scene.spawn.iter().all(|c| c.is_finite()) {
            return Err(CollisionError::InvalidPosition(self.scene.spawn).into());
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Boot Configuration:");
        log::info!(
            "  Locomotion: {} at speed {} ({:?}), wall limit {}",
            self.locomotion.policy,
            self.locomotion.speed,
            self.locomotion.step_mode,
            self.locomotion.wall_limit
        );
        log::info!(
            "  Projectiles: speed {}, cooldown {}s",
            self.projectiles.speed,
            self.projectiles.cooldown
        );
        log::info!(
            "  Session: {} frames at {:.4}s",
            self.session.frames,
            self.session.frame_time
        );
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}
