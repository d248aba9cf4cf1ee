//! Configuration file loading for constella.
//!
//! Every key is optional; a missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use constella_core::{FieldConfig, InvalidFieldConfig, ThemeSpec};
use directories::ProjectDirs;
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CONSTELLA_CONFIG";

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid field settings: {0}")]
    Field(#[from] InvalidFieldConfig),
    #[error("frame_interval_ms must be greater than zero")]
    FrameInterval,
}

/// Reduced-motion preference supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// The user prefers reduced motion.
    pub reduced: bool,
    /// Stop particle drift when `reduced` is set. Off by default.
    pub gate_particles: bool,
}

impl MotionConfig {
    /// Whether particle drift should be suspended.
    pub fn freeze_particles(&self) -> bool {
        self.reduced && self.gate_particles
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page sections that get a particle field.
    pub mounts: Vec<String>,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// `tracing` level name for the log file.
    pub log_level: String,
    pub field: FieldConfig,
    pub theme: ThemeSpec,
    pub motion: MotionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mounts: vec!["hero".to_string(), "projects".to_string()],
            frame_interval_ms: 16,
            log_level: "info".to_string(),
            field: FieldConfig::default(),
            theme: ThemeSpec::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl Config {
    /// Load from `$CONSTELLA_CONFIG` or the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::FrameInterval);
        }
        self.field.validate()?;
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Resolve the config file location.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Platform directories for constella.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "constella")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config(
            r##"
mounts = ["hero"]

[field]
max_line_distance = 120.0

[theme]
accent = "#ff8800"

[motion]
reduced = true
"##,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.mounts, vec!["hero"]);
        assert_eq!(config.field.max_line_distance, 120.0);
        assert_eq!(config.field.mouse_radius, 140.0);
        assert_eq!(config.theme.accent.as_deref(), Some("#ff8800"));
        assert!(config.motion.reduced);
        assert!(!config.motion.freeze_particles());
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("mounts = 3");
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config("frame_interval_ms = 0");
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::FrameInterval)
        ));

        let file = write_config("[field]\nmouse_radius = -1.0");
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Field(_))
        ));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../../../config.example.toml")).unwrap();
        assert_eq!(config.field, FieldConfig::default());
        assert_eq!(config.mounts, Config::default().mounts);
        assert!(config.theme.resolve().fallbacks.is_empty());
    }

    #[test]
    fn test_gate_requires_both_flags() {
        let motion = MotionConfig {
            reduced: true,
            gate_particles: true,
        };
        assert!(motion.freeze_particles());
        assert!(!MotionConfig::default().freeze_particles());
    }
}
