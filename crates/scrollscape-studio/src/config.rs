//! Studio configuration file.
//!
//! ```toml
//! log_filter = "scrollscape_motion=debug"
//!
//! [window]
//! title = "Scrollscape"
//! width = 1280.0
//! height = 800.0
//!
//! [render]
//! clear_color = [0.0, 0.0, 0.0, 0.0]
//! vsync = true
//!
//! [motion]
//! smoothing = 0.1
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scrollscape_motion::{InvalidConfig, MotionConfig};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCROLLSCAPE_CONFIG";

/// Looked up in the working directory when `SCROLLSCAPE_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "scrollscape.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub motion: MotionConfig,
    /// `env_logger` filter; falls back to `RUST_LOG`, then `info`.
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Scrollscape".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Straight RGBA. Transparent black matches a page showing through.
    pub clear_color: [f64; 4],
    /// FIFO presentation when set, otherwise the lowest-latency mode available.
    pub vsync: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            vsync: true,
        }
    }
}

impl RenderConfig {
    pub fn clear(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid { path: PathBuf, source: InvalidConfig },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, .. } => write!(f, "cannot read {}", path.display()),
            ConfigError::Parse { path, .. } => write!(f, "cannot parse {}", path.display()),
            ConfigError::Invalid { path, .. } => write!(f, "invalid settings in {}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { source, .. } => Some(source),
        }
    }
}

impl StudioConfig {
    /// Loads from `SCROLLSCAPE_CONFIG`, else `./scrollscape.toml`, else defaults.
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Parses and validates `text`; `path` only labels errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: StudioConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.motion.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<StudioConfig, ConfigError> {
        StudioConfig::from_toml(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse("").unwrap(), StudioConfig::default());
    }

    #[test]
    fn sections_override_independently() {
        let config = parse(
            r#"
log_filter = "debug"

[window]
title = "Landing"

[motion]
line_height = 60.0
"#,
        )
        .unwrap();

        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.window.title, "Landing");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.motion.line_height, 60.0);
        assert_eq!(config.motion.smoothing, 0.1);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn clear_color_maps_to_wgpu() {
        let config = parse("[render]\nclear_color = [0.1, 0.2, 0.3, 1.0]\nvsync = false").unwrap();
        let clear = config.render.clear();
        assert_eq!((clear.r, clear.g, clear.b, clear.a), (0.1, 0.2, 0.3, 1.0));
        assert_eq!(config.render.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[window\ntitle = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.to_string(), "cannot parse test.toml");
    }

    #[test]
    fn out_of_range_motion_is_rejected() {
        let err = parse("[motion]\nsmoothing = 0.0").unwrap_err();
        match err {
            ConfigError::Invalid { source, .. } => assert_eq!(source.field, "smoothing"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_motion_values_never_reach_the_scene() {
        let err = parse("[motion.parallax]\nstrength = nan\n[motion.section_rotation]\ndelta = [inf, 3.0, 0.0]")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let err = StudioConfig::from_file(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
