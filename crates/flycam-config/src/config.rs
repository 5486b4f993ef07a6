//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings for the demo host.
    pub window: WindowConfig,
    /// Free-fly camera tunables.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    /// Base window title; the pose readout is appended to it.
    pub title: String,
}

/// Which keys move the camera down and up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Q = down, E = up.
    #[default]
    Primary,
    /// C = down, R = up.
    Alternate,
}

/// When mouse motion rotates the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookMode {
    /// Only while the right mouse button is held.
    #[default]
    ClickToPan,
    /// Whenever the mouse moves.
    AlwaysPan,
}

/// One key of the mouse sensitivity response curve.
///
/// `time` is the mouse movement magnitude, `value` the rotation multiplier.
/// Tangents are slopes (d value / d time) entering and leaving the key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl CurveKey {
    #[must_use]
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Free-fly camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial exponential boost on translation; the mouse wheel changes it
    /// at runtime. Translation is scaled by `2^boost`.
    pub boost: f32,
    /// Seconds for the camera position to cover 99% of the way to its target.
    pub position_lerp_time: f32,
    /// Seconds for the camera rotation to cover 99% of the way to its target.
    pub rotation_lerp_time: f32,
    /// Invert the mouse Y axis.
    pub invert_y: bool,
    /// Down/up key mapping.
    pub control_scheme: ControlScheme,
    /// Click-to-pan or always-pan mouse look.
    pub look_mode: LookMode,
    /// Pixel to mouse-axis conversion applied before the sensitivity curve.
    pub mouse_axis_scale: f32,
    /// Response curve from mouse movement magnitude to rotation multiplier.
    pub sensitivity_curve: Vec<CurveKey>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter, e.g. `"debug"` or `"info,flycam_camera=trace"`.
    pub log_level: String,
    /// Show the pose readout in the window title.
    pub show_pose: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Flycam".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            boost: 3.5,
            position_lerp_time: 0.2,
            rotation_lerp_time: 0.01,
            invert_y: false,
            control_scheme: ControlScheme::Primary,
            look_mode: LookMode::ClickToPan,
            mouse_axis_scale: 0.1,
            sensitivity_curve: vec![
                CurveKey::new(0.0, 0.5, 0.0, 5.0),
                CurveKey::new(1.0, 2.5, 0.0, 0.0),
            ],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_pose: true,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Path of the config file inside `config_dir`.
    #[must_use]
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Load config from `config_dir`, or write and return the defaults when
    /// no file exists yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to `config_dir` as [`CONFIG_FILE_NAME`].
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = Self::path_in(config_dir);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::path_in(config_dir))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            log::debug!("Config unchanged on reload");
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_tunables() {
        let camera = CameraConfig::default();
        assert!((camera.boost - 3.5).abs() < f32::EPSILON);
        assert!((camera.position_lerp_time - 0.2).abs() < f32::EPSILON);
        assert!((camera.rotation_lerp_time - 0.01).abs() < f32::EPSILON);
        assert!(!camera.invert_y);
        assert_eq!(camera.control_scheme, ControlScheme::Primary);
        assert_eq!(camera.look_mode, LookMode::ClickToPan);
        assert_eq!(camera.sensitivity_curve.len(), 2);
        assert!((camera.sensitivity_curve[0].out_tangent - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new())
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("boost: 3.5"));
        assert!(ron_str.contains("look_mode: ClickToPan"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.camera.look_mode = LookMode::AlwaysPan;
        config.camera.control_scheme = ControlScheme::Alternate;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(window: (width: 800))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_partial_camera_section() {
        let config: Config =
            ron::from_str("(camera: (invert_y: true, look_mode: AlwaysPan))").unwrap();
        assert!(config.camera.invert_y);
        assert_eq!(config.camera.look_mode, LookMode::AlwaysPan);
        assert!((config.camera.boost - 3.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_curve_key_tangents_optional() {
        let config: Config = ron::from_str(
            "(camera: (sensitivity_curve: [(time: 0.0, value: 1.0), (time: 2.0, value: 3.0)]))",
        )
        .unwrap();
        let keys = &config.camera.sensitivity_curve;
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1], CurveKey::new(2.0, 3.0, 0.0, 0.0));
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.camera.boost = 1.0;
        config.camera.invert_y = true;
        config.window.title = "Scene".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("flycam");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::path_in(&nested).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.rotation_lerp_time = 0.1;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap().unwrap();
        assert!((reloaded.camera.rotation_lerp_time - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path_in(dir.path()), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_reload_missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// flycam settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
