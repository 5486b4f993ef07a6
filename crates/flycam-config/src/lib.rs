//! Configuration for the flycam workspace.
//!
//! Settings persist to disk as a RON file, accept CLI overrides via clap, and
//! tolerate missing or unknown fields so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, ControlScheme, CurveKey, DebugConfig, LookMode,
    WindowConfig,
};
pub use error::ConfigError;
