//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ControlScheme, LookMode};

/// Flycam command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "flycam", about = "Smoothed free-fly camera viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Initial translation boost exponent.
    #[arg(long, allow_negative_numbers = true)]
    pub boost: Option<f32>,

    /// Invert the mouse Y axis.
    #[arg(long)]
    pub invert_y: bool,

    /// Rotate whenever the mouse moves instead of only while right-dragging.
    #[arg(long)]
    pub always_pan: bool,

    /// Use C/R instead of Q/E for down/up.
    #[arg(long)]
    pub alternate_controls: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config. Switch flags only ever turn a
    /// feature on; leaving them off keeps the file's value.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(boost) = args.boost {
            self.camera.boost = boost;
        }
        if args.invert_y {
            self.camera.invert_y = true;
        }
        if args.always_pan {
            self.camera.look_mode = LookMode::AlwaysPan;
        }
        if args.alternate_controls {
            self.camera.control_scheme = ControlScheme::Alternate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
