//! The binary entry point for the free-fly camera viewer.

use clap::Parser;
use flycam_app::platform::{AppError, PlatformDirs};
use flycam_app::window;
use flycam_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        error!("{e}");
        eprintln!("flycam: {e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve()?.with_config_dir(args.config.clone());
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    flycam_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), &config.debug);
    info!("Flycam starting");
    info!("  config: {}", dirs.config_dir.display());
    info!("  logs:   {}", dirs.log_dir.display());

    window::run(config, dirs.config_dir)
}
