use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use xo_user::core::config::{self, CliOverrides, XoConfig};
use xo_user::core::status;
use xo_user::tui;

#[derive(Parser)]
#[command(
    name = "xo-user",
    about = "Watch and control the kxo kernel tic-tac-toe game",
    after_help = "Keys:\n  Ctrl-P  Toggle board display\n  Ctrl-Q  Stop the game and exit"
)]
struct Args {
    /// Game device to read board frames from
    #[arg(long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Control attribute file
    #[arg(long, value_name = "PATH")]
    attr: Option<PathBuf>,

    /// Module status file
    #[arg(long, value_name = "PATH")]
    status: Option<PathBuf>,

    /// Log file (the terminal itself is used for the board)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (file_config, origin) = match config::load_config() {
        Ok((config, origin)) => (config, Ok(origin)),
        Err(e) => {
            eprintln!("{e}; using defaults");
            (XoConfig::default(), Err(e))
        }
    };
    let cli = CliOverrides {
        status_file: args.status,
        device_file: args.device,
        attr_file: args.attr,
        log_file: args.log_file,
        verbose: args.verbose,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger; stdout belongs to the board
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config was read before the logger existed; report it now
    match &origin {
        Ok(origin) => origin.log(),
        Err(e) => log::warn!("{e}; using defaults"),
    }
    log::debug!("Config: {:?}", file_config);
    if let Some(level) = &resolved.unknown_log_level {
        log::warn!("Unknown log level {:?}, using default", level);
    }

    log::info!("xo-user starting up with device {}", resolved.device_file.display());

    if let Err(e) = status::check(&resolved.status_file) {
        println!("{e}");
        return ExitCode::FAILURE;
    }

    match tui::run(&resolved) {
        Ok(exit) => {
            log::info!("Exiting after {:?}", exit);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
