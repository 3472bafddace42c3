use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use tooltrack::core::config::{self, CliOverrides};
use tooltrack::core::state::App;
use tooltrack::tui;

#[derive(Parser)]
#[command(name = "tooltrack", about = "Track who borrowed which tool", version)]
struct Args {
    /// Directory holding the data file, history log and app log
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.tooltrack/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level for tooltrack.log
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tooltrack: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            data_dir: args.data_dir,
        },
    );

    if let Err(e) = fs::create_dir_all(&resolved.data_dir) {
        eprintln!(
            "tooltrack: cannot create data directory {}: {e}",
            resolved.data_dir.display()
        );
        return ExitCode::FAILURE;
    }

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let logging = File::create(&resolved.log_path).is_ok_and(|log_file| {
        WriteLogger::init(args.log_level, log_config, log_file).is_ok()
    });

    // Config was read before the logger existed
    for warning in &resolved.warnings {
        if logging {
            log::warn!("{}", warning);
        } else {
            eprintln!("tooltrack: {warning}");
        }
    }

    log::info!(
        "Tool Lending Tracker starting with data file {}",
        resolved.data_path.display()
    );

    let app = match App::from_config(&resolved) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to open store: {}", e);
            eprintln!("tooltrack: {e}");
            return ExitCode::FAILURE;
        }
    };

    match tui::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("tooltrack: {e}");
            ExitCode::FAILURE
        }
    }
}
