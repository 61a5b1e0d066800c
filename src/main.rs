//! updatewatch CLI entry point.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use updatewatch::cli::{Cli, CommandDispatcher};
use updatewatch::config::AppPaths;
use updatewatch::report::{ReportTheme, Reporter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Terminal logs go to stderr so they never mix with reports. A log file,
/// when given, receives the same events without ANSI codes.
fn init_tracing(debug: bool, logfile: Option<File>) {
    let filter = if debug {
        EnvFilter::new("updatewatch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("updatewatch=warn"))
    };

    let file_layer = logfile.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .with(filter)
        .init();
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = match AppPaths::resolve(cli.dir.as_deref()) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let logfile = match &cli.log {
        Some(path) => {
            let path = path.as_deref().unwrap_or(paths.logfile.as_path());
            match open_log(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("Error: cannot open log file {}: {}", path.display(), e);
                    return ExitCode::from(1);
                }
            }
        }
        None => None,
    };

    init_tracing(cli.debug, logfile);

    tracing::debug!("updatewatch starting with args: {:?}", cli);

    let reporter = Reporter::new(ReportTheme::detect(cli.no_color));
    let dispatcher = CommandDispatcher::new(paths, reporter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match dispatcher.dispatch(&cli, &mut out) {
        Ok(result) => ExitCode::from(result.exit_status()),
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
