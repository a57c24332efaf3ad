use clap::Parser;
use spendboard::args::{Args, Command};
use spendboard::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let json = args.common().json();
    let today = chrono::Local::now().date_naive();

    // This allows for running the program against demo data. When SPENDBOARD_IN_TEST_MODE is set
    // and non-zero in length, then the mode will be Mode::Testing, otherwise it will be
    // Mode::Files.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    match args.command() {
        Command::Init => commands::init(home).await?.emit(json),

        Command::Dashboard(dashboard_args) => {
            let config = Config::load(home).await?;
            commands::dashboard(&config, mode, dashboard_args, today)
                .await?
                .emit(json)
        }

        Command::Breakdown(breakdown_args) => {
            let config = Config::load(home).await?;
            commands::breakdown(&config, mode, breakdown_args, today)
                .await?
                .emit(json)
        }

        Command::Report(report_args) => {
            let config = Config::load(home).await?;
            commands::report(&config, mode, report_args, today)
                .await?
                .emit(json)
        }
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
