//! yalda-relay binary entry point.

use std::process::ExitCode;

use tracing::{error, info};
use yalda_relay::api::{serve, AppState};
use yalda_relay::cli::{parse_args, print_help, print_version};
use yalda_relay::config::Config;
use yalda_relay::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'yalda-relay --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if logging::init_with_filter(config.log_filter()).is_err() {
        eprintln!("warning: logging was already initialized");
    }

    info!("yalda-relay v{}", env!("CARGO_PKG_VERSION"));

    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        model = %config.completion.model,
        workers = state.pool.worker_count(),
        "relay initialized"
    );

    let pool = state.pool.clone();
    let served = serve(server_config, state).await;

    // Finish every acknowledged job before the runtime is dropped
    if let Err(e) = pool.shutdown().await {
        error!("{}", e);
    }

    if let Err(e) = served {
        error!("server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
