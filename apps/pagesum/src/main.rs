//! pagesum - concurrently fetch a set of pages and report their sizes
//!
//! The CLI is the control surface of the fetch engine: it triggers batch
//! runs on the coordinator and owns the single consumer loop that renders
//! report events as they arrive.

mod cli;
mod display;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::{render_urls, ConsoleSink};
use crate::error::CliError;
use crate::logging::log_event_with_tracing;
use clap::Parser;
use pagesum_batch::BatchCoordinator;
use pagesum_config::{doc_urls, Config};
use pagesum_errors::{BatchError, Error};
use pagesum_events::{EventMessage, EventReceiver, ReportSink, Reporter};
use pagesum_net::{NetClient, NetConfig};
use pagesum_types::{BatchResult, ColorChoice, OutputFormat};
use std::future::Future;
use std::io;
use std::process;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting pagesum v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    let json = config.general.default_output == OutputFormat::Json;
    let urls = doc_urls();

    let repeat = match cli.command {
        Commands::Urls => {
            render_urls(&urls, json)?;
            return Ok(());
        }
        Commands::Run { repeat: 0 } => {
            return Err(CliError::InvalidArguments(
                "--repeat must be at least 1".to_string(),
            ));
        }
        Commands::Run { repeat } => Some(repeat),
        Commands::Watch => None,
    };

    // One client for the whole process
    let client = NetClient::new(NetConfig::from(&config.network))?;
    let (reporter, mut receiver) = Reporter::channel();
    let coordinator = Arc::new(BatchCoordinator::new(Arc::new(client), reporter));

    let mut sink = ConsoleSink::new(io::stdout(), json, colors_enabled(&config));

    match repeat {
        Some(repeat) => {
            let runs = run_batches(&coordinator, &urls, repeat);
            execute_with_events(runs, &mut receiver, &mut sink).await?;
        }
        None => {
            let mut sink = sink.interactive();
            watch(&coordinator, urls, &mut receiver, &mut sink).await?;
        }
    }

    info!("Command completed successfully");
    Ok(())
}

/// Run `repeat` batches back to back
async fn run_batches(
    coordinator: &BatchCoordinator,
    urls: &[String],
    repeat: u32,
) -> Result<(), CliError> {
    for run in 1..=repeat {
        let result = coordinator.run_batch(urls).await?;
        info!(
            run,
            total_bytes = result.total_bytes,
            failed = result.failed(),
            "batch finished"
        );
    }
    Ok(())
}

/// Drive a command future while delivering report events as they arrive
async fn execute_with_events<F, S>(
    command: F,
    receiver: &mut EventReceiver,
    sink: &mut S,
) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
    S: ReportSink,
{
    let mut command_future = Box::pin(command);

    loop {
        select! {
            // Command completed
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(message) = receiver.try_recv() {
                    deliver(sink, &message)?;
                }
                return result;
            }

            // Event received
            message = receiver.recv() => {
                match message {
                    Some(message) => deliver(sink, &message)?,
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

/// Interactive loop: Enter triggers a batch, `q` quits
///
/// Input arriving while a batch is running is rejected by the coordinator
/// and answered with a notice instead of a second run. `q` aborts a run in
/// flight; end of input waits for it and prints its report.
async fn watch<W: io::Write>(
    coordinator: &Arc<BatchCoordinator>,
    urls: Vec<String>,
    receiver: &mut EventReceiver,
    sink: &mut ConsoleSink<W>,
) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current: Option<JoinHandle<BatchResult>> = None;
    let mut stdin_closed = false;

    sink.notice("Press Enter to start a batch, q to quit.")?;

    loop {
        select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    stdin_closed = true;
                    break;
                };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                match coordinator.start_batch(urls.clone()) {
                    Ok(handle) => current = Some(handle),
                    Err(Error::Batch(BatchError::AlreadyRunning)) => {
                        sink.notice("A batch is already running; wait for it to complete.")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            message = receiver.recv() => {
                match message {
                    Some(message) => deliver(sink, &message)?,
                    None => break,
                }
            }
        }
    }

    let Some(handle) = current else {
        return Ok(());
    };

    if stdin_closed {
        // Input ended (e.g. piped): let the last run finish and print it
        let last_run = async {
            handle
                .await
                .map(|_| ())
                .map_err(|e| CliError::Core(Error::internal(format!("batch run failed: {e}"))))
        };
        execute_with_events(last_run, receiver, sink).await?;
    } else if !handle.is_finished() {
        info!("quitting with a batch in flight; aborting it");
        handle.abort();
    }
    Ok(())
}

fn deliver<S: ReportSink + ?Sized>(sink: &mut S, message: &EventMessage) -> Result<(), CliError> {
    log_event_with_tracing(message);
    sink.deliver(message)?;
    Ok(())
}

fn colors_enabled(config: &Config) -> bool {
    match config.general.default_output {
        OutputFormat::Json | OutputFormat::Plain => false,
        OutputFormat::Tty => match config.general.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
        },
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "pagesum-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,pagesum=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
}
