//! Binary entry point: stdin or a file, through the line buffer, to stdout

use super::cli::{Args, FileConfig, Settings};
use super::error::AppError;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::metrics::api::get_metrics_registry;
use crate::tailer::api::{BufferError, BufferedTailer, ReaderTailer, Tailer};
use clap::Parser;
use std::process::ExitCode;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Parse arguments, set up logging and run until the input is exhausted
pub async fn startup() -> ExitCode {
    let args = Args::parse();

    // Logging is configured by these two steps, so report their failures directly
    let file_config = match FileConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let settings = match Settings::resolve(&args, file_config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_file = settings.log_file.as_ref().map(|p| p.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        Some(&settings.log_level),
        Some(&settings.log_format),
        log_file.as_deref(),
        settings.color,
    ) {
        eprintln!("Error: could not initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    log::debug!("Settings: {:?}", settings);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error_with_context(&e, "Forwarding lines");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), AppError> {
    let upstream: Box<dyn Tailer> = match &settings.input {
        Some(path) => Box::new(ReaderTailer::open(path).await?),
        None => Box::new(ReaderTailer::stdin()),
    };
    let mut buffered =
        BufferedTailer::with_registry(upstream, get_metrics_registry(), settings.buffer.clone())?;
    let mut lines = buffered
        .take_lines()
        .ok_or(BufferError::LinesUnavailable)?;

    let (shutdown, mut signals) = ShutdownCoordinator::new();
    shutdown.install_signal_handlers();

    let mut stdout = BufWriter::new(tokio::io::stdout());
    let mut written: u64 = 0;
    let mut upstream_errors = 0usize;
    let mut errors_open = true;
    let mut close_requested = false;

    loop {
        tokio::select! {
            next = lines.recv() => {
                let Some(line) = next else { break };
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                written += 1;

                if !settings.delay.is_zero() {
                    stdout.flush().await?;
                    tokio::time::sleep(settings.delay).await;
                } else if lines.is_empty() {
                    stdout.flush().await?;
                }
            }
            error = buffered.errors().recv(), if errors_open => match error {
                Some(e) => {
                    upstream_errors += 1;
                    log::error!("{}", e);
                }
                None => errors_open = false,
            },
            _ = signals.recv(), if !close_requested => {
                close_requested = true;
                buffered.close();
            }
        }
    }
    stdout.flush().await?;

    while let Ok(e) = buffered.errors().try_recv() {
        upstream_errors += 1;
        log::error!("{}", e);
    }

    let peak = buffered.peak_load().snapshot();
    log::info!(
        "Forwarded {} lines; peak buffer load {} (mean {:.1} over {} windows)",
        written,
        peak.max.unwrap_or(0.0),
        peak.mean(),
        peak.count
    );

    if upstream_errors > 0 {
        return Err(AppError::UpstreamFailed {
            count: upstream_errors,
        });
    }
    Ok(())
}
