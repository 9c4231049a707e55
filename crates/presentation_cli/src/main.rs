//! Clausewise CLI
//!
//! Analyzes legal documents for risky clauses and optionally narrates the
//! summary into a WAV file.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use ai_core::{GeminiClient, build_request_config};
use ai_speech::{AudioOutput, PlaybackCoordinator, SpeechError};
use anyhow::{Context, Result, anyhow};
use application::{AnalysisPort, AnalysisService, ApplicationError, NarrationService};
use clap::Parser;
use infrastructure::{
    AppConfig, CoordinatorPlaybackAdapter, GeminiAnalysisAdapter, JinaReaderAdapter, LogFormat,
    RetryingAnalysisAdapter, SpeechAdapter,
};
use presentation_cli::{AnalyzeArgs, Cli, Commands, JsonReport, WavFileOutput, render_report};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(cli.verbose, config.log_format);

    match cli.command {
        Commands::Analyze(args) => match analyze(config, &args).await {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(e) => match e.downcast_ref::<ApplicationError>() {
                Some(app) => {
                    eprintln!("❌ Failed at {} stage: {app}", app.stage());
                    Ok(ExitCode::FAILURE)
                },
                None => Err(e),
            },
        },

        Commands::Schema { mode } => {
            let request = build_request_config(mode, &config.gemini);
            println!("{}", serde_json::to_string_pretty(&request.describe())?);
            Ok(ExitCode::SUCCESS)
        },

        Commands::Config => {
            print!("{}", config.to_redacted_toml()?);
            Ok(ExitCode::SUCCESS)
        },
    }
}

async fn analyze(mut config: AppConfig, args: &AnalyzeArgs) -> Result<()> {
    if let Some(retries) = args.retries {
        config.retry.max_retries = retries;
    }
    config.validate().map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    let source = args.document_source(&mut std::io::stdin().lock())?;

    let backend = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let mut analysis: Arc<dyn AnalysisPort> = Arc::new(GeminiAnalysisAdapter::with_backend(
        backend.clone(),
        config.gemini.clone(),
    ));
    if config.retry.is_enabled() {
        analysis = Arc::new(RetryingAnalysisAdapter::new(analysis, config.retry.clone()));
    }

    let extraction = Arc::new(JinaReaderAdapter::new(config.extraction.clone())?);
    let service = AnalysisService::new(analysis)
        .with_extraction(extraction, config.extraction.min_text_chars);

    let outcome = service.analyze(&source, args.mode).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&JsonReport::new(&outcome))?);
    } else {
        print!("{}", render_report(&outcome));
    }

    if let Some(path) = &args.wav_out {
        let speech = SpeechAdapter::new(backend, config.speech.clone())?;
        narrate_to_wav(speech, &outcome.result.summary, path).await?;
    }

    Ok(())
}

async fn narrate_to_wav(speech: SpeechAdapter, summary: &str, path: &Path) -> Result<()> {
    let output = Arc::new(WavFileOutput::new(path));
    let device = Arc::clone(&output);
    let coordinator = Arc::new(PlaybackCoordinator::new(
        move || -> Result<Arc<dyn AudioOutput>, SpeechError> {
            Ok(Arc::clone(&device) as Arc<dyn AudioOutput>)
        },
    ));

    let narration = NarrationService::new(
        Arc::new(speech),
        Arc::new(CoordinatorPlaybackAdapter::new(Arc::clone(&coordinator))),
    );
    let narrated = narration.narrate_to_end(summary).await?;
    coordinator.release().await?;

    if let Some(err) = output.take_error() {
        return Err(ApplicationError::Playback(err).into());
    }

    info!(frames = output.frames_written(), "Narration complete");
    eprintln!(
        "🔊 Summary narrated to {} ({:.1} s)",
        path.display(),
        narrated.duration.as_secs_f64()
    );
    Ok(())
}
