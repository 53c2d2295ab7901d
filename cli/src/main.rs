use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use voxbridge_engine::config::Config;
use voxbridge_engine::registry::EngineRegistry;

mod wav;

#[derive(Parser)]
#[command(name = "vxb")]
#[command(about = "Voxbridge CLI - load a speech model and transcribe audio")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (falls back to VOXB_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model, report its handle, and tear the instance down again
    Probe {
        /// Path to a Whisper GGML model file
        #[arg(long)]
        model: PathBuf,
    },
    /// Transcribe a 16kHz mono PCM16 WAV file
    Transcribe {
        /// Path to a Whisper GGML model file
        #[arg(long)]
        model: PathBuf,
        /// Path to the WAV file
        wav: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_from_env().unwrap_or_default(),
    };
    let registry = EngineRegistry::new(config.inference);

    match cli.command {
        Commands::Probe { model } => {
            tracing::info!(model = %model.display(), "Probing engine");
            let handle = registry
                .create_context(&model)
                .with_context(|| format!("Failed to load model: {}", model.display()))?;
            println!("engine ready (handle {})", handle.as_raw());

            registry.destroy_context(handle);
            println!("engine destroyed");
        }
        Commands::Transcribe { model, wav } => {
            let samples = wav::read_samples(&wav)?;
            tracing::info!(
                wav = %wav.display(),
                samples = samples.len(),
                "Read audio for transcription"
            );

            let handle = registry
                .create_context(&model)
                .with_context(|| format!("Failed to load model: {}", model.display()))?;
            let text = registry
                .transcribe(handle, &samples)
                .context("Transcription failed")?;

            println!("{}", text.trim());
            registry.destroy_context(handle);
        }
    }

    Ok(())
}
