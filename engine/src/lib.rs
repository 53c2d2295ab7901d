//! Core engine library for voxbridge: a registry owning one long-lived
//! whisper.cpp instance, plus the configuration and conversion helpers
//! host integrations need around it.

pub mod config;
pub mod error;
pub mod pcm;
pub mod registry;
pub mod transcribe;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Application-specific environment variable for log filtering (overrides config).
const LOG_ENV_VAR: &str = "VOXB_LOG";

/// Install a tracing subscriber for hosts that do not bring their own.
///
/// Logs go to stderr without ANSI escapes so embedding runtimes can capture
/// them verbatim. Uses `try_init`, so a subscriber already installed by the
/// host process wins silently.
pub fn install_tracing(config: &config::LoggingConfig) -> anyhow::Result<()> {
    // VOXB_LOG env var overrides config level
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(config.level.as_directive().parse()?)
        .from_env()?;

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(filter)
        .try_init();

    // Route whisper.cpp and GGML logs through tracing
    whisper_rs::install_logging_hooks();

    Ok(())
}
