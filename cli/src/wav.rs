//! WAV ingestion for the CLI.
//!
//! The engine consumes 16kHz mono f32; anything else is rejected here with
//! an actionable message rather than producing garbage transcriptions.

use std::path::Path;

use anyhow::{Context, Result, bail};
use voxbridge_engine::pcm::{EXPECTED_SAMPLE_RATE, pcm16_to_f32};

/// Read a 16kHz mono PCM16 WAV file into normalized f32 samples.
pub fn read_samples(path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        bail!("Expected mono audio, found {} channels", spec.channels);
    }
    if spec.sample_rate != EXPECTED_SAMPLE_RATE {
        bail!(
            "Expected {}Hz audio, found {}Hz. Resample before transcribing.",
            EXPECTED_SAMPLE_RATE,
            spec.sample_rate
        );
    }
    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        bail!(
            "Expected 16-bit integer PCM, found {}-bit {:?}",
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to decode WAV samples")?;

    Ok(pcm16_to_f32(&samples))
}
