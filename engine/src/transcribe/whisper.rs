//! Whisper engine backend.
//!
//! Uses whisper.cpp via whisper-rs for speech-to-text.

use super::SpeechEngine;
use crate::config::{InferenceConfig, SamplingMode};
use crate::error::EngineError;
use crate::pcm::EXPECTED_SAMPLE_RATE;
use std::path::Path;
use tracing::{debug, info};
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
};

/// Whisper speech engine instance.
///
/// Holds only the inference state - the state keeps the loaded model alive
/// internally, so dropping this struct releases the model and every other
/// native resource behind it. Hosts load and unload models across their own
/// lifecycle, so teardown has to actually free memory.
pub struct WhisperSpeechEngine {
    state: WhisperState,
}

impl WhisperSpeechEngine {
    /// Load a Whisper GGML model file into a ready engine instance.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = model_path.as_ref();
        info!(path = %path.display(), "Loading Whisper model");

        let path_str = path.to_str().ok_or_else(|| {
            EngineError::ModelLoad(format!("model path is not valid UTF-8: {}", path.display()))
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| EngineError::ModelLoad(e.to_string()))?;

        let state = ctx
            .create_state()
            .map_err(|e| EngineError::ModelLoad(e.to_string()))?;

        info!("Whisper model and state loaded");

        Ok(Self { state })
    }
}

impl SpeechEngine for WhisperSpeechEngine {
    fn transcribe(
        &mut self,
        samples: &[f32],
        config: &InferenceConfig,
    ) -> Result<Vec<String>, EngineError> {
        debug!(
            samples = samples.len(),
            duration_secs = samples.len() as f32 / EXPECTED_SAMPLE_RATE as f32,
            "Running Whisper inference"
        );

        let mut params = FullParams::new(match config.sampling {
            SamplingMode::Greedy => SamplingStrategy::Greedy { best_of: 1 },
            SamplingMode::BeamSearch => SamplingStrategy::BeamSearch {
                beam_size: 5,
                patience: -1.0,
            },
        });

        // "auto" selects whisper's language detection
        if config.language == "auto" {
            params.set_language(None);
        } else {
            params.set_language(Some(&config.language));
        }

        params.set_n_threads(config.threads);
        params.set_print_progress(config.print_progress);

        // Keep whisper.cpp off stdout; diagnostics flow through tracing
        params.set_print_special(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        self.state
            .full(params, samples)
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let num_segments = self.state.full_n_segments();
        let mut segments = Vec::new();

        for i in 0..num_segments {
            if let Some(segment) = self.state.get_segment(i) {
                if let Ok(text) = segment.to_str_lossy() {
                    segments.push(text.into_owned());
                }
            }
        }

        debug!(segments = segments.len(), "Inference complete");

        Ok(segments)
    }
}
