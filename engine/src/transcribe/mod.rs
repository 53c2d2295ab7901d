//! Speech-to-text engine backends.
//!
//! This module provides a trait abstraction over loaded recognition
//! engines and the whisper.cpp implementation.

use crate::config::InferenceConfig;
use crate::error::EngineError;

mod whisper;

pub use whisper::WhisperSpeechEngine;

/// A loaded speech recognition engine instance.
///
/// Implementations own the native resources behind one loaded model;
/// dropping the instance frees them.
pub trait SpeechEngine: Send {
    /// Transcribe audio samples into ordered text segments.
    ///
    /// # Arguments
    /// * `samples` - Audio samples as f32, expected to be 16kHz mono
    /// * `config` - Decoding settings for this call
    ///
    /// # Returns
    /// The text segments in utterance order, or an error if inference
    /// failed. No partial output is returned on failure.
    fn transcribe(
        &mut self,
        samples: &[f32],
        config: &InferenceConfig,
    ) -> Result<Vec<String>, EngineError>;
}
