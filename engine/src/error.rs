//! Error types for engine lifecycle and transcription.

use thiserror::Error;

/// Errors produced by the engine registry and its backends.
///
/// Every variant is recoverable: the registry stays usable after any of
/// them, and the caller may simply retry or load another model.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The model file could not be loaded into a usable engine instance.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// No active engine instance matches the presented handle.
    #[error("no active engine instance for handle")]
    MissingContext,

    /// The engine accepted the audio but inference failed.
    #[error("inference failed: {0}")]
    Inference(String),
}
