//! Engine instance registry: the lifecycle boundary around the native engine.
//!
//! The registry owns at most one live engine instance at a time, guarded by
//! a mutex. Callers hold opaque handles; every operation validates its
//! handle against the active instance before any native resource is
//! touched, so stale or forged handles degrade to well-defined errors
//! instead of dangling-pointer use.

use crate::config::InferenceConfig;
use crate::error::EngineError;
use crate::transcribe::{SpeechEngine, WhisperSpeechEngine};
use std::num::NonZeroU64;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Opaque identifier for a loaded engine instance.
///
/// The raw form is a `u64` where 0 is reserved as the load-failure
/// sentinel, so a valid handle is always non-zero. Ids are never reused:
/// a handle left over from a destroyed or replaced instance can never
/// collide with a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(NonZeroU64);

impl EngineHandle {
    /// Raw non-zero value, for transport across a C boundary.
    pub fn as_raw(self) -> u64 {
        self.0.get()
    }

    /// Reconstruct a handle from its raw value. The sentinel 0 yields `None`.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

/// The live engine instance together with the id its handle must carry.
struct ActiveEngine {
    id: NonZeroU64,
    engine: Box<dyn SpeechEngine>,
}

/// Registry owning the single active engine instance.
///
/// All operations serialize on the slot mutex, so at most one native call
/// is in flight at any time. In particular, `destroy_context` requested
/// while a transcription is running blocks until that inference completes,
/// then tears down.
pub struct EngineRegistry {
    slot: Mutex<Option<ActiveEngine>>,
    next_id: AtomicU64,
    config: InferenceConfig,
}

impl EngineRegistry {
    /// Create an empty registry using `config` for every transcription.
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            slot: Mutex::new(None),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    /// Load a model from `model_path` and install it as the active instance.
    ///
    /// Any previously active instance is replaced and its native resources
    /// freed. On failure the previous instance is left untouched and the
    /// error describes the load problem.
    pub fn create_context(
        &self,
        model_path: impl AsRef<Path>,
    ) -> Result<EngineHandle, EngineError> {
        let path = model_path.as_ref();
        let mut slot = self.lock_slot();

        let engine = match WhisperSpeechEngine::load(path) {
            Ok(engine) => engine,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Engine creation failed");
                return Err(e);
            }
        };

        Ok(Self::install(&mut slot, self.next_handle(), Box::new(engine)))
    }

    /// Install an already-loaded engine as the active instance.
    ///
    /// This is the seam for alternative backends; `create_context` goes
    /// through it after loading a Whisper model.
    pub fn install_engine(&self, engine: Box<dyn SpeechEngine>) -> EngineHandle {
        let mut slot = self.lock_slot();
        Self::install(&mut slot, self.next_handle(), engine)
    }

    /// Transcribe `samples` with the engine instance behind `handle`.
    ///
    /// The samples must be mono f32 at 16kHz. Segments are concatenated in
    /// utterance order with no separator; on failure no partial text is
    /// returned. The slot lock is held for the whole native call.
    pub fn transcribe(
        &self,
        handle: EngineHandle,
        samples: &[f32],
    ) -> Result<String, EngineError> {
        let mut slot = self.lock_slot();
        let active = slot
            .as_mut()
            .filter(|active| active.id == handle.0)
            .ok_or(EngineError::MissingContext)?;

        debug!(
            handle = handle.as_raw(),
            samples = samples.len(),
            "Transcribing audio"
        );

        let segments = match active.engine.transcribe(samples, &self.config) {
            Ok(segments) => segments,
            Err(e) => {
                error!(handle = handle.as_raw(), error = %e, "Transcription failed");
                return Err(e);
            }
        };

        let mut result = String::new();
        for segment in &segments {
            result.push_str(segment);
        }

        debug!(
            handle = handle.as_raw(),
            segments = segments.len(),
            text_len = result.len(),
            "Transcription complete"
        );

        Ok(result)
    }

    /// Release the engine instance behind `handle`, freeing its resources.
    ///
    /// Idempotent: destroying an already-destroyed, replaced, or never
    /// valid handle is a logged no-op. A stale handle never tears down a
    /// newer instance.
    pub fn destroy_context(&self, handle: EngineHandle) {
        let mut slot = self.lock_slot();
        if slot.as_ref().is_some_and(|active| active.id == handle.0) {
            // Dropping the instance frees the native resources
            *slot = None;
            info!(handle = handle.as_raw(), "Engine instance destroyed");
        } else {
            debug!(handle = handle.as_raw(), "Ignoring destroy for inactive handle");
        }
    }

    /// Handle of the currently active instance, if any.
    pub fn active_handle(&self) -> Option<EngineHandle> {
        self.lock_slot().as_ref().map(|active| EngineHandle(active.id))
    }

    /// Whether `handle` refers to the currently active instance.
    pub fn is_active(&self, handle: EngineHandle) -> bool {
        self.active_handle() == Some(handle)
    }

    fn install(
        slot: &mut Option<ActiveEngine>,
        handle: EngineHandle,
        engine: Box<dyn SpeechEngine>,
    ) -> EngineHandle {
        if let Some(previous) = slot.replace(ActiveEngine {
            id: handle.0,
            engine,
        }) {
            warn!(
                stale = previous.id.get(),
                handle = handle.as_raw(),
                "Replaced previous engine instance"
            );
        }
        info!(handle = handle.as_raw(), "Engine instance active");
        handle
    }

    fn next_handle(&self) -> EngineHandle {
        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and only climbs
        EngineHandle(NonZeroU64::new(raw).expect("handle id overflow"))
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<ActiveEngine>> {
        // A panicked operation leaves the Option coherent; keep serving
        // rather than poisoning every later destroy.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
