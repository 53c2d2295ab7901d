//! C ABI for embedding the voxbridge engine in a managed runtime.
//!
//! A host loads this library once, creates an engine instance from a model
//! path, and then calls transcribe repeatedly with raw sample buffers.
//! Failures never cross the boundary as unwinds: context creation reports
//! failure through the 0 sentinel, transcription through descriptive result
//! strings, and every export is panic-proof.

pub mod marshal;

use std::ffi::{c_char, c_float};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;

use tracing::error;
use voxbridge_engine::config::Config;
use voxbridge_engine::error::EngineError;
use voxbridge_engine::registry::{EngineHandle, EngineRegistry};

/// Sentinel handle value reported when context creation fails.
const INVALID_HANDLE: u64 = 0;

/// Result text when transcription runs without an active engine instance.
const MODEL_MISSING_TEXT: &str = "model missing";

/// Result text when the engine fails while processing audio.
const CONVERSION_FAILED_TEXT: &str = "conversion failed";

/// The process-wide registry behind all exports.
///
/// Configured once on first touch, from the file named by `VOXB_CONFIG`
/// when that is set. Tracing is installed at the same time unless the host
/// already brought a subscriber.
static REGISTRY: LazyLock<EngineRegistry> = LazyLock::new(|| {
    let config = Config::load_from_env().unwrap_or_default();
    let _ = voxbridge_engine::install_tracing(&config.logging);
    EngineRegistry::new(config.inference)
});

/// Run an export body, turning any panic into `fallback`.
fn catch_panic<T>(op: &'static str, fallback: impl FnOnce() -> T, body: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            error!(op, "Caught panic at the boundary");
            fallback()
        }
    }
}

/// Load a model and return the handle of the new engine instance.
///
/// Returns 0 when the path is null, not valid UTF-8, or the model cannot
/// be loaded. A successful call replaces (and frees) any previously active
/// instance; its old handle goes stale.
///
/// # Safety
/// `model_path` must be null or a valid NUL-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn voxbridge_create_context(model_path: *const c_char) -> u64 {
    catch_panic("create_context", || INVALID_HANDLE, || {
        let Some(path) = (unsafe { marshal::string_from_raw(model_path) }) else {
            return INVALID_HANDLE;
        };
        match REGISTRY.create_context(&path) {
            Ok(handle) => handle.as_raw(),
            Err(_) => INVALID_HANDLE,
        }
    })
}

/// Destroy the engine instance behind `handle`, freeing its resources.
///
/// Idempotent and always safe: the sentinel 0, a stale handle, or a handle
/// that was already destroyed are all no-ops. If a transcription is in
/// flight, this blocks until it completes and then tears down.
#[unsafe(no_mangle)]
pub extern "C" fn voxbridge_destroy_context(handle: u64) {
    catch_panic("destroy_context", || (), || {
        if let Some(handle) = EngineHandle::from_raw(handle) {
            REGISTRY.destroy_context(handle);
        }
    });
}

/// Transcribe `n_samples` f32 samples with the engine behind `handle`.
///
/// The samples are copied before use; the caller may free or reuse its
/// buffer as soon as this returns. The result is always a non-null,
/// NUL-terminated UTF-8 string owned by the caller; release it with
/// [`voxbridge_free_text`]. Without a matching active instance the text is
/// `"model missing"`; when the engine fails it is `"conversion failed"`.
///
/// # Safety
/// `samples` must be null or valid for reads of `n_samples` f32 values.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn voxbridge_transcribe(
    handle: u64,
    samples: *const c_float,
    n_samples: usize,
) -> *mut c_char {
    catch_panic(
        "transcribe",
        || marshal::text_into_raw(CONVERSION_FAILED_TEXT.to_string()),
        || {
            let audio = unsafe { marshal::samples_from_raw(samples, n_samples) };
            let text = match EngineHandle::from_raw(handle) {
                Some(handle) => match REGISTRY.transcribe(handle, &audio) {
                    Ok(text) => text,
                    Err(EngineError::MissingContext) => MODEL_MISSING_TEXT.to_string(),
                    Err(_) => CONVERSION_FAILED_TEXT.to_string(),
                },
                None => MODEL_MISSING_TEXT.to_string(),
            };
            marshal::text_into_raw(text)
        },
    )
}

/// Release a string returned by [`voxbridge_transcribe`]. Null is ignored.
///
/// # Safety
/// `text` must be null or a pointer previously returned by this library
/// that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn voxbridge_free_text(text: *mut c_char) {
    catch_panic("free_text", || (), || unsafe { marshal::free_text(text) });
}
