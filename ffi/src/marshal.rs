//! Buffer marshaling across the C boundary.
//!
//! Everything that crosses is copied: sample buffers and path strings are
//! copied in before the engine sees them, and result strings are copied
//! out into caller-owned allocations with a matching free. The caller may
//! release or reuse its own memory the moment a call returns.

use std::ffi::{CStr, CString, c_char, c_float};

/// Copy a caller-provided sample array into an owned buffer.
///
/// A null pointer or zero length yields an empty buffer; what the engine
/// makes of empty audio is the engine's business.
///
/// # Safety
/// If non-null, `samples` must be valid for reads of `n_samples` f32
/// values.
pub unsafe fn samples_from_raw(samples: *const c_float, n_samples: usize) -> Vec<f32> {
    if samples.is_null() || n_samples == 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(samples, n_samples) }.to_vec()
}

/// Copy a NUL-terminated C string into an owned Rust string.
///
/// Returns `None` for null pointers and non-UTF-8 content.
///
/// # Safety
/// If non-null, `raw` must point to a valid NUL-terminated C string.
pub unsafe fn string_from_raw(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(raw) }.to_str().ok().map(str::to_owned)
}

/// Move a result string into a caller-owned NUL-terminated allocation.
///
/// Interior NUL bytes are stripped so the conversion cannot fail; the
/// result must be released with [`free_text`].
pub fn text_into_raw(text: String) -> *mut c_char {
    let c_text = match CString::new(text) {
        Ok(c_text) => c_text,
        Err(err) => {
            let bytes: Vec<u8> = err.into_vec().into_iter().filter(|&b| b != 0).collect();
            CString::new(bytes).unwrap_or_default()
        }
    };
    c_text.into_raw()
}

/// Reclaim a string produced by [`text_into_raw`]. Null is ignored.
///
/// # Safety
/// `text` must be null or a pointer returned by [`text_into_raw`] that has
/// not been freed yet.
pub unsafe fn free_text(text: *mut c_char) {
    if text.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(text) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_samples_marshal_to_empty_buffer() {
        let samples = unsafe { samples_from_raw(std::ptr::null(), 16) };
        assert!(samples.is_empty());
    }

    #[test]
    fn zero_length_marshals_to_empty_buffer() {
        let source = [0.25f32; 4];
        let samples = unsafe { samples_from_raw(source.as_ptr(), 0) };
        assert!(samples.is_empty());
    }

    #[test]
    fn marshaled_samples_are_an_independent_copy() {
        let mut source = vec![0.1f32, -0.2, 0.3, -0.4];
        let samples = unsafe { samples_from_raw(source.as_ptr(), source.len()) };
        assert_eq!(samples, source);

        // Mutating the caller's buffer after the call leaves the copy intact
        source.fill(0.0);
        assert_eq!(samples, vec![0.1, -0.2, 0.3, -0.4]);
    }

    #[test]
    fn string_from_raw_handles_null_and_utf8() {
        assert_eq!(unsafe { string_from_raw(std::ptr::null()) }, None);

        let raw = CString::new("/models/ggml-base.bin").unwrap();
        let copied = unsafe { string_from_raw(raw.as_ptr()) };
        assert_eq!(copied.as_deref(), Some("/models/ggml-base.bin"));
    }

    #[test]
    fn string_from_raw_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe, 0x00];
        let copied = unsafe { string_from_raw(bytes.as_ptr().cast()) };
        assert_eq!(copied, None);
    }

    #[test]
    fn text_roundtrips_through_raw_pointer() {
        let raw = text_into_raw("Hello world".to_string());
        assert!(!raw.is_null());

        let text = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_string();
        assert_eq!(text, "Hello world");

        unsafe { free_text(raw) };
    }

    #[test]
    fn interior_nul_bytes_are_stripped() {
        let raw = text_into_raw("he\0llo".to_string());
        let text = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_string();
        assert_eq!(text, "hello");

        unsafe { free_text(raw) };
    }

    #[test]
    fn free_text_ignores_null() {
        unsafe { free_text(std::ptr::null_mut()) };
    }
}
