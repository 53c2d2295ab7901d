//! PCM sample conversion for host integrations.
//!
//! Recording layers typically hand over signed 16-bit PCM; the engine
//! consumes normalized f32 mono at 16kHz. These helpers perform that
//! conversion on the host side, before samples cross into the registry.

/// Sample rate the speech engine expects, in Hz.
pub const EXPECTED_SAMPLE_RATE: u32 = 16000;

/// Convert signed 16-bit PCM samples to normalized f32 in [-1.0, 1.0).
pub fn pcm16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

/// Flatten recorded PCM16 chunks into a single normalized f32 buffer.
///
/// Chunk order is preserved; this is the shape capture layers deliver
/// audio in (one chunk per read from the recorder).
pub fn pcm16_chunks_to_f32(chunks: &[Vec<i16>]) -> Vec<f32> {
    let total = chunks.iter().map(Vec::len).sum();
    let mut samples = Vec::with_capacity(total);
    for chunk in chunks {
        samples.extend(chunk.iter().map(|&s| s as f32 / 32768.0));
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_full_scale_values() {
        let samples = pcm16_to_f32(&[0, i16::MIN, 16384]);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], -1.0);
        assert_eq!(samples[2], 0.5);
    }

    #[test]
    fn positive_full_scale_stays_below_one() {
        let samples = pcm16_to_f32(&[i16::MAX]);
        assert!(samples[0] < 1.0);
        assert!(samples[0] > 0.999);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(pcm16_to_f32(&[]).is_empty());
        assert!(pcm16_chunks_to_f32(&[]).is_empty());
    }

    #[test]
    fn chunks_flatten_in_order() {
        let chunks = vec![vec![0i16, 16384], vec![-16384], vec![]];
        let samples = pcm16_chunks_to_f32(&chunks);
        assert_eq!(samples, vec![0.0, 0.5, -0.5]);
    }
}
