//! Raw PCM decoding
//!
//! The speech backend returns signed 16-bit little-endian PCM as base64.
//! These helpers turn that payload into a channel-separated
//! [`AudioSampleBuffer`] normalized to [-1.0, 1.0], and back into PCM
//! bytes for file output.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use domain::AudioSampleBuffer;

use crate::error::SpeechError;

/// Scale between 16-bit integer samples and normalized floats
pub const PCM16_SCALE: f32 = 32_768.0;

/// Decode a standard-alphabet base64 payload
///
/// # Errors
///
/// Returns `SpeechError::InvalidAudio` if the payload is not valid base64.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, SpeechError> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| SpeechError::InvalidAudio(format!("base64 decode failed: {e}")))
}

/// Append one zero byte when the length is odd
pub fn pad_to_even(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.len() % 2 != 0 {
        bytes.push(0);
    }
    bytes
}

/// Reinterpret bytes as little-endian `i16` samples
///
/// A trailing odd byte is ignored; call [`pad_to_even`] first to keep it.
pub fn bytes_to_i16(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Convert interleaved PCM16 bytes into a channel-separated sample buffer
///
/// The frame count is the number of whole frames; samples of a trailing
/// partial frame are dropped.
///
/// # Errors
///
/// Returns `SpeechError::InvalidAudio` if the sample rate or channel count
/// is zero.
pub fn pcm16le_to_buffer(
    bytes: Vec<u8>,
    sample_rate: u32,
    channels: u16,
) -> Result<AudioSampleBuffer, SpeechError> {
    if channels == 0 {
        return Err(SpeechError::InvalidAudio(
            "channel count must be greater than 0".to_string(),
        ));
    }

    let samples = bytes_to_i16(&pad_to_even(bytes));
    let channel_count = usize::from(channels);
    let frame_count = samples.len() / channel_count;

    let data: Vec<Vec<f32>> = (0..channel_count)
        .map(|channel| {
            (0..frame_count)
                .map(|frame| f32::from(samples[frame * channel_count + channel]) / PCM16_SCALE)
                .collect()
        })
        .collect();

    AudioSampleBuffer::new(sample_rate, data).map_err(|e| SpeechError::InvalidAudio(e.to_string()))
}

/// Decode a base64 PCM16 payload into a sample buffer
///
/// # Errors
///
/// Returns `SpeechError::InvalidAudio` on malformed base64 or invalid
/// buffer parameters.
pub fn decode_pcm16_base64(
    payload: &str,
    sample_rate: u32,
    channels: u16,
) -> Result<AudioSampleBuffer, SpeechError> {
    pcm16le_to_buffer(decode_base64(payload)?, sample_rate, channels)
}

/// Quantize a normalized sample to 16 bits
#[allow(clippy::cast_possible_truncation)]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM16_SCALE)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Interleaved 16-bit samples of a buffer
pub fn buffer_to_i16(buffer: &AudioSampleBuffer) -> Vec<i16> {
    buffer.interleaved().into_iter().map(f32_to_i16).collect()
}

/// Interleaved little-endian PCM16 bytes of a buffer
pub fn buffer_to_pcm16le(buffer: &AudioSampleBuffer) -> Vec<u8> {
    buffer_to_i16(buffer)
        .into_iter()
        .flat_map(i16::to_le_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn odd_length_is_padded() {
        let padded = pad_to_even(vec![1, 2, 3, 4, 5]);
        assert_eq!(padded, vec![1, 2, 3, 4, 5, 0]);
        assert_eq!(pad_to_even(vec![1, 2]), vec![1, 2]);
        assert!(pad_to_even(Vec::new()).is_empty());
    }

    #[test]
    fn five_bytes_yield_three_samples() {
        let buffer = pcm16le_to_buffer(vec![0x00, 0x40, 0x00, 0xC0, 0x7F], 24_000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 3);
        let samples = buffer.channel(0).unwrap();
        assert!((samples[0] - 0.5).abs() < f32::EPSILON);
        assert!((samples[1] + 0.5).abs() < f32::EPSILON);
        assert!((samples[2] - 127.0 / PCM16_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn extremes_map_into_unit_range() {
        let bytes = [i16::MIN.to_le_bytes(), i16::MAX.to_le_bytes(), 0i16.to_le_bytes()].concat();
        let buffer = pcm16le_to_buffer(bytes, 24_000, 1).unwrap();
        let samples = buffer.channel(0).unwrap();
        assert!((samples[0] + 1.0).abs() < f32::EPSILON);
        assert!(samples[1] < 1.0 && samples[1] > 0.999);
        assert!(samples[2].abs() < f32::EPSILON);
    }

    #[test]
    fn stereo_is_deinterleaved() {
        let samples: [i16; 4] = [16_384, -16_384, 8_192, -8_192];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let buffer = pcm16le_to_buffer(bytes, 48_000, 2).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channel(0).unwrap(), &[0.5, 0.25]);
        assert_eq!(buffer.channel(1).unwrap(), &[-0.5, -0.25]);
    }

    #[test]
    fn partial_frame_is_dropped() {
        let samples: [i16; 3] = [1, 2, 3];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let buffer = pcm16le_to_buffer(bytes, 24_000, 2).unwrap();
        assert_eq!(buffer.frame_count(), 1);
    }

    #[test]
    fn empty_payload_yields_empty_buffer() {
        let buffer = decode_pcm16_base64("", 24_000, 1).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn invalid_base64_is_invalid_audio() {
        let err = decode_base64("not*base64!").unwrap_err();
        assert!(matches!(err, SpeechError::InvalidAudio(_)));
    }

    #[test]
    fn zero_channels_rejected() {
        assert!(pcm16le_to_buffer(vec![0, 0], 24_000, 0).is_err());
        assert!(pcm16le_to_buffer(vec![0, 0], 0, 1).is_err());
    }

    #[test]
    fn base64_payload_decodes() {
        let bytes: Vec<u8> = [1000i16, -1000].iter().flat_map(|s| s.to_le_bytes()).collect();
        let payload = STANDARD.encode(&bytes);
        let buffer = decode_pcm16_base64(&payload, 24_000, 1).unwrap();
        assert_eq!(buffer_to_i16(&buffer), vec![1000, -1000]);
        assert_eq!(buffer_to_pcm16le(&buffer), bytes);
    }

    #[test]
    fn f32_to_i16_clamps() {
        assert_eq!(f32_to_i16(2.0), i16::MAX);
        assert_eq!(f32_to_i16(-2.0), i16::MIN);
        assert_eq!(f32_to_i16(0.0), 0);
    }

    proptest! {
        #[test]
        fn pcm_round_trip_within_one_step(samples in proptest::collection::vec(any::<i16>(), 0..512)) {
            let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
            let buffer = pcm16le_to_buffer(bytes, 24_000, 1).unwrap();
            let decoded = buffer.channel(0).unwrap();

            for (original, value) in samples.iter().zip(decoded) {
                prop_assert!((-1.0..1.0).contains(value));
                let expected = f32::from(*original) / PCM16_SCALE;
                prop_assert!((value - expected).abs() <= 1.0 / PCM16_SCALE);
            }
            prop_assert_eq!(buffer_to_i16(&buffer), samples);
        }

        #[test]
        fn waveform_survives_pcm16_within_one_step(
            left in proptest::collection::vec(-1.0f32..=1.0, 1..256),
            channels in 1u16..=2,
        ) {
            let channel_count = usize::from(channels);
            let waveform = AudioSampleBuffer::new(24_000, vec![left; channel_count]).unwrap();

            let bytes = buffer_to_pcm16le(&waveform);
            prop_assert_eq!(bytes.len(), waveform.frame_count() * channel_count * 2);

            let restored = pcm16le_to_buffer(bytes, 24_000, channels).unwrap();
            prop_assert_eq!(restored.frame_count(), waveform.frame_count());

            for index in 0..channel_count {
                let before = waveform.channel(index).unwrap();
                let after = restored.channel(index).unwrap();
                for (a, b) in before.iter().zip(after) {
                    prop_assert!((a - b).abs() <= 1.0 / PCM16_SCALE, "{a} -> {b}");
                }
            }
        }
    }

    #[test]
    fn full_scale_waveform_stays_within_one_step() {
        let waveform = AudioSampleBuffer::new(24_000, vec![vec![1.0, -1.0, 0.5]]).unwrap();
        let restored = pcm16le_to_buffer(buffer_to_pcm16le(&waveform), 24_000, 1).unwrap();
        let samples = restored.channel(0).unwrap();

        assert!((samples[0] - 1.0).abs() <= 1.0 / PCM16_SCALE);
        assert!((samples[1] + 1.0).abs() < f32::EPSILON);
        assert!((samples[2] - 0.5).abs() < f32::EPSILON);
    }
}
