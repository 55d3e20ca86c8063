use base64::Engine as _;

use crate::error::AppError;

/// Decode a standard-alphabet base64 string into raw bytes.
///
/// Invalid characters or bad padding fail with the underlying decode error;
/// no partial buffer is ever produced.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, AppError> {
    Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
}

/// Planar multichannel audio: one `f32` plane per channel, values in [-1, 1],
/// plus the sample rate. All planes have the same length (the frame count).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from per-channel sample planes.
    #[allow(dead_code)]
    pub fn from_planes(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AppError> {
        if channels.is_empty() {
            return Err(AppError::Audio("sample buffer must have at least one channel".into()));
        }
        if channels.len() > usize::from(u16::MAX) {
            return Err(AppError::Audio("sample buffer channel count exceeds u16".into()));
        }
        if sample_rate == 0 {
            return Err(AppError::Audio("sample rate must be positive".into()));
        }
        let frame_count = channels[0].len();
        if channels.iter().any(|plane| plane.len() != frame_count) {
            return Err(AppError::Audio("channel planes must all have the same length".into()));
        }
        Ok(Self { channels, sample_rate })
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[allow(dead_code)]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn duration_secs(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate as f32
    }
}

/// Reinterpret raw bytes as interleaved signed 16-bit little-endian PCM and
/// normalize to floats.
///
/// `frame_count = floor(byte_len / 2 / channel_count)`; a trailing incomplete
/// frame (or odd byte) is dropped silently, and zero bytes yield a zero-frame
/// buffer rather than an error. Division by 32768 maps -32768 to exactly -1.0
/// and +32767 to just under +1.0.
pub fn interpret(bytes: &[u8], sample_rate: u32, channel_count: u16) -> Result<SampleBuffer, AppError> {
    if channel_count == 0 {
        return Err(AppError::Audio("PCM stream must have at least one channel".into()));
    }
    if sample_rate == 0 {
        return Err(AppError::Audio("PCM sample rate must be positive".into()));
    }

    let channel_count = usize::from(channel_count);
    let num_i16 = bytes.len() / 2;
    let frame_count = num_i16 / channel_count;

    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for frame in 0..frame_count {
        for (ch, plane) in channels.iter_mut().enumerate() {
            let offset = (frame * channel_count + ch) * 2;
            let value = i16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
            plane.push(f32::from(value) / 32768.0);
        }
    }

    Ok(SampleBuffer { channels, sample_rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_zero_frames() {
        let buffer = interpret(&[], 24000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.sample_rate(), 24000);
    }

    #[test]
    fn test_most_negative_sample_is_exactly_minus_one() {
        let buffer = interpret(&[0x00, 0x80], 24000, 1).unwrap();
        assert_eq!(buffer.channel(0), &[-1.0]);
    }

    #[test]
    fn test_most_positive_sample_is_just_under_one() {
        let buffer = interpret(&[0xFF, 0x7F], 24000, 1).unwrap();
        let sample = buffer.channel(0)[0];
        assert!(sample < 1.0);
        assert!(sample > 0.9999);
    }

    #[test]
    fn test_trailing_bytes_are_dropped() {
        // 5 bytes mono: two full frames, one dangling byte
        let buffer = interpret(&[0x00, 0x00, 0x00, 0x40, 0x7F], 24000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 2);

        // 6 bytes stereo: one full frame, one excess int16 slot
        let buffer = interpret(&[0x00, 0x10, 0x00, 0x20, 0x00, 0x30], 24000, 2).unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.channel_count(), 2);
    }

    #[test]
    fn test_stereo_deinterleave() {
        // Frames: (0x0100, 0x0200), (0x0300, 0x0400)
        let bytes = [0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04];
        let buffer = interpret(&bytes, 44100, 2).unwrap();
        assert_eq!(buffer.channel(0), &[256.0 / 32768.0, 768.0 / 32768.0]);
        assert_eq!(buffer.channel(1), &[512.0 / 32768.0, 1024.0 / 32768.0]);
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert!(matches!(interpret(&[0x00, 0x00], 24000, 0), Err(AppError::Audio(_))));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        assert!(matches!(interpret(&[0x00, 0x00], 0, 1), Err(AppError::Audio(_))));
    }

    #[test]
    fn test_decode_base64_known_bytes() {
        assert_eq!(decode_base64("AAD/fw==").unwrap(), vec![0x00, 0x00, 0xFF, 0x7F]);
    }

    #[test]
    fn test_decode_base64_invalid_character_fails() {
        assert!(matches!(decode_base64("AA!A"), Err(AppError::Decode(_))));
    }

    #[test]
    fn test_from_planes_rejects_ragged_channels() {
        let planes = vec![vec![0.0, 0.5], vec![0.0]];
        assert!(matches!(SampleBuffer::from_planes(planes, 24000), Err(AppError::Audio(_))));
    }
}
