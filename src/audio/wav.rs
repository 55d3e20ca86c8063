use crate::audio::pcm::SampleBuffer;
use crate::error::AppError;

/// Serialize a sample buffer into a PCM WAV byte stream (16-bit, little-endian).
///
/// The stream is a fixed 44-byte RIFF/WAVE/fmt/data header followed by the
/// interleaved samples, frame-major, channel-minor. Floats are clamped to
/// [-1, 1], scaled by 32767 and truncated toward zero. Fails with a capacity
/// error when the encoded size would not fit the 32-bit RIFF size fields.
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>, AppError> {
    let num_channels = buffer.channel_count() as u16;
    let bits_per_sample: u16 = 16;
    let sample_rate = buffer.sample_rate();

    let num_samples = (buffer.frame_count() as u64) * u64::from(num_channels);
    let data_size = num_samples * 2;
    if data_size > u64::from(u32::MAX) - 36 {
        return Err(AppError::Capacity(format!(
            "{data_size} data bytes exceed the RIFF 32-bit size limit"
        )));
    }
    let data_size = data_size as u32;
    let file_size = 36 + data_size;
    let byte_rate = sample_rate * 2 * u32::from(num_channels);
    let block_align = num_channels * 2;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // sub-chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&num_channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data sub-chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for frame in 0..buffer.frame_count() {
        for channel in buffer.channels() {
            let clamped = channel[frame].clamp(-1.0, 1.0);
            let quantized = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&quantized.to_le_bytes());
        }
    }

    Ok(buf)
}

/// RMS level across all channels of a buffer, normalized to 0.0-1.0.
pub fn rms_level(buffer: &SampleBuffer) -> f32 {
    let total = buffer.frame_count() * buffer.channel_count();
    if total == 0 {
        return 0.0;
    }
    let sum_sq: f64 = buffer
        .channels()
        .iter()
        .flat_map(|plane| plane.iter())
        .map(|&s| f64::from(s) * f64::from(s))
        .sum();
    (sum_sq / total as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::pcm;

    fn mono(samples: Vec<f32>, sample_rate: u32) -> SampleBuffer {
        SampleBuffer::from_planes(vec![samples], sample_rate).unwrap()
    }

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    #[test]
    fn test_header_fields_mono_24khz() {
        let wav = encode_wav(&mono(vec![0.0; 100], 24000)).unwrap();
        assert_eq!(wav.len(), 44 + 200);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32(&wav, 4), 36 + 200);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(read_u32(&wav, 16), 16);
        assert_eq!(read_u16(&wav, 20), 1);
        assert_eq!(read_u16(&wav, 22), 1);
        assert_eq!(read_u32(&wav, 24), 24000);
        assert_eq!(read_u32(&wav, 28), 48000); // byte rate
        assert_eq!(read_u16(&wav, 32), 2); // block align
        assert_eq!(read_u16(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32(&wav, 40), 200);
    }

    #[test]
    fn test_empty_buffer_encodes_to_bare_header() {
        let wav = encode_wav(&mono(vec![], 24000)).unwrap();
        assert_eq!(wav.len(), 44);
        assert_eq!(read_u32(&wav, 4), 36);
        assert_eq!(read_u32(&wav, 40), 0);
    }

    #[test]
    fn test_round_trip_within_one_quantization_step() {
        let samples = vec![0.5, -0.25, 0.999, -1.0, 0.0, 0.125];
        let wav = encode_wav(&mono(samples.clone(), 24000)).unwrap();
        let decoded = pcm::interpret(&wav[44..], 24000, 1).unwrap();
        for (orig, got) in samples.iter().zip(decoded.channel(0)) {
            assert!((orig - got).abs() <= 1.0 / 32768.0, "{orig} vs {got}");
        }
    }

    #[test]
    fn test_stereo_interleaving() {
        let ch0 = vec![0.25, -0.5];
        let ch1 = vec![0.75, 0.125];
        let buffer = SampleBuffer::from_planes(vec![ch0.clone(), ch1.clone()], 44100).unwrap();
        let wav = encode_wav(&buffer).unwrap();

        for i in 0..2 {
            let left = i16::from_le_bytes([wav[44 + i * 4], wav[44 + i * 4 + 1]]);
            let right = i16::from_le_bytes([wav[44 + i * 4 + 2], wav[44 + i * 4 + 3]]);
            assert_eq!(left, (ch0[i] * 32767.0) as i16);
            assert_eq!(right, (ch1[i] * 32767.0) as i16);
        }
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let wav = encode_wav(&mono(vec![2.0, -3.0], 24000)).unwrap();
        let first = i16::from_le_bytes([wav[44], wav[45]]);
        let second = i16::from_le_bytes([wav[46], wav[47]]);
        assert_eq!(first, 32767);
        assert_eq!(second, -32767);
    }

    #[test]
    fn test_rms_level() {
        assert_eq!(rms_level(&mono(vec![], 24000)), 0.0);
        let level = rms_level(&mono(vec![0.5, -0.5, 0.5, -0.5], 24000));
        assert!((level - 0.5).abs() < 1e-6);
    }
}
