//! Minimal RIFF/WAVE encoding of a rendered buffer: 16-bit PCM, channels
//! interleaved, little-endian.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::Result;
use crate::tone::StereoBuffer;

/// RIFF group header (12) + `fmt ` chunk (24) + `data` chunk header (8).
pub const HEADER_LEN: usize = 44;

/// Float to 16-bit with the asymmetric scale of the PCM range. Input is
/// clamped first so full-scale samples cannot overflow.
pub fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32_768.0) as i16
    } else {
        (s * 32_767.0) as i16
    }
}

pub fn encode_wav(buffer: &StereoBuffer) -> Result<Vec<u8>> {
    let channels = buffer.channels.len();
    let frames = buffer.frames();
    let spec = WavSpec {
        channels: channels as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_LEN + frames * channels * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for frame in 0..frames {
            for channel in &buffer.channels {
                let sample = channel.get(frame).copied().unwrap_or(0.0);
                writer.write_sample(quantize(sample))?;
            }
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
