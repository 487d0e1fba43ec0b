//! 44-byte canonical WAVE header writer, ported from
//! `original_source/src/append_wav_header.cpp`. PCM linear, 2 channels,
//! 8-bit, `ChunkSize`/`Subchunk2Size` computed from the data length.

use std::io::{self, Write};

pub const HEADER_LEN: usize = 44;

pub struct WavHeaderFields {
    pub chunk_size: i32,
    pub sample_rate: i32,
    pub byte_rate: i32,
    pub block_align: i16,
    pub bits_per_sample: i16,
    pub subchunk2_size: i32,
}

pub fn header_fields(sample_rate: i32, data_len: i32) -> WavHeaderFields {
    let num_channels: i16 = 2;
    let bits_per_sample: i16 = 8;
    WavHeaderFields {
        chunk_size: 36 + data_len,
        sample_rate,
        byte_rate: sample_rate * num_channels as i32 * bits_per_sample as i32 / 8,
        block_align: num_channels * bits_per_sample / 8,
        bits_per_sample,
        subchunk2_size: data_len,
    }
}

/// Writes the full 44-byte header to `out`.
pub fn write_header(out: &mut dyn Write, sample_rate: i32, data_len: i32) -> io::Result<()> {
    let f = header_fields(sample_rate, data_len);

    out.write_all(b"RIFF")?;
    out.write_all(&f.chunk_size.to_le_bytes())?;
    out.write_all(b"WAVE")?;
    out.write_all(b"fmt ")?;
    out.write_all(&16i32.to_le_bytes())?;
    out.write_all(&1i16.to_le_bytes())?; // PCM linear
    out.write_all(&2i16.to_le_bytes())?; // NumChannels
    out.write_all(&f.sample_rate.to_le_bytes())?;
    out.write_all(&f.byte_rate.to_le_bytes())?;
    out.write_all(&f.block_align.to_le_bytes())?;
    out.write_all(&f.bits_per_sample.to_le_bytes())?;
    out.write_all(b"data")?;
    out.write_all(&f.subchunk2_size.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fields_match_spec_scenario() {
        // S6: Fs=2_048_000, M data bytes.
        let m = 4096;
        let f = header_fields(2_048_000, m);
        assert_eq!(f.chunk_size, 36 + m);
        assert_eq!(f.subchunk2_size, m);
        assert_eq!(f.byte_rate, 4_096_000);
        assert_eq!(f.block_align, 2);
        assert_eq!(f.bits_per_sample, 8);
    }

    #[test]
    fn header_is_44_bytes() {
        let mut buf = Vec::new();
        write_header(&mut buf, 2_048_000, 0).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);
    }
}
