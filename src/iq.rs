//! Dequantization of interleaved raw IQ bytes into `Complex64` samples,
//! ported from `convert_uint8_to_float`/`convert_int8_to_float` in
//! `original_source/src/gps_corr.cpp`. Out of scope for the core engine
//! (spec.md §1), but a required external interface (spec.md §6).

use rustfft::num_complex::Complex64;

use crate::aligned::AlignedBuf;
use crate::constants::SIMD_ALIGN;

/// Unsigned 8-bit IQ, bias 127.5 (midpoint zero): `v = (x - 127.5)/127.5 * G`.
/// Returned in an `AlignedBuf` so the result can be fed straight into
/// `AcquisitionEngine::process`, which requires a `SIMD_ALIGN`-aligned block
/// (spec.md §4.9 precondition 1).
pub fn dequantize_u8(bytes: &[u8], gain: f64) -> AlignedBuf<Complex64> {
    assert_eq!(bytes.len() % 2, 0, "interleaved IQ bytes must come in pairs");
    let k = gain / 127.5;
    let mut out = AlignedBuf::new(bytes.len() / 2, SIMD_ALIGN);
    for (pair, slot) in bytes.chunks_exact(2).zip(out.as_mut_slice().iter_mut()) {
        let i = (pair[0] as f64 - 127.5) * k;
        let q = (pair[1] as f64 - 127.5) * k;
        *slot = Complex64::new(i, q);
    }
    out
}

/// Signed 8-bit IQ, two's complement: `v = x/127.0 * G`. See
/// [`dequantize_u8`] for the `AlignedBuf` rationale.
pub fn dequantize_s8(bytes: &[u8], gain: f64) -> AlignedBuf<Complex64> {
    assert_eq!(bytes.len() % 2, 0, "interleaved IQ bytes must come in pairs");
    let k = gain / 127.0;
    let mut out = AlignedBuf::new(bytes.len() / 2, SIMD_ALIGN);
    for (pair, slot) in bytes.chunks_exact(2).zip(out.as_mut_slice().iter_mut()) {
        let i = (pair[0] as i8) as f64 * k;
        let q = (pair[1] as i8) as f64 * k;
        *slot = Complex64::new(i, q);
    }
    out
}

/// Converts a signed 8-bit sample to its unsigned 8-bit counterpart via
/// `y = (int)x + 127`, matching `convert_s8_to_u8.cpp` exactly. `-128` wraps
/// to 255 instead of 0 under this convention (spec.md §9 Open Question); we
/// keep the source's behavior rather than "fixing" it, since downstream
/// tooling built against the existing WAV/byte-stream pipeline may depend
/// on the exact mapping.
pub fn s8_to_u8(x: i8) -> u8 {
    ((x as i32) + 127) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s8_to_u8_matches_source_convention() {
        // S5: x=[-128,-1,0,1,127] -> [255,126,127,128,254]
        let xs = [-128i8, -1, 0, 1, 127];
        let expect = [255u8, 126, 127, 128, 254];
        for (x, e) in xs.iter().zip(expect.iter()) {
            assert_eq!(s8_to_u8(*x), *e);
        }
    }

    #[test]
    fn u8_midpoint_is_zero() {
        let bytes = [127u8, 128u8];
        let out = dequantize_u8(&bytes, 1.0);
        assert!(out[0].re.abs() < 1e-2);
        assert!(out[0].im.abs() < 1e-2);
    }

    #[test]
    fn s8_gain_scales_linearly() {
        let bytes = [127u8, 127u8]; // as i8: 127, 127
        let out_gain1 = dequantize_s8(&bytes, 1.0);
        let out_gain2 = dequantize_s8(&bytes, 2.0);
        assert!((out_gain2[0].re - 2.0 * out_gain1[0].re).abs() < 1e-9);
    }
}
