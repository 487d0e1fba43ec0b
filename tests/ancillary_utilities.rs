//! Ancillary utility scenarios (spec.md §8 S5, S6).

use gps_acq::iq::s8_to_u8;
use gps_acq::wav::header_fields;

#[test]
fn s8_to_u8_scenario() {
    let xs = [-128i8, -1, 0, 1, 127];
    let expect = [255u8, 126, 127, 128, 254];
    for (x, e) in xs.iter().zip(expect.iter()) {
        assert_eq!(s8_to_u8(*x), *e);
    }
}

#[test]
fn wav_header_scenario() {
    let m = 4_096_000;
    let f = header_fields(2_048_000, m);
    assert_eq!(f.chunk_size, 36 + m);
    assert_eq!(f.subchunk2_size, m);
    assert_eq!(f.byte_rate, 4_096_000);
    assert_eq!(f.block_align, 2);
    assert_eq!(f.bits_per_sample, 8);
}
