//! Engine-level integration scenarios (spec.md §8 S1, S4).

use rand::Rng;
use rustfft::num_complex::Complex64;

use gps_acq::engine::AcquisitionEngine;

#[test]
fn ten_blocks_of_noise_with_always_correlate() {
    let mut engine = AcquisitionEngine::new(2_048_000, 1000, 6000).unwrap();
    engine.set_always_correlate(true);

    let mut rng = rand::thread_rng();

    for _ in 0..10 {
        let mut block = engine.alloc_block();
        for v in block.as_mut_slice().iter_mut() {
            *v = Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        }
        engine.process(&block);
    }

    assert_eq!(engine.total_blocks(), 10);
    for prn_id in 0..engine.num_prns() {
        let corr = engine.correlator(prn_id);
        assert_eq!(corr.histogram_total_pushed(), 10);
        assert!(corr.mode_bin() < corr.num_bins());
    }
}

#[test]
fn block_size_matches_fs_over_fcode() {
    let engine = AcquisitionEngine::new(2_048_000, 1000, 6000).unwrap();
    assert_eq!(engine.block_size(), 2048);
}

#[test]
fn non_multiple_sample_rate_still_processes() {
    // spec.md §3: warning issued if Fs is not a multiple of Fcode, but
    // processing still proceeds.
    let mut engine = AcquisitionEngine::new(2_048_001, 1000, 6000).unwrap();
    assert_eq!(engine.block_size(), 2048);

    let zero_block = engine.alloc_block();
    engine.trigger(0, 1);
    engine.process(&zero_block);
    assert_eq!(engine.total_blocks(), 1);
}
