//! C8: acquisition engine, ported from
//! `original_source/src/gps/gps_app.{h,cpp}`.
//!
//! Owns the 32 per-PRN correlators and the worker pool, fans the per-block
//! work out across PRNs whose trigger count is positive (or when
//! `is_always` is set), and barriers before returning. `trigger_flags` and
//! `is_always` are exposed as relaxed atomics so a GUI/control thread can
//! request correlation for specific satellites without locking, matching
//! the teacher's `gps_correlator_trigger_flags`/`is_always_correlate` pair.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use rustfft::num_complex::Complex64;

use crate::aligned::AlignedBuf;
use crate::constants::{NUM_GPS_SATS, SIMD_ALIGN};
use crate::correlator::Correlator;
use crate::error::{AcqError, AcqResult};
use crate::fft::FftEngine;
use crate::pool::WorkerPool;
use crate::prn;

pub struct AcquisitionEngine {
    n: usize,
    fft: FftEngine,
    fft_buf: AlignedBuf<Complex64>,
    correlators: Arc<Vec<Mutex<Correlator>>>,
    trigger_flags: Vec<AtomicU32>,
    is_always: AtomicBool,
    total_blocks: u64,
    pool: WorkerPool,
}

impl AcquisitionEngine {
    /// `N = Fs / Fcode`. Fails with `AcqError::Configuration` if `Fs <= 0`,
    /// `Fcode <= 0`, or the resulting block size is not positive, per
    /// spec.md §7. Emits a warning (not an error) if `Fs` is not a multiple
    /// of `Fcode`, per spec.md §3.
    pub fn new(fs: i64, fcode: i64, fdev_max: i64) -> AcqResult<Self> {
        if fs <= 0 {
            return Err(Box::new(AcqError::Configuration(format!(
                "Fs must be positive, got {fs}"
            ))));
        }
        if fcode <= 0 {
            return Err(Box::new(AcqError::Configuration(format!(
                "Fcode must be positive, got {fcode}"
            ))));
        }

        let n = (fs / fcode) as usize;
        if n == 0 {
            return Err(Box::new(AcqError::Configuration(format!(
                "computed block size N={n} is not positive (Fs={fs}, Fcode={fcode})"
            ))));
        }
        if fs % fcode != 0 {
            log::warn!("Fs={fs} is not a multiple of Fcode={fcode}; proceeding with N={n} anyway");
        }

        let mut correlators = Vec::with_capacity(NUM_GPS_SATS);
        let mut trigger_flags = Vec::with_capacity(NUM_GPS_SATS);
        for prn_id in 0..NUM_GPS_SATS as u8 {
            let code = prn::generate(prn_id);
            let corr = Correlator::new(&code, n, fcode, fs as f64, fdev_max);
            correlators.push(Mutex::new(corr));
            trigger_flags.push(AtomicU32::new(0));
        }

        let workers = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
            .min(NUM_GPS_SATS);

        Ok(AcquisitionEngine {
            n,
            fft: FftEngine::new(n),
            fft_buf: AlignedBuf::new(n, SIMD_ALIGN),
            correlators: Arc::new(correlators),
            trigger_flags,
            is_always: AtomicBool::new(false),
            total_blocks: 0,
            pool: WorkerPool::new(workers),
        })
    }

    pub fn block_size(&self) -> usize {
        self.n
    }

    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }

    pub fn num_prns(&self) -> usize {
        self.correlators.len()
    }

    pub fn set_always_correlate(&self, always: bool) {
        self.is_always.store(always, Ordering::Relaxed);
    }

    pub fn is_always_correlate(&self) -> bool {
        self.is_always.load(Ordering::Relaxed)
    }

    /// Requests that `prn_id` be correlated for the next up-to-`count`
    /// blocks. Racy-but-benign: a stale read only delays or redundantly
    /// performs a correlation, never corrupts state.
    pub fn trigger(&self, prn_id: usize, count: u32) {
        self.trigger_flags[prn_id].store(count, Ordering::Relaxed);
    }

    pub fn correlator(&self, prn_id: usize) -> MutexGuard<'_, Correlator> {
        self.correlators[prn_id].lock().unwrap()
    }

    /// Allocates a 32-byte-aligned, `N`-sample block buffer. Callers build
    /// the next block into this (dequantizing directly into it, say) and
    /// pass it to `process`, which requires its base address to satisfy
    /// this alignment (spec.md §4.9 precondition 1).
    pub fn alloc_block(&self) -> AlignedBuf<Complex64> {
        AlignedBuf::new(self.n, SIMD_ALIGN)
    }

    /// Processes one block of `N` complex samples: forward FFT, fan out
    /// per-PRN correlation to the worker pool, barrier, and advance the
    /// block counter. Panics if `block.len() != N` or `block`'s base
    /// address is not `SIMD_ALIGN`-aligned (spec.md §4.9 precondition 1).
    pub fn process(&mut self, block: &[Complex64]) {
        assert_eq!(block.len(), self.n, "input block length must equal N");
        assert_eq!(
            (block.as_ptr() as usize) % SIMD_ALIGN,
            0,
            "input block base address must be {SIMD_ALIGN}-byte aligned"
        );

        self.fft_buf.copy_from_slice(block);
        self.fft.forward(&mut self.fft_buf);

        let is_always = self.is_always.load(Ordering::Relaxed);
        // Shared read-only across the pool's workers for the duration of
        // this block; no worker writes to it (spec.md §5).
        let fft_buf: Arc<[Complex64]> = Arc::from(self.fft_buf.as_slice());

        for i in 0..self.correlators.len() {
            let prior = self.trigger_flags[i].load(Ordering::Relaxed);
            let mut do_correlate = is_always;
            if prior > 0 {
                do_correlate = true;
                self.trigger_flags[i].fetch_sub(1, Ordering::Relaxed);
            }

            if do_correlate {
                let fft_buf = Arc::clone(&fft_buf);
                let correlators = Arc::clone(&self.correlators);
                self.pool.submit(move || {
                    let mut corr = correlators[i].lock().unwrap();
                    corr.process(&fft_buf);
                });
            }
        }

        self.pool.barrier();
        self.total_blocks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn rejects_non_positive_sample_rate() {
        assert!(AcquisitionEngine::new(0, 1000, 6000).is_err());
        assert!(AcquisitionEngine::new(-1, 1000, 6000).is_err());
    }

    #[test]
    fn rejects_non_positive_chip_rate() {
        assert!(AcquisitionEngine::new(2_048_000, 0, 6000).is_err());
    }

    #[test]
    fn random_blocks_do_not_crash_and_update_histograms() {
        let mut engine = AcquisitionEngine::new(2_048_000, 1000, 6000).unwrap();
        engine.set_always_correlate(true);
        let n = engine.block_size();

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
        }
    }

    #[test]
    fn trigger_flag_decrements_and_expires() {
        let mut engine = AcquisitionEngine::new(2_048_000, 1000, 6000).unwrap();
        let zero_block = engine.alloc_block();

        engine.trigger(0, 2);
        engine.process(&zero_block);
        assert_eq!(engine.correlator(0).histogram_total_pushed(), 1);
        engine.process(&zero_block);
        assert_eq!(engine.correlator(0).histogram_total_pushed(), 2);
        engine.process(&zero_block);
        // trigger exhausted, not always-correlate: no further pushes
        assert_eq!(engine.correlator(0).histogram_total_pushed(), 2);
        // untouched PRN never correlated
        assert_eq!(engine.correlator(1).histogram_total_pushed(), 0);
    }
}
