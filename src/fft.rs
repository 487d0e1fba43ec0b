//! C3: forward/inverse complex FFT of block size N, wrapping `rustfft`.
//!
//! The teacher (`channel.rs`, `acquisition.rs`) keeps a `FftPlanner<f64>`
//! per correlator and calls it ad hoc; this engine instead caches the two
//! planned `Arc<dyn Fft<f64>>` instances once per block size, the same
//! "plan once, process many" pattern used by the SoapySDR-derived
//! `BlockFirFilter` in the retrieval pack's `other_examples`.

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// `rustfft`'s convention: `inverse(forward(x))` equals `x` scaled by `N`.
pub struct FftEngine {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl FftEngine {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "FFT size must be positive");
        let mut planner = FftPlanner::<f64>::new();
        Self {
            n,
            forward: planner.plan_fft_forward(n),
            inverse: planner.plan_fft_inverse(n),
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    /// In-place forward FFT; `buf.len()` must equal `self.len()`.
    pub fn forward(&self, buf: &mut [Complex64]) {
        assert_eq!(buf.len(), self.n);
        self.forward.process(buf);
    }

    /// In-place inverse FFT (unnormalized: caller divides by `N` if a true
    /// round trip is needed; the correlator folds this into its own
    /// magnitude normalization per spec.md §4.6).
    pub fn inverse(&self, buf: &mut [Complex64]) {
        assert_eq!(buf.len(), self.n);
        self.inverse.process(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn round_trip_scalar_multiple() {
        let n = 64;
        let engine = FftEngine::new(n);
        let mut rng = rand::thread_rng();

        let original: Vec<Complex64> = (0..n)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        let mut buf = original.clone();
        engine.forward(&mut buf);
        engine.inverse(&mut buf);

        for (orig, got) in original.iter().zip(buf.iter()) {
            let scaled = got / n as f64;
            assert!((scaled - orig).norm() < 1e-4);
        }
    }

    #[test]
    fn linearity() {
        let n = 32;
        let engine = FftEngine::new(n);
        let mut rng = rand::thread_rng();

        let a: Vec<Complex64> = (0..n)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let b: Vec<Complex64> = (0..n)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        let mut sum: Vec<Complex64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        let mut fa = a.clone();
        let mut fb = b.clone();

        engine.forward(&mut sum);
        engine.forward(&mut fa);
        engine.forward(&mut fb);

        for i in 0..n {
            assert!((sum[i] - (fa[i] + fb[i])).norm() < 1e-9);
        }
    }
}
