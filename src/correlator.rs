//! C6: per-PRN correlator, ported from
//! `original_source/src/gps/gps_correlator.{h,cpp}`.
//!
//! Owns the replica bank (one frequency-shifted PRN code + its FFT per
//! Doppler bin), scratch buffers for the correlation FFT round trip, and a
//! [`Histogram`] tracking the winning bin over time. Mirrors the teacher's
//! `Channel` struct shape (`channel.rs`) in spirit, minus the tracking loop.

use rustfft::num_complex::Complex64;

use crate::aligned::AlignedBuf;
use crate::constants::{HISTOGRAM_WINDOW, PRN_CODE_LEN, SIMD_ALIGN};
use crate::doppler;
use crate::fft::FftEngine;
use crate::histogram::Histogram;
use crate::simd;

/// One Doppler bin's precomputed replica and its forward FFT. Both are
/// `AlignedBuf`, matching spec.md §3's "all vectors are length N, 32-byte
/// aligned" for the replica bank.
struct ReplicaBin {
    #[allow(dead_code)]
    replica: AlignedBuf<Complex64>,
    replica_fft: AlignedBuf<Complex64>,
}

pub struct Correlator {
    n: usize,
    freq_offsets: Vec<f64>,
    bank: Vec<ReplicaBin>,
    fft: FftEngine,

    corr_buf: AlignedBuf<Complex64>,
    ifft_buf: AlignedBuf<Complex64>,
    correlations: Vec<Vec<f64>>,

    best_bin: usize,
    histogram: Histogram,
}

/// Upsamples the 1023-chip code to `n` samples, reversing the source index
/// (spec.md §3: "PRN replica reversal for cross-correlation via FFT") and
/// mapping bit `b` to `2b - 1`.
fn upsample_and_reverse(code: &[u8; PRN_CODE_LEN], n: usize) -> Vec<Complex64> {
    assert!(n > 1, "block size must allow upsampling");
    let n_src = PRN_CODE_LEN;
    let scale = (n_src - 1) as f64 / (n - 1) as f64;

    (0..n)
        .map(|i| {
            let i_scaled = (i as f64 * scale) as usize;
            let i_reverse = (n_src - 1) - i_scaled;
            let v = code[i_reverse] as f64;
            Complex64::new(2.0 * v - 1.0, 0.0)
        })
        .collect()
}

impl Correlator {
    /// Builds the Doppler bin grid and replica bank for one PRN code.
    ///
    /// Panics (programmer error, spec.md §4.6) if `n == 0`, `fcode <= 0`, or
    /// `fdev_max < 0`.
    pub fn new(code: &[u8; PRN_CODE_LEN], n: usize, fcode: i64, fs: f64, fdev_max: i64) -> Self {
        assert!(n > 0, "block size N must be positive");
        assert!(fcode > 0, "Fcode must be positive");
        assert!(fdev_max >= 0, "Fdev_max must be non-negative");

        let step = fcode / 2;
        let mut freq_offsets = Vec::new();
        let mut f = -fdev_max;
        while f <= fdev_max {
            freq_offsets.push(f as f64);
            f += step;
        }
        let k = freq_offsets.len();

        let fft = FftEngine::new(n);
        let base_replica = upsample_and_reverse(code, n);

        let mut bank = Vec::with_capacity(k);
        for &freq_offset in &freq_offsets {
            let mut replica = AlignedBuf::<Complex64>::new(n, SIMD_ALIGN);
            doppler::shift_into(&base_replica, freq_offset / fs, replica.as_mut_slice());

            let mut replica_fft = AlignedBuf::<Complex64>::new(n, SIMD_ALIGN);
            replica_fft.as_mut_slice().copy_from_slice(&replica);
            fft.forward(replica_fft.as_mut_slice());

            bank.push(ReplicaBin {
                replica,
                replica_fft,
            });
        }

        Correlator {
            n,
            freq_offsets,
            bank,
            fft,
            corr_buf: AlignedBuf::new(n, SIMD_ALIGN),
            ifft_buf: AlignedBuf::new(n, SIMD_ALIGN),
            correlations: vec![vec![0.0; n]; k],
            best_bin: 0,
            histogram: Histogram::new(k, HISTOGRAM_WINDOW),
        }
    }

    pub fn num_bins(&self) -> usize {
        self.freq_offsets.len()
    }

    pub fn freq_offsets(&self) -> &[f64] {
        &self.freq_offsets
    }

    pub fn correlations(&self) -> &[Vec<f64>] {
        &self.correlations
    }

    pub fn best_bin(&self) -> usize {
        self.best_bin
    }

    pub fn mode_bin(&self) -> usize {
        self.histogram.mode()
    }

    pub fn histogram_total_pushed(&self) -> u64 {
        self.histogram.total_pushed()
    }

    /// Runs the per-bin matched filter, fftshift, magnitude, and peak scan
    /// over the Doppler grid, per spec.md §4.6. `fft_of_input` is the
    /// forward FFT of the current block, shared read-only across PRNs.
    pub fn process(&mut self, fft_of_input: &[Complex64]) {
        assert_eq!(fft_of_input.len(), self.n);

        let norm = 1.0 / (2.0 * self.n as f64 + 1.0);

        for (k, bin) in self.bank.iter().enumerate() {
            simd::mul_into(fft_of_input, &bin.replica_fft, &mut self.corr_buf);
            self.ifft_buf.copy_from_slice(&self.corr_buf);
            self.fft.inverse(&mut self.ifft_buf);
            fftshift(&mut self.ifft_buf);

            let mag = &mut self.correlations[k];
            for j in 0..self.n {
                mag[j] = self.ifft_buf[j].norm() * norm;
            }
        }

        let mut best_k = 0usize;
        let mut best_peak = 0.0f64;
        for (k, mag) in self.correlations.iter().enumerate() {
            let (_, peak) = find_peak(mag);
            if peak > best_peak {
                best_peak = peak;
                best_k = k;
            }
        }

        self.best_bin = best_k;
        self.histogram.push(best_k);
    }
}

/// In-place cyclic half-swap. For even `n` (the only case the acquisition
/// pipeline produces in practice, per spec.md §4.6/§9), element `i`
/// exchanges with `i + n/2`; the same formula `(i + n/2) mod n` also covers
/// odd `n`.
fn fftshift(buf: &mut [Complex64]) {
    let n = buf.len();
    let half = n / 2;
    if n % 2 == 0 {
        for i in 0..half {
            buf.swap(i, i + half);
        }
    } else {
        let mut shifted = vec![Complex64::new(0.0, 0.0); n];
        for (i, v) in buf.iter().enumerate() {
            shifted[(i + half) % n] = *v;
        }
        buf.copy_from_slice(&shifted);
    }
}

/// Peak index/value within a magnitude vector: strict `>` scan, seeded
/// with `x[0]`, first-found tie-break.
fn find_peak(x: &[f64]) -> (usize, f64) {
    let mut idx = 0usize;
    let mut value = x[0];
    for (i, &v) in x.iter().enumerate() {
        if v > value {
            value = v;
            idx = i;
        }
    }
    (idx, value)
}
