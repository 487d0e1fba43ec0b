//! C5: frequency-shift generator, ported from `ApplyFrequencyShift` in
//! `gps_correlator.cpp`. Multiplies a sequence by a unit-magnitude complex
//! exponential of rate `k = f/Fs`, taking the phase accumulator `mod 2*PI`
//! at every step to bound drift over long blocks.

use crate::constants::PI;
use rustfft::num_complex::Complex64;

/// `y[i] = x[i] * exp(j*theta_i)`, `theta_0 = 0`, `theta_{i+1} = (theta_i +
/// 2*PI*k) mod 2*PI`.
pub fn shift_into(x: &[Complex64], k: f64, y: &mut [Complex64]) {
    assert_eq!(x.len(), y.len());

    let step = 2.0 * PI * k;
    let mut theta = 0.0f64;
    for i in 0..x.len() {
        let osc = Complex64::new(theta.cos(), theta.sin());
        y[i] = x[i] * osc;
        theta = (theta + step).rem_euclid(2.0 * PI);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_magnitude_carrier() {
        let n = 4000;
        let x = vec![Complex64::new(1.0, 0.0); n];
        let mut y = vec![Complex64::new(0.0, 0.0); n];

        for &k in &[0.0, 1e-3, 500.0 / 2_000_000.0, -6000.0 / 2_048_000.0] {
            shift_into(&x, k, &mut y);
            for (i, v) in y.iter().enumerate() {
                assert!(
                    (v.norm() - 1.0).abs() < 1e-5,
                    "k={k} i={i} norm={}",
                    v.norm()
                );
            }
        }
    }

    #[test]
    fn zero_shift_is_identity() {
        let n = 10;
        let x: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, -(i as f64))).collect();
        let mut y = vec![Complex64::new(0.0, 0.0); n];
        shift_into(&x, 0.0, &mut y);
        for i in 0..n {
            assert!((y[i] - x[i]).norm() < 1e-12);
        }
    }
}
