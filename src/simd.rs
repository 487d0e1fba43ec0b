//! C4: elementwise complex multiply, ported from `dsp/simd/c32_vec_mul.h`.
//!
//! The original dispatches to AVX2/SSSE3 complex-multiply kernels with a
//! scalar fallback for the remainder past the widest lane count. This is
//! the same shape, using `f64`/`Complex64` (the teacher's numeric
//! convention) instead of the original's `f32`.

use rustfft::num_complex::Complex64;

/// `y[i] = x0[i] * x1[i]` for all `i`. Dispatches to the widest available
/// SIMD kernel on x86_64, scalar elsewhere or for the unaligned remainder.
pub fn mul_into(x0: &[Complex64], x1: &[Complex64], y: &mut [Complex64]) {
    assert_eq!(x0.len(), x1.len());
    assert_eq!(x0.len(), y.len());

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { mul_avx2(x0, x1, y) };
        }
        if is_x86_feature_detected!("ssse3") {
            return unsafe { mul_ssse3(x0, x1, y) };
        }
    }
    mul_scalar(x0, x1, y);
}

fn mul_scalar(x0: &[Complex64], x1: &[Complex64], y: &mut [Complex64]) {
    for i in 0..x0.len() {
        y[i] = x0[i] * x1[i];
    }
}

/// AVX2 operates on 256 bits = 2 `Complex64` lanes at a time; a `Complex64`
/// is 16 bytes (two f64), so 4 lanes worth of f64 per register holds 2
/// complex values.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn mul_avx2(x0: &[Complex64], x1: &[Complex64], y: &mut [Complex64]) {
    use std::arch::x86_64::*;

    const LANES: usize = 2;
    let n = x0.len();
    let m = n / LANES;

    for i in 0..m {
        let base = i * LANES;
        let a = _mm256_loadu_pd(x0.as_ptr().add(base) as *const f64);
        let b = _mm256_loadu_pd(x1.as_ptr().add(base) as *const f64);

        // a = [a0.re, a0.im, a1.re, a1.im], likewise b.
        let b_swapped = _mm256_shuffle_pd(b, b, 0b0101);
        let a_re = _mm256_shuffle_pd(a, a, 0b0000);
        let a_im = _mm256_shuffle_pd(a, a, 0b1111);

        let re_im_cross = _mm256_mul_pd(a_im, b_swapped);
        let out = _mm256_fmaddsub_pd(a_re, b, re_im_cross);

        _mm256_storeu_pd(y.as_mut_ptr().add(base) as *mut f64, out);
    }

    let consumed = m * LANES;
    mul_scalar(&x0[consumed..], &x1[consumed..], &mut y[consumed..]);
}

/// SSSE3 path operates one `Complex64` (128 bits) at a time.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "ssse3")]
unsafe fn mul_ssse3(x0: &[Complex64], x1: &[Complex64], y: &mut [Complex64]) {
    use std::arch::x86_64::*;

    let n = x0.len();
    for i in 0..n {
        let a = _mm_loadu_pd(&x0[i].re as *const f64);
        let b = _mm_loadu_pd(&x1[i].re as *const f64);

        let b_swapped = _mm_shuffle_pd(b, b, 0b01);
        let a_re = _mm_shuffle_pd(a, a, 0b00);
        let a_im = _mm_shuffle_pd(a, a, 0b11);

        let cross = _mm_mul_pd(a_im, b_swapped);
        // (re*re - im*im, re*im + im*re): addsub not in SSE3/SSSE3 for pd
        // without SSE3's addsub_pd, which is available under SSE3 (we
        // gate on ssse3, a superset target in practice on all relevant
        // hosts).
        let straight = _mm_mul_pd(a_re, b);
        let out = _mm_addsub_pd(straight, cross);

        _mm_storeu_pd(&mut y[i].re as *mut f64, out);
    }
}
