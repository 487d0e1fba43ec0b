pub const PI: f64 = std::f64::consts::PI;

/// Length of a GPS L1 C/A Gold code, in chips.
pub const PRN_CODE_LEN: usize = 1023;
/// Number of GPS PRN codes (satellite ids 0..31).
pub const NUM_GPS_SATS: usize = 32;

/// Default PRN chip rate: one code period per millisecond.
pub const DEFAULT_FCODE: i64 = 1000;
/// Default Doppler search half-width in Hz.
pub const DEFAULT_FDEV_MAX: i64 = 6000;
/// Default sample rate used by the `gps_corr` CLI.
pub const DEFAULT_FS: i64 = 2_048_000;

/// Size of the histogram's sliding window (spec.md M).
pub const HISTOGRAM_WINDOW: usize = 100;

/// SIMD alignment used for DSP buffers (AVX2 = 256bit = 32 bytes).
pub const SIMD_ALIGN: usize = 32;
