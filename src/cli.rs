//! Shared CLI surface for `gps_corr`, following the teacher's
//! `structopt`-derived `Options` struct in `main.rs`.

use std::path::PathBuf;
use structopt::StructOpt;

use crate::recording::IqFormat;

#[derive(StructOpt)]
#[structopt(name = "gps_corr", about = "GPS L1 C/A acquisition correlator")]
pub struct Options {
    /// Input file; reads from stdin if omitted.
    #[structopt(short = "i", long = "input")]
    pub input: Option<PathBuf>,

    /// Input sample rate in Hz.
    #[structopt(short = "f", long = "sample-rate", default_value = "2048000")]
    pub fs: i64,

    /// Raw IQ sample format.
    #[structopt(short = "F", long = "format", default_value = "u8")]
    pub format: IqFormat,

    /// Extra linear gain applied during dequantization.
    #[structopt(short = "g", long = "gain", default_value = "1.0")]
    pub gain: f64,

    /// Always correlate every PRN on every block, ignoring trigger flags.
    #[structopt(short = "A", long = "always")]
    pub always_correlate: bool,
}
