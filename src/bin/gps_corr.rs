//! Acquisition CLI, ported from `original_source/src/gps_corr.cpp`'s
//! `main`/`App::RunnerThread`, minus the ImGui/ImPlot front end (spec.md §1
//! non-goal: GUI/font/windowing setup, described only by interface).

use bytesize::ByteSize;
use colored::Colorize;
use structopt::StructOpt;

use gps_acq::cli::Options;
use gps_acq::engine::AcquisitionEngine;
use gps_acq::error::AcqError;
use gps_acq::iq;
use gps_acq::recording::{open_input, BlockReader, IqFormat};

const FCODE: i64 = 1000;
const FDEV_MAX: i64 = 6000;

fn main() {
    env_logger::init();
    let opt = Options::from_args();

    if opt.fs <= 0 {
        eprintln!("Got invalid sample rate {} <= 0", opt.fs);
        std::process::exit(1);
    }

    let mut engine = match AcquisitionEngine::new(opt.fs, FCODE, FDEV_MAX) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    engine.set_always_correlate(opt.always_correlate);

    if let Some(path) = &opt.input {
        if let Ok(meta) = path.metadata() {
            println!(
                "gps_corr: {} -- {}",
                path.display().to_string().green(),
                ByteSize::b(meta.len()).to_string_as(false).bold(),
            );
        }
    }

    let input = match open_input(opt.input.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "gps_corr: fs={} format={:?} gain={} block_size={}",
        opt.fs,
        opt.format,
        opt.gain,
        engine.block_size()
    );

    let mut reader = BlockReader::new(input, engine.block_size());

    loop {
        let bytes = match reader.read_block() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("clean end of stream");
                break;
            }
            Err(AcqError::ShortRead { wanted, got }) => {
                log::warn!("short read: wanted {wanted} bytes, got {got}; terminating stream");
                break;
            }
            Err(e) => {
                log::warn!("read error: {e}; terminating stream");
                break;
            }
        };

        let block = match opt.format {
            IqFormat::U8 => iq::dequantize_u8(bytes, opt.gain),
            IqFormat::S8 => iq::dequantize_s8(bytes, opt.gain),
        };

        engine.process(&block);

        for prn_id in 0..engine.num_prns() {
            let corr = engine.correlator(prn_id);
            if corr.histogram_total_pushed() == 0 {
                continue;
            }
            log::debug!(
                "{}: best_bin={} mode_bin={} freq_offset={:.0}Hz",
                format!("prn-{:02}", prn_id).yellow(),
                corr.best_bin(),
                corr.mode_bin(),
                corr.freq_offsets()[corr.best_bin()],
            );
        }
    }

    log::info!("total blocks processed: {}", engine.total_blocks());
}
