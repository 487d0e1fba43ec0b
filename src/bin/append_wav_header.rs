//! IQ-to-WAV repackager, ported from
//! `original_source/src/append_wav_header.cpp`. Writes a 44-byte canonical
//! WAVE header (RIFF/WAVE/fmt /PCM, 2 channels, 8-bit) and back-patches
//! `ChunkSize`/`Subchunk2Size` once the stream terminates.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use structopt::StructOpt;

use gps_acq::wav::write_header;

#[derive(StructOpt)]
#[structopt(
    name = "append_wav_header",
    about = "Adds a WAV header to raw IQ samples"
)]
struct Options {
    #[structopt(short = "i", long = "input")]
    input: Option<PathBuf>,

    #[structopt(short = "o", long = "output")]
    output: Option<PathBuf>,

    #[structopt(short = "f", long = "sample-rate", default_value = "2048000")]
    sample_rate: i32,

    /// Input IQ format: converts s8 to u8 in-place (matching the source
    /// tool's `-F` flag) since the WAV header assumes unsigned 8-bit PCM.
    #[structopt(short = "F", long = "format", default_value = "s8")]
    format: String,

    #[structopt(short = "b", long = "block-size", default_value = "131072")]
    block_size: usize,
}

fn main() {
    let opt = Options::from_args();

    if opt.sample_rate <= 0 {
        eprintln!("Got invalid sample rate {} <= 0", opt.sample_rate);
        std::process::exit(1);
    }
    if opt.block_size == 0 {
        eprintln!("Got invalid block size 0");
        std::process::exit(1);
    }

    let mut input: Box<dyn Read> = match &opt.input {
        Some(p) => match File::open(p) {
            Ok(f) => Box::new(f),
            Err(_) => {
                eprintln!("Failed to open file for reading");
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdin()),
    };

    let mut out_file;
    let mut stdout_lock;
    let out: &mut dyn Write = match &opt.output {
        Some(p) => {
            out_file = match File::create(p) {
                Ok(f) => f,
                Err(_) => {
                    eprintln!("Failed to open file for writing");
                    std::process::exit(1);
                }
            };
            &mut out_file
        }
        None => {
            stdout_lock = io::stdout();
            &mut stdout_lock
        }
    };

    if write_header(out, opt.sample_rate, 0).is_err() {
        eprintln!("Failed to write WAV header");
        std::process::exit(1);
    }

    let is_u8 = opt.format == "u8";
    let mut buf = vec![0u8; opt.block_size];
    let mut total_bytes: usize = 0;

    loop {
        let n = match input.read(&mut buf) {
            Ok(n) => n,
            Err(_) => break,
        };
        if n == 0 {
            break;
        }
        if !is_u8 {
            for byte in &mut buf[..n] {
                *byte = ((*byte as i8 as i32) + 127) as u8;
            }
        }
        if out.write_all(&buf[..n]).is_err() {
            eprintln!("Failed to write data");
            std::process::exit(1);
        }
        total_bytes += n;
    }

    // Back-patch ChunkSize/Subchunk2Size once the stream terminates.
    if let Some(p) = &opt.output {
        if let Ok(mut f) = File::options().write(true).open(p) {
            let chunk_size = (36 + total_bytes) as i32;
            let data_len = total_bytes as i32;
            let _ = f.seek(SeekFrom::Start(4));
            let _ = f.write_all(&chunk_size.to_le_bytes());
            let _ = f.seek(SeekFrom::Start(40));
            let _ = f.write_all(&data_len.to_le_bytes());
        }
    }

    eprintln!("Wrote {total_bytes} bytes with Fs={}", opt.sample_rate);
}
