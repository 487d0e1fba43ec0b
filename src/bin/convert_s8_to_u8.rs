//! Raw IQ signed-8bit to unsigned-8bit converter, ported from
//! `original_source/src/convert_s8_to_u8.cpp`.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use structopt::StructOpt;

use gps_acq::iq::s8_to_u8;

#[derive(StructOpt)]
#[structopt(
    name = "convert_s8_to_u8",
    about = "Converts raw IQ signed 8bit values to unsigned 8bit values"
)]
struct Options {
    #[structopt(short = "i", long = "input")]
    input: Option<PathBuf>,

    #[structopt(short = "o", long = "output")]
    output: Option<PathBuf>,

    #[structopt(short = "b", long = "block-size", default_value = "131072")]
    block_size: usize,
}

fn main() {
    let opt = Options::from_args();

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

    let mut rd_buf = vec![0u8; opt.block_size];
    let mut wr_buf = vec![0u8; opt.block_size];
    let mut total_bytes: usize = 0;

    loop {
        let n = match input.read(&mut rd_buf) {
            Ok(n) => n,
            Err(_) => break,
        };
        if n == 0 {
            break;
        }
        for i in 0..n {
            wr_buf[i] = s8_to_u8(rd_buf[i] as i8);
        }
        if out.write_all(&wr_buf[..n]).is_err() {
            eprintln!("Failed to write data");
            std::process::exit(1);
        }
        total_bytes += n;
    }

    eprintln!("Wrote {total_bytes} bytes");
}
