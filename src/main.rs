use clap::Parser;
use log::{error, info};

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use nmea_batch::config::{DEFAULT_BATCH_CAPACITY, DEFAULT_MAX_SEGMENT_LEN};
use nmea_batch::{
    DecoderConfig, FixState, GpsDecoder, GpsReading, MessageId, ReaderSource, ReadingSink,
};

/// Replay an NMEA 0183 capture through the batching decoder.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Capture to read, stdin if omitted.
    file: Option<PathBuf>,

    /// Readings per batch.
    #[arg(long, default_value_t = DEFAULT_BATCH_CAPACITY)]
    capacity: usize,

    /// Bytes kept per field, 5 to 82.
    #[arg(long = "segment-len", default_value_t = DEFAULT_MAX_SEGMENT_LEN)]
    segment_len: usize,

    /// Sentence that opens a new reading (rmc or gga).
    #[arg(long, default_value = "rmc")]
    boundary: MessageId,
}

#[derive(Default)]
struct Printer {
    batches: usize,
}

impl ReadingSink for Printer {
    fn on_batch_ready(&mut self, readings: &[GpsReading]) {
        self.batches += 1;
        println!("batch {} ({} readings)", self.batches, readings.len());
        for r in readings.iter().filter(|r| !r.is_empty()) {
            println!(
                "  {} {} {}{} {}{} alt={} sats={}",
                r.date,
                r.time,
                r.latitude,
                r.latitude_direction,
                r.longitude,
                r.longitude_direction,
                r.altitude,
                r.satellite_count
            );
        }
    }

    fn on_fix_changed(&mut self, fix: FixState) {
        println!("fix: {}", fix);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = DecoderConfig::default()
        .with_batch_capacity(args.capacity)
        .with_max_segment_len(args.segment_len)
        .with_boundary(args.boundary);
    let mut decoder = GpsDecoder::new(config, Printer::default())?;

    let input: Box<dyn Read> = match args.file {
        Some(ref path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut source = ReaderSource::new(input);

    let mut last = Instant::now();
    let mut total = 0;
    while !source.is_exhausted() {
        let now = Instant::now();
        total += decoder.poll(&mut source, now - last);
        last = now;
    }
    decoder.stop();
    info!(
        "consumed {} bytes, {} batches",
        total,
        decoder.sink().batches
    );

    match source.take_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        eprintln!("nmea-batch: {}", e);
        process::exit(1);
    }
}
