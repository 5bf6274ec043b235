#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate nmea_batch;

use nmea_batch::{DecoderConfig, FnSink, GpsDecoder};

fuzz_target!(|data: &[u8]| {
    // first byte picks the segment limit, the rest is the stream
    let (seg, stream) = match data.split_first() {
        Some((&seg, stream)) => (usize::from(seg % 78) + 5, stream),
        None => return,
    };
    let config = DecoderConfig::default()
        .with_batch_capacity(2)
        .with_max_segment_len(seg);
    let sink = FnSink::new(|batch: &[_]| assert!(batch.len() <= 2), |_| ());
    let mut decoder = match GpsDecoder::new(config, sink) {
        Ok(d) => d,
        Err(_) => return,
    };

    decoder.feed(stream);
    decoder.stop();
});
