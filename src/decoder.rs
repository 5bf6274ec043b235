//! The polled decoding task.
//!
//! [`GpsDecoder`] drains a [`ByteSource`] on every poll, assembles readings
//! out of the sentences it sees and hands batches and fix transitions to a
//! [`ReadingSink`]. All of its state lives in the decoder itself, so it can be
//! driven byte by byte without a scheduler.

use std::time::Duration;

use crate::batch::ReadingBatch;
use crate::config::DecoderConfig;
use crate::err::ConfigError;
use crate::fix::{FixState, FixStateTracker};
use crate::reading::{self, GpsReading};
use crate::segment::{ParserState, Token};
use crate::sink::ReadingSink;
use crate::source::ByteSource;

pub struct GpsDecoder<K> {
    config: DecoderConfig,
    state: ParserState,
    batch: ReadingBatch,
    fix: FixStateTracker,
    sink: K,
}

impl<K: ReadingSink> GpsDecoder<K> {
    /// Create a decoder handing its output to `sink`.
    pub fn new(config: DecoderConfig, sink: K) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GpsDecoder {
            state: ParserState::new(config.max_segment_len),
            batch: ReadingBatch::new(config.batch_capacity),
            fix: FixStateTracker::new(),
            config,
            sink,
        })
    }

    /// Consume every byte the source currently has and return how many.
    ///
    /// `elapsed` is the time since the previous poll. Framing is purely
    /// delimiter driven, so it is only logged.
    pub fn poll<S: ByteSource + ?Sized>(&mut self, source: &mut S, elapsed: Duration) -> usize {
        let mut count = 0;
        while source.available() {
            match source.read() {
                Some(byte) => {
                    self.push_byte(byte);
                    count += 1;
                }
                None => break,
            }
        }
        trace!("poll after {:?} consumed {} bytes", elapsed, count);
        count
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_byte(b);
        }
    }

    /// Process a single byte of the stream.
    pub fn push_byte(&mut self, byte: u8) {
        let GpsDecoder {
            config,
            state,
            batch,
            fix,
            sink,
        } = self;

        match state.advance(byte) {
            None => (),
            Some(Token::Header { kind, raw, dropped }) => {
                if dropped > 0 {
                    warn!(
                        "sentence header {:?} exceeded {} bytes, dropped {}",
                        String::from_utf8_lossy(raw),
                        config.max_segment_len,
                        dropped
                    );
                }
                match kind {
                    Some(kind) if kind.message == config.boundary => {
                        trace!("{} opens a new reading", kind);
                        batch.append_boundary(|readings| sink.on_batch_ready(readings));
                    }
                    Some(kind) => trace!("sentence {}", kind),
                    None => trace!("unrecognised sentence {:?}", String::from_utf8_lossy(raw)),
                }
            }
            Some(Token::Field {
                kind,
                index,
                text,
                dropped,
            }) => {
                let kind = match kind {
                    Some(kind) => kind,
                    None => return,
                };
                if dropped > 0 {
                    warn!(
                        "{} field {} exceeded {} bytes, dropped {}",
                        kind,
                        index,
                        config.max_segment_len,
                        dropped
                    );
                }

                if FixStateTracker::watches(kind.message, index) {
                    if let Some(new) = fix.update(text) {
                        sink.on_fix_changed(new);
                    }
                }

                match reading::route(batch.active_mut(), kind.message, index, text) {
                    Ok(Some(field)) => trace!("{} field {} -> {:?}", kind, index, field),
                    Ok(None) => (),
                    Err(e) => warn!("{} field {}: {}", kind, index, e),
                }
            }
        }
    }

    /// The task is being stopped: hand out the committed readings.
    ///
    /// The reading under construction and the partial sentence are
    /// discarded. The fix state is kept.
    pub fn stop(&mut self) {
        let GpsDecoder { batch, sink, .. } = self;
        if !batch.drain_on_stop(|readings| sink.on_batch_ready(readings)) {
            debug!("stopped without pending readings");
        }
        self.state.reset();
    }

    #[inline]
    pub fn fix_state(&self) -> FixState {
        self.fix.current()
    }

    /// Committed readings waiting for the batch to fill.
    #[inline]
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// The reading fields are currently written into.
    #[inline]
    pub fn active_reading(&self) -> &GpsReading {
        self.batch.active()
    }

    #[inline]
    pub fn committed(&self) -> &[GpsReading] {
        self.batch.readings()
    }

    #[inline]
    pub fn parser_state(&self) -> &ParserState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::MessageId;
    use crate::source::SliceSource;

    #[derive(Default)]
    struct Recorder {
        batches: Vec<Vec<GpsReading>>,
        fixes: Vec<FixState>,
    }

    impl ReadingSink for Recorder {
        fn on_batch_ready(&mut self, readings: &[GpsReading]) {
            self.batches.push(readings.to_vec());
        }

        fn on_fix_changed(&mut self, fix: FixState) {
            self.fixes.push(fix);
        }
    }

    const RMC: &[u8] = b"$GPRMC,074318.00,A,4735.41382,N,12212.35088,W,0.030,,170617,,,A*63\r\n";
    const GGA: &[u8] =
        b"$GPGGA,074318.00,4735.41382,N,12212.35088,W,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    fn decoder(config: DecoderConfig) -> GpsDecoder<Recorder> {
        GpsDecoder::new(config, Recorder::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        assert_matches!(
            GpsDecoder::new(
                DecoderConfig::default().with_batch_capacity(0),
                Recorder::default()
            )
            .err(),
            Some(ConfigError::ZeroBatchCapacity)
        );
    }

    #[test]
    fn decodes_rmc_and_gga_into_one_reading() {
        let mut d = decoder(DecoderConfig::default());
        d.feed(RMC);
        d.feed(GGA);
        assert_eq!(d.pending(), 1);
        let r = d.active_reading();
        assert_eq!(r.time, "074318.0");
        assert_eq!(r.latitude, "4735.41382");
        assert_eq!(r.latitude_direction, "N");
        assert_eq!(r.longitude, "12212.35088");
        assert_eq!(r.longitude_direction, "W");
        assert_eq!(r.date, "170617");
        assert_eq!(r.satellite_count, "08");
        assert_eq!(r.altitude, "545.4");
        assert!(d.committed()[0].is_empty());
    }

    #[test]
    fn poll_drains_the_source() {
        let mut d = decoder(DecoderConfig::default());
        let mut input = RMC.to_vec();
        input.extend_from_slice(GGA);
        let mut source = SliceSource::new(&input);
        assert_eq!(d.poll(&mut source, Duration::from_millis(10)), input.len());
        assert_eq!(d.poll(&mut source, Duration::from_millis(10)), 0);
        assert_eq!(d.active_reading().date, "170617");
    }

    #[test]
    fn fields_before_first_boundary_fill_first_slot() {
        let mut d = decoder(DecoderConfig::default().with_boundary(MessageId::Gga));
        d.feed(RMC);
        assert_eq!(d.active_reading().date, "170617");
        d.feed(GGA);
        d.feed(RMC);
        let r = d.active_reading();
        assert_eq!(r.satellite_count, "08");
        assert_eq!(r.date, "170617");
        d.stop();
        let batches = &d.sink().batches;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0][0].date, "170617");
        assert!(batches[0][0].satellite_count.is_empty());
    }

    #[test]
    fn stop_resets_framing_and_keeps_fix() {
        let mut d = decoder(DecoderConfig::default());
        d.feed(b"$GPGSA,A,3,04,05,*");
        d.feed(b"$GPRMC,0743");
        assert_eq!(d.fix_state(), FixState::Fix3D);
        d.stop();
        assert!(!d.parser_state().is_in_sentence());
        assert_eq!(d.pending(), 0);
        assert!(d.active_reading().is_empty());
        assert_eq!(d.fix_state(), FixState::Fix3D);
        assert_eq!(d.into_sink().fixes, vec![FixState::Fix3D]);
    }

    #[test]
    fn truncated_header_is_warned_about() {
        logging::install();
        let config = DecoderConfig::default().with_max_segment_len(5);
        let mut d = decoder(config);
        d.feed(b"$GPRMCX,1*\r\n$PGRMEZ,2*\r\n");
        // positional match still recognises the cut `GPRMC`
        assert_eq!(d.pending(), 1);
        let warnings = logging::warnings();
        assert!(warnings.iter().any(|w| w.contains("\"GPRMC\"") && w.contains("dropped 1")));
        assert!(warnings.iter().any(|w| w.contains("\"PGRME\"") && w.contains("dropped 1")));
    }

    mod logging {
        use log::{Level, LevelFilter, Log, Metadata, Record};

        use std::sync::{Mutex, Once};

        struct Capture;

        static LOGGER: Capture = Capture;
        static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
        static INIT: Once = Once::new();

        impl Log for Capture {
            fn enabled(&self, metadata: &Metadata) -> bool {
                metadata.level() <= Level::Warn
            }

            fn log(&self, record: &Record) {
                if self.enabled(record.metadata()) {
                    if let Ok(mut w) = WARNINGS.lock() {
                        w.push(record.args().to_string());
                    }
                }
            }

            fn flush(&self) {}
        }

        pub fn install() {
            INIT.call_once(|| {
                let _ = log::set_logger(&LOGGER);
                log::set_max_level(LevelFilter::Warn);
            });
        }

        pub fn warnings() -> Vec<String> {
            WARNINGS.lock().map(|w| w.clone()).unwrap_or_default()
        }
    }
}
