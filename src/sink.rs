use crate::fix::FixState;
use crate::reading::GpsReading;

/// Consumer of everything the decoder produces.
///
/// Both callbacks run synchronously inside the poll that triggered them and
/// get a view that is only valid for the duration of the call.
pub trait ReadingSink {
    /// A batch is complete. `readings.len()` is at most the batch capacity.
    fn on_batch_ready(&mut self, readings: &[GpsReading]);

    /// The receiver reported a different fix type.
    fn on_fix_changed(&mut self, fix: FixState) {
        let _ = fix;
    }
}

impl<S: ReadingSink + ?Sized> ReadingSink for &mut S {
    fn on_batch_ready(&mut self, readings: &[GpsReading]) {
        (**self).on_batch_ready(readings)
    }

    fn on_fix_changed(&mut self, fix: FixState) {
        (**self).on_fix_changed(fix)
    }
}

/// A sink built from two closures.
pub struct FnSink<B, F> {
    batch: B,
    fix: F,
}

impl<B, F> FnSink<B, F>
where
    B: FnMut(&[GpsReading]),
    F: FnMut(FixState),
{
    pub fn new(batch: B, fix: F) -> Self {
        FnSink { batch, fix }
    }
}

impl<B, F> ReadingSink for FnSink<B, F>
where
    B: FnMut(&[GpsReading]),
    F: FnMut(FixState),
{
    fn on_batch_ready(&mut self, readings: &[GpsReading]) {
        (self.batch)(readings)
    }

    fn on_fix_changed(&mut self, fix: FixState) {
        (self.fix)(fix)
    }
}
