//! Fixed-capacity batching of completed readings.

use crate::reading::GpsReading;

/// Readings grouped for the consumer.
///
/// The batch owns `capacity` slots. The slot at the current index is the
/// reading under construction, live from the start. A boundary sentence
/// advances the index; when it reaches `capacity` all slots are handed out
/// and cleared. Readings are never evicted one by one.
#[derive(Debug, Clone)]
pub struct ReadingBatch {
    slots: Vec<GpsReading>,
    count: usize,
}

impl ReadingBatch {
    pub fn new(capacity: usize) -> Self {
        ReadingBatch {
            slots: vec![GpsReading::default(); capacity],
            count: 0,
        }
    }

    /// Commit the reading under construction and move on to the next slot.
    ///
    /// `flush` is called synchronously with the full batch when the index
    /// reaches the capacity. Returns whether a flush happened.
    pub fn append_boundary<F>(&mut self, flush: F) -> bool
    where
        F: FnOnce(&[GpsReading]),
    {
        self.count += 1;
        if self.count < self.slots.len() {
            return false;
        }
        self.flush(flush);
        true
    }

    /// Hand out the committed readings, if any, and clear every slot.
    pub fn drain_on_stop<F>(&mut self, flush: F) -> bool
    where
        F: FnOnce(&[GpsReading]),
    {
        if self.count == 0 {
            self.clear();
            return false;
        }
        self.flush(flush);
        true
    }

    fn flush<F>(&mut self, flush: F)
    where
        F: FnOnce(&[GpsReading]),
    {
        debug!("flushing batch of {} readings", self.count);
        flush(&self.slots[..self.count]);
        self.clear();
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = GpsReading::default();
        }
        self.count = 0;
    }

    /// The reading under construction.
    #[inline]
    pub fn active(&self) -> &GpsReading {
        &self.slots[self.count]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut GpsReading {
        &mut self.slots[self.count]
    }

    /// Committed readings not yet handed out.
    #[inline]
    pub fn readings(&self) -> &[GpsReading] {
        &self.slots[..self.count]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Field;

    fn boundary(batch: &mut ReadingBatch, flushes: &mut Vec<Vec<GpsReading>>, tag: &str) {
        batch.append_boundary(|r| flushes.push(r.to_vec()));
        batch.active_mut().set(Field::Time, tag.as_bytes()).unwrap();
    }

    fn times(readings: &[GpsReading]) -> Vec<String> {
        readings.iter().map(|r| r.time.to_string()).collect()
    }

    #[test]
    fn first_slot_is_live_from_the_start() {
        let mut batch = ReadingBatch::new(3);
        batch.active_mut().set(Field::Date, b"170617").unwrap();
        assert!(!batch.append_boundary(|_| panic!("no flush expected")));
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.readings()[0].date, "170617");
        assert!(batch.active().is_empty());
    }

    #[test]
    fn flushes_when_index_reaches_capacity() {
        let mut batch = ReadingBatch::new(3);
        let mut flushes = Vec::new();
        for tag in &["a", "b"] {
            boundary(&mut batch, &mut flushes, tag);
        }
        assert!(flushes.is_empty());
        boundary(&mut batch, &mut flushes, "c");
        assert_eq!(flushes.len(), 1);
        // slot 0 predates the first boundary
        assert_eq!(times(&flushes[0]), vec!["", "a", "b"]);
        assert!(batch.is_empty());
        assert_eq!(batch.active().time, "c");
    }

    #[test]
    fn slots_are_cleared_after_flush() {
        let mut batch = ReadingBatch::new(2);
        let mut flushes = Vec::new();
        for tag in &["a", "b"] {
            boundary(&mut batch, &mut flushes, tag);
        }
        assert_eq!(times(&flushes[0]), vec!["", "a"]);
        assert_eq!(batch.active().time, "b");
        // slot 1 held "a" before the flush
        batch.append_boundary(|r| flushes.push(r.to_vec()));
        assert!(batch.active().is_empty());
        assert_eq!(batch.readings()[0].time, "b");
    }

    #[test]
    fn drain_flushes_committed_readings() {
        let mut batch = ReadingBatch::new(10);
        let mut flushes = Vec::new();
        for tag in &["a", "b"] {
            boundary(&mut batch, &mut flushes, tag);
        }
        assert!(batch.drain_on_stop(|r| flushes.push(r.to_vec())));
        assert_eq!(flushes.len(), 1);
        assert_eq!(times(&flushes[0]), vec!["", "a"]);
        assert!(batch.active().is_empty());
        assert!(!batch.drain_on_stop(|_| panic!("nothing left")));
    }

    #[test]
    fn drain_without_boundary_is_silent() {
        let mut batch = ReadingBatch::new(10);
        batch.active_mut().set(Field::Time, b"x").unwrap();
        assert!(!batch.drain_on_stop(|_| panic!("no flush expected")));
        assert!(batch.active().is_empty());
    }

    #[test]
    fn capacity_of_one() {
        let mut batch = ReadingBatch::new(1);
        let mut flushes = Vec::new();
        for tag in &["a", "b", "c"] {
            boundary(&mut batch, &mut flushes, tag);
        }
        assert_eq!(flushes.len(), 3);
        assert!(flushes.iter().all(|f| f.len() == 1));
        assert_eq!(times(&flushes[2]), vec!["b"]);
    }
}
