/// Inclusive range of timestamps in millis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampRange {
    pub start: i64,
    pub end: i64,
}

impl TimestampRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Range starting at `start` and lasting `duration` millis
    pub fn starting_at(start: i64, duration: i64) -> Self {
        Self::new(start, start + duration)
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start <= ts && ts <= self.end
    }
}
