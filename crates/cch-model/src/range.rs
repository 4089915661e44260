use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Closed reporting interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Bounds at midnight of each given day.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// The widest representable range; every non-null timestamp falls inside.
    pub fn unbounded() -> Self {
        Self::new(NaiveDateTime::MIN, NaiveDateTime::MAX)
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::unbounded()
    }

    /// Inclusive membership test. A null timestamp is never inside.
    pub fn contains(&self, value: Option<NaiveDateTime>) -> bool {
        value.is_some_and(|ts| ts >= self.start && ts <= self.end)
    }

    /// True for a non-null timestamp at or before the range end.
    pub fn not_after_end(&self, value: Option<NaiveDateTime>) -> bool {
        value.is_some_and(|ts| ts <= self.end)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
