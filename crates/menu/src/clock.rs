use chrono::{DateTime, Local, NaiveDate, Utc};

/// Time source for selection timestamps and the calendar-day boundary.
///
/// `now` feeds the repeat window, `today` decides when the menu rolls over.
/// A day ends at local midnight, not at a fixed UTC offset.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A pinned instant, for tests. Local time is taken to equal UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}
