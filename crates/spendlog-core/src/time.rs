use chrono::{NaiveDate, NaiveDateTime};

/// Clock abstracts access to the current local time so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
