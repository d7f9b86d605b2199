use chrono::{Local, NaiveDate};
use std::fmt::Debug;

/// Source of "today" for age derivation.
pub trait Clock: Debug + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Whole years between `birth_date` and `today`; a birth date in the future gives 0.
#[must_use]
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth_date).unwrap_or(0)
}
