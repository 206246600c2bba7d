//! Source of the "today" stamped into every document.

use chrono::{Local, NaiveDate};

use crate::error::{Result, TransformError};

/// Display format of the `date` field.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Supplies the current date. Inject a [`FixedClock`] for reproducible output.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `DD/MM/YYYY` date.
    pub fn parse(value: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|source| TransformError::InvalidDate {
                value: value.to_string(),
                source,
            })
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
