//! Date source used to resolve "today" when logging outfits.

use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;

/// Capability that answers the current calendar date.
pub trait DateSource {
    fn today(&self) -> NaiveDate;
}

impl<T: DateSource + ?Sized> DateSource for &T {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Local wall clock of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateSource;

impl DateSource for SystemDateSource {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Deterministic, manually driven date.
#[derive(Debug, Clone)]
pub struct FixedDateSource {
    date: Cell<NaiveDate>,
}

impl FixedDateSource {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Moves the date forward by `days`. Saturates at the calendar maximum.
    pub fn advance_days(&self, days: u64) {
        let current = self.date.get();
        self.date
            .set(current.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX));
    }
}

impl DateSource for FixedDateSource {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{DateSource, FixedDateSource};
    use chrono::NaiveDate;

    #[test]
    fn fixed_source_can_be_moved_forward() {
        let clock = FixedDateSource::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let borrowed: &dyn DateSource = &clock;
        assert_eq!(borrowed.today(), clock.today());
    }
}
