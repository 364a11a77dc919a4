//! Daily tracking codes.
//!
//! A tracking code looks like `20240301-007`: the compact submission date
//! followed by a 1-based sequence that is one more than the number of rows
//! already stored for that date. Sequences are zero-padded to three digits and
//! widen naturally past 999.

use chrono::{Local, NaiveDateTime};

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the server's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCode {
    /// `DD/MM/YYYY`, stored on every row and used to count same-day rows.
    pub display_date: String,
    /// `YYYYMMDD-NNN`.
    pub code: String,
}

impl TrackingCode {
    /// Build the code that follows `existing_rows` rows already stored on the
    /// date of `now`.
    pub fn next(now: NaiveDateTime, existing_rows: u64) -> Self {
        let sequence = existing_rows + 1;
        Self {
            display_date: display_date(now),
            code: format!("{}-{:03}", now.format(COMPACT_DATE_FORMAT), sequence),
        }
    }
}

pub fn display_date(now: NaiveDateTime) -> String {
    now.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use regex::Regex;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn first_code_of_the_day() {
        let code = TrackingCode::next(at(2024, 3, 1), 0);
        assert_eq!(code.code, "20240301-001");
        assert_eq!(code.display_date, "01/03/2024");
    }

    #[test]
    fn sequence_follows_existing_rows() {
        assert_eq!(TrackingCode::next(at(2024, 12, 31), 41).code, "20241231-042");
    }

    #[test]
    fn sequence_widens_past_three_digits() {
        assert_eq!(TrackingCode::next(at(2024, 1, 5), 999).code, "20240105-1000");
    }

    #[test]
    fn code_shape() {
        let pattern = Regex::new(r"^\d{8}-\d{3}$").unwrap();
        for existing in [0, 9, 99, 998] {
            assert!(pattern.is_match(&TrackingCode::next(at(2025, 7, 14), existing).code));
        }
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = at(2023, 11, 2);
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
