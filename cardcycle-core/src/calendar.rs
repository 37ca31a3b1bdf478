//! Calendar arithmetic on (year, month) pairs.
//!
//! Day-of-month values that do not exist in a month are clamped to the
//! month's last day: day 31 in April is April 30, day 29 in a non-leap
//! February is February 28.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        // Not a month; callers go through YearMonth, which keeps 1..=12.
        _ => 30,
    }
}

/// A calendar month, independent of any day. The month number is always in
/// `1..=12`; construction and deserialization clamp it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl From<RawYearMonth> for YearMonth {
    fn from(raw: RawYearMonth) -> Self {
        Self::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based month number
    pub fn month(self) -> u32 {
        self.month
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month, rolling December into January of the next year.
    pub fn succ(self) -> Self {
        self.add_months(1)
    }

    /// The preceding month, rolling January into December of the previous year.
    pub fn pred(self) -> Self {
        self.add_months(-1)
    }

    pub fn add_months(self, delta: i32) -> Self {
        let total = self.month as i32 - 1 + delta;
        Self {
            year: self.year + total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn len_days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The date in this month whose day-of-month is `day`, clamped into
    /// `1..=len_days()`.
    pub fn day(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.len_days());
        // Only fails outside chrono's supported year range.
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MAX)
    }

    /// True when `day` does not exist in this month and [`YearMonth::day`] clamps it.
    pub fn clamps(self, day: u32) -> bool {
        day > self.len_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_month_rollover() {
        let dec = YearMonth::new(2024, 12);
        assert_eq!(dec.succ(), YearMonth::new(2025, 1));
        assert_eq!(YearMonth::new(2025, 1).pred(), dec);
        assert_eq!(dec.add_months(14), YearMonth::new(2026, 2));
        assert_eq!(dec.add_months(-12), YearMonth::new(2023, 12));
    }

    #[test]
    fn test_day_clamps_to_month_end() {
        assert_eq!(YearMonth::new(2024, 4).day(31), d(2024, 4, 30));
        assert_eq!(YearMonth::new(2023, 2).day(29), d(2023, 2, 28));
        assert_eq!(YearMonth::new(2024, 2).day(30), d(2024, 2, 29));
        assert_eq!(YearMonth::new(2024, 1).day(0), d(2024, 1, 1));
        assert!(YearMonth::new(2024, 4).clamps(31));
        assert!(!YearMonth::new(2024, 5).clamps(31));
    }

    #[test]
    fn test_out_of_range_month_is_clamped() {
        let high = YearMonth::new(2024, 13);
        assert_eq!(high.month(), 12);
        assert_eq!(high.len_days(), 31);
        assert_eq!(high.day(31), d(2024, 12, 31));
        assert_eq!(high.succ(), YearMonth::new(2025, 1));

        let low = YearMonth::new(2024, 0);
        assert_eq!(low.month(), 1);
        assert_eq!(low.pred(), YearMonth::new(2023, 12));

        let parsed: YearMonth = serde_json::from_str(r#"{"year":2023,"month":40}"#).unwrap();
        assert_eq!(parsed, YearMonth::new(2023, 12));
        assert_eq!(parsed.year(), 2023);
    }

    #[test]
    fn test_of_date() {
        assert_eq!(YearMonth::of(d(2024, 3, 20)), YearMonth::new(2024, 3));
    }
}
