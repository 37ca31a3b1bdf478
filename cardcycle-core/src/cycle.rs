//! Billing-cycle milestones: next statement closing, next payment due date
//! and the best day to make a purchase.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;

/// Dates derived for one card relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleMilestones {
    /// First closing date strictly after the reference date
    pub next_closing_date: NaiveDate,
    /// First due date strictly after `next_closing_date`
    pub next_due_date: NaiveDate,
    /// Day after `next_closing_date`; a purchase here lands on the statement after next
    pub best_purchase_date: NaiveDate,
}

/// Largest due offset accepted from account records and the command line.
pub const MAX_DUE_OFFSET_DAYS: u32 = 60;

/// How the payment due date is placed relative to the closing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueRule {
    /// Due on a day-of-month. When the due day is on or before the closing
    /// day it falls in the month after the closing month, otherwise in the
    /// same month.
    DayOfMonth(u32),
    /// Due a fixed number of days after the closing date (minimum 1).
    DaysAfterClosing(u32),
}

/// The statement period that ends on a closing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle {
    /// Day after the previous closing date
    pub opens: NaiveDate,
    /// Closing date of this statement
    pub closes: NaiveDate,
}

impl BillingCycle {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.opens <= date && date <= self.closes
    }

    pub fn len_days(&self) -> i64 {
        (self.closes - self.opens).num_days() + 1
    }
}

/// Computes cycle milestones from a card's configured days.
pub struct CycleDateCalculator;

impl CycleDateCalculator {
    /// Milestones for a card closing on `closing_day` and due on `due_day`.
    ///
    /// A closing date equal to `reference` counts as already elapsed, so the
    /// result always lies strictly after `reference`.
    pub fn compute(reference: NaiveDate, closing_day: u32, due_day: u32) -> CycleMilestones {
        Self::compute_with_rule(reference, closing_day, DueRule::DayOfMonth(due_day))
    }

    pub fn compute_with_rule(
        reference: NaiveDate,
        closing_day: u32,
        rule: DueRule,
    ) -> CycleMilestones {
        let next_closing_date = next_closing_date(reference, closing_day);

        let next_due_date = match rule {
            DueRule::DayOfMonth(due_day) => due_by_day_of_month(next_closing_date, closing_day, due_day),
            // Saturates at the last representable date.
            DueRule::DaysAfterClosing(days) => next_closing_date
                .checked_add_days(Days::new(u64::from(days.max(1))))
                .unwrap_or(NaiveDate::MAX),
        };

        CycleMilestones {
            next_closing_date,
            next_due_date,
            best_purchase_date: next_day(next_closing_date),
        }
    }

    /// Same as [`CycleDateCalculator::compute`], truncating an instant to its
    /// calendar date in the instant's own timezone.
    pub fn compute_at<Tz: TimeZone>(
        instant: &DateTime<Tz>,
        closing_day: u32,
        due_day: u32,
    ) -> CycleMilestones {
        Self::compute(instant.date_naive(), closing_day, due_day)
    }

    /// The statement period closing on the next closing date after `reference`.
    pub fn current_cycle(reference: NaiveDate, closing_day: u32) -> BillingCycle {
        let closes = next_closing_date(reference, closing_day);
        let previous = YearMonth::of(closes).pred().day(closing_day);
        BillingCycle {
            opens: next_day(previous),
            closes,
        }
    }
}

fn next_closing_date(reference: NaiveDate, closing_day: u32) -> NaiveDate {
    let month = YearMonth::of(reference);
    let candidate = month.day(closing_day);
    if candidate <= reference {
        month.succ().day(closing_day)
    } else {
        candidate
    }
}

fn due_by_day_of_month(next_closing: NaiveDate, closing_day: u32, due_day: u32) -> NaiveDate {
    let closing_month = YearMonth::of(next_closing);
    let month = if due_day <= closing_day {
        closing_month.succ()
    } else {
        closing_month
    };

    let due = month.day(due_day);
    // Clamping both days into a short month can put them on the same date.
    if due <= next_closing {
        month.succ().day(due_day)
    } else {
        due
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::CreditAccount;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_due_wraps_into_following_month() {
        let m = CycleDateCalculator::compute(d(2024, 1, 15), 29, 5);
        assert_eq!(m.next_closing_date, d(2024, 1, 29));
        assert_eq!(m.next_due_date, d(2024, 2, 5));
        assert_eq!(m.best_purchase_date, d(2024, 1, 30));
    }

    #[test]
    fn test_closing_already_passed_rolls_month() {
        let m = CycleDateCalculator::compute(d(2024, 3, 20), 15, 25);
        assert_eq!(m.next_closing_date, d(2024, 4, 15));
        assert_eq!(m.next_due_date, d(2024, 4, 25));
        assert_eq!(m.best_purchase_date, d(2024, 4, 16));
    }

    #[test]
    fn test_year_rollover() {
        let m = CycleDateCalculator::compute(d(2024, 12, 25), 20, 5);
        assert_eq!(m.next_closing_date, d(2025, 1, 20));
        assert_eq!(m.next_due_date, d(2025, 2, 5));
        assert_eq!(m.best_purchase_date, d(2025, 1, 21));
    }

    #[test]
    fn test_closing_on_reference_counts_as_elapsed() {
        let m = CycleDateCalculator::compute(d(2024, 5, 10), 10, 20);
        assert_eq!(m.next_closing_date, d(2024, 6, 10));
        assert_eq!(m.next_due_date, d(2024, 6, 20));
    }

    #[test]
    fn test_equal_days_due_next_month() {
        let m = CycleDateCalculator::compute(d(2024, 5, 1), 15, 15);
        assert_eq!(m.next_closing_date, d(2024, 5, 15));
        assert_eq!(m.next_due_date, d(2024, 6, 15));
    }

    #[test]
    fn test_closing_clamped_in_short_month() {
        let m = CycleDateCalculator::compute(d(2024, 4, 10), 31, 10);
        assert_eq!(m.next_closing_date, d(2024, 4, 30));
        assert_eq!(m.next_due_date, d(2024, 5, 10));
        assert_eq!(m.best_purchase_date, d(2024, 5, 1));
    }

    #[test]
    fn test_clamped_due_collision_moves_forward() {
        let m = CycleDateCalculator::compute(d(2023, 2, 1), 30, 31);
        assert_eq!(m.next_closing_date, d(2023, 2, 28));
        assert_eq!(m.next_due_date, d(2023, 3, 31));
    }

    #[test]
    fn test_days_after_closing_rule() {
        let m = CycleDateCalculator::compute_with_rule(d(2024, 1, 15), 10, DueRule::DaysAfterClosing(20));
        assert_eq!(m.next_closing_date, d(2024, 2, 10));
        assert_eq!(m.next_due_date, d(2024, 3, 1));

        let zero = CycleDateCalculator::compute_with_rule(d(2024, 1, 15), 10, DueRule::DaysAfterClosing(0));
        assert_eq!(zero.next_due_date, d(2024, 2, 11));
    }

    #[test]
    fn test_huge_offset_saturates() {
        for days in [100_000_000, u32::MAX] {
            let m = CycleDateCalculator::compute_with_rule(d(2024, 1, 15), 10, DueRule::DaysAfterClosing(days));
            assert_eq!(m.next_closing_date, d(2024, 2, 10));
            assert_eq!(m.next_due_date, NaiveDate::MAX);
            assert!(m.next_due_date > m.next_closing_date);
        }

        let acct = CreditAccount::new("1", "Visa", "BB", 1000.0, 10, 20).with_due_offset(u32::MAX);
        assert_eq!(acct.milestones(d(2024, 1, 15)).next_due_date, NaiveDate::MAX);
    }

    #[test]
    fn test_compute_at_truncates_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(
            CycleDateCalculator::compute_at(&instant, 29, 5),
            CycleDateCalculator::compute(d(2024, 1, 15), 29, 5)
        );
    }

    #[test]
    fn test_current_cycle() {
        let cycle = CycleDateCalculator::current_cycle(d(2024, 3, 20), 15);
        assert_eq!(cycle.opens, d(2024, 3, 16));
        assert_eq!(cycle.closes, d(2024, 4, 15));
        assert!(cycle.contains(d(2024, 3, 20)));
        assert_eq!(cycle.len_days(), 31);

        let clamped = CycleDateCalculator::current_cycle(d(2024, 3, 5), 31);
        assert_eq!(clamped.opens, d(2024, 3, 1));
        assert_eq!(clamped.closes, d(2024, 3, 31));
    }
}
