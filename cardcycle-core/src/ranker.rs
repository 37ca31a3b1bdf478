//! Cross-card ranking: which active card closes its statement soonest.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::CreditAccount;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgencyPolicy {
    /// A card closing within this many days (inclusive) is urgent
    pub threshold_days: i64,
}

impl Default for UrgencyPolicy {
    fn default() -> Self {
        Self { threshold_days: 7 }
    }
}

/// The closure of one card relative to a reference date.
#[derive(Debug, Clone, Serialize)]
pub struct UrgencyResult<'a> {
    pub account: &'a CreditAccount,
    pub days_until_closing: i64,
    pub next_closing_date: NaiveDate,
    pub urgent: bool,
}

impl UrgencyResult<'_> {
    /// One-line banner text, e.g. "Visa Gold closes in 3 days - 29/JAN".
    pub fn banner(&self) -> String {
        let when = match self.days_until_closing {
            1 => "closes tomorrow".to_string(),
            n => format!("closes in {n} days"),
        };
        format!(
            "{} {} - {}",
            self.account.name,
            when,
            format_date_short(self.next_closing_date)
        )
    }
}

/// Short "DD/MMM" label used on card tiles and banners.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%b").to_string().to_uppercase()
}

pub struct UpcomingClosureRanker;

impl UpcomingClosureRanker {
    /// The active card with the fewest days until its next closing, using the
    /// default 7-day urgency threshold. Ties keep the earliest card in
    /// `accounts` order.
    pub fn rank(accounts: &[CreditAccount], reference: NaiveDate) -> Option<UrgencyResult<'_>> {
        Self::rank_with_policy(accounts, reference, UrgencyPolicy::default())
    }

    pub fn rank_with_policy(
        accounts: &[CreditAccount],
        reference: NaiveDate,
        policy: UrgencyPolicy,
    ) -> Option<UrgencyResult<'_>> {
        // min_by_key returns the first of several equal minima.
        Self::candidates(accounts, reference, policy).min_by_key(|c| c.days_until_closing)
    }

    /// Ranks against an instant, truncated to its calendar date. Closing
    /// dates start at local midnight, so the ceiling of the fractional day
    /// difference equals the whole-date difference.
    pub fn rank_at<'a, Tz: TimeZone>(
        accounts: &'a [CreditAccount],
        instant: &DateTime<Tz>,
        policy: UrgencyPolicy,
    ) -> Option<UrgencyResult<'a>> {
        Self::rank_with_policy(accounts, instant.date_naive(), policy)
    }

    /// Every active card ordered by days until closing (stable on ties).
    pub fn upcoming(
        accounts: &[CreditAccount],
        reference: NaiveDate,
        policy: UrgencyPolicy,
    ) -> Vec<UrgencyResult<'_>> {
        let mut out: Vec<_> = Self::candidates(accounts, reference, policy).collect();
        out.sort_by_key(|c| c.days_until_closing);
        out
    }

    fn candidates(
        accounts: &[CreditAccount],
        reference: NaiveDate,
        policy: UrgencyPolicy,
    ) -> impl Iterator<Item = UrgencyResult<'_>> {
        accounts.iter().filter(|a| a.is_active).map(move |account| {
            let next_closing_date = account.milestones(reference).next_closing_date;
            let days_until_closing = (next_closing_date - reference).num_days();
            debug!(
                card = %account.id,
                %next_closing_date,
                days_until_closing,
                "closure candidate"
            );
            UrgencyResult {
                account,
                days_until_closing,
                next_closing_date,
                urgent: days_until_closing <= policy.threshold_days,
            }
        })
    }
}
