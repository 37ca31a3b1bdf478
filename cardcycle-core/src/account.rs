//! Credit card account records as seen by the cycle calculations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::{BillingCycle, CycleDateCalculator, CycleMilestones, DueRule};

/// A credit card account, read-only to the cycle calculations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditAccount {
    /// Opaque identifier from the account repository
    pub id: String,
    /// Display name ("Visa Gold")
    pub name: String,
    /// Issuing bank
    pub bank: String,
    /// Total credit limit
    pub credit_limit: f64,
    /// Limit still available for new charges
    pub available_limit: f64,
    /// Day-of-month the statement closes (1-31)
    pub closing_day: u32,
    /// Day-of-month the payment is due (1-31)
    pub due_day: u32,
    /// Inactive cards are skipped by the closure ranking
    pub is_active: bool,
    /// Explicit days between closing and due date; overrides `due_day` placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_offset_days: Option<u32>,
}

/// Limit usage bucket used for card badges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UsageLevel {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "danger")]
    Danger,
}

impl UsageLevel {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            UsageLevel::Danger
        } else if pct >= 60.0 {
            UsageLevel::Warning
        } else {
            UsageLevel::Healthy
        }
    }
}

impl CreditAccount {
    /// Create an active card with the full limit available
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bank: impl Into<String>,
        credit_limit: f64,
        closing_day: u32,
        due_day: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bank: bank.into(),
            credit_limit,
            available_limit: credit_limit,
            closing_day,
            due_day,
            is_active: true,
            due_offset_days: None,
        }
    }

    pub fn with_available_limit(mut self, available: f64) -> Self {
        self.available_limit = available;
        self
    }

    pub fn with_due_offset(mut self, days: u32) -> Self {
        self.due_offset_days = Some(days);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn used_amount(&self) -> f64 {
        self.credit_limit - self.available_limit
    }

    /// Share of the limit in use, 0-100 (0 when the limit is not positive)
    pub fn usage_percentage(&self) -> f64 {
        if self.credit_limit > 0.0 {
            self.used_amount() / self.credit_limit * 100.0
        } else {
            0.0
        }
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percentage(self.usage_percentage())
    }

    pub fn can_charge(&self, amount: f64) -> bool {
        self.available_limit >= amount
    }

    /// Amount owed on the next statement, if any
    pub fn invoice_amount(&self) -> Option<f64> {
        let used = self.used_amount();
        (used > 0.0).then_some(used)
    }

    pub fn due_rule(&self) -> DueRule {
        match self.due_offset_days {
            Some(days) => DueRule::DaysAfterClosing(days),
            None => DueRule::DayOfMonth(self.due_day),
        }
    }

    pub fn milestones(&self, reference: NaiveDate) -> CycleMilestones {
        CycleDateCalculator::compute_with_rule(reference, self.closing_day, self.due_rule())
    }

    pub fn current_cycle(&self, reference: NaiveDate) -> BillingCycle {
        CycleDateCalculator::current_cycle(reference, self.closing_day)
    }
}
