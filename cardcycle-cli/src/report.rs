//! Text and JSON rendering of cycle milestones and the closure banner.

use cardcycle_core::{
    format_date_short, BillingCycle, CreditAccount, CycleMilestones, UsageLevel, UrgencyResult,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Everything shown on one card tile.
#[derive(Debug, Clone, Serialize)]
pub struct CardView<'a> {
    pub account: &'a CreditAccount,
    pub milestones: CycleMilestones,
    pub current_cycle: BillingCycle,
    pub usage_percentage: f64,
    pub usage_level: UsageLevel,
    pub invoice_amount: Option<f64>,
}

impl<'a> CardView<'a> {
    pub fn new(account: &'a CreditAccount, reference: NaiveDate) -> Self {
        Self {
            account,
            milestones: account.milestones(reference),
            current_cycle: account.current_cycle(reference),
            usage_percentage: account.usage_percentage(),
            usage_level: account.usage_level(),
            invoice_amount: account.invoice_amount(),
        }
    }
}

pub fn render_milestones(m: &CycleMilestones, cycle: &BillingCycle) -> String {
    format!(
        "Next closing:  {} ({})\nNext due:      {} ({})\nBest purchase: {} ({})\nCurrent cycle: {} .. {} ({} days)\n",
        m.next_closing_date,
        format_date_short(m.next_closing_date),
        m.next_due_date,
        format_date_short(m.next_due_date),
        m.best_purchase_date,
        format_date_short(m.best_purchase_date),
        cycle.opens,
        cycle.closes,
        cycle.len_days(),
    )
}

fn level_label(level: UsageLevel) -> &'static str {
    match level {
        UsageLevel::Healthy => "ok",
        UsageLevel::Warning => "warning",
        UsageLevel::Danger => "danger",
    }
}

pub fn render_cards(views: &[CardView<'_>]) -> String {
    if views.is_empty() {
        return "No cards\n".to_string();
    }

    let mut s = String::new();
    for v in views {
        let a = v.account;
        let status = if a.is_active { "" } else { " [inactive]" };
        s.push_str(&format!("{} - {}{}\n", a.name, a.bank, status));
        s.push_str(&format!(
            "  limit {:.2} | available {:.2} | used {:.1}% ({})\n",
            a.credit_limit,
            a.available_limit,
            v.usage_percentage,
            level_label(v.usage_level)
        ));
        s.push_str(&format!(
            "  closes {} | due {} | best purchase {}\n",
            format_date_short(v.milestones.next_closing_date),
            format_date_short(v.milestones.next_due_date),
            format_date_short(v.milestones.best_purchase_date),
        ));
        if let Some(amount) = v.invoice_amount {
            s.push_str(&format!(
                "  invoice {:.2} due {}\n",
                amount,
                format_date_short(v.milestones.next_due_date)
            ));
        }
    }
    s
}

pub fn render_upcoming(result: Option<&UrgencyResult<'_>>) -> String {
    match result {
        None => "No active cards\n".to_string(),
        Some(r) if r.urgent => format!("URGENT: {}\n", r.banner()),
        Some(r) => format!("{}\n", r.banner()),
    }
}
