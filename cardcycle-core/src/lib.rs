//! cardcycle-core: credit card billing-cycle dates and closure ranking

pub mod account;
pub mod calendar;
pub mod cycle;
pub mod ranker;
pub mod time;

pub use account::{CreditAccount, UsageLevel};
pub use calendar::{days_in_month, YearMonth};
pub use cycle::{BillingCycle, CycleDateCalculator, CycleMilestones, DueRule, MAX_DUE_OFFSET_DAYS};
pub use ranker::{format_date_short, UpcomingClosureRanker, UrgencyPolicy, UrgencyResult};
pub use time::{parse_reference_date, parse_tz, reference_date_in};
