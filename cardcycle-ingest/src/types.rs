use cardcycle_core::{CreditAccount, MAX_DUE_OFFSET_DAYS};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{IngestError, Result};

/// Closing day shown when a record carries none
pub const DEFAULT_CLOSING_DAY: u32 = 1;
/// Due day shown when a record carries none
pub const DEFAULT_DUE_DAY: u32 = 10;

/// Record ids arrive as integers from the API and as text from CSV exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Decimal fields are serialized as strings by the backend ("3000.00").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn value(&self, field: &'static str) -> Result<f64> {
        match self {
            Amount::Number(n) => Ok(*n),
            Amount::Text(s) => s.trim().parse().map_err(|_| IngestError::InvalidAmount {
                field,
                value: s.clone(),
            }),
        }
    }
}

/// Normalized wire shape of one credit card from the account repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub credit_limit: Option<Amount>,
    #[serde(default)]
    pub available_limit: Option<Amount>,
    #[serde(default)]
    pub closing_day: Option<i64>,
    #[serde(default)]
    pub due_day: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub due_offset_days: Option<i64>,
}

fn default_active() -> bool {
    true
}

fn checked_day(field: &'static str, value: Option<i64>, fallback: u32, id: &RecordId) -> Result<u32> {
    match value {
        None => {
            warn!(card = %id, field, fallback, "missing day-of-month, using default");
            Ok(fallback)
        }
        Some(v) if (1..=31).contains(&v) => Ok(v as u32),
        Some(v) => Err(IngestError::DayOutOfRange { field, value: v }),
    }
}

impl AccountRecord {
    /// Validate and convert into the core account type.
    pub fn into_account(self) -> Result<CreditAccount> {
        let closing_day = checked_day("closing_day", self.closing_day, DEFAULT_CLOSING_DAY, &self.id)?;
        let due_day = checked_day("due_day", self.due_day, DEFAULT_DUE_DAY, &self.id)?;

        let credit_limit = self
            .credit_limit
            .as_ref()
            .ok_or(IngestError::MissingField("credit_limit"))?
            .value("credit_limit")?;
        // A card with no recorded usage has its whole limit available.
        let available_limit = match &self.available_limit {
            Some(a) => a.value("available_limit")?,
            None => credit_limit,
        };

        let due_offset_days = match self.due_offset_days {
            None => None,
            Some(n) => match u32::try_from(n) {
                Ok(days) if (1..=MAX_DUE_OFFSET_DAYS).contains(&days) => Some(days),
                _ => return Err(IngestError::InvalidOffset(n)),
            },
        };

        Ok(CreditAccount {
            id: self.id.to_string(),
            name: self.name,
            bank: self.bank,
            credit_limit,
            available_limit,
            closing_day,
            due_day,
            is_active: self.is_active,
            due_offset_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(closing: Option<i64>, due: Option<i64>) -> AccountRecord {
        AccountRecord {
            id: RecordId::Int(7),
            name: "Elo".into(),
            bank: "Caixa".into(),
            credit_limit: Some(Amount::Text("2500.00".into())),
            available_limit: Some(Amount::Number(2300.0)),
            closing_day: closing,
            due_day: due,
            is_active: true,
            due_offset_days: None,
        }
    }

    #[test]
    fn test_into_account() {
        let acct = record(Some(10), Some(20)).into_account().unwrap();
        assert_eq!(acct.id, "7");
        assert_eq!(acct.credit_limit, 2500.0);
        assert_eq!(acct.available_limit, 2300.0);
        assert_eq!((acct.closing_day, acct.due_day), (10, 20));
    }

    #[test]
    fn test_missing_days_use_defaults() {
        let acct = record(None, None).into_account().unwrap();
        assert_eq!(acct.closing_day, DEFAULT_CLOSING_DAY);
        assert_eq!(acct.due_day, DEFAULT_DUE_DAY);
    }

    #[test]
    fn test_day_out_of_range_rejected() {
        let err = record(Some(32), Some(5)).into_account().unwrap_err();
        assert!(matches!(err, IngestError::DayOutOfRange { field: "closing_day", value: 32 }));

        let err = record(Some(10), Some(0)).into_account().unwrap_err();
        assert!(matches!(err, IngestError::DayOutOfRange { field: "due_day", value: 0 }));
    }

    #[test]
    fn test_bad_amount_and_missing_limit() {
        let mut r = record(Some(10), Some(20));
        r.credit_limit = Some(Amount::Text("lots".into()));
        assert!(matches!(
            r.into_account().unwrap_err(),
            IngestError::InvalidAmount { field: "credit_limit", .. }
        ));

        let mut r = record(Some(10), Some(20));
        r.credit_limit = None;
        assert!(matches!(r.into_account().unwrap_err(), IngestError::MissingField("credit_limit")));
    }

    #[test]
    fn test_available_defaults_to_limit() {
        let mut r = record(Some(10), Some(20));
        r.available_limit = None;
        assert_eq!(r.into_account().unwrap().available_limit, 2500.0);
    }

    #[test]
    fn test_due_offset() {
        let mut r = record(Some(10), Some(20));
        r.due_offset_days = Some(21);
        assert_eq!(r.into_account().unwrap().due_offset_days, Some(21));

        let mut r = record(Some(10), Some(20));
        r.due_offset_days = Some(60);
        assert_eq!(r.into_account().unwrap().due_offset_days, Some(60));

        for bad in [0, -3, 61, 4_294_967_297] {
            let mut r = record(Some(10), Some(20));
            r.due_offset_days = Some(bad);
            assert!(matches!(r.into_account().unwrap_err(), IngestError::InvalidOffset(n) if n == bad));
        }
    }
}
