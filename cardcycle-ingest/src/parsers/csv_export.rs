//! CSV exports of the card list.
//!
//! Expected header (column order is free, extra columns are ignored):
//!   id,name,bank,credit_limit,available_limit,closing_day,due_day,is_active
//!
//! An optional `due_offset_days` column sets a fixed number of days between
//! closing and due date; leave the cell empty to keep the day-of-month rule.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::types::{AccountRecord, Amount, RecordId};

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    bank: String,
    #[serde(default)]
    credit_limit: Option<String>,
    #[serde(default)]
    available_limit: Option<String>,
    #[serde(default)]
    closing_day: Option<i64>,
    #[serde(default)]
    due_day: Option<i64>,
    #[serde(default)]
    is_active: Option<String>,
    #[serde(default)]
    due_offset_days: Option<i64>,
}

fn parse_flag(s: Option<&str>) -> bool {
    match s.map(|s| s.trim().to_ascii_lowercase()) {
        None => true,
        Some(s) => !matches!(s.as_str(), "false" | "0" | "no" | "n"),
    }
}

fn non_empty(s: Option<String>) -> Option<Amount> {
    s.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(Amount::Text)
}

impl From<CsvRow> for AccountRecord {
    fn from(row: CsvRow) -> Self {
        AccountRecord {
            id: RecordId::Text(row.id.trim().to_string()),
            name: row.name.trim().to_string(),
            bank: row.bank.trim().to_string(),
            credit_limit: non_empty(row.credit_limit),
            available_limit: non_empty(row.available_limit),
            closing_day: row.closing_day,
            due_day: row.due_day,
            is_active: parse_flag(row.is_active.as_deref().filter(|s| !s.trim().is_empty())),
            due_offset_days: row.due_offset_days,
        }
    }
}

/// Decode account records from any CSV reader.
pub fn read_accounts_csv<R: Read>(reader: R) -> Result<Vec<AccountRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        out.push(row?.into());
    }
    Ok(out)
}

/// Decode account records from a CSV file.
pub fn parse_accounts_csv(path: impl AsRef<Path>) -> Result<Vec<AccountRecord>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_accounts_csv(file)
}
