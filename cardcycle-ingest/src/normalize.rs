//! Turn decoded records into core accounts, keeping a list of rejects.

use cardcycle_core::CreditAccount;
use tracing::warn;

use crate::error::IngestError;
use crate::types::AccountRecord;

#[derive(Debug)]
pub struct Rejected {
    pub id: String,
    pub error: IngestError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub accounts: Vec<CreditAccount>,
    pub rejected: Vec<Rejected>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validate every record; input order is preserved among accepted accounts.
pub fn normalize(records: Vec<AccountRecord>) -> LoadReport {
    let mut report = LoadReport::default();
    for record in records {
        let id = record.id.to_string();
        match record.into_account() {
            Ok(account) => report.accounts.push(account),
            Err(error) => {
                warn!(card = %id, %error, "rejecting account record");
                report.rejected.push(Rejected { id, error });
            }
        }
    }
    report
}
