//! cardcycle-ingest: decode credit card records exported by the account
//! repository (JSON API responses, CSV exports) into core accounts.

pub mod error;
pub mod normalize;
pub mod parsers;
pub mod types;

pub use error::IngestError;
pub use normalize::{normalize, LoadReport, Rejected};
pub use parsers::csv_export::{parse_accounts_csv, read_accounts_csv};
pub use parsers::json::parse_accounts_json;
pub use types::{AccountRecord, Amount, RecordId};

use std::path::Path;

/// Load and validate accounts from a `.json` or `.csv` file.
pub fn load_accounts_file(path: impl AsRef<Path>) -> error::Result<LoadReport> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        parse_accounts_csv(path)?
    } else {
        parse_accounts_json(&std::fs::read_to_string(path)?)?
    };
    Ok(normalize(records))
}
