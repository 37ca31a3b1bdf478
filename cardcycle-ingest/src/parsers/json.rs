//! JSON account lists as returned by `GET /financial/credit-cards/`.
//!
//! The endpoint answers either with a bare array or, when pagination is
//! enabled, with `{"count": .., "next": .., "results": [...]}`.

use serde::Deserialize;

use crate::error::Result;
use crate::types::AccountRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Bare(Vec<AccountRecord>),
    Paginated { results: Vec<AccountRecord> },
}

/// Decode account records from a JSON document.
pub fn parse_accounts_json(text: &str) -> Result<Vec<AccountRecord>> {
    let envelope: Envelope = serde_json::from_str(text)?;
    Ok(match envelope {
        Envelope::Bare(records) => records,
        Envelope::Paginated { results } => results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, RecordId};

    #[test]
    fn test_parse_bare_array() {
        let text = r#"[
            {"id": 1, "name": "Visa Gold", "bank": "Banco do Brasil",
             "credit_limit": "3000.00", "available_limit": "2866.10",
             "usage_percentage": 4.46, "closing_day": 29, "due_day": 5,
             "is_active": true, "created_at": "2024-01-15T10:00:00Z"}
        ]"#;
        let records = parse_accounts_json(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[0].credit_limit, Some(Amount::Text("3000.00".into())));
        assert_eq!(records[0].closing_day, Some(29));
    }

    #[test]
    fn test_parse_paginated_envelope() {
        let text = r#"{"count": 2, "next": null, "previous": null, "results": [
            {"id": 2, "name": "Platinum", "credit_limit": 8000, "closing_day": 15, "due_day": 25},
            {"id": "card-3", "name": "Elo", "credit_limit": 2500.5, "is_active": false}
        ]}"#;
        let records = parse_accounts_json(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].credit_limit, Some(Amount::Number(8000.0)));
        assert!(records[0].is_active);
        assert_eq!(records[1].id, RecordId::Text("card-3".into()));
        assert!(!records[1].is_active);
        assert_eq!(records[1].closing_day, None);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(parse_accounts_json(r#"{"detail": "Authentication credentials were not provided."}"#).is_err());
    }
}
