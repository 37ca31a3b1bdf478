//! Decoders for the account export formats.

pub mod csv_export;
pub mod json;
