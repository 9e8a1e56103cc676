use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed record [{record}]: field [{field}] {reason}")]
    MalformedRecord {
        record: usize,
        field: &'static str,
        reason: String
    },
    #[error("Unknown value '{value}' in field [{field}] for record [{record}]")]
    UnknownCategoryValue {
        record: usize,
        field: &'static str,
        value: String
    }
}

impl RecordError {
    pub fn missing_field(record: usize, field: &'static str) -> Self {
        Self::MalformedRecord {
            record,
            field,
            reason: "is missing".to_string()
        }
    }

    pub fn unparsable(record: usize, field: &'static str, value: &str, error: impl Display) -> Self {
        Self::MalformedRecord {
            record,
            field,
            reason: format!("has an invalid value '{value}': {error}")
        }
    }

    pub fn unknown_value(record: usize, field: &'static str, value: &str) -> Self {
        Self::UnknownCategoryValue {
            record,
            field,
            value: value.to_string()
        }
    }
}
