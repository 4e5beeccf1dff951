use std::fmt;

use thiserror::Error;

use crate::domain::transaction::{MAX_AMOUNT_UNITS, MAX_FRACTION_DIGITS};

/// Error type that captures every failure a ledger mutation can report.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures raised by the key-value store or while encoding its contents.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage quota exceeded writing `{key}`: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}

/// Rejected input for a new transaction, reported against a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: FormField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: FormField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// Input fields a caller submits when recording a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Amount,
    Kind,
    Category,
    Date,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Title => "title",
            FormField::Amount => "amount",
            FormField::Kind => "type",
            FormField::Category => "category",
            FormField::Date => "date",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Blank,
    NotANumber(String),
    NotPositive,
    NotFinite,
    TooLarge,
    TooPrecise,
    Unrecognized(String),
    InvalidDate(String),
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Blank => f.write_str("is required"),
            ValidationReason::NotANumber(raw) => write!(f, "`{raw}` is not a number"),
            ValidationReason::NotPositive => f.write_str("must be greater than zero"),
            ValidationReason::NotFinite => f.write_str("must be a finite number"),
            ValidationReason::TooLarge => write!(f, "must not exceed {MAX_AMOUNT_UNITS}"),
            ValidationReason::TooPrecise => {
                write!(f, "must have at most {MAX_FRACTION_DIGITS} decimal places")
            }
            ValidationReason::Unrecognized(raw) => write!(f, "`{raw}` is not a known value"),
            ValidationReason::InvalidDate(raw) => {
                write!(f, "`{raw}` is not a calendar date (expected YYYY-MM-DD)")
            }
        }
    }
}

/// Failures while reading or writing the tracker configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::new(FormField::Amount, ValidationReason::NotPositive);
        assert_eq!(err.to_string(), "amount: must be greater than zero");

        let err = ValidationError::new(FormField::Amount, ValidationReason::TooPrecise);
        assert_eq!(err.to_string(), "amount: must have at most 2 decimal places");
    }

    #[test]
    fn ledger_error_is_transparent_over_storage() {
        let err: LedgerError = StorageError::QuotaExceeded {
            key: "transactions".into(),
            needed: 12,
            limit: 8,
        }
        .into();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
