//! Construction-time errors for domain records

use thiserror::Error;

/// Errors raised while constructing or deriving values from domain records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("invariant violated on '{field}': {reason}")]
    InvariantViolation { field: &'static str, reason: String },

    #[error("value {value} for '{field}' cannot be represented as an exact decimal")]
    DecimalOutOfRange { field: &'static str, value: f64 },

    #[error("decimal overflow computing '{field}'")]
    Overflow { field: &'static str },
}

impl DomainError {
    pub fn invariant(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvariantViolation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::InvariantViolation { field, .. } => *field,
            DomainError::DecimalOutOfRange { field, .. } => *field,
            DomainError::Overflow { field } => *field,
        }
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::invariant(
            field,
            format!("must be a finite number >= 0, got {value}"),
        ))
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::invariant(
            field,
            format!("must be a finite number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_not_non_negative() {
        assert!(require_non_negative("co2e_tonnes", f64::NAN).is_err());
        assert!(require_non_negative("co2e_tonnes", f64::INFINITY).is_err());
        assert!(require_non_negative("co2e_tonnes", 0.0).is_ok());
    }

    #[test]
    fn error_reports_field() {
        let err = DomainError::invariant("period_end", "before start");
        assert_eq!(err.field(), "period_end");
        assert_eq!(
            err.to_string(),
            "invariant violated on 'period_end': before start"
        );
    }
}
