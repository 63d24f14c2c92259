use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscapeError {
    #[error("Invalid physical state: {quantity} = {value:e} ({reason})")]
    InvalidPhysicalState {
        quantity: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "No sign change in bracket [{low}, {high}]: f(low) = {f_low:e}, f(high) = {f_high:e}"
    )]
    NoSignChange {
        low: f64,
        high: f64,
        f_low: f64,
        f_high: f64,
    },

    #[error("Root finder did not converge after {iterations} iterations (last estimate {last_estimate})")]
    ConvergenceFailure { iterations: usize, last_estimate: f64 },

    #[error("Invalid atomic radius table: {0}")]
    InvalidTable(String),

    #[error("Invalid spectrum: {0}")]
    InvalidSpectrum(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EscapeResult<T> = Result<T, EscapeError>;

/// Fails with `InvalidPhysicalState` unless `value` is finite and strictly positive.
pub fn require_positive(quantity: &'static str, value: f64) -> EscapeResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EscapeError::InvalidPhysicalState {
            quantity,
            value,
            reason: "must be positive",
        })
    }
}

/// Fails unless `value` is finite and non-negative.
pub fn require_non_negative(quantity: &'static str, value: f64) -> EscapeResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EscapeError::InvalidPhysicalState {
            quantity,
            value,
            reason: "must be non-negative",
        })
    }
}

/// Fails unless `low < value <= high` (half-open from below).
pub fn require_in_range(
    quantity: &'static str,
    value: f64,
    low_exclusive: f64,
    high_inclusive: f64,
) -> EscapeResult<f64> {
    if value > low_exclusive && value <= high_inclusive {
        Ok(value)
    } else {
        Err(EscapeError::InvalidPhysicalState {
            quantity,
            value,
            reason: "outside allowed range",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("mass", 2.0).unwrap(), 2.0);
        assert!(require_positive("mass", 0.0).is_err());
        assert!(require_positive("mass", -1.0).is_err());
        assert!(require_positive("mass", f64::NAN).is_err());
        assert!(require_positive("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_in_range() {
        assert!(require_in_range("x1", 1.0, 0.0, 1.0).is_ok());
        assert!(require_in_range("x1", 0.0, 0.0, 1.0).is_err());
        assert!(require_in_range("x1", 1.01, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_error_message_names_quantity() {
        let err = require_positive("radius_cm", -3.0).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("radius_cm"), "{message}");
        assert!(message.contains("must be positive"), "{message}");
    }
}
