//! Error types for the fincalc calculators.
//!
//! Every failure a calculator can report is a numeric-domain condition:
//! a zero denominator, a solver that did not converge, or an input outside
//! its recognised set. None of them are transient, so nothing is retried.

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// The main error type for calculator operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A formula's denominator is zero (or its sign makes the result meaningless).
    #[error("Division by zero: {context}")]
    DivisionByZero {
        /// Which quantity vanished.
        context: String,
    },

    /// Growth rate equals discount rate, so the growing perpetuity is undefined.
    #[error("Perpetuity undefined: growth rate equals discount rate ({rate})")]
    DegeneratePerpetuity {
        /// The common rate.
        rate: f64,
    },

    /// The IRR root-finder gave up.
    #[error("IRR did not converge after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// A value is not one of the recognised enumeration labels.
    #[error("Unrecognised value for {field}: {value}")]
    InvalidEnumeration {
        /// Name of the enumerated field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An input lies outside its application-defined range.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// The cash flow series is malformed.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the problem.
        reason: String,
    },
}

impl CalcError {
    /// Creates a division-by-zero error.
    #[must_use]
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Creates a non-convergence error.
    #[must_use]
    pub fn non_convergence(iterations: u32, residual: f64) -> Self {
        Self::NonConvergence {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::DegeneratePerpetuity { .. } => "degenerate_perpetuity",
            Self::NonConvergence { .. } => "non_convergence",
            Self::InvalidEnumeration { .. } => "invalid_enumeration",
            Self::InvalidInput { .. } => "invalid_input",
            Self::InvalidCashFlow { .. } => "invalid_cash_flow",
        }
    }
}

/// Checks that `value` lies in `[min, max]` and is finite.
pub(crate) fn ensure_in_range(name: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(CalcError::invalid_input(format!(
            "{name} must be within [{min}, {max}], got {value}"
        )));
    }
    Ok(())
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Checks that `value` is finite.
pub(crate) fn ensure_finite(name: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::non_convergence(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));

        let err = CalcError::division_by_zero("contribution margin");
        assert!(err.to_string().contains("contribution margin"));
    }

    #[test]
    fn test_error_kind() {
        let err = CalcError::InvalidEnumeration {
            field: "frequency",
            value: "Monthly".to_string(),
        };
        assert_eq!(err.kind(), "invalid_enumeration");
        assert_eq!(
            CalcError::DegeneratePerpetuity { rate: 0.1 }.kind(),
            "degenerate_perpetuity"
        );
    }

    #[test]
    fn test_range_checks() {
        assert!(ensure_in_range("beta", 1.2, 0.0, 10.0).is_ok());
        assert!(ensure_in_range("beta", 10.5, 0.0, 10.0).is_err());
        assert!(ensure_in_range("beta", f64::NAN, 0.0, 10.0).is_err());
        assert!(ensure_positive("fixed cost", 0.0).is_err());
        assert!(ensure_finite("cash", f64::INFINITY).is_err());
    }
}
