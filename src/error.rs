//! Error types returned by the risk calculators.

use core::fmt;

/// What went wrong. Codes are stable so a UI layer can map them to messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Negative, non-finite or malformed input
    InvalidInput = 1,
    /// Division by an explicit zero operand
    DivisionByZero = 2,
    /// A conversion would drop non-zero digits
    PrecisionLoss = 3,
    /// 256-bit arithmetic overflow
    MathOverflow = 4,
    /// Operands carry different fixed-point scales
    ScaleMismatch = 5,
}

impl ErrorKind {
    /// Stable numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Human readable description
    pub fn message(&self) -> &str {
        match self {
            ErrorKind::InvalidInput => "Input value is invalid",
            ErrorKind::DivisionByZero => "Division by zero",
            ErrorKind::PrecisionLoss => "Conversion would lose precision",
            ErrorKind::MathOverflow => "Math operation overflow",
            ErrorKind::ScaleMismatch => "Fixed-point scales do not match",
        }
    }

    /// Attach the name of the offending field.
    pub fn at(self, field: &'static str) -> RiskError {
        RiskError { kind: self, field }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Error kind plus the field it was raised for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RiskError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Input or operation that failed
    pub field: &'static str,
}

impl RiskError {
    /// Error of `kind` raised for `field`
    pub fn new(kind: ErrorKind, field: &'static str) -> Self {
        Self { kind, field }
    }

    /// Rename the field, used when a generic helper fails on behalf of a
    /// named input.
    pub fn on(self, field: &'static str) -> Self {
        Self { field, ..self }
    }
}

impl fmt::Display for RiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.message(), self.field)
    }
}

impl std::error::Error for RiskError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorKind::InvalidInput.code(), 1);
        assert_eq!(ErrorKind::ScaleMismatch.code(), 5);
    }

    #[test]
    fn display_names_field() {
        let err = ErrorKind::PrecisionLoss.at("collateral");
        assert_eq!(err.to_string(), "Conversion would lose precision (collateral)");
    }
}
