//! Error types for pricing input validation.
//!
//! This module provides:
//! - `InvalidInputError`: The single failure mode of the pricer, naming the
//!   offending field, its value, and the violated rule
//! - `InputField`: Which field of a `PricingInput` failed
//! - `InvalidReason`: Which rule the field violated

use std::fmt;
use thiserror::Error;

/// Field of a [`PricingInput`](super::PricingInput).
///
/// Displays as the snake_case field name, so error messages read the same
/// as the serialised record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Current price of the underlying (S)
    Spot,
    /// Contract strike price (K)
    Strike,
    /// Time to expiration in years (T)
    TimeToExpiry,
    /// Annualised risk-free rate (r)
    RiskFreeRate,
    /// Annualised volatility (σ)
    Volatility,
}

impl InputField {
    /// Returns the snake_case field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Spot => "spot",
            InputField::Strike => "strike",
            InputField::TimeToExpiry => "time_to_expiry",
            InputField::RiskFreeRate => "risk_free_rate",
            InputField::Volatility => "volatility",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation rule violated by an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// Value is zero or negative where a strictly positive value is required
    NonPositive,
    /// Value is NaN or infinite
    NonFinite,
    /// Value is finite but drives the model outside f64 range
    OutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NonPositive => f.write_str("must be positive"),
            InvalidReason::NonFinite => f.write_str("must be finite"),
            InvalidReason::OutOfRange => f.write_str("out of numerical range"),
        }
    }
}

/// Invalid pricing input.
///
/// Raised before any computation when a precondition on the pricing inputs
/// is violated. Carries the failing field, the rejected value, and the rule
/// it broke. Retrying with the same inputs always fails identically.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, InvalidInputError, InvalidReason};
///
/// let err = InvalidInputError::new(InputField::Volatility, 0.0, InvalidReason::NonPositive);
/// assert_eq!(format!("{}", err), "Invalid volatility: 0 (must be positive)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid {field}: {value} ({reason})")]
pub struct InvalidInputError {
    /// The field that failed validation
    pub field: InputField,
    /// The rejected value
    pub value: f64,
    /// The rule that was violated
    pub reason: InvalidReason,
}

impl InvalidInputError {
    /// Creates a new validation error.
    pub fn new(field: InputField, value: f64, reason: InvalidReason) -> Self {
        Self {
            field,
            value,
            reason,
        }
    }
}
