//! Pricing input record.
//!
//! [`PricingInput`] bundles the five market and contract parameters of the
//! Black-Scholes formula. It carries no identity and no state beyond the
//! values themselves.

use serde::{Deserialize, Serialize};

use super::error::{InputField, InvalidInputError, InvalidReason};

/// Market and contract parameters for pricing a European option.
///
/// All fields are public so callers can build the record by struct literal
/// or deserialise it; [`validate`](PricingInput::validate) must then be
/// called (the pricer does so on every call).
///
/// # Examples
/// ```
/// use pricer_core::types::PricingInput;
///
/// let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2).unwrap();
/// assert_eq!(input.spot, 100.0);
///
/// // Negative rates are allowed
/// assert!(PricingInput::new(100.0, 105.0, 0.5, -0.01, 0.2).is_ok());
///
/// // Zero volatility is not
/// assert!(PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Current price of the underlying (S), must be > 0
    pub spot: f64,
    /// Strike price (K), must be > 0
    pub strike: f64,
    /// Time to expiration in years (T), must be > 0
    pub time_to_expiry: f64,
    /// Annualised risk-free rate (r), any finite value
    pub risk_free_rate: f64,
    /// Annualised volatility (σ), must be > 0
    pub volatility: f64,
}

impl PricingInput {
    /// Creates a validated pricing input.
    ///
    /// # Errors
    /// Returns [`InvalidInputError`] for the first field (in declaration
    /// order) that is non-finite, or non-positive where positivity is required.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, InvalidInputError> {
        let input = Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        };
        input.validate()?;
        Ok(input)
    }

    /// Checks every precondition of the pricing formula.
    ///
    /// `spot`, `strike`, `time_to_expiry` and `volatility` must be finite and
    /// strictly positive; `risk_free_rate` must be finite.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        positive(InputField::Spot, self.spot)?;
        positive(InputField::Strike, self.strike)?;
        positive(InputField::TimeToExpiry, self.time_to_expiry)?;
        finite(InputField::RiskFreeRate, self.risk_free_rate)?;
        positive(InputField::Volatility, self.volatility)?;
        Ok(())
    }

    /// Returns a copy with a different strike.
    ///
    /// The result is not re-validated; pass it to the pricer or call
    /// [`validate`](PricingInput::validate).
    #[inline]
    pub fn with_strike(self, strike: f64) -> Self {
        Self { strike, ..self }
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

#[inline]
fn finite(field: InputField, value: f64) -> Result<(), InvalidInputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidInputError::new(field, value, InvalidReason::NonFinite))
    }
}

#[inline]
fn positive(field: InputField, value: f64) -> Result<(), InvalidInputError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::new(field, value, InvalidReason::NonPositive))
    }
}
