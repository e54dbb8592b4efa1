//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{InputField, InvalidInputError, InvalidReason, PricingInput};
use serde::{Deserialize, Serialize};

use crate::instruments::OptionType;

/// Price and sensitivities of a European option.
///
/// Always fully populated: the pricer either returns a complete result or
/// an error.
///
/// # Fields
/// - `price`: Theoretical option value
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `vega`: ∂V/∂σ
/// - `theta`: Time decay ∂V/∂t = -∂V/∂T (per year, usually negative)
/// - `rho`: ∂V/∂r
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Theoretical option value.
    pub price: f64,
    /// Delta: ∂V/∂S (sensitivity to spot price).
    pub delta: f64,
    /// Gamma: ∂²V/∂S² (convexity with respect to spot).
    pub gamma: f64,
    /// Vega: ∂V/∂σ (sensitivity to volatility).
    pub vega: f64,
    /// Theta: time decay per year.
    pub theta: f64,
    /// Rho: ∂V/∂r (sensitivity to interest rate).
    pub rho: f64,
}

impl PricingResult {
    /// Returns true when the price and every Greek are finite.
    pub fn is_finite(&self) -> bool {
        [self.price, self.delta, self.gamma, self.vega, self.theta, self.rho]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Black-Scholes model for European option pricing.
///
/// Built from a validated [`PricingInput`]; d₁, d₂, √T and the discount
/// factor are computed once on construction and shared by every Greek.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingInput;
/// use pricer_models::analytical::BlackScholes;
///
/// let input = PricingInput::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let bs = BlackScholes::new(input).unwrap();
/// let call_price = bs.price_call();
/// let put_price = bs.price_put();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    input: PricingInput,
    /// √T
    sqrt_t: f64,
    /// e^(-rT)
    discount: f64,
    d1: f64,
    d2: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// Returns [`InvalidInputError`] when spot, strike, time to expiry or
    /// volatility is not strictly positive, or any field is non-finite.
    /// Inputs that overflow the discount factor, ln(S/K), σ² or d₁/d₂ fail
    /// with [`InvalidReason::OutOfRange`].
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::{InputField, PricingInput};
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2).unwrap();
    /// assert!(BlackScholes::new(input).is_ok());
    ///
    /// let degenerate = PricingInput { time_to_expiry: 0.0, ..input };
    /// let err = BlackScholes::new(degenerate).unwrap_err();
    /// assert_eq!(err.field, InputField::TimeToExpiry);
    /// ```
    pub fn new(input: PricingInput) -> Result<Self, InvalidInputError> {
        input.validate()?;

        let PricingInput {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        } = input;

        let discount = input.discount_factor();
        if !(strike * discount).is_finite() {
            return Err(out_of_range(InputField::RiskFreeRate, risk_free_rate));
        }

        let sqrt_t = time_to_expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;

        // d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T)
        let log_moneyness = (spot / strike).ln();
        if !log_moneyness.is_finite() {
            return Err(if log_moneyness > 0.0 {
                out_of_range(InputField::Spot, spot)
            } else {
                out_of_range(InputField::Strike, strike)
            });
        }

        let half_variance = 0.5 * volatility * volatility;
        if !half_variance.is_finite() {
            return Err(out_of_range(InputField::Volatility, volatility));
        }

        let drift = (risk_free_rate + half_variance) * time_to_expiry;
        if !drift.is_finite() {
            return Err(if (half_variance * time_to_expiry).is_finite() {
                out_of_range(InputField::RiskFreeRate, risk_free_rate)
            } else {
                out_of_range(InputField::Volatility, volatility)
            });
        }

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;
        if !d1.is_finite() || !d2.is_finite() {
            return Err(out_of_range(InputField::Volatility, volatility));
        }

        Ok(Self {
            input,
            sqrt_t,
            discount,
            d1,
            d2,
        })
    }

    /// Blames the input furthest from unit scale, for results that overflow
    /// even though every intermediate term was finite.
    fn out_of_range_error(&self) -> InvalidInputError {
        let PricingInput {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        } = self.input;

        [
            (InputField::Spot, spot, spot.ln().abs()),
            (InputField::Strike, strike, strike.ln().abs()),
            (InputField::TimeToExpiry, time_to_expiry, time_to_expiry.ln().abs()),
            (InputField::RiskFreeRate, risk_free_rate, (risk_free_rate * time_to_expiry).abs()),
            (InputField::Volatility, volatility, volatility.ln().abs()),
        ]
        .into_iter()
        .max_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(field, value, _)| out_of_range(field, value))
        .unwrap_or_else(|| out_of_range(InputField::Volatility, volatility))
    }

    /// Returns the inputs the model was built from.
    #[inline]
    pub fn input(&self) -> &PricingInput {
        &self.input
    }

    /// The d₁ term: (ln(S/K) + (r + σ²/2)T) / (σ√T).
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// The d₂ term: d₁ - σ√T.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// European call price: C = S·N(d₁) - K·e^(-rT)·N(d₂).
    ///
    /// Deep out of the money both terms sit in the far tail and their
    /// difference can round to a tiny negative residue; only that residue is
    /// snapped to zero.
    #[inline]
    pub fn price_call(&self) -> f64 {
        let asset = self.input.spot * norm_cdf(self.d1);
        let cash = self.input.strike * self.discount * norm_cdf(self.d2);
        snap_rounding_residue(asset - cash, asset.max(cash))
    }

    /// European put price: P = K·e^(-rT)·N(-d₂) - S·N(-d₁).
    #[inline]
    pub fn price_put(&self) -> f64 {
        let cash = self.input.strike * self.discount * norm_cdf(-self.d2);
        let asset = self.input.spot * norm_cdf(-self.d1);
        snap_rounding_residue(cash - asset, asset.max(cash))
    }

    /// Option price for the given option type.
    #[inline]
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(),
            OptionType::Put => self.price_put(),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    #[inline]
    pub fn delta(&self, option_type: OptionType) -> f64 {
        let n_d1 = norm_cdf(self.d1);
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - 1.0,
        }
    }

    /// Computes Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T).
    ///
    /// Gamma is the same for both calls and puts.
    #[inline]
    pub fn gamma(&self) -> f64 {
        norm_pdf(self.d1) / (self.input.spot * self.input.volatility * self.sqrt_t)
    }

    /// Computes Vega (∂V/∂σ) = S·√T·φ(d₁).
    ///
    /// Vega is the same for both calls and puts.
    #[inline]
    pub fn vega(&self) -> f64 {
        self.input.spot * self.sqrt_t * norm_pdf(self.d1)
    }

    /// Computes Theta, the time decay of the option value per year.
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn theta(&self, option_type: OptionType) -> f64 {
        let PricingInput {
            spot,
            strike,
            risk_free_rate,
            volatility,
            ..
        } = self.input;

        let decay = -(spot * volatility * norm_pdf(self.d1)) / (2.0 * self.sqrt_t);
        let carry = risk_free_rate * strike * self.discount;

        match option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        }
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, option_type: OptionType) -> f64 {
        let annuity = self.input.strike * self.input.time_to_expiry * self.discount;
        match option_type {
            OptionType::Call => annuity * norm_cdf(self.d2),
            OptionType::Put => -annuity * norm_cdf(-self.d2),
        }
    }

    /// Price and all Greeks for the given option type.
    pub fn greeks(&self, option_type: OptionType) -> PricingResult {
        PricingResult {
            price: self.price(option_type),
            delta: self.delta(option_type),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(option_type),
            rho: self.rho(option_type),
        }
    }
}

/// Zeroes a negative difference that is within rounding of its terms.
///
/// A subnormal result is always treated as residue. NaN passes through.
#[inline]
fn snap_rounding_residue(price: f64, scale: f64) -> f64 {
    if price < 0.0 && (-price < f64::MIN_POSITIVE || -price <= 4.0 * f64::EPSILON * scale) {
        0.0
    } else {
        price
    }
}

#[inline]
fn out_of_range(field: InputField, value: f64) -> InvalidInputError {
    InvalidInputError::new(field, value, InvalidReason::OutOfRange)
}

/// Prices a European call and its Greeks.
///
/// # Errors
/// [`InvalidInputError`] if spot, strike, time to expiry or volatility is
/// not strictly positive, any field is non-finite, or the inputs push the
/// price or a Greek outside f64 range ([`InvalidReason::OutOfRange`]).
///
/// # Examples
/// ```
/// use pricer_core::types::PricingInput;
/// use pricer_models::analytical::price_european_call;
///
/// let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2).unwrap();
/// let result = price_european_call(input).unwrap();
/// assert!((result.vega - 28.0757).abs() < 1e-3);
/// ```
pub fn price_european_call(input: PricingInput) -> Result<PricingResult, InvalidInputError> {
    price_european(OptionType::Call, input)
}

/// Prices a European put and its Greeks.
///
/// Consistent with [`price_european_call`] through put-call parity:
/// C - P = S - K·e^(-rT).
///
/// # Errors
/// Same preconditions as [`price_european_call`].
pub fn price_european_put(input: PricingInput) -> Result<PricingResult, InvalidInputError> {
    price_european(OptionType::Put, input)
}

/// Prices a European option of the given type.
///
/// Never returns a result with a NaN, infinite or negative price.
pub fn price_european(
    option_type: OptionType,
    input: PricingInput,
) -> Result<PricingResult, InvalidInputError> {
    let model = BlackScholes::new(input)?;
    let result = model.greeks(option_type);
    if result.is_finite() && result.price >= 0.0 {
        Ok(result)
    } else {
        Err(model.out_of_range_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pricer_core::types::{InputField, InvalidReason};

    fn input(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> PricingInput {
        PricingInput {
            spot,
            strike,
            time_to_expiry: expiry,
            risk_free_rate: rate,
            volatility: vol,
        }
    }

    fn reference() -> PricingInput {
        input(100.0, 105.0, 0.5, 0.05, 0.2)
    }

    fn model(input: PricingInput) -> BlackScholes {
        BlackScholes::new(input).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_keeps_input() {
        let bs = model(reference());
        assert_eq!(*bs.input(), reference());
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let err = price_european_call(input(100.0, 105.0, 0.5, 0.05, 0.0)).unwrap_err();
        assert_eq!(err.field, InputField::Volatility);
        assert_eq!(err.reason, InvalidReason::NonPositive);
    }

    #[test]
    fn test_zero_expiry_rejected() {
        let err = price_european_call(input(100.0, 105.0, 0.0, 0.05, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::TimeToExpiry);
    }

    #[test]
    fn test_non_positive_spot_and_strike_rejected() {
        let err = price_european_call(input(0.0, 105.0, 0.5, 0.05, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::Spot);

        let err = price_european_put(input(100.0, -5.0, 0.5, 0.05, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::Strike);
    }

    #[test]
    fn test_nan_rate_rejected() {
        let err = price_european_call(input(100.0, 105.0, 0.5, f64::NAN, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::RiskFreeRate);
        assert_eq!(err.reason, InvalidReason::NonFinite);
    }

    #[test]
    fn test_negative_rate_allowed() {
        assert!(price_european_call(input(100.0, 100.0, 1.0, -0.02, 0.2)).is_ok());
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_atm_zero_rate() {
        // ATM with r=0: d1 = σ√T / 2, d2 = -σ√T / 2
        let bs = model(input(100.0, 100.0, 1.0, 0.0, 0.2));
        assert_relative_eq!(bs.d1(), 0.1, epsilon = 1e-15);
        assert_relative_eq!(bs.d2(), -0.1, epsilon = 1e-15);
    }

    #[test]
    fn test_d1_d2_reference() {
        let bs = model(reference());
        assert_abs_diff_eq!(bs.d1(), -0.097_511_185_978_811_23, epsilon = 1e-14);
        assert_abs_diff_eq!(bs.d2(), -0.238_932_542_216_120_74, epsilon = 1e-14);
        assert_relative_eq!(bs.d1() - bs.d2(), 0.2 * 0.5_f64.sqrt(), epsilon = 1e-15);
    }

    // ==========================================================
    // Reference Value Tests
    // ==========================================================

    #[test]
    fn test_call_reference_scenario() {
        // S=100, K=105, T=0.5, r=0.05, σ=0.2
        let result = price_european_call(reference()).unwrap();
        assert_abs_diff_eq!(result.price, 4.581_680_167_540_002, epsilon = 1e-10);
        assert_abs_diff_eq!(result.delta, 0.461_160_225_719_051, epsilon = 1e-10);
        assert_abs_diff_eq!(result.gamma, 0.028_075_683_527_420_74, epsilon = 1e-10);
        assert_abs_diff_eq!(result.vega, 28.075_683_527_420_74, epsilon = 1e-9);
        assert_abs_diff_eq!(result.theta, -7.691_853_825_702_403, epsilon = 1e-9);
        assert_abs_diff_eq!(result.rho, 20.767_171_202_182_547, epsilon = 1e-9);
    }

    #[test]
    fn test_put_reference_scenario() {
        let result = price_european_put(reference()).unwrap();
        assert_abs_diff_eq!(result.price, 6.989_220_930_514_932, epsilon = 1e-10);
        assert_abs_diff_eq!(result.delta, 0.461_160_225_719_051 - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_atm_one_year_reference() {
        // Known reference: S=100, K=100, r=0.05, σ=0.2, T=1
        let bs = model(input(100.0, 100.0, 1.0, 0.05, 0.2));
        assert_abs_diff_eq!(bs.price_call(), 10.450_583_572_185_567, epsilon = 1e-10);
        assert_abs_diff_eq!(bs.price_put(), 5.573_526_022_256_968, epsilon = 1e-10);
    }

    #[test]
    fn test_deterministic() {
        let first = price_european_call(reference()).unwrap();
        let second = price_european_call(reference()).unwrap();
        assert_eq!(first.price.to_bits(), second.price.to_bits());
        assert_eq!(first, second);
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_various_strikes() {
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let bs = model(input(100.0, strike, 1.0, 0.05, 0.2));
            let forward = 100.0 - strike * (-0.05_f64).exp();
            assert_abs_diff_eq!(bs.price_call() - bs.price_put(), forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = model(input(100.0, 100.0, 1.0, -0.02, 0.2));
        let forward = 100.0 - 100.0 * (0.02_f64).exp();
        assert_abs_diff_eq!(bs.price_call() - bs.price_put(), forward, epsilon = 1e-10);
    }

    #[test]
    fn test_delta_call_put_relationship() {
        let bs = model(reference());
        assert_relative_eq!(
            bs.delta(OptionType::Put),
            bs.delta(OptionType::Call) - 1.0,
            epsilon = 1e-15
        );
    }

    // ==========================================================
    // Limit Tests
    // ==========================================================

    #[test]
    fn test_short_expiry_approaches_intrinsic() {
        for (spot, strike) in [(110.0, 100.0), (90.0, 100.0), (100.0, 105.0)] {
            let price = model(input(spot, strike, 1e-6, 0.05, 0.2)).price_call();
            assert_abs_diff_eq!(price, OptionType::Call.intrinsic(spot, strike), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_short_expiry_atm_is_small() {
        // ATM time value ~ S·σ·√(T/2π)
        let price = model(input(100.0, 100.0, 1e-6, 0.05, 0.2)).price_call();
        assert!(price > 0.0);
        assert!(price < 0.01);
    }

    #[test]
    fn test_small_volatility_approaches_forward_payoff() {
        for strike in [80.0, 95.0, 105.0, 120.0] {
            let price = model(input(100.0, strike, 0.5, 0.05, 1e-6)).price_call();
            let forward_payoff = (100.0 - strike * (-0.025_f64).exp()).max(0.0);
            assert_abs_diff_eq!(price, forward_payoff, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_far_tail_cancellation_stays_non_negative() {
        let result = price_european_call(input(
            70.262_409_689_517_68,
            404.394_504_220_725_8,
            3.041_206_346_312_708_6,
            0.012_586_672_774_237_861,
            0.025_544_445_423_282_512,
        ))
        .unwrap();
        assert!(result.price >= 0.0);
        assert!(result.price < 1e-300);
    }

    #[test]
    fn test_overflowing_discount_rejected() {
        // e^(710) overflows; the rate is finite but unusable
        let err = price_european_call(input(100.0, 105.0, 1.0, -710.0, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::RiskFreeRate);
        assert_eq!(err.reason, InvalidReason::OutOfRange);
        assert_eq!(err.value, -710.0);

        // e^(709) is finite but K·e^(709) is not
        let err = price_european_put(input(100.0, 105.0, 1.0, -709.0, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::RiskFreeRate);
    }

    #[test]
    fn test_overflowing_variance_rejected() {
        // σ² overflows, so d1 and d2 would both be infinite
        let err = price_european_call(input(100.0, 105.0, 1.0, 0.05, 1e155)).unwrap_err();
        assert_eq!(err.field, InputField::Volatility);
        assert_eq!(err.reason, InvalidReason::OutOfRange);
    }

    #[test]
    fn test_huge_volatility_approaches_spot() {
        let result = price_european_call(input(100.0, 105.0, 1.0, 0.05, 1e100)).unwrap();
        assert_eq!(result.price, 100.0);
        assert_eq!(result.delta, 1.0);
        assert!(result.is_finite());
    }

    #[test]
    fn test_extreme_moneyness_rejected() {
        let err = price_european_call(input(1e300, 1e-300, 1.0, 0.05, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::Spot);

        let err = price_european_call(input(1e-300, 1e300, 1.0, 0.05, 0.2)).unwrap_err();
        assert_eq!(err.field, InputField::Strike);
    }

    #[test]
    fn test_residue_snap_keeps_nan_and_real_negatives() {
        assert_eq!(snap_rounding_residue(-3.7e-322, 4e-321), 0.0);
        assert_eq!(snap_rounding_residue(-1e-20, 100.0), 0.0);
        assert!(snap_rounding_residue(f64::NAN, 100.0).is_nan());
        assert_eq!(snap_rounding_residue(-2.4, 100.0), -2.4);
        assert_eq!(snap_rounding_residue(1.5, 100.0), 1.5);
    }

    #[test]
    fn test_deep_otm_call_near_zero() {
        let result = price_european_call(input(50.0, 100.0, 1.0, 0.05, 0.2)).unwrap();
        assert!(result.price >= 0.0);
        assert!(result.price < 0.01);
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_gamma_maximum_near_atm() {
        let gamma_atm = model(input(100.0, 100.0, 1.0, 0.05, 0.2)).gamma();
        let gamma_itm = model(input(100.0, 80.0, 1.0, 0.05, 0.2)).gamma();
        let gamma_otm = model(input(100.0, 120.0, 1.0, 0.05, 0.2)).gamma();
        assert!(gamma_atm >= gamma_itm);
        assert!(gamma_atm >= gamma_otm);
    }

    #[test]
    fn test_theta_call_negative_rho_signs() {
        let bs = model(input(100.0, 100.0, 1.0, 0.05, 0.2));
        assert!(bs.theta(OptionType::Call) < 0.0);
        assert!(bs.rho(OptionType::Call) > 0.0);
        assert!(bs.rho(OptionType::Put) < 0.0);
    }

    #[test]
    fn test_put_greeks_share_gamma_vega() {
        let call = price_european_call(reference()).unwrap();
        let put = price_european_put(reference()).unwrap();
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
    }

    // ==========================================================
    // Greeks vs Finite Difference Tests
    // ==========================================================

    fn call_price(input: PricingInput) -> f64 {
        model(input).price_call()
    }

    #[test]
    fn test_delta_gamma_vs_finite_diff() {
        let base = reference();
        let h = 0.01;
        let up = call_price(PricingInput { spot: base.spot + h, ..base });
        let mid = call_price(base);
        let dn = call_price(PricingInput { spot: base.spot - h, ..base });

        let result = model(base).greeks(OptionType::Call);
        assert_relative_eq!(result.delta, (up - dn) / (2.0 * h), epsilon = 1e-6);
        assert_relative_eq!(result.gamma, (up - 2.0 * mid + dn) / (h * h), epsilon = 1e-4);
    }

    #[test]
    fn test_vega_vs_finite_diff() {
        let base = reference();
        let h = 1e-4;
        let up = call_price(PricingInput { volatility: base.volatility + h, ..base });
        let dn = call_price(PricingInput { volatility: base.volatility - h, ..base });
        assert_relative_eq!(model(base).vega(), (up - dn) / (2.0 * h), epsilon = 1e-5);
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        // Theta is the decay as calendar time passes: -∂V/∂T
        let base = reference();
        let h = 1e-5;
        let up = call_price(PricingInput { time_to_expiry: base.time_to_expiry + h, ..base });
        let dn = call_price(PricingInput { time_to_expiry: base.time_to_expiry - h, ..base });
        assert_relative_eq!(
            model(base).theta(OptionType::Call),
            -(up - dn) / (2.0 * h),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        let base = reference();
        let h = 1e-5;
        let up = call_price(PricingInput { risk_free_rate: base.risk_free_rate + h, ..base });
        let dn = call_price(PricingInput { risk_free_rate: base.risk_free_rate - h, ..base });
        assert_relative_eq!(
            model(base).rho(OptionType::Call),
            (up - dn) / (2.0 * h),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_model_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlackScholes>();
        assert_send_sync::<PricingResult>();
    }

    // ==========================================================
    // Property-based Tests
    // ==========================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn input_strategy() -> impl Strategy<Value = PricingInput> {
            (
                1.0..500.0_f64,
                1.0..500.0_f64,
                0.01..5.0_f64,
                -0.05..0.15_f64,
                0.01..1.5_f64,
            )
                .prop_map(|(spot, strike, expiry, rate, vol)| {
                    input(spot, strike, expiry, rate, vol)
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn test_call_bounds(inp in input_strategy()) {
                let result = price_european_call(inp).unwrap();
                prop_assert!(result.price >= 0.0, "price {} < 0", result.price);
                prop_assert!((0.0..=1.0).contains(&result.delta));
                prop_assert!(result.gamma >= 0.0);
                prop_assert!(result.vega >= 0.0);
                prop_assert!(result.rho >= 0.0);
            }

            #[test]
            fn test_put_call_parity(inp in input_strategy()) {
                let call = price_european_call(inp).unwrap();
                let put = price_european_put(inp).unwrap();
                let forward = inp.spot - inp.strike * inp.discount_factor();
                let scale = inp.spot.max(inp.strike);
                prop_assert!(
                    (call.price - put.price - forward).abs() <= 1e-9 * scale,
                    "parity violated: C={} P={} F={}", call.price, put.price, forward
                );
            }

            #[test]
            fn test_price_non_decreasing_in_spot(inp in input_strategy(), bump in 0.0..0.5_f64) {
                let low = price_european_call(inp).unwrap().price;
                let high = price_european_call(PricingInput { spot: inp.spot * (1.0 + bump), ..inp })
                    .unwrap()
                    .price;
                prop_assert!(high >= low - 1e-12 * inp.spot, "{} < {}", high, low);
            }

            #[test]
            fn test_price_non_increasing_in_strike(inp in input_strategy(), bump in 0.0..0.5_f64) {
                let low_strike = price_european_call(inp).unwrap().price;
                let high_strike = price_european_call(inp.with_strike(inp.strike * (1.0 + bump)))
                    .unwrap()
                    .price;
                prop_assert!(
                    high_strike <= low_strike + 1e-12 * inp.spot,
                    "{} > {}", high_strike, low_strike
                );
            }

            #[test]
            fn test_price_above_lower_bound(inp in input_strategy()) {
                // C >= max(S - K·e^(-rT), 0)
                let price = price_european_call(inp).unwrap().price;
                let bound = (inp.spot - inp.strike * inp.discount_factor()).max(0.0);
                prop_assert!(price >= bound - 1e-9 * inp.spot.max(inp.strike));
            }
        }
    }
}
