//! Analytical pricing formulas for European options.
//!
//! This module provides the closed-form Black-Scholes solution for
//! European calls and puts together with its first- and second-order
//! sensitivities (Delta, Gamma, Vega, Theta, Rho).
//!
//! ## Design Principles
//!
//! - **Double precision throughout**
//! - **Numerical Stability**: Uses the erfc-based CDF from `pricer_core`
//! - **No rounding**: outputs are returned at full precision; callers format them

pub mod black_scholes;

// Re-export main types at module level
pub use black_scholes::{
    price_european, price_european_call, price_european_put, BlackScholes, PricingResult,
};
