//! # pricer_core: Foundation for the Black-Scholes Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer workspace, providing:
//! - The pricing input record with its validation rules (`types::input`)
//! - The typed validation error `InvalidInputError` (`types::error`)
//! - Standard normal distribution functions (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - statrs: Complementary error function for a stable normal CDF
//! - thiserror: Error derives
//! - serde: Serialisation of the input record
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{InputField, PricingInput};
//!
//! let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2).unwrap();
//! assert_eq!(input.strike, 105.0);
//!
//! let err = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.0).unwrap_err();
//! assert_eq!(err.field, InputField::Volatility);
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
