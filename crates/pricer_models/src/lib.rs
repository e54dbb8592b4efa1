//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form pricing of European options under Black-Scholes dynamics.
//!
//! This crate provides:
//! - Option type definitions (`instruments`)
//! - The Black-Scholes model with analytical Greeks (`analytical`)
//! - Free functions `price_european_call` / `price_european_put` mapping a
//!   [`PricingInput`](pricer_core::types::PricingInput) to a
//!   [`PricingResult`](analytical::PricingResult)
//!
//! ## Design Principles
//!
//! - **Pure functions**: no I/O, no logging, no global state
//! - **Validate first**: every entry point rejects invalid inputs with
//!   [`InvalidInputError`](pricer_core::types::InvalidInputError) before
//!   computing anything, so results are never partially populated
//!
//! ## Example
//!
//! ```rust
//! use pricer_core::types::PricingInput;
//! use pricer_models::analytical::price_european_call;
//!
//! let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2).unwrap();
//! let result = price_european_call(input).unwrap();
//! assert!((result.price - 4.5817).abs() < 1e-3);
//! assert!((result.delta - 0.4612).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
