//! Core pricing types.
//!
//! This module provides:
//! - `input`: The `PricingInput` record and its validation
//! - `error`: Structured validation errors for pricing inputs
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingInput`] from `input`
//! - [`InvalidInputError`], [`InputField`], [`InvalidReason`] from `error`

pub mod error;
pub mod input;

// Re-export commonly used types at module level
pub use error::{InputField, InvalidInputError, InvalidReason};
pub use input::PricingInput;
