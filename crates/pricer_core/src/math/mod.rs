//! Mathematical functions shared by the pricing models.
//!
//! - `distributions`: Standard normal CDF and PDF

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
