//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod batch;
pub mod check;
pub mod ladder;
pub mod price;
