//! Instrument definitions.
//!
//! - `option_type`: Call/put flag for vanilla European options

pub mod option_type;

pub use option_type::{OptionType, ParseOptionTypeError};
