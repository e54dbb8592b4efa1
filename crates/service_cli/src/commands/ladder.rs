//! Ladder command implementation
//!
//! Prices the same underlying across a list of strikes, one row per strike.

use std::io::Write;

use pricer_core::types::PricingInput;
use pricer_models::analytical::price_european;
use pricer_models::instruments::OptionType;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, ResultRow};
use crate::{CliError, Result};

/// Run the ladder command
///
/// `base.strike` is ignored; each entry of `strikes` replaces it in turn.
pub fn run<W: Write>(
    out: &mut W,
    base: PricingInput,
    strikes: &[f64],
    option_type: OptionType,
    config: &CliConfig,
) -> Result<()> {
    if strikes.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one strike is required".to_string(),
        ));
    }

    info!(%option_type, strikes = strikes.len(), spot = base.spot, "Pricing strike ladder");

    // Price every strike before writing anything
    let rows = strikes
        .iter()
        .map(|&strike| -> Result<ResultRow> {
            let input = base.with_strike(strike);
            let result = price_european(option_type, input)?;
            Ok(ResultRow::new(option_type, &input, &result))
        })
        .collect::<Result<Vec<_>>>()?;

    render(out, &rows, config.output_format, config.precision)?;

    info!("Ladder complete");
    Ok(())
}
