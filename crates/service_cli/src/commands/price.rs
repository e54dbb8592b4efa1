//! Price command implementation
//!
//! Prices a single European option and prints its price and Greeks.

use std::io::Write;

use pricer_core::types::PricingInput;
use pricer_models::analytical::price_european;
use pricer_models::instruments::OptionType;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::output::{render, ResultRow};
use crate::Result;

/// Run the price command
pub fn run<W: Write>(
    out: &mut W,
    input: PricingInput,
    option_type: OptionType,
    config: &CliConfig,
) -> Result<()> {
    info!(
        %option_type,
        spot = input.spot,
        strike = input.strike,
        time_to_expiry = input.time_to_expiry,
        risk_free_rate = input.risk_free_rate,
        volatility = input.volatility,
        "Pricing option"
    );

    let result = price_european(option_type, input)?;
    debug!(price = result.price, delta = result.delta, "Priced");

    let rows = [ResultRow::new(option_type, &input, &result)];
    render(out, &rows, config.output_format, config.precision)?;

    info!("Pricing complete");
    Ok(())
}
