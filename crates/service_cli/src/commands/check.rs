//! Check command implementation
//!
//! Prints the resolved configuration and prices a known scenario as a
//! self-test of the numerical core.

use std::io::Write;

use pricer_core::types::PricingInput;
use pricer_models::analytical::price_european_call;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::Result;

/// Closed-form call price for S=100, K=105, T=0.5, r=0.05, σ=0.2.
const SELF_TEST_PRICE: f64 = 4.581_680_167_540_002;
const SELF_TEST_TOLERANCE: f64 = 1e-9;

/// Run the check command
pub fn run<W: Write>(out: &mut W, config: &CliConfig) -> Result<()> {
    info!("Checking configuration and pricer");

    writeln!(out, "Configuration:")?;
    writeln!(out, "  log_level:     {}", config.log_level)?;
    writeln!(out, "  output_format: {}", config.output_format)?;
    writeln!(out, "  precision:     {}", config.precision)?;

    let input = PricingInput::new(100.0, 105.0, 0.5, 0.05, 0.2)?;
    let price = price_european_call(input)?.price;
    let error = (price - SELF_TEST_PRICE).abs();
    let status = if error <= SELF_TEST_TOLERANCE {
        "ok"
    } else {
        warn!(price, expected = SELF_TEST_PRICE, "Self-test price mismatch");
        "MISMATCH"
    };

    writeln!(
        out,
        "Self-test (call S=100 K=105 T=0.5 r=0.05 vol=0.2): price = {:.10} [{}]",
        price, status
    )?;
    Ok(())
}
