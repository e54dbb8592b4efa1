//! Batch command implementation
//!
//! Prices every row of a CSV file with headers
//! `spot,strike,time_to_expiry,risk_free_rate,volatility`.

use std::io::{Read, Write};
use std::path::Path;

use pricer_core::types::PricingInput;
use pricer_models::analytical::price_european;
use pricer_models::instruments::OptionType;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::output::{render, ResultRow};
use crate::{CliError, Result};

/// Run the batch command
pub fn run<W: Write>(
    out: &mut W,
    input: &Path,
    option_type: OptionType,
    config: &CliConfig,
) -> Result<()> {
    info!(input = %input.display(), %option_type, "Starting batch pricing");

    // Validate input file exists
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(input)?;
    let rows = price_rows(reader, option_type)?;

    render(out, &rows, config.output_format, config.precision)?;

    info!(rows = rows.len(), "Batch pricing complete");
    Ok(())
}

/// Price every record of a CSV reader.
///
/// Stops at the first row that fails to parse or validate; row numbers in
/// errors are 1-based and exclude the header.
pub fn price_rows<R: Read>(
    mut reader: csv::Reader<R>,
    option_type: OptionType,
) -> Result<Vec<ResultRow>> {
    let mut rows = Vec::new();

    for (index, record) in reader.deserialize::<PricingInput>().enumerate() {
        let row_number = index + 1;
        let input = record?;
        let result = price_european(option_type, input)
            .map_err(|e| CliError::InvalidArgument(format!("row {}: {}", row_number, e)))?;
        debug!(row = row_number, price = result.price, "Row priced");
        rows.push(ResultRow::new(option_type, &input, &result));
    }

    if rows.is_empty() {
        return Err(CliError::InvalidArgument(
            "input file contains no rows".to_string(),
        ));
    }

    Ok(rows)
}
