//! Result formatting for table, JSON and CSV output.

use std::io::Write;

use pricer_core::types::PricingInput;
use pricer_models::analytical::PricingResult;
use pricer_models::instruments::OptionType;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

const HEADERS: [&str; 12] = [
    "Type", "Spot", "Strike", "Expiry", "Rate", "Vol", "Price", "Delta", "Gamma", "Vega", "Theta",
    "Rho",
];

/// One priced option: its inputs followed by price and Greeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub time_to_expiry: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

impl ResultRow {
    pub fn new(option_type: OptionType, input: &PricingInput, result: &PricingResult) -> Self {
        Self {
            option_type,
            spot: input.spot,
            strike: input.strike,
            time_to_expiry: input.time_to_expiry,
            risk_free_rate: input.risk_free_rate,
            volatility: input.volatility,
            price: result.price,
            delta: result.delta,
            gamma: result.gamma,
            vega: result.vega,
            theta: result.theta,
            rho: result.rho,
        }
    }

    fn cells(&self, precision: usize) -> Vec<String> {
        let numbers = [
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.risk_free_rate,
            self.volatility,
            self.price,
            self.delta,
            self.gamma,
            self.vega,
            self.theta,
            self.rho,
        ];
        std::iter::once(self.option_type.to_string())
            .chain(numbers.iter().map(|v| format!("{:.*}", precision, v)))
            .collect()
    }
}

/// Write rows in the requested format.
///
/// `precision` only affects the table; JSON and CSV carry full precision.
pub fn render<W: Write>(
    out: &mut W,
    rows: &[ResultRow],
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, rows, precision),
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Csv => write_csv(out, rows),
    }
}

fn write_table<W: Write>(out: &mut W, rows: &[ResultRow], precision: usize) -> Result<()> {
    let body: Vec<Vec<String>> = rows.iter().map(|row| row.cells(precision)).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_border(out, &widths, '┌', '┬', '┐')?;
    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    write_cells(out, &widths, &header, false)?;
    write_border(out, &widths, '├', '┼', '┤')?;
    for cells in &body {
        write_cells(out, &widths, cells, true)?;
    }
    write_border(out, &widths, '└', '┴', '┘')?;
    Ok(())
}

fn write_border<W: Write>(
    out: &mut W,
    widths: &[usize],
    left: char,
    mid: char,
    right: char,
) -> Result<()> {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    writeln!(out, "{}{}{}", left, segments.join(&mid.to_string()), right)?;
    Ok(())
}

fn write_cells<W: Write>(
    out: &mut W,
    widths: &[usize],
    cells: &[String],
    align_numbers: bool,
) -> Result<()> {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (&w, cell))| {
            // first column is the option type; numbers right-align
            if align_numbers && i > 0 {
                format!(" {:>w$} ", cell, w = w)
            } else {
                format!(" {:<w$} ", cell, w = w)
            }
        })
        .collect();
    writeln!(out, "│{}│", padded.join("│"))?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, rows: &[ResultRow]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
