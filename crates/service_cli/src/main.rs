//! Pricer CLI - Black-Scholes pricing from the command line
//!
//! # Commands
//!
//! - `pricer price` - Price a single European option with Greeks
//! - `pricer ladder --strikes 90,100,110` - Price one underlying across strikes
//! - `pricer batch --input <file>` - Price every row of a CSV file
//! - `pricer check` - Show resolved configuration and run a self-test
//!
//! Results go to stdout; logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pricer_core::types::PricingInput;
use pricer_models::instruments::OptionType;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, CliConfig};

/// Black-Scholes European option pricer
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Market parameters shared by the pricing commands
#[derive(Args, Debug, Clone, Copy)]
struct MarketArgs {
    /// Spot price of the underlying
    #[arg(short, long, default_value_t = 100.0, allow_negative_numbers = true)]
    spot: f64,

    /// Time to expiry in years
    #[arg(short = 't', long, default_value_t = 0.5, allow_negative_numbers = true)]
    expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long, default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Annualised volatility
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    vol: f64,

    /// Option type (call, put)
    #[arg(short = 'o', long = "type", alias = "option-type", default_value_t = OptionType::Call)]
    option_type: OptionType,
}

impl MarketArgs {
    fn input(&self, strike: f64) -> Result<PricingInput> {
        Ok(PricingInput::new(
            self.spot,
            strike,
            self.expiry,
            self.rate,
            self.vol,
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single European option
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Strike price
        #[arg(short = 'k', long, default_value_t = 105.0, allow_negative_numbers = true)]
        strike: f64,
    },

    /// Price the same underlying across a list of strikes
    Ladder {
        #[command(flatten)]
        market: MarketArgs,

        /// Comma-separated strikes
        #[arg(
            short = 'k',
            long,
            value_delimiter = ',',
            required = true,
            allow_negative_numbers = true
        )]
        strikes: Vec<f64>,
    },

    /// Price every row of a CSV file
    Batch {
        /// CSV with columns spot,strike,time_to_expiry,risk_free_rate,volatility
        #[arg(short, long)]
        input: PathBuf,

        /// Option type applied to every row (call, put)
        #[arg(short = 'o', long = "type", alias = "option-type", default_value_t = OptionType::Call)]
        option_type: OptionType,
    },

    /// Show resolved configuration and run a pricing self-test
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            config_file: cli.config.clone(),
            format: cli.format.clone(),
            verbose: cli.verbose,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run<W: Write>(out: &mut W, command: Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Price { market, strike } => {
            commands::price::run(out, market.input(strike)?, market.option_type, config)
        }
        Commands::Ladder { market, strikes } => {
            let Some(&first) = strikes.first() else {
                return Err(CliError::InvalidArgument(
                    "at least one strike is required".to_string(),
                ));
            };
            let base = market.input(first)?;
            commands::ladder::run(out, base, &strikes, market.option_type, config)
        }
        Commands::Batch { input, option_type } => {
            commands::batch::run(out, &input, option_type, config)
        }
        Commands::Check => commands::check::run(out, config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&CliArgs::from(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        output_format = %config.output_format,
        precision = config.precision,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&mut out, cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
