//! Command-line front end.
//!
//! Parses flags into a [`QuoteRequest`], or falls back to an interactive
//! [`Session`] when no stations are given. All terminal I/O lives here; the
//! fare core never prints.

mod error;
mod logging;
mod prompt;
pub mod render;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::config::Tariff;
use crate::domain::StationId;
use crate::planner::{FarePlanner, QuoteRequest, Surcharge};

pub use error::{CliError, InputError};
pub use logging::init_logger;
pub use prompt::Session;

/// Metro fare calculator.
#[derive(Debug, Parser)]
#[command(name = "fare-calculator", version)]
pub struct CliArgs {
    /// Departure station
    #[arg(long)]
    pub from: Option<String>,

    /// Destination station
    #[arg(long)]
    pub to: Option<String>,

    /// Apply the VIP discount
    #[arg(long)]
    pub vip: bool,

    /// Name of an additional fee
    #[arg(long)]
    pub surcharge_name: Option<String>,

    /// Amount of the additional fee (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    pub surcharge_amount: Option<String>,

    /// TOML tariff file overriding the built-in fares and stations
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long, requires_all = ["from", "to"])]
    pub json: bool,

    /// Print the station table and exit
    #[arg(long)]
    pub list_stations: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Build a request from the flags.
    ///
    /// Returns `None` when neither station is given, meaning the caller
    /// should ask interactively.
    pub fn request(&self) -> Result<Option<QuoteRequest>, InputError> {
        let (from, to) = match (&self.from, &self.to) {
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(InputError::MissingStation("--to")),
            (None, Some(_)) => return Err(InputError::MissingStation("--from")),
            (Some(from), Some(to)) => (StationId::parse(from)?, StationId::parse(to)?),
        };

        let surcharge = match (&self.surcharge_name, &self.surcharge_amount) {
            (None, None) => None,
            (Some(name), Some(amount)) => {
                Some(Surcharge::new(name.clone(), parse_amount(amount)?))
            }
            _ => return Err(InputError::IncompleteSurcharge),
        };

        Ok(Some(QuoteRequest {
            from,
            to,
            vip: self.vip,
            surcharge,
        }))
    }
}

/// Parse a fee amount typed by the user.
pub fn parse_amount(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidAmount {
            input: trimmed.to_string(),
        }),
    }
}

/// Run the CLI against the given input and output.
pub fn run<R: BufRead, W: Write>(args: &CliArgs, input: R, mut output: W) -> Result<(), CliError> {
    let tariff = match &args.config {
        Some(path) => Tariff::load(path)?,
        None => Tariff::default(),
    };
    debug!(stations = tariff.line.len(), "tariff ready");
    let planner = FarePlanner::new(tariff);

    if args.list_stations {
        write!(output, "{}", render::station_list(&planner.tariff().line))?;
        return Ok(());
    }

    let quote = match args.request()? {
        Some(request) => {
            let quote = planner.quote(&request);
            if !args.json {
                write!(output, "{}", render::render_quote(&quote))?;
            }
            quote
        }
        None => Session::new(input, &mut output).run(&planner)?,
    };

    if args.json {
        serde_json::to_writer_pretty(&mut output, &quote)?;
        writeln!(output)?;
    }
    Ok(())
}
