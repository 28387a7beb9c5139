//! Interactive fare session.
//!
//! Asks for the trip one question at a time and prints each stage's fare as
//! soon as it is known. Works over any reader/writer pair so it can be driven
//! by a script as well as a terminal.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::domain::StationId;
use crate::planner::{FarePlanner, FareQuote, QuoteRequest, Surcharge};

use super::error::CliError;
use super::parse_amount;
use super::render;

/// One interactive quote.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the session, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the full question sequence and return the final quote.
    pub fn run(&mut self, planner: &FarePlanner) -> Result<FareQuote, CliError> {
        writeln!(self.output, "Metro fare calculator")?;
        writeln!(self.output, "{}", render::separator())?;

        let from = self.ask_station("Enter departure station:")?;
        let to = self.ask_station("Enter destination station:")?;
        let distance = planner.distance(&from, &to);
        let mut request = QuoteRequest::new(from, to);

        let base = planner.price(&request, distance);
        writeln!(self.output, "{}", render::separator())?;
        writeln!(self.output, "{}", render::base_message(&base))?;
        writeln!(self.output, "{}", render::separator())?;

        if self.ask_yes_no("VIP member?")? {
            request.vip = true;
            let discounted = planner.price(&request, distance);
            if let Some(line) = render::vip_message(&discounted) {
                writeln!(self.output, "{line}")?;
            }
        }

        if self.ask_yes_no("Any other fees?")? {
            let name = self.ask("Enter fee name:")?;
            let amount = self.ask_amount("Enter fee amount:")?;
            request.surcharge = Some(Surcharge::new(name, amount));
        }

        let quote = planner.price(&request, distance);
        writeln!(self.output, "{}", render::separator())?;
        writeln!(self.output, "{}", render::total_message(&quote))?;
        Ok(quote)
    }

    fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended").into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_station(&mut self, prompt: &str) -> Result<StationId, CliError> {
        loop {
            let answer = self.ask(prompt)?;
            match StationId::parse(&answer) {
                Ok(id) => return Ok(id),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, CliError> {
        let answer = self.ask(&format!("{prompt} (y/n):"))?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn ask_amount(&mut self, prompt: &str) -> Result<f64, CliError> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_amount(&answer) {
                Ok(amount) => return Ok(amount),
                Err(e) => {
                    warn!(error = %e, "rejected fee amount");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }
}
