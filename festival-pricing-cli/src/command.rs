//! Subcommand parsing and dispatch.

use std::io::{self, Read};

use festival_pricing::{
    CouponSelection, PaymentSubmission, PricingEngine, PricingError,
    dashboard::{AdminDashboard, UserDashboard},
};
use thiserror::Error;
use tracing::{info, instrument};

/// Usage text printed by `help` and after argument errors.
pub const USAGE: &str = "\
Usage: festival-pricing-cli <COMMAND>

Commands:
  quote [EVENT=COUNT]...  Price a coupon selection, e.g. `quote Saptami=2 Nabami=1`
  dashboard               Summarize admin dashboard payloads read from stdin
  member                  Summarize a member dashboard payload read from stdin
  help                    Print this message

Environment:
  FESTIVAL_PRICING_CONFIG  Path to a TOML pricing config (default prices if unset)
  LOG_FORMAT               `json` or `pretty` (default: pretty)
  RUST_LOG                 Log filter (default: info)";

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown subcommand or missing arguments.
    #[error("{0}")]
    Usage(String),

    /// Pricing, config or payload error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Failed to read stdin.
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Returns true if the usage text should follow the message.
    #[must_use]
    pub const fn wants_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Price `EVENT=COUNT` tokens.
    Quote(Vec<String>),
    /// Summarize the admin dashboard bundle on stdin.
    Dashboard,
    /// Summarize the member dashboard payload on stdin.
    Member,
    /// Print usage.
    Help,
}

impl Command {
    /// Parses arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] for a missing or unknown subcommand, or
    /// for arguments given to a subcommand that takes none.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args.next().ok_or_else(|| CliError::Usage("missing command".into()))?;
        let rest: Vec<String> = args.collect();

        let command = match name.as_str() {
            "quote" => return Ok(Self::Quote(rest)),
            "dashboard" => Self::Dashboard,
            "member" => Self::Member,
            "help" | "-h" | "--help" => Self::Help,
            other => return Err(CliError::Usage(format!("unknown command '{other}'"))),
        };
        if let Some(extra) = rest.first() {
            return Err(CliError::Usage(format!("unexpected argument '{extra}' for {name}")));
        }
        Ok(command)
    }

    /// Runs the command and returns what should be printed to stdout.
    ///
    /// `input` is only read by the dashboard commands.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Pricing`] for invalid selections or payloads and
    /// [`CliError::Io`] if `input` cannot be read.
    #[instrument(level = "debug", skip(engine, input))]
    pub fn run(&self, engine: &PricingEngine, mut input: impl Read) -> Result<String, CliError> {
        let output = match self {
            Self::Quote(tokens) => {
                let selection =
                    CouponSelection::parse(engine.config(), tokens.iter().map(String::as_str))?;
                let submission = PaymentSubmission::new(engine, &selection);
                info!(
                    total_coupons = submission.total_coupons(),
                    total_amount = %submission.total_amount,
                    "quoted selection"
                );
                to_json(&submission)?
            }
            Self::Dashboard => {
                let raw = read_all(&mut input)?;
                let summary = AdminDashboard::from_json(&raw)?.summarize(engine);
                info!(grand_total = %summary.grand_total, "summarized admin dashboard");
                to_json(&summary)?
            }
            Self::Member => {
                let raw = read_all(&mut input)?;
                let dashboard: UserDashboard =
                    serde_json::from_str(&raw).map_err(PricingError::from)?;
                let summary = dashboard.summarize(engine);
                info!(status = %summary.status, "summarized member dashboard");
                to_json(&summary)?
            }
            Self::Help => USAGE.to_owned(),
        };
        Ok(output)
    }
}

fn read_all(input: &mut impl Read) -> io::Result<String> {
    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    Ok(raw)
}

fn to_json(value: &impl serde::Serialize) -> Result<String, PricingError> {
    Ok(serde_json::to_string_pretty(value)?)
}
