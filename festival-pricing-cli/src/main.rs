//! Festival Pricing CLI - quotes and dashboard summaries from the command line
//!
//! Prices coupon selections and reduces dashboard payloads with the
//! `festival-pricing` engine. Results are printed to stdout as JSON; logs go
//! to stderr.
//!
//! # Examples
//!
//! ```text
//! $ festival-pricing-cli quote Saptami=2 Nabami=1
//! $ curl -s .../dashboard-bundle | festival-pricing-cli dashboard
//! $ FESTIVAL_PRICING_CONFIG=pricing.toml LOG_FORMAT=json festival-pricing-cli quote Dashami=4
//! ```

mod command;
mod observability;

use std::{io, process::ExitCode};

use festival_pricing::{PricingConfig, PricingEngine};
use tracing::{debug, error};

use crate::{
    command::{CliError, Command, USAGE},
    observability::{LogFormat, init_observability},
};

/// Environment variable naming the pricing config file.
const CONFIG_ENV: &str = "FESTIVAL_PRICING_CONFIG";

fn main() -> ExitCode {
    init_observability(LogFormat::from_env());

    match try_main() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err}");
            if err.wants_usage() {
                eprintln!("\n{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<String, CliError> {
    let command = Command::parse(std::env::args().skip(1))?;
    let engine = PricingEngine::new(load_config()?)?;
    command.run(&engine, io::stdin().lock())
}

fn load_config() -> Result<PricingConfig, CliError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            debug!(path = ?path, "loading pricing config");
            Ok(PricingConfig::load(path)?)
        }
        None => Ok(PricingConfig::default()),
    }
}
