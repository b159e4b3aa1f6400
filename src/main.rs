//! Entry point for the Raise Engine binary.
//!
//! `raise_engine serve` starts the HTTP API; `raise_engine calc`
//! computes a single scenario and prints it.  The bind address and the
//! rates file default to the `RAISE_BIND_ADDR` and `RAISE_RATES_FILE`
//! environment variables; log verbosity follows `RUST_LOG`.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use raise_engine::config::Settings;
use raise_engine::models::{CalculationInput, CalculationMode, Profile, SalaryPeriod};
use raise_engine::summary::{format_euro, format_percent, negotiation_text};
use raise_engine::Calculator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "raise_engine", version, about = "Work out the salary increase to ask for")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        /// Address to bind, e.g. 0.0.0.0:3000
        #[arg(long)]
        addr: Option<String>,
        /// JSON file overriding the default net-conversion rates
        #[arg(long)]
        rates: Option<PathBuf>,
    },
    /// Compute a single scenario
    Calc(CalcArgs),
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Current gross salary (monthly unless --yearly)
    #[arg(long)]
    gross: f64,
    /// The gross salary is a yearly figure
    #[arg(long)]
    yearly: bool,
    /// Desired net monthly gain after withholding
    #[arg(long, conflicts_with = "percent", required_unless_present = "percent")]
    target_net: Option<f64>,
    /// Desired gross increase, in percent
    #[arg(long)]
    percent: Option<f64>,
    /// Withholding tax rate (PAS), in percent
    #[arg(long, default_value_t = 0.0)]
    tax: f64,
    /// non-manager (non-cadre), manager (cadre) or custom
    #[arg(long, default_value = "non-manager")]
    profile: Profile,
    /// Net-conversion rate for the custom profile, 0.60 to 0.90
    #[arg(long)]
    custom_rate: Option<f64>,
    /// Employer charge rate, e.g. 0.45
    #[arg(long)]
    employer_charge: Option<f64>,
    /// JSON file overriding the default net-conversion rates
    #[arg(long)]
    rates: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl CalcArgs {
    fn to_input(&self) -> CalculationInput {
        CalculationInput {
            current_gross: self.gross,
            salary_period: if self.yearly {
                SalaryPeriod::Yearly
            } else {
                SalaryPeriod::Monthly
            },
            mode: if self.percent.is_some() {
                CalculationMode::TargetPercentIncrease
            } else {
                CalculationMode::TargetNetGain
            },
            target_net_monthly_gain: self.target_net,
            target_percent_increase: self.percent,
            withholding_tax_rate_percent: self.tax,
            profile: self.profile,
            custom_net_conversion_rate: self.custom_rate,
            employer_charge_rate: self.employer_charge,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();

    match cli.command {
        Command::Serve { addr, rates } => {
            if let Some(addr) = addr {
                settings.bind_addr = addr;
            }
            if rates.is_some() {
                settings.rates_file = rates;
            }
            raise_engine::api::serve(&settings).await
        }
        Command::Calc(args) => {
            if args.rates.is_some() {
                settings.rates_file = args.rates.clone();
            }
            calc(&settings, &args)
        }
    }
}

fn calc(settings: &Settings, args: &CalcArgs) -> Result<()> {
    let calculator = Calculator::new(settings.load_rates()?);
    let input = args.to_input();
    let result = calculator.compute(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Augmentation            {}", format_percent(result.percent_increase));
    println!("Brut mensuel            +{}", format_euro(result.gross_monthly_increase));
    println!("Brut annuel             +{}", format_euro(result.gross_yearly_increase));
    println!("Net mensuel après PAS   +{}", format_euro(result.net_monthly_gain_after_tax));
    println!("Net annuel après PAS    +{}", format_euro(result.net_yearly_gain_after_tax));
    println!("Nouveau brut mensuel    {}", format_euro(result.new_gross_monthly));
    println!("Nouveau brut annuel     {}", format_euro(result.new_gross_yearly));
    if let (Some(monthly), Some(yearly)) = (result.employer_monthly_cost, result.employer_yearly_cost) {
        println!("Coût employeur          +{} / mois, +{} / an", format_euro(monthly), format_euro(yearly));
    }
    println!();
    println!("{}", negotiation_text(&input, &result));
    Ok(())
}
