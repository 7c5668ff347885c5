//! Quotes one shipping request against a carrier fixture and prints the
//! rate response as JSON.

use anyhow::Context;
use clap::Parser;
use parcel_quote::application::services::QuoteAggregator;
use parcel_quote::domain::entities::{RateResponse, ShippingRequest};
use parcel_quote::domain::value_objects::CurrencyCode;
use parcel_quote::infrastructure::carrier::FixtureCarrier;
use parcel_quote::infrastructure::config::CarrierSettings;
use parcel_quote::infrastructure::conversion::{
    ItemSumMeasurer, StaticCurrencyConverter, StaticMeasureConverter,
};
use parcel_quote::infrastructure::telemetry::{LogFormat, init_tracing};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "parcel-quote")]
#[command(about = "Quote a shipping request against a carrier fixture")]
struct Cli {
    /// Carrier settings file (TOML); `PARCEL_QUOTE__*` variables override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Carrier fixture file (TOML, or JSON by extension).
    #[arg(long)]
    fixture: PathBuf,

    /// Shipping request file (JSON).
    #[arg(long)]
    request: PathBuf,

    /// Store currency that quotes are converted into.
    #[arg(long, default_value = CurrencyCode::CAD)]
    base_currency: String,

    /// Exchange rate as `CODE=UNITS_PER_BASE`, repeatable.
    #[arg(long = "rate", value_name = "CODE=RATE")]
    rates: Vec<String>,

    /// Log as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn parse_rate(raw: &str) -> anyhow::Result<(CurrencyCode, Decimal)> {
    let (code, rate) = raw
        .split_once('=')
        .with_context(|| format!("rate '{raw}' is not CODE=RATE"))?;
    let code = CurrencyCode::parse(code)?;
    let rate: Decimal = rate
        .trim()
        .parse()
        .with_context(|| format!("rate '{raw}' has no decimal value"))?;
    Ok((code, rate))
}

/// Loads every input named on the command line and quotes the request.
async fn run(cli: &Cli) -> anyhow::Result<RateResponse> {
    let settings = CarrierSettings::load(cli.config.as_deref())
        .context("failed to load carrier settings")?;
    let carrier = FixtureCarrier::load(&cli.fixture)
        .with_context(|| format!("failed to load fixture {}", cli.fixture.display()))?;

    let mut currencies = StaticCurrencyConverter::new(CurrencyCode::parse(&cli.base_currency)?);
    for raw in &cli.rates {
        let (code, rate) = parse_rate(raw)?;
        currencies = currencies.with_rate(code, rate);
    }

    let request_json = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("failed to read {}", cli.request.display()))?;
    let request: ShippingRequest =
        serde_json::from_str(&request_json).context("invalid shipping request")?;

    let aggregator = QuoteAggregator::new(
        Arc::new(carrier),
        Arc::new(StaticMeasureConverter::standard()),
        Arc::new(currencies),
        Arc::new(ItemSumMeasurer::new()),
    );
    Ok(aggregator.aggregate(&request, &settings).await)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format, "parcel_quote=info").map_err(|e| anyhow::anyhow!(e))?;

    let response = run(&cli).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
