use anyhow::{Context, Result};
use clap::Parser;
use retail_analytics::cli::Cli;
use retail_analytics::RetailPipeline;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.bootstrap().context("failed to load configuration")?;

    let pipeline = RetailPipeline::new(config).context("invalid configuration")?;
    let outcome = pipeline.run().context("analytics run failed")?;

    if let Some(path) = &cli.export_forecast {
        outcome
            .forecast
            .write_csv(path)
            .with_context(|| format!("failed to export forecast to {}", path.display()))?;
        info!(path = %path.display(), "Forecast exported");
    }

    if cli.json {
        println!("{}", outcome.report.to_json_pretty()?);
    } else {
        println!();
        println!("{}", outcome.report);
    }

    Ok(())
}
