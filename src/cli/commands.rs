use crate::analyzers::DelayAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{AggregateTable, Dataset, DelayAggregates};
use crate::processors::DelayAggregator;
use crate::server::{self, AppState};
use crate::settings::DashboardConfig;
use crate::utils::progress::ProgressReporter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref(), &cli.overrides())?;

    // The dataset is required by every command; failing to load it is fatal.
    let dataset = match load_dataset(&config).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load flight data from {}: {}", config.source, e);
            return Err(e);
        }
    };

    match cli.command() {
        Commands::Serve { .. } => {
            let addr = config.socket_addr()?;
            let state = AppState::new(dataset).with_default_year(&config.default_year);
            println!("Dashboard running at http://{}", addr);
            server::serve(addr, state).await?;
        }

        Commands::Summary { year } => {
            let year = year.unwrap_or_else(|| config.default_year.clone());
            let aggregates = DelayAggregator::new().aggregate(&dataset, &year)?;
            println!("{}", format_aggregates(&aggregates));
        }

        Commands::Info => {
            let stats = DelayAnalyzer::new().analyze(&dataset);
            println!("Source: {}", config.source);
            println!("Sample: {} rows, seed {}", config.sample_size, config.seed);
            println!("\n{}", stats.detailed_summary());
        }
    }

    Ok(())
}

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        debug!("Logging already initialised");
    }
}

async fn load_dataset(config: &DashboardConfig) -> Result<Dataset> {
    let progress = ProgressReporter::new_spinner("Loading flight data...", false);
    let dataset = config.loader().load(Some(&progress)).await?;
    progress.finish_with_message(&format!("Loaded {} flight records", dataset.len()));
    Ok(dataset)
}

pub fn format_aggregates(aggregates: &DelayAggregates) -> String {
    aggregates
        .iter()
        .map(format_table)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_table(table: &AggregateTable) -> String {
    let mut out = format!("{} ({} groups)", table.cause.chart_title(), table.len());
    if table.is_empty() {
        out.push_str("\n  (no records)");
        return out;
    }

    let [month, airline, value] = table.columns();
    out.push_str(&format!("\n  {:>5}  {:<17}  {}", month, airline, value));
    for row in &table.rows {
        let mean = row
            .mean
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "NaN".to_string());
        out.push_str(&format!(
            "\n  {:>5}  {:<17}  {}",
            row.month, row.reporting_airline, mean
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateRow, DelayCause};

    #[test]
    fn test_format_aggregates() {
        let tables = vec![
            AggregateTable::new(
                DelayCause::Carrier,
                vec![
                    AggregateRow::new(3, "AA".to_string(), Some(15.0)),
                    AggregateRow::new(4, "DL".to_string(), None),
                ],
            ),
            AggregateTable::empty(DelayCause::Weather),
        ];

        let text = format_aggregates(&DelayAggregates::new(2010, tables));

        assert!(text.contains("Average carrier delay time (minutes) by airline (2 groups)"));
        assert!(text.contains("CarrierDelay"));
        assert!(text.contains("15.00"));
        assert!(text.contains("NaN"));
        assert!(text.contains("Average weather delay time (minutes) by airline (0 groups)\n  (no records)"));
    }
}
