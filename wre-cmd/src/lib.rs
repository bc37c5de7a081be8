//! Command implementations for the WRE CLI.
//!
//! Every command talks to the dataset backend through [`wre_api::ApiClient`].
//! `snapshot` and `forecast` drive a full [`wre_explorer::Explorer`], so the
//! CLI applies exactly the same selection corrections as the web app.

use clap::Subcommand;
use wre_api::ApiClient;
use wre_explorer::ExplorerConfig;

pub mod catalog;
pub mod output;
pub mod series;
pub mod snapshot;

#[derive(Subcommand)]
pub enum Command {
    /// List the datasets offered by the backend
    Datasets,

    /// Show the structure of one dataset
    Info {
        /// Dataset filename, e.g. C11-2005-2024.csv
        dataset: String,
    },

    /// Map a year's entity values onto the water features of a category
    Snapshot {
        dataset: String,

        /// Year to show; out-of-range years fall back to the latest year
        #[arg(short, long)]
        year: Option<i32>,

        /// Spatial category, e.g. Rivers
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        indicator: Option<String>,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Historical series spliced with a forecast
    Forecast {
        dataset: String,

        #[arg(short, long)]
        entity: Option<String>,

        #[arg(short, long)]
        indicator: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Years to forecast (1-30)
        #[arg(long)]
        horizon: Option<u32>,

        /// Year flagged as selected in the output
        #[arg(short, long)]
        year: Option<i32>,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write the historical and forecast tables instead of chart rows
        #[arg(long)]
        table: bool,
    },

    /// Raw historical time series, without a forecast
    History {
        dataset: String,

        #[arg(short, long)]
        entity: Option<String>,

        #[arg(short, long)]
        indicator: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command, config: ExplorerConfig) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.api_url)?;
    log::debug!("Using backend {}", client.base_url());

    match command {
        Command::Datasets => catalog::run_datasets(&client).await,
        Command::Info { dataset } => catalog::run_info(&client, &config, &dataset).await,
        Command::Snapshot {
            dataset,
            year,
            category,
            indicator,
            output,
        } => {
            let selection = snapshot::SnapshotSelection {
                year,
                category,
                indicator,
            };
            snapshot::run_snapshot(&client, config, &dataset, selection, output.as_deref()).await
        }
        Command::Forecast {
            dataset,
            entity,
            indicator,
            category,
            horizon,
            year,
            output,
            table,
        } => {
            let selection = series::ForecastSelection {
                entity,
                indicator,
                category,
                horizon,
                year,
            };
            series::run_forecast(&client, config, &dataset, selection, output.as_deref(), table)
                .await
        }
        Command::History {
            dataset,
            entity,
            indicator,
            category,
            output,
        } => {
            series::run_history(
                &client,
                &dataset,
                entity.as_deref(),
                indicator.as_deref(),
                category.as_deref(),
                output.as_deref(),
            )
            .await
        }
    }
}
