mod app;
mod color;
mod data;
mod state;
mod ui;
mod view;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::VeloAccidentsApp;
use clap::Parser;
use data::filter::Filter;
use data::model::{CategoricalField, NumericField};
use eframe::egui;

const DEFAULT_DATA_PATH: &str = "data/clean.csv";

#[derive(Parser)]
#[command(name = "velo-accidents")]
#[command(about = "Explore French bicycle accident records (2005-2018)", long_about = None)]
struct Cli {
    /// Cleaned accident table (.csv, .json or .parquet)
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Print whole-table statistics as JSON and exit
    #[arg(long)]
    summary: bool,

    /// Restrict the summary to one year
    #[arg(long, requires = "summary")]
    year: Option<i64>,

    /// Restrict the summary to one department code (e.g. 75)
    #[arg(long, requires = "summary")]
    department: Option<String>,
}

impl Cli {
    fn summary_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(year) = self.year {
            filter = filter.equals_number(NumericField::Year, year);
        }
        if let Some(department) = &self.department {
            filter = filter.equals(CategoricalField::Department, department.as_str());
        }
        filter
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = data::cache::shared_cache()
        .get_or_load(&cli.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e:#}", cli.data.display()))
        .with_context(|| format!("loading {}", cli.data.display()))?;

    if cli.summary {
        let filter = cli.summary_filter();
        log::info!("Summarizing with {} predicate(s)", filter.predicates().len());
        let summary = view::summarize(&dataset, &filter);
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{json}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Accident Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(VeloAccidentsApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
