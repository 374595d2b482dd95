//! Socket copy-strategy comparison charts.
//!
//! With no arguments, renders the four stock charts into the working directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use copybench::application::charts::ChartService;
use copybench::application::reporting::DatasetReporter;
use copybench::config::Config;
use copybench::domain::chart::ChartKind;
use copybench::domain::dataset::Dataset;
use copybench::domain::ports::OutputFormat;
use copybench::infrastructure::observability::init_tracing;
use copybench::infrastructure::{PlottersRenderer, csv_store, embedded};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Socket copy-strategy comparison charts", long_about = None)]
struct Cli {
    /// Directory for chart images
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Image format (png or svg)
    #[arg(long, global = true)]
    format: Option<String>,

    /// CSV file to use instead of the embedded measurements
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Thread count for the message-size charts
    #[arg(long, global = true)]
    threads: Option<u32>,

    /// Message size (bytes) for the latency chart
    #[arg(long, global = true)]
    msg_size: Option<u64>,

    /// Canvas width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render charts (all four unless --chart is given)
    Plot {
        /// throughput, latency, cache-misses or cycles-per-byte (repeatable)
        #[arg(short, long = "chart")]
        charts: Vec<String>,
    },
    /// Print a per-implementation summary table
    Summary {
        /// Also write the summary as a JSON report
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Write the dataset as CSV
    Export {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli)?;

    let dataset = load_dataset(&config)?;

    match cli.command.unwrap_or(Commands::Plot { charts: Vec::new() }) {
        Commands::Plot { charts } => {
            let kinds = parse_charts(&charts)?;
            let renderer = PlottersRenderer::new(
                config.chart_width,
                config.chart_height,
                config.format,
                &config.system_config,
            );
            let service = ChartService::new(renderer, config.selection);
            service.render_all(&dataset, &kinds, &config.output_dir)?;
        }
        Commands::Summary { json } => {
            let reporter = DatasetReporter;
            let report = reporter.build_report(&dataset, &config.system_config);
            reporter.print_summary(&report.rows);
            println!("🏆 Best run: {}", report.best_performer);
            if let Some(path) = json {
                reporter.export_json(&report, &path)?;
            }
        }
        Commands::Export { output } => {
            csv_store::export_dataset(&dataset, &output)?;
            println!("✅ {} records written to {}", dataset.len(), output.display());
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(format) = &cli.format {
        config.format = OutputFormat::from_str(format).context("Invalid --format")?;
    }
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if let Some(threads) = cli.threads {
        config.selection.threads = threads;
    }
    if let Some(msg_size) = cli.msg_size {
        config.selection.msg_size = msg_size;
    }
    if let Some(width) = cli.width {
        config.chart_width = width;
    }
    if let Some(height) = cli.height {
        config.chart_height = height;
    }
    config.validate()
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    match &config.data_file {
        Some(path) => csv_store::load_dataset(path),
        None => {
            let dataset = embedded::load().context("Embedded dataset is malformed")?;
            info!("Using embedded dataset ({} runs)", dataset.len());
            Ok(dataset)
        }
    }
}

/// Parses repeated `--chart` values; none means all four.
fn parse_charts(names: &[String]) -> Result<Vec<ChartKind>> {
    if names.is_empty() {
        return Ok(ChartKind::ALL.to_vec());
    }

    let mut kinds = Vec::new();
    for name in names.iter().flat_map(|n| n.split(',')) {
        let kind = ChartKind::from_str(name)?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
