use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use visualizer::PlotModel;
use workflow::config::InspectorConfig;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Plot per-sample timestamp delays of several traces against a reference trace"
)]
struct Args {
    /// Binary files of little-endian i64 timestamps; the first one is the reference
    #[arg(required = true)]
    traces: Vec<PathBuf>,
    /// Load run settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Index of the reference trace among TRACES
    #[arg(long)]
    reference: Option<usize>,
    /// Percentage of leading samples excluded from statistics
    #[arg(long)]
    skip_first: Option<f64>,
    /// Print delay statistics as JSON instead of opening the chart
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file_config = if let Some(path) = args.config.as_ref() {
        InspectorConfig::load(path)?
    } else {
        InspectorConfig::default()
    };
    let config = file_config.with_overrides(args.reference, args.skip_first)?;

    let runner = Runner::new(config.clone());
    let result = runner.execute(&args.traces)?;

    if args.summary {
        println!("{}", result.summary.to_json()?);
        return Ok(());
    }

    let model = PlotModel::new(result.analysis, result.prefix);
    visualizer::render(model, config.plot).context("showing the delay chart")?;

    Ok(())
}
