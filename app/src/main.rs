use std::path::PathBuf;

use clap::Parser;
use common::{
    config::Config,
    report::{render_report, write_report},
    series::extract,
    table::MeasurementTable,
};
use eyre::{Context, Result};
use tracing::{debug, error};
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const MODULES: &[&str] = &["scaling_report", "common", "scaling_basic"];

/// Builds an HTML report of speedup and efficiency charts from performance measurements
#[derive(Parser)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Measurements CSV, overrides the config
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Report HTML, overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Extra tracing directives, ie. `common=trace`
    #[arg(short, long)]
    log: Vec<String>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(&args.log)?;

    if let Err(err) = run(args) {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}

fn init_logging(directives: &[String]) -> Result<()> {
    let env_filter = env_filter(std::env::var("RUST_LOG").ok().as_deref(), directives)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .init();
    Ok(())
}

/// A bare level in `RUST_LOG` applies to every crate of the workspace. Anything else is read
/// as a full directive list, dropping directives that do not parse.
fn env_filter(rust_log: Option<&str>, directives: &[String]) -> Result<EnvFilter> {
    let level = match rust_log {
        None => Some(LevelFilter::WARN),
        Some(value) => value.trim().parse::<LevelFilter>().ok(),
    };
    let mut env_filter = match (rust_log, level) {
        (Some(value), None) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(value),
        _ => EnvFilter::new("warn"),
    };

    for log in directives {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    if let Some(level) = level {
        for module in MODULES {
            if !directives.iter().any(|x| x.starts_with(module)) {
                env_filter = env_filter.add_directive(format!("{module}={level}").parse()?);
            }
        }
    }
    Ok(env_filter)
}

fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    let plots = config
        .plots
        .clone()
        .unwrap_or_else(scaling_basic::default_plots);
    debug!("input={:?} output={:?} plots={}", config.input, config.output, plots.len());

    let table = MeasurementTable::from_path(&config.input, &config.settings)?;
    let series = extract(&table, &config.settings);
    let html = render_report(&config, &plots, &series).context("Render report")?;
    write_report(&config.output, &html)?;

    println!("Charts written to: {}", config.output.display());
    println!("Open the file in a browser to view the interactive charts.");
    Ok(())
}
