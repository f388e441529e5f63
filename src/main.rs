use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use energy_profile::config::{DiagramConfig, ExportFormat};
use energy_profile::state::AppState;
use energy_profile::{app, data, render};

#[derive(Parser)]
#[command(author, version, about = "Render a reaction energy profile from an energy spreadsheet", long_about = None)]
struct Cli {
    /// Energy table (.xlsx, .xls, .ods or .csv)
    input: Option<PathBuf>,
    /// JSON configuration; defaults are used for missing keys
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Output path without extension
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Export format; repeat for several
    #[arg(long = "format", short = 'f', value_enum)]
    formats: Vec<ExportFormat>,
    /// Method to plot (overrides the configured target)
    #[arg(long)]
    method: Option<String>,
    /// Plot every method
    #[arg(long, conflicts_with = "method")]
    all_methods: bool,
    /// Open the preview window after exporting
    #[arg(long)]
    show: bool,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
    /// Debug logging unless RUST_LOG is set
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut cfg = match &cli.config {
        Some(path) => DiagramConfig::load(path)?,
        None => DiagramConfig::default(),
    };
    if let Some(output) = cli.output {
        cfg.output.path = output;
    }
    if !cli.formats.is_empty() {
        cfg.output.formats = cli.formats;
    }
    if let Some(method) = cli.method {
        cfg.table.target_method = Some(method);
    }
    if cli.all_methods {
        cfg.table.target_method = None;
    }

    if cli.dump_config {
        println!("{}", cfg.to_json_pretty());
        return Ok(());
    }

    let mut state = AppState::new(cfg);

    match &cli.input {
        Some(input) => {
            let diagram = data::build_from_file(input, &state.config)
                .with_context(|| format!("loading {}", input.display()))?;
            if diagram.is_empty() {
                log::warn!("No rows matched the filter; the diagram is empty");
            }
            for path in render::export_all(&diagram, &state.config)? {
                println!("{}", path.display());
            }
            state.set_diagram(diagram, Some(input.clone()));
        }
        None if cli.show => {}
        None => bail!("no input file given (pass a spreadsheet, or --show to open one interactively)"),
    }

    if cli.show {
        app::run(state).map_err(|e| anyhow::anyhow!("preview window failed: {e}"))?;
    }
    Ok(())
}
