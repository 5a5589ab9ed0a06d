//! Project a building layout JSON file and print the placements.
//!
//! ```bash
//! twin-layout layout.json --floor-height 3.5 --shell --log projection.log
//! ```

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use twin_layout::{
    BuildingGraph, BuildingShell, ConfigOverrides, FileSink, LayoutProjector, Logger,
    PlacementResult, ProjectionConfig, ShellConfig,
};

const METRICS_TARGET: &str = "twin_layout::cli.metrics";

#[derive(Debug, Parser)]
#[command(name = "twin-layout", version, about = "Project a building zone graph into 3D placements")]
struct Cli {
    /// Layout JSON: `{ "zones": [{ "id", "floor", "neighbors" }] }`
    layout: PathBuf,

    /// JSON file with projection overrides (camelCase or snake_case keys)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    floor_height: Option<f64>,

    #[arg(long)]
    building_width: Option<f64>,

    #[arg(long)]
    building_depth: Option<f64>,

    #[arg(long)]
    margin: Option<f64>,

    /// Include slab, roof and wall boxes in the output
    #[arg(long)]
    shell: bool,

    /// Append JSON-lines diagnostics to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Truncate the log once it would exceed this many bytes (0 disables)
    #[arg(long, default_value_t = 1_048_576)]
    log_max_bytes: u64,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            floor_height: self.floor_height,
            building_width: self.building_width,
            building_depth: self.building_depth,
            margin: self.margin,
        }
    }

    fn projection_config(&self) -> twin_layout::Result<ProjectionConfig> {
        let base = match &self.config {
            Some(path) => ProjectionConfig::from_path(path)?,
            None => ProjectionConfig::default(),
        };
        Ok(base.with_overrides(self.overrides()))
    }
}

#[derive(Serialize)]
struct Output<'a> {
    config: &'a ProjectionConfig,
    placement: &'a PlacementResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    shell: Option<BuildingShell>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.projection_config()?;
    let graph = BuildingGraph::from_path(&cli.layout)?;

    let mut projector = LayoutProjector::new(config);
    let logger = match &cli.log {
        Some(path) => Some(Logger::new(FileSink::new(path, cli.log_max_bytes)?)),
        None => None,
    };
    if let Some(logger) = &logger {
        projector = projector.with_logger(logger.clone());
    }
    let metrics = projector.enable_metrics();

    let placement = projector.project(&graph)?;
    let shell = if cli.shell {
        Some(BuildingShell::for_placement(
            &config,
            &ShellConfig::default(),
            &placement,
        )?)
    } else {
        None
    };

    let output = Output {
        config: &config,
        placement: &placement,
        shell,
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.compact {
        serde_json::to_writer(&mut handle, &output)?;
    } else {
        serde_json::to_writer_pretty(&mut handle, &output)?;
    }
    writeln!(handle)?;

    if let (Some(logger), Ok(metrics)) = (&logger, metrics.lock()) {
        logger.log_event(metrics.snapshot().to_log_event(METRICS_TARGET))?;
    }
    Ok(())
}
