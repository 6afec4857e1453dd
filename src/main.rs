mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod export;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};

use chart::figure::Figure;
use chart::ComparisonInput;
use config::{Config, Output, CONFIG_FILE};
use data::model::{load_markers, MarkerSet, SeriesSet};

fn main() -> Result<()> {
    env_logger::init();
    run().inspect_err(|e| log::error!("{e:#}"))
}

fn run() -> Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE)).context("loading configuration")?;
    let figure = build_figure(&config)?;

    match &config.output {
        Output::Window => {
            log::info!("Showing chart in a window");
            app::show(figure)
        }
        Output::File { path } => {
            export::export(&figure, path)
                .with_context(|| format!("exporting chart to {}", path.display()))?;
            log::info!("Wrote chart to {}", path.display());
            Ok(())
        }
    }
}

/// Load → model → compose. Both reads finish before composition starts.
fn build_figure(config: &Config) -> Result<Figure> {
    let roles = config.roles();

    let values = SeriesSet::load(&config.results_path, &roles)
        .with_context(|| format!("loading results from {}", config.results_path.display()))?;
    log::info!(
        "Loaded {} samples of {} methods from {}",
        values.len(),
        values.methods.len(),
        config.results_path.display()
    );

    let errors = config
        .errors_path
        .as_deref()
        .map(|path| {
            SeriesSet::load(path, &roles)
                .with_context(|| format!("loading error series from {}", path.display()))
        })
        .transpose()?;

    let markers = match config.markers_path.as_deref() {
        Some(path) => load_markers(path, &config.marker_roles())
            .with_context(|| format!("loading markers from {}", path.display()))?,
        None => MarkerSet::default(),
    };
    log::info!("Loaded {} marker points", markers.len());

    let style = config.chart_style().context("building chart style")?;
    let input = ComparisonInput {
        values: &values,
        errors: errors.as_ref(),
        markers: &markers,
    };
    chart::compose(&input, &style).context("composing chart")
}
