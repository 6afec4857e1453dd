use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chart::figure::{CurveKind, Dash};
use crate::chart::ChartStyle;
use crate::color::{parse_hex, Rgb};
use crate::data::model::{ColumnRoles, MarkerRoles, MethodColumns};
use crate::error::{CompareError, Result};

/// Looked up in the working directory; optional.
pub const CONFIG_FILE: &str = "compare.json";

// ---------------------------------------------------------------------------
// Configuration file
// ---------------------------------------------------------------------------

/// One compared method.
///
/// Columns default to the conventional layout position of the method;
/// `color` is `#rrggbb`.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodConfig {
    pub name: String,
    #[serde(default)]
    pub value_column: Option<usize>,
    #[serde(default)]
    pub error_column: Option<usize>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub dash: Option<Dash>,
}

impl MethodConfig {
    fn named(name: &str, color: &str) -> Self {
        MethodConfig {
            name: name.to_string(),
            value_column: None,
            error_column: None,
            color: Some(color.to_string()),
            dash: None,
        }
    }
}

/// Where the finished figure goes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Output {
    /// On-screen window.
    Window,
    /// PNG or SVG, chosen by extension.
    File { path: PathBuf },
}

/// Everything a run can be told, with defaults that reproduce the
/// Maclaurin / Chebyshev comparison of `result.csv` and `points.csv`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub results_path: PathBuf,
    pub markers_path: Option<PathBuf>,
    /// Second results file feeding the error panel.
    pub errors_path: Option<PathBuf>,
    pub x_column: usize,
    pub truth_column: usize,
    pub marker_x_column: usize,
    pub marker_y_column: usize,
    pub methods: Vec<MethodConfig>,
    pub title: String,
    pub value_label: String,
    pub error_label: String,
    pub x_label: String,
    pub truth_label: String,
    pub marker_label: String,
    pub error_curve: CurveKind,
    pub width: u32,
    pub height: u32,
    pub output: Output,
}

impl Default for Config {
    fn default() -> Self {
        let style = ChartStyle::default();
        Config {
            results_path: PathBuf::from("result.csv"),
            markers_path: Some(PathBuf::from("points.csv")),
            errors_path: None,
            x_column: 0,
            truth_column: 1,
            marker_x_column: 0,
            marker_y_column: 1,
            methods: vec![
                MethodConfig::named("maclaurin", "#008000"),
                MethodConfig::named("chebyshev", "#ffa500"),
            ],
            title: style.title,
            value_label: style.value_label,
            error_label: style.error_label,
            x_label: style.x_label,
            truth_label: style.truth_label,
            marker_label: style.marker_label,
            error_curve: style.error_curve,
            width: style.size.0,
            height: style.size.1,
            output: Output::Window,
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using defaults", path.display());
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(text).map_err(|e| CompareError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.methods.is_empty() {
            return Err(CompareError::Config("at least one method is required".into()));
        }
        let mut seen = BTreeSet::new();
        for m in &self.methods {
            if !seen.insert(m.name.as_str()) {
                return Err(CompareError::Config(format!(
                    "method '{}' is listed twice",
                    m.name
                )));
            }
        }
        if self.width == 0 || self.height == 0 {
            return Err(CompareError::Config("figure size must be non-zero".into()));
        }
        self.method_colors().map(|_| ())
    }

    /// Role mapping: explicit columns where given, conventional layout elsewhere.
    pub fn roles(&self) -> ColumnRoles {
        let names: Vec<&str> = self.methods.iter().map(|m| m.name.as_str()).collect();
        let standard = ColumnRoles::standard(&names);
        let methods = self
            .methods
            .iter()
            .zip(standard.methods)
            .map(|(m, conventional)| MethodColumns {
                name: m.name.clone(),
                value: m.value_column.unwrap_or(conventional.value),
                error: m.error_column.unwrap_or(conventional.error),
            })
            .collect();
        ColumnRoles {
            x: self.x_column,
            truth: self.truth_column,
            methods,
        }
    }

    pub fn marker_roles(&self) -> MarkerRoles {
        MarkerRoles {
            x: self.marker_x_column,
            y: self.marker_y_column,
        }
    }

    fn method_colors(&self) -> Result<BTreeMap<String, Rgb>> {
        let mut colors = BTreeMap::new();
        for m in &self.methods {
            if let Some(hex) = &m.color {
                let c = parse_hex(hex).ok_or_else(|| {
                    CompareError::Config(format!("method '{}': bad color '{hex}'", m.name))
                })?;
                colors.insert(m.name.clone(), c);
            }
        }
        Ok(colors)
    }

    pub fn chart_style(&self) -> Result<ChartStyle> {
        let method_dashes = self
            .methods
            .iter()
            .filter_map(|m| m.dash.map(|d| (m.name.clone(), d)))
            .collect();
        Ok(ChartStyle {
            size: (self.width, self.height),
            title: self.title.clone(),
            value_label: self.value_label.clone(),
            error_label: self.error_label.clone(),
            x_label: self.x_label.clone(),
            truth_label: self.truth_label.clone(),
            marker_label: self.marker_label.clone(),
            error_curve: self.error_curve,
            method_colors: self.method_colors()?,
            method_dashes,
            ..ChartStyle::default()
        })
    }
}
