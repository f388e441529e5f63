//! Diagram configuration.
//!
//! Every knob of the pipeline and the renderer lives here. All sections use
//! `#[serde(default)]`, so a JSON file only needs the keys it overrides.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// --- Enums ---

/// Stroke pattern of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    /// `(dash, gap)` lengths in pixels, `None` for a solid stroke.
    pub fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((12, 6)),
            // single-pattern backends: a shorter dash stands in for dash-dot
            LineStyle::DashDot => Some((8, 4)),
            LineStyle::Dotted => Some((2, 4)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperRight,
    LowerLeft,
    Hidden,
}

// --- Table ---

/// Spreadsheet schema and row selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Worksheet name; first sheet when unset.
    pub sheet: Option<String>,
    /// Rows per block, the last of which is a separator. `0` disables.
    pub block_rows: usize,
    /// First column (after the drop) that is forward-filled, besides column 0.
    pub fill_from: usize,
    /// Identifying columns removed before forward-fill.
    pub dropped_columns: Vec<String>,
    pub index_column: String,
    pub category_column: String,
    pub method_column: String,
    pub solvent_column: String,
    pub additive_column: String,
    pub molecule_column: String,
    pub plot_column: String,
    /// Plot flag value that keeps a row.
    pub include_value: String,
    /// Only rows of this method are kept; every method when unset.
    pub target_method: Option<String>,
    /// Column holding the plotted energy.
    pub energy_column: String,
    /// Group-relative row of the first reaction-coordinate point.
    pub series_offset: usize,
    /// Number of reaction-coordinate points per group.
    pub series_len: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            block_rows: 12,
            fill_from: 7,
            dropped_columns: vec!["Datasource".into(), "Filenames".into()],
            index_column: "Index".into(),
            category_column: "Category".into(),
            method_column: "Method".into(),
            solvent_column: "Solvent".into(),
            additive_column: "Additive".into(),
            molecule_column: "Molecule".into(),
            plot_column: "Plot".into(),
            include_value: "Yes".into(),
            target_method: Some("DLPNO//r^2SCAN-3c".into()),
            energy_column: "ΔG, kcal/mol".into(),
            series_offset: 3,
            series_len: 7,
        }
    }
}

// --- Style ---

/// Series colours, strokes and opacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Hex codes (`#49B6FF`) or CSS names (`maroon`), cycled per group.
    pub palette: Vec<String>,
    /// Link strokes, cycled per group.
    pub line_styles: Vec<LineStyle>,
    /// Opacity of levels whose method lacks `opaque_marker`.
    pub default_opacity: f64,
    /// Methods containing this marker are drawn fully opaque.
    pub opaque_marker: String,
    /// Solvent value meaning "gas phase"; no suffix in the label.
    pub no_solvent: String,
    pub level_width: f64,
    pub link_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: [
                "#49B6FF", "#FF6563", "#FCBA04", "#38E3E8", "#77F21D", "#6530F2", "maroon", "gold",
                "navy",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            line_styles: vec![
                LineStyle::Solid,
                LineStyle::Dashed,
                LineStyle::DashDot,
                LineStyle::Dotted,
            ],
            default_opacity: 1.0,
            opaque_marker: "DLPNO".into(),
            no_solvent: "No".into(),
            level_width: 3.5,
            link_width: 2.5,
        }
    }
}

// --- Layout ---

/// Geometry and decorations of the exported figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Length of a level segment, in x units.
    pub dimension: f64,
    /// Gap between two positions, in x units.
    pub space: f64,
    /// Extra y padding above and below the data.
    pub squeeze_offset: f64,
    /// Figure size in pixels.
    pub figure_size: (u32, u32),
    pub title: String,
    pub font_family: String,
    pub axis_label_size: u32,
    pub tick_label_size: u32,
    pub legend_font_size: u32,
    pub legend_pos: LegendPosition,
    /// One name per reaction-coordinate position.
    pub name_labels: Vec<String>,

    pub draw_energy_boxes: bool,
    pub energy_box_background: String,
    pub energy_box_width: f64,
    pub energy_box_text_size: u32,
    /// Vertical distance between two values inside a box.
    pub energy_box_offset: f64,

    pub draw_labels: bool,
    pub label_text_size: u32,
    pub label_offset: f64,

    /// Directory of molecule images, one per position in file-name order.
    pub image_dir: Option<PathBuf>,
    /// Per position: offset from the highest (positive) or lowest (negative) level.
    pub image_pos: Vec<f64>,
    /// Per position: zoom factor of the image.
    pub image_size: Vec<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            dimension: 12.0,
            space: 10.0,
            squeeze_offset: 25.0,
            figure_size: (1920, 1080),
            title: "Gibbs Free Energy [kcal/mol]".into(),
            font_family: "serif".into(),
            axis_label_size: 24,
            tick_label_size: 24,
            legend_font_size: 18,
            legend_pos: LegendPosition::UpperRight,
            name_labels: ["Reagents", "A", "TS1", "B", "TS2", "C", "Products"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            draw_energy_boxes: true,
            energy_box_background: "snow".into(),
            energy_box_width: 6.0,
            energy_box_text_size: 16,
            energy_box_offset: 3.5,
            draw_labels: true,
            label_text_size: 21,
            label_offset: 8.0,
            image_dir: None,
            image_pos: vec![15.0, -30.0, 22.0, -25.0, 18.0, -25.0, 20.0],
            image_size: vec![0.6, 1.0, 1.0, 1.0, 1.0, 1.0, 0.6],
        }
    }
}

// --- Output ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output path without extension; one file per format.
    pub path: PathBuf,
    pub formats: Vec<ExportFormat>,
    /// Leave the background of vector outputs unpainted.
    pub transparent: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("out/energy_profile"),
            formats: vec![ExportFormat::Png, ExportFormat::Svg],
            transparent: true,
        }
    }
}

// --- Main Config Struct ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub table: TableConfig,
    pub style: StyleConfig,
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

impl DiagramConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::info!("Config loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
