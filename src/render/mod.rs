//! Diagram export.
//!
//! Consumes an [`EnergyDiagram`] and writes it as PNG, SVG or PDF. All
//! layout math lives in [`layout`]; [`draw::draw_diagram`] is shared by every
//! backend.

pub mod draw;
pub mod images;
pub mod layout;

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::config::{DiagramConfig, ExportFormat};
use crate::data::diagram::EnergyDiagram;

use images::Thumbnail;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing {path} failed: {message}")]
    Draw { path: PathBuf, message: String },
    #[error("{0} export is not available in this build (enable the `pdf` feature)")]
    UnsupportedFormat(&'static str),
    #[error("cannot infer an export format from {0}")]
    UnknownExtension(PathBuf),
}

/// `stem` + `.ext`, keeping any dots already in the stem.
pub fn output_file(stem: &Path, format: ExportFormat) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

fn format_of(path: &Path) -> Option<ExportFormat> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "png" => Some(ExportFormat::Png),
        "svg" => Some(ExportFormat::Svg),
        "pdf" => Some(ExportFormat::Pdf),
        _ => None,
    }
}

fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            log::debug!("Creating output directory {}", dir.display());
            std::fs::create_dir_all(dir).map_err(|source| RenderError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn thumbnails(cfg: &DiagramConfig) -> Result<Vec<Option<Thumbnail>>, RenderError> {
    match &cfg.layout.image_dir {
        Some(dir) => images::load_thumbnails(dir, &cfg.layout.image_size),
        None => Ok(Vec::new()),
    }
}

/// Write one file per configured format. Returns the written paths.
pub fn export_all(diagram: &EnergyDiagram, cfg: &DiagramConfig) -> Result<Vec<PathBuf>, RenderError> {
    let thumbs = thumbnails(cfg)?;
    let mut written = Vec::with_capacity(cfg.output.formats.len());
    for &format in &cfg.output.formats {
        let path = output_file(&cfg.output.path, format);
        export_with(diagram, cfg, &thumbs, format, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Write a single file, choosing the format from its extension.
pub fn export_to(diagram: &EnergyDiagram, cfg: &DiagramConfig, path: &Path) -> Result<(), RenderError> {
    let format = format_of(path).ok_or_else(|| RenderError::UnknownExtension(path.to_path_buf()))?;
    let thumbs = thumbnails(cfg)?;
    export_with(diagram, cfg, &thumbs, format, path)
}

fn export_with(
    diagram: &EnergyDiagram,
    cfg: &DiagramConfig,
    thumbs: &[Option<Thumbnail>],
    format: ExportFormat,
    path: &Path,
) -> Result<(), RenderError> {
    ensure_parent(path)?;
    let size = cfg.layout.figure_size;
    let draw_err = |e: &dyn std::fmt::Display| RenderError::Draw {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    match format {
        ExportFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw::draw_diagram(&root, diagram, cfg, thumbs, true).map_err(|e| draw_err(&e))?;
            root.present().map_err(|e| draw_err(&e))?;
        }
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw::draw_diagram(&root, diagram, cfg, thumbs, !cfg.output.transparent)
                .map_err(|e| draw_err(&e))?;
            root.present().map_err(|e| draw_err(&e))?;
        }
        ExportFormat::Pdf => export_pdf(diagram, cfg, thumbs, path)?,
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(feature = "pdf")]
fn export_pdf(
    diagram: &EnergyDiagram,
    cfg: &DiagramConfig,
    thumbs: &[Option<Thumbnail>],
    path: &Path,
) -> Result<(), RenderError> {
    use plotters_cairo::CairoBackend;

    let draw_err = |message: String| RenderError::Draw {
        path: path.to_path_buf(),
        message,
    };
    let (width, height) = cfg.layout.figure_size;

    let surface = cairo::PdfSurface::new(width as f64, height as f64, path)
        .map_err(|e| draw_err(e.to_string()))?;
    let ctx = cairo::Context::new(&surface).map_err(|e| draw_err(e.to_string()))?;
    {
        let backend = CairoBackend::new(&ctx, (width, height)).map_err(|e| draw_err(e.to_string()))?;
        let root = backend.into_drawing_area();
        draw::draw_diagram(&root, diagram, cfg, thumbs, !cfg.output.transparent)
            .map_err(|e| draw_err(e.to_string()))?;
        root.present().map_err(|e| draw_err(e.to_string()))?;
    }
    surface.finish();
    Ok(())
}

#[cfg(not(feature = "pdf"))]
fn export_pdf(
    _diagram: &EnergyDiagram,
    _cfg: &DiagramConfig,
    _thumbs: &[Option<Thumbnail>],
    _path: &Path,
) -> Result<(), RenderError> {
    Err(RenderError::UnsupportedFormat("PDF"))
}
