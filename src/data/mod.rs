/// Data layer: sheet loading, normalization, filtering and level/link emission.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  drop separator rows + unused columns, forward-fill
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  plot flag + target method → KeyedRow per row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  diagram  │  stable group by key → levels, links, labels
///   └──────────┘
/// ```

pub mod diagram;
pub mod filter;
pub mod label;
pub mod loader;
pub mod model;
pub mod normalize;

use std::path::Path;

use crate::config::DiagramConfig;

use diagram::EnergyDiagram;
use loader::LoadError;

/// Run the whole pipeline on one spreadsheet.
pub fn build_from_file(path: &Path, cfg: &DiagramConfig) -> Result<EnergyDiagram, LoadError> {
    let raw = loader::load_file(path, cfg.table.sheet.as_deref())?;
    let table = normalize::normalize(raw, &cfg.table)?;
    let table = filter::filter_rows(table, &cfg.table)?;
    let rows = filter::index_rows(&table, &cfg.table)?;
    Ok(diagram::build_diagram(rows, &cfg.table, &cfg.style))
}
