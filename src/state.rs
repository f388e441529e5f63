use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DiagramConfig;
use crate::data::{self, diagram::{EnergyDiagram, Level, Link}};
use crate::render;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The preview window state, independent of rendering.
pub struct AppState {
    /// Pipeline and renderer options.
    pub config: DiagramConfig,

    /// Built diagram (None until a spreadsheet is loaded).
    pub diagram: Option<EnergyDiagram>,

    /// Spreadsheet the diagram came from.
    pub source: Option<PathBuf>,

    /// Groups hidden from the preview.
    pub hidden_groups: BTreeSet<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            diagram: None,
            source: None,
            hidden_groups: BTreeSet::new(),
            status_message: None,
        }
    }

    /// Ingest a newly built diagram; every group starts visible.
    pub fn set_diagram(&mut self, diagram: EnergyDiagram, source: Option<PathBuf>) {
        self.hidden_groups.clear();
        self.diagram = Some(diagram);
        self.source = source;
        self.status_message = None;
    }

    /// Run the pipeline on `path` and show the result.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let diagram = data::build_from_file(path, &self.config)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_diagram(diagram, Some(path.to_path_buf()));
        Ok(())
    }

    /// Export the diagram with only the visible groups.
    pub fn export(&self, path: &Path) -> Result<()> {
        let diagram = self.visible_diagram().context("nothing to export")?;
        render::export_to(&diagram, &self.config, path)
            .with_context(|| format!("exporting {}", path.display()))?;
        Ok(())
    }

    pub fn is_visible(&self, group: usize) -> bool {
        !self.hidden_groups.contains(&group)
    }

    /// Toggle a single group's visibility.
    pub fn toggle_group(&mut self, group: usize) {
        if !self.hidden_groups.remove(&group) {
            self.hidden_groups.insert(group);
        }
    }

    /// Show every group.
    pub fn select_all(&mut self) {
        self.hidden_groups.clear();
    }

    /// Hide every group.
    pub fn select_none(&mut self) {
        if let Some(d) = &self.diagram {
            self.hidden_groups = (0..d.groups.len()).collect();
        }
    }

    /// The diagram restricted to visible groups, ids renumbered.
    pub fn visible_diagram(&self) -> Option<EnergyDiagram> {
        let d = self.diagram.as_ref()?;
        if self.hidden_groups.is_empty() {
            return Some(d.clone());
        }

        let mut out = EnergyDiagram::default();
        let mut group_map = vec![None; d.groups.len()];
        for (g, group) in d.groups.iter().enumerate() {
            if self.is_visible(g) {
                group_map[g] = Some(out.groups.len());
                out.groups.push(group.clone());
            }
        }

        let mut level_map = vec![None; d.levels.len()];
        for level in &d.levels {
            if let Some(g) = group_map[level.group] {
                level_map[level.id] = Some(out.levels.len());
                out.levels.push(Level {
                    id: out.levels.len(),
                    group: g,
                    ..level.clone()
                });
            }
        }

        for link in &d.links {
            if let (Some(g), Some(from), Some(to)) =
                (group_map[link.group], level_map[link.from], level_map[link.to])
            {
                out.links.push(Link {
                    from,
                    to,
                    group: g,
                    ..link.clone()
                });
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineStyle, StyleConfig, TableConfig};
    use crate::data::diagram::build_diagram;
    use crate::data::filter::{GroupKey, KeyedRow};
    use crate::data::model::Cell;

    fn two_groups() -> EnergyDiagram {
        let mut rows = Vec::new();
        for g in 0..2i64 {
            let key = GroupKey {
                index: Cell::Integer(g),
                category: Cell::String("c".into()),
                method: Cell::String("DLPNO".into()),
                solvent: Cell::String("No".into()),
                additive: Cell::String("-".into()),
            };
            for n in 0..6 {
                rows.push(KeyedRow {
                    key: key.clone(),
                    molecule: Cell::Null,
                    row: n,
                    energy: Cell::Float(n as f64 + g as f64 * 10.0),
                });
            }
        }
        build_diagram(rows, &TableConfig::default(), &StyleConfig::default())
    }

    #[test]
    fn hiding_a_group_renumbers_levels_and_links() {
        let mut state = AppState::new(DiagramConfig::default());
        state.set_diagram(two_groups(), None);
        state.toggle_group(0);

        let d = state.visible_diagram().unwrap();
        assert_eq!(d.groups.len(), 1);
        assert_eq!(d.levels.len(), 3);
        assert_eq!(d.levels[0].id, 0);
        assert_eq!(d.levels[0].value, 13.0);
        assert!(d.levels.iter().all(|l| l.group == 0));
        assert_eq!(d.links.len(), 2);
        assert_eq!((d.links[0].from, d.links[0].to), (0, 1));
        assert_eq!(d.links[0].style, LineStyle::Dashed);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = AppState::new(DiagramConfig::default());
        state.set_diagram(two_groups(), None);
        state.select_none();
        assert!(state.visible_diagram().unwrap().is_empty());
        state.select_all();
        assert_eq!(state.visible_diagram().unwrap().levels.len(), 6);
    }
}
