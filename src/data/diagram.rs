use crate::color::{resolve_palette, SeriesColor};
use crate::config::{LineStyle, StyleConfig, TableConfig};

use super::filter::{GroupKey, KeyedRow};
use super::label::GroupLabel;
use super::model::Cell;

// ---------------------------------------------------------------------------
// Diagram primitives
// ---------------------------------------------------------------------------

/// One energy at one reaction-coordinate position.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Index into [`EnergyDiagram::levels`].
    pub id: usize,
    pub value: f64,
    /// Reaction-coordinate position, `0` = reagents.
    pub position: usize,
    /// Index into [`EnergyDiagram::groups`].
    pub group: usize,
    pub cluster: usize,
    pub color: SeriesColor,
    pub opacity: f64,
}

/// Connector between two consecutive levels of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub group: usize,
    pub color: SeriesColor,
    pub style: LineStyle,
}

/// One reaction pathway.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub label: GroupLabel,
    pub color: SeriesColor,
    pub style: LineStyle,
    pub opacity: f64,
    /// Consecutive index per distinct `index` value.
    pub cluster: usize,
}

/// Everything the renderer needs, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyDiagram {
    pub levels: Vec<Level>,
    pub links: Vec<Link>,
    pub groups: Vec<Group>,
}

impl EnergyDiagram {
    pub fn group_labels(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.label.plain()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest occupied position plus one.
    pub fn position_count(&self) -> usize {
        self.levels.iter().map(|l| l.position + 1).max().unwrap_or(0)
    }

    pub fn levels_of(&self, group: usize) -> impl Iterator<Item = &Level> {
        self.levels.iter().filter(move |l| l.group == group)
    }
}

// ---------------------------------------------------------------------------
// Energy cell interpretation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Energy {
    Present(f64),
    /// Empty cell; the series is bridged across it.
    Blank,
    /// Text that is not a number; the series is broken at it.
    Malformed,
}

fn energy_of(cell: &Cell) -> Energy {
    if cell.is_missing() {
        return Energy::Blank;
    }
    if let Some(v) = cell.as_f64() {
        return Energy::Present(v);
    }
    match cell {
        Cell::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_nan() => Energy::Blank,
            Ok(v) => Energy::Present(v),
            Err(_) => Energy::Malformed,
        },
        _ => Energy::Malformed,
    }
}

// ---------------------------------------------------------------------------
// Grouper & emitter
// ---------------------------------------------------------------------------

/// Group keyed rows and emit levels and links.
///
/// Groups follow the natural key order; rows inside a group keep their
/// table order (stable sort).
pub fn build_diagram(mut rows: Vec<KeyedRow>, table: &TableConfig, style: &StyleConfig) -> EnergyDiagram {
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    let palette = resolve_palette(&style.palette);
    let line_styles = if style.line_styles.is_empty() {
        vec![LineStyle::Solid]
    } else {
        style.line_styles.clone()
    };

    let mut diagram = EnergyDiagram::default();
    let mut cluster = 0usize;
    let mut prev_index: Option<&Cell> = None;

    for (i, chunk) in rows.chunk_by(|a, b| a.key == b.key).enumerate() {
        let key = &chunk[0].key;

        if let Some(prev) = prev_index {
            if *prev != key.index {
                cluster += 1;
            }
        }
        prev_index = Some(&key.index);

        let method = key.method.to_string();
        let color = palette[i % palette.len()];
        let line_style = line_styles[i % line_styles.len()];
        let opacity = if method.contains(&style.opaque_marker) {
            1.0
        } else {
            style.default_opacity
        };

        let mut prev_level: Option<usize> = None;
        let series = chunk.iter().skip(table.series_offset).take(table.series_len);
        for (position, row) in series.enumerate() {
            match energy_of(&row.energy) {
                Energy::Present(value) => {
                    let id = diagram.levels.len();
                    diagram.levels.push(Level {
                        id,
                        value,
                        position,
                        group: i,
                        cluster,
                        color,
                        opacity,
                    });
                    if let Some(from) = prev_level {
                        diagram.links.push(Link {
                            from,
                            to: id,
                            group: i,
                            color,
                            style: line_style,
                        });
                    }
                    prev_level = Some(id);
                }
                Energy::Blank => {}
                Energy::Malformed => {
                    log::warn!(
                        "Group {i} ({method}), position {position}: '{}' is not a number",
                        row.energy
                    );
                    prev_level = None;
                }
            }
        }

        diagram.groups.push(Group {
            key: key.clone(),
            label: GroupLabel::new(&method, &key.solvent.to_string(), &style.no_solvent),
            color,
            style: line_style,
            opacity,
            cluster,
        });
    }

    log::info!(
        "Built {} groups, {} levels, {} links",
        diagram.groups.len(),
        diagram.levels.len(),
        diagram.links.len()
    );
    diagram
}
