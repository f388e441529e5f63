use crate::color::SeriesColor;
use crate::config::LayoutConfig;
use crate::data::diagram::EnergyDiagram;

/// Data-space geometry of the diagram x axis.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub dimension: f64,
    pub space: f64,
}

impl Geometry {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            dimension: layout.dimension,
            space: layout.space,
        }
    }

    fn stride(&self) -> f64 {
        self.dimension + self.space
    }

    /// Left and right end of a level segment at `position`.
    pub fn level_span(&self, position: usize) -> (f64, f64) {
        let x0 = position as f64 * self.stride();
        (x0, x0 + self.dimension)
    }

    pub fn center(&self, position: usize) -> f64 {
        position as f64 * self.stride() + self.dimension / 2.0
    }

    /// Center of the gap right of `position`, where its energy box sits.
    pub fn box_center(&self, position: usize) -> f64 {
        (position + 1) as f64 * self.stride() - self.space / 2.0
    }

    pub fn x_range(&self, positions: usize) -> (f64, f64) {
        (-self.space / 2.0, positions as f64 * self.stride() + 5.0)
    }
}

/// All levels sharing one reaction-coordinate position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionStats {
    pub position: usize,
    /// Sorted ascending by value.
    pub values: Vec<(f64, SeriesColor)>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Per-position summaries for every occupied position, in position order.
pub fn position_stats(diagram: &EnergyDiagram) -> Vec<PositionStats> {
    (0..diagram.position_count())
        .filter_map(|position| {
            let mut values: Vec<(f64, SeriesColor)> = diagram
                .levels
                .iter()
                .filter(|l| l.position == position)
                .map(|l| (l.value, l.color))
                .collect();
            if values.is_empty() {
                return None;
            }
            values.sort_by(|a, b| a.0.total_cmp(&b.0));
            let min = values[0].0;
            let max = values[values.len() - 1].0;
            let mean = values.iter().map(|v| v.0).sum::<f64>() / values.len() as f64;
            Some(PositionStats {
                position,
                values,
                min,
                max,
                mean,
            })
        })
        .collect()
}

/// Y axis range: data extent padded by `squeeze` on both sides.
pub fn y_range(diagram: &EnergyDiagram, squeeze: f64) -> (f64, f64) {
    let (lo, hi) = diagram
        .levels
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
            (lo.min(l.value), hi.max(l.value))
        });
    if lo > hi {
        return (-squeeze.max(1.0), squeeze.max(1.0));
    }
    (lo - squeeze, hi + squeeze)
}

/// Y of the `j`-th of `n` values inside an energy box centered at `center`.
pub fn box_row_y(center: f64, j: usize, n: usize, offset: f64) -> f64 {
    center + offset * (j as f64 - (n as f64 - 1.0) / 2.0)
}
