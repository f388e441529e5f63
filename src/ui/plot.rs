use eframe::egui::{RichText, Ui};
use egui_plot::{Line, LineStyle as PlotLineStyle, Plot, PlotPoint, PlotPoints, Text};

use crate::color::to_color32;
use crate::config::LineStyle;
use crate::render::layout::{position_stats, Geometry};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Diagram plot (central panel)
// ---------------------------------------------------------------------------

fn plot_style(style: LineStyle) -> PlotLineStyle {
    match style {
        LineStyle::Solid => PlotLineStyle::Solid,
        LineStyle::Dashed | LineStyle::DashDot => PlotLineStyle::Dashed { length: 10.0 },
        LineStyle::Dotted => PlotLineStyle::Dotted { spacing: 5.0 },
    }
}

/// Render the energy diagram in the central panel.
pub fn diagram_plot(ui: &mut Ui, state: &AppState) {
    let diagram = match state.visible_diagram() {
        Some(d) => d,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a spreadsheet to view the profile  (File → Open…)");
            });
            return;
        }
    };

    let layout = &state.config.layout;
    let style = &state.config.style;
    let geom = Geometry::new(layout);

    Plot::new("energy_profile")
        .legend(egui_plot::Legend::default())
        .y_axis_label(layout.title.as_str())
        .show_x(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for link in &diagram.links {
                let from = &diagram.levels[link.from];
                let to = &diagram.levels[link.to];
                let (_, fx) = geom.level_span(from.position);
                let (tx, _) = geom.level_span(to.position);
                let points: PlotPoints = vec![[fx, from.value], [tx, to.value]].into();
                plot_ui.line(
                    Line::new(points)
                        .color(to_color32(link.color, 1.0))
                        .style(plot_style(link.style))
                        .width(style.link_width as f32),
                );
            }

            // Lines sharing a name share one legend entry.
            for level in &diagram.levels {
                let group = &diagram.groups[level.group];
                let (a, b) = geom.level_span(level.position);
                let points: PlotPoints = vec![[a, level.value], [b, level.value]].into();
                plot_ui.line(
                    Line::new(points)
                        .name(group.label.plain())
                        .color(to_color32(level.color, level.opacity))
                        .width(style.level_width as f32),
                );
            }

            if layout.draw_labels {
                for st in position_stats(&diagram) {
                    if let Some(name) = layout.name_labels.get(st.position) {
                        plot_ui.text(Text::new(
                            PlotPoint::new(geom.center(st.position), st.min - layout.label_offset),
                            RichText::new(name).strong(),
                        ));
                    }
                }
            }
        });
}
