use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::color::{parse_color, SeriesColor};
use crate::config::{DiagramConfig, LegendPosition};
use crate::data::diagram::EnergyDiagram;

use super::images::Thumbnail;
use super::layout::{box_row_y, position_stats, y_range, Geometry, PositionStats};

fn rgb(c: SeriesColor) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

fn px(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

/// Draw the whole diagram onto `root`. The caller presents the area.
///
/// Backend-agnostic: used for PNG, SVG and (with the `pdf` feature) cairo.
pub fn draw_diagram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    diagram: &EnergyDiagram,
    cfg: &DiagramConfig,
    thumbnails: &[Option<Thumbnail>],
    fill_background: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let layout = &cfg.layout;
    let font = layout.font_family.as_str();

    if fill_background {
        root.fill(&WHITE)?;
    }

    if diagram.is_empty() {
        let (w, h) = root.dim_in_pixel();
        root.draw(&Text::new(
            "No levels to plot",
            (w as i32 / 2, h as i32 / 2),
            (font, 24.0)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        return Ok(());
    }

    let geom = Geometry::new(layout);
    let (x0, x1) = geom.x_range(diagram.position_count());
    let (y0, y1) = y_range(diagram, layout.squeeze_offset);

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(10)
        .y_label_area_size(110)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_desc(layout.title.as_str())
        .axis_desc_style((font, layout.axis_label_size as f64))
        .label_style((font, layout.tick_label_size as f64))
        .draw()?;

    // Links first so the levels sit on top of them.
    let link_px = px(cfg.style.link_width);
    for link in &diagram.links {
        let from = &diagram.levels[link.from];
        let to = &diagram.levels[link.to];
        let (_, fx) = geom.level_span(from.position);
        let (tx, _) = geom.level_span(to.position);
        let points = vec![(fx, from.value), (tx, to.value)];
        let style = rgb(link.color).stroke_width(link_px);

        match link.style.dash_pattern() {
            None => {
                chart.draw_series(std::iter::once(PathElement::new(points, style)))?;
            }
            Some((dash, gap)) => {
                chart.draw_series(DashedLineSeries::new(points, dash, gap, style))?;
            }
        }
    }

    let level_px = px(cfg.style.level_width);
    for (g, group) in diagram.groups.iter().enumerate() {
        let style = rgb(group.color).mix(group.opacity).stroke_width(level_px);
        let segments: Vec<PathElement<(f64, f64)>> = diagram
            .levels_of(g)
            .map(|level| {
                let (a, b) = geom.level_span(level.position);
                PathElement::new(vec![(a, level.value), (b, level.value)], style)
            })
            .collect();
        if segments.is_empty() {
            continue;
        }

        let anno = chart.draw_series(segments)?;
        if layout.legend_pos != LegendPosition::Hidden {
            anno.label(group.label.plain())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], style));
        }
    }

    let stats = position_stats(diagram);

    for st in &stats {
        let Some(Some(thumb)) = thumbnails.get(st.position) else {
            continue;
        };
        let offset = layout.image_pos.get(st.position).copied().unwrap_or(0.0);
        let base = if offset < 0.0 { st.min } else { st.max };
        let (cx, cy) = chart.backend_coord(&(geom.center(st.position), base + offset));
        let corner = (cx - thumb.width as i32 / 2, cy - thumb.height as i32 / 2);
        let bitmap: Option<BitMapElement<(i32, i32)>> =
            BitMapElement::with_owned_buffer(corner, (thumb.width, thumb.height), thumb.rgb.clone());
        if let Some(bitmap) = bitmap {
            root.draw(&bitmap)?;
        }
    }

    if layout.draw_energy_boxes {
        let background = parse_color(&layout.energy_box_background)
            .map(rgb)
            .unwrap_or(WHITE);
        for st in &stats {
            draw_energy_box(&mut chart, st, &geom, cfg, background)?;
        }
    }

    if layout.draw_labels {
        for st in &stats {
            let Some(name) = layout.name_labels.get(st.position) else {
                continue;
            };
            chart.draw_series(std::iter::once(Text::new(
                name.clone(),
                (geom.center(st.position), st.min - layout.label_offset),
                (font, layout.label_text_size as f64)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            )))?;
        }
    }

    let legend_at = match layout.legend_pos {
        LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
        LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
        LegendPosition::Hidden => None,
    };
    if let Some(position) = legend_at {
        chart
            .configure_series_labels()
            .position(position)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((font, layout.legend_font_size as f64))
            .draw()?;
    }

    Ok(())
}

/// Box in the gap right of a position listing its energies, lowest at the bottom.
fn draw_energy_box<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    st: &PositionStats,
    geom: &Geometry,
    cfg: &DiagramConfig,
    background: RGBColor,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let layout = &cfg.layout;
    let font = layout.font_family.as_str();
    let offset = layout.energy_box_offset;

    // The reference position shows a single zero.
    let rows: Vec<(f64, RGBColor)> = if st.position == 0 {
        vec![(0.0, BLACK)]
    } else {
        st.values.iter().map(|(v, c)| (*v, rgb(*c))).collect()
    };

    let x = geom.box_center(st.position);
    let y = st.mean;
    let w = layout.energy_box_width;
    let h = rows.len() as f64 * offset + 0.5;
    let corners = [(x - w / 2.0, y - h / 2.0), (x + w / 2.0, y + h / 2.0)];

    chart.draw_series([
        Rectangle::new(corners, background.mix(0.8).filled()),
        Rectangle::new(corners, BLACK.stroke_width(1)),
    ])?;

    let n = rows.len();
    chart.draw_series(rows.into_iter().enumerate().map(|(j, (value, color))| {
        Text::new(
            format!("{value:.1}"),
            (x, box_row_y(y, j, n, offset)),
            (font, layout.energy_box_text_size as f64)
                .into_font()
                .style(FontStyle::Bold)
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;
    Ok(())
}
