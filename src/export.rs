use std::fmt::Display;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::chart::figure::{Dash, Figure, FontSizes, Layer, Panel};
use crate::color::Rgb;
use crate::error::{CompareError, Result};

const FONT: &str = "sans-serif";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write `figure` to an image file.  Dispatch by extension.
///
/// Supported formats:
/// * `.png` – bitmap at the figure's pixel size
/// * `.svg` – vector
pub fn export(figure: &Figure, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" => {
            let root = BitMapBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(export_err)
        }
        "svg" => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(export_err)
        }
        other => Err(CompareError::Export(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

fn export_err<E: Display>(e: E) -> CompareError {
    CompareError::Export(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()> {
    root.fill(&WHITE).map_err(export_err)?;
    let areas = root.split_evenly((figure.panels.len(), 1));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, panel, &figure.fonts)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    fonts: &FontSizes,
) -> Result<()> {
    let (x_min, x_max) = panel.x_range.drawable(0.5);
    let (y_min, y_max) = panel.y_range.drawable(0.5);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(if panel.x_label.is_some() { 55 } else { 30 })
        .y_label_area_size(90);
    if let Some(title) = &panel.title {
        builder.caption(title, (FONT, fonts.title as f64));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(export_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.y_desc(panel.y_label.as_str())
        .label_style((FONT, fonts.tick as f64))
        .axis_desc_style((FONT, fonts.label as f64));
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    mesh.draw().map_err(export_err)?;

    for layer in panel.layers_by_priority() {
        match layer {
            Layer::Curve(curve) => {
                let style = ShapeStyle::from(&rgb(curve.style.color))
                    .stroke_width(curve.style.width.round().max(1.0) as u32);
                let points = curve.points.iter().map(|p| (p[0], p[1]));
                let anno = match curve.style.dash {
                    Dash::Solid => chart.draw_series(LineSeries::new(points, style)),
                    Dash::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, style)),
                    Dash::DashDot => chart.draw_series(DashedLineSeries::new(points, 6, 4, style)),
                    Dash::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, style)),
                }
                .map_err(export_err)?;
                anno.label(curve.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
            Layer::Markers(markers) => {
                let fill = rgb(markers.color).filled();
                let radius = markers.radius.round().max(1.0) as u32;
                chart
                    .draw_series(
                        markers
                            .points
                            .iter()
                            .map(|p| Circle::new((p[0], p[1]), radius, fill)),
                    )
                    .map_err(export_err)?
                    .label(markers.name.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), radius, fill));
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, fonts.legend as f64))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(export_err)?;
    Ok(())
}
