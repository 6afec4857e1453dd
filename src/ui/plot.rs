use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Corner, Legend, Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::chart::figure::{Dash, FontSizes, Layer, Panel};
use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Figure model → egui_plot primitives
// ---------------------------------------------------------------------------

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// egui_plot has no dash-dot pattern; short dashes stand in for it.
pub fn line_style(dash: Dash) -> LineStyle {
    match dash {
        Dash::Solid => LineStyle::Solid,
        Dash::Dashed => LineStyle::Dashed { length: 10.0 },
        Dash::DashDot => LineStyle::Dashed { length: 4.0 },
        Dash::Dotted => LineStyle::Dotted { spacing: 5.0 },
    }
}

// ---------------------------------------------------------------------------
// One panel of the figure
// ---------------------------------------------------------------------------

/// Render a single panel as a fixed (non-interactive) plot of `height` points.
pub fn panel_plot(ui: &mut Ui, id: &str, panel: &Panel, fonts: &FontSizes, height: f32) {
    if let Some(title) = &panel.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).size(fonts.title).strong());
        });
    }

    let (x_min, x_max) = panel.x_range.drawable(0.5);
    let (y_min, y_max) = panel.y_range.drawable(0.5);

    let mut plot = Plot::new(id)
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .y_axis_label(RichText::new(&panel.y_label).size(fonts.label))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false);
    if let Some(label) = &panel.x_label {
        plot = plot.x_axis_label(RichText::new(label).size(fonts.label));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
        for layer in panel.layers_by_priority() {
            match layer {
                Layer::Curve(curve) => {
                    let points: PlotPoints = curve.points.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .name(&curve.name)
                            .color(color32(curve.style.color))
                            .style(line_style(curve.style.dash))
                            .width(curve.style.width),
                    );
                }
                Layer::Markers(markers) => {
                    let points: PlotPoints = markers.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&markers.name)
                            .color(color32(markers.color))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(markers.radius),
                    );
                }
            }
        }
    });
}
