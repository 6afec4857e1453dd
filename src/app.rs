use eframe::egui::{self, FontId, TextStyle};

use crate::chart::figure::{Figure, FontSizes};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Read-only window around a finished figure.
pub struct ComparisonApp {
    figure: Figure,
}

impl ComparisonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        apply_font_sizes(&cc.egui_ctx, &figure.fonts);
        Self { figure }
    }
}

impl eframe::App for ComparisonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::figure_panels(ui, &self.figure);
        });
    }
}

/// Enlarge legend, tick and heading text to the figure's sizes.
fn apply_font_sizes(ctx: &egui::Context, fonts: &FontSizes) {
    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(TextStyle::Heading, FontId::proportional(fonts.title));
        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(fonts.legend));
        style
            .text_styles
            .insert(TextStyle::Small, FontId::proportional(fonts.tick));
    });
}

/// Open a native window showing `figure`; returns when the window closes.
pub fn show(figure: Figure) -> anyhow::Result<()> {
    let (width, height) = figure.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Approximation comparison",
        options,
        Box::new(|cc| Ok(Box::new(ComparisonApp::new(cc, figure)))),
    )
    .map_err(|e| anyhow::anyhow!("display window failed: {e}"))
}
