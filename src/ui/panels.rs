use eframe::egui::Ui;

use crate::chart::figure::Figure;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Figure layout – panels stacked top to bottom
// ---------------------------------------------------------------------------

/// Render every panel of `figure`, splitting the available height evenly.
pub fn figure_panels(ui: &mut Ui, figure: &Figure) {
    if figure.panels.is_empty() {
        return;
    }

    let spacing = ui.spacing().item_spacing.y;
    let titles = figure.panels.iter().filter(|p| p.title.is_some()).count() as f32;
    let reserved = titles * (figure.fonts.title * 1.5) + spacing * figure.panels.len() as f32;
    let height = ((ui.available_height() - reserved) / figure.panels.len() as f32).max(80.0);

    for (i, panel) in figure.panels.iter().enumerate() {
        plot::panel_plot(ui, &format!("panel_{i}"), panel, &figure.fonts, height);
    }
}
