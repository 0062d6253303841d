use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the genre selector and the year-range handles.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Genre ----
    ui.label(RichText::new("Select Genre:").size(16.0));
    let mut genre = state.criteria.genre.clone();
    egui::ComboBox::from_id_salt("genre")
        .selected_text(&genre)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for g in state.dataset.genres() {
                ui.selectable_value(&mut genre, g.clone(), g);
            }
        });
    if genre != state.criteria.genre {
        state.set_genre(&genre);
    }

    ui.add_space(12.0);

    // ---- Year range ----
    ui.label(RichText::new("Select Year Range:").size(16.0));
    if state.dataset.year_bounds().is_none() {
        ui.label("No row has a release year.");
        return;
    }
    let (lo, hi) = state.year_bounds();

    let mut from = state.criteria.year_min;
    if ui
        .add(egui::Slider::new(&mut from, lo..=hi).step_by(1.0).text("From"))
        .changed()
    {
        state.set_year_min(from);
    }

    let mut to = state.criteria.year_max;
    if ui
        .add(egui::Slider::new(&mut to, lo..=hi).step_by(1.0).text("To"))
        .changed()
    {
        state.set_year_max(to);
    }

    ui.label(
        RichText::new(format!("{} release years on record", state.dataset.years().len())).weak(),
    );

    ui.add_space(12.0);
    if ui.button("Reset").clicked() {
        state.reset();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and selection summary.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("Video Game Sales Analysis Dashboard")
                .color(egui::Color32::from_rgb(60, 110, 230))
                .size(24.0),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} titles loaded, {} match {} in {}–{}",
            state.dataset.len(),
            state.dashboard.matched,
            state.criteria.genre,
            state.criteria.year_min,
            state.criteria.year_max
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Show records")
            .clicked()
        {
            state.show_table = !state.show_table;
        }
    });
}
