use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Record table (bottom panel)
// ---------------------------------------------------------------------------

/// List the records behind the current charts.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.dataset.records();
    let text_height = 18.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(48.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(64.0))
        .column(Column::auto().at_least(48.0))
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(64.0), 5)
        .header(20.0, |mut header| {
            for title in [
                "Rank", "Name", "Platform", "Year", "Publisher", "NA", "EU", "JP", "Other", "Global",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(text_height, state.visible_indices.len(), |mut row| {
                let rec = &records[state.visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(rec.rank.map(|r| r.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(rec.name.as_deref().unwrap_or("–"));
                });
                row.col(|ui| {
                    ui.label(&rec.platform);
                });
                row.col(|ui| {
                    ui.label(rec.year.map(|y| y.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(rec.publisher.as_deref().unwrap_or("–"));
                });
                for value in [
                    rec.na_sales,
                    rec.eu_sales,
                    rec.jp_sales,
                    rec.other_sales,
                    rec.global_sales,
                ] {
                    row.col(|ui| {
                        ui.label(format!("{value:.2}"));
                    });
                }
            });
        });
}
