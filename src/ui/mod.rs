//! egui widgets: control panels, chart rendering and the record table.

pub mod panels;
pub mod plot;
pub mod table;
