//! Chart layer: declarative chart specs and the pipeline that fills them.
//!
//! ```text
//!  FilterCriteria ──► filter ──► FilteredView ─┬──────────────► bar_chart
//!                                              ├──────────────► scatter_chart
//!                                              ├─ mean_by_year ► line_chart
//!                                              ├─ sum_by_year ─► area_chart
//!                                              └─ sum_by_region► pie_chart
//! ```
//!
//! Specs carry data and labels only. Drawing is left to the front end
//! (`egui_plot` in the native window, Plotly in the served page).

pub mod builders;

use serde::Serialize;

use crate::data::aggregate::{mean_by_year, sum_by_region, sum_by_year};
use crate::data::filter::{FilterCriteria, filter_with};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

/// The five chart types on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Scatter,
    Pie,
}

/// One bar segment. Segments sharing a category are stacked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarMark {
    pub category: String,
    pub value: f64,
}

/// A named run of `[x, y]` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Data bindings of a chart, tagged by chart type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartBody {
    Bar { bars: Vec<BarMark> },
    Line { series: Vec<Series> },
    Area { series: Vec<Series> },
    Scatter { series: Vec<Series> },
    Pie { slices: Vec<Slice> },
}

/// Declarative description of one chart: type, data bindings and labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    #[serde(flatten)]
    pub body: ChartBody,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.body {
            ChartBody::Bar { .. } => ChartKind::Bar,
            ChartBody::Line { .. } => ChartKind::Line,
            ChartBody::Area { .. } => ChartKind::Area,
            ChartBody::Scatter { .. } => ChartKind::Scatter,
            ChartBody::Pie { .. } => ChartKind::Pie,
        }
    }

    /// Whether there is nothing to draw. A pie whose slices are all zero counts as empty.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ChartBody::Bar { bars } => bars.is_empty(),
            ChartBody::Line { series }
            | ChartBody::Area { series }
            | ChartBody::Scatter { series } => series.iter().all(|s| s.points.is_empty()),
            ChartBody::Pie { slices } => slices.iter().all(|s| s.value == 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// All five charts for one selection. Always produced together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub bar: ChartSpec,
    pub line: ChartSpec,
    pub area: ChartSpec,
    pub scatter: ChartSpec,
    pub pie: ChartSpec,
    /// Number of records that passed the filter.
    pub matched: usize,
}

impl Dashboard {
    /// Filter `dataset` by `criteria` and build every chart from the result.
    pub fn build(dataset: &Dataset, criteria: &FilterCriteria) -> Self {
        let view = filter_with(dataset, criteria);
        log::debug!(
            "Filtered {} / {} rows for {:?} in {}..={}",
            view.len(),
            dataset.len(),
            criteria.genre,
            criteria.year_min,
            criteria.year_max
        );

        let genre = criteria.genre.as_str();
        Dashboard {
            bar: builders::bar_chart(&view, genre),
            line: builders::line_chart(&mean_by_year(&view), genre),
            area: builders::area_chart(&sum_by_year(&view), genre),
            scatter: builders::scatter_chart(&view, genre),
            pie: builders::pie_chart(&sum_by_region(&view), genre),
            matched: view.len(),
        }
    }

    /// The charts in display order.
    pub fn charts(&self) -> [&ChartSpec; 5] {
        [&self.bar, &self.line, &self.area, &self.scatter, &self.pie]
    }
}
