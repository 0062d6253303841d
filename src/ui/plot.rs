use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, PlotUi, Points, Polygon};
use vgsales_dashboard::charts::{BarMark, ChartBody, ChartSpec, Series, Slice};

use crate::color::ColorMap;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Dashboard grid (central panel)
// ---------------------------------------------------------------------------

/// Lay out the five charts: bar on its own row, then line | area, scatter | pie.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dash = &state.dashboard;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart(ui, "bar_chart", &dash.bar, &state.platform_colors);
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                chart(&mut cols[0], "line_chart", &dash.line, &state.region_colors);
                chart(&mut cols[1], "area_chart", &dash.area, &state.region_colors);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                chart(&mut cols[0], "scatter_chart", &dash.scatter, &state.region_colors);
                chart(&mut cols[1], "pie_chart", &dash.pie, &state.region_colors);
            });
        });
}

/// Draw one chart spec with its title, or a placeholder when it is empty.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    if spec.is_empty() {
        ui.group(|ui: &mut Ui| {
            ui.set_min_height(CHART_HEIGHT - 12.0);
            ui.set_min_width(ui.available_width());
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new("No data for this selection").weak());
            });
        });
        return;
    }

    match &spec.body {
        ChartBody::Bar { bars } => bar_plot(ui, id, spec, bars, colors),
        ChartBody::Pie { slices } => pie_plot(ui, id, slices, colors),
        ChartBody::Line { series } | ChartBody::Area { series } | ChartBody::Scatter { series } => {
            Plot::new(id)
                .height(CHART_HEIGHT)
                .legend(Legend::default())
                .x_axis_label(spec.x_label.clone())
                .y_axis_label(spec.y_label.clone())
                .show(ui, |plot_ui| {
                    for s in series {
                        xy_series(plot_ui, &spec.body, s, colors);
                    }
                });
        }
    }
}

fn xy_series(plot_ui: &mut PlotUi, body: &ChartBody, series: &Series, colors: &ColorMap) {
    let points: PlotPoints = series.points.iter().copied().collect();
    let color = colors.color_for(&series.name);
    match body {
        ChartBody::Line { .. } => {
            plot_ui.line(Line::new(points).name(&series.name).color(color).width(2.0));
        }
        ChartBody::Area { .. } => {
            plot_ui.line(
                Line::new(points)
                    .name(&series.name)
                    .color(color)
                    .width(1.5)
                    .fill(0.0_f32),
            );
        }
        _ => {
            plot_ui.points(Points::new(points).name(&series.name).color(color).radius(3.0));
        }
    }
}

// ---------------------------------------------------------------------------
// Stacked bars
// ---------------------------------------------------------------------------

/// Category positions (first-appearance order) and the stacked segments.
fn stack_bars(marks: &[BarMark]) -> (Vec<String>, Vec<(usize, f64, f64)>) {
    let mut categories: Vec<String> = Vec::new();
    let mut heights: BTreeMap<usize, f64> = BTreeMap::new();
    let mut segments = Vec::with_capacity(marks.len());

    for mark in marks {
        let idx = match categories.iter().position(|c| *c == mark.category) {
            Some(i) => i,
            None => {
                categories.push(mark.category.clone());
                categories.len() - 1
            }
        };
        let base = heights.entry(idx).or_insert(0.0);
        segments.push((idx, *base, mark.value));
        *base += mark.value;
    }
    (categories, segments)
}

fn bar_plot(ui: &mut Ui, id: &str, spec: &ChartSpec, marks: &[BarMark], colors: &ColorMap) {
    let (categories, segments) = stack_bars(marks);

    let bars: Vec<Bar> = segments
        .iter()
        .map(|&(idx, base, value)| {
            Bar::new(idx as f64, value)
                .base_offset(base)
                .width(0.7)
                .fill(colors.color_for(&categories[idx]))
                .stroke(Stroke::new(0.5, Color32::from_gray(40)))
        })
        .collect();

    let labels = categories.clone();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Global_Sales"));
        });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Outline of each non-empty slice as a polygon around the origin, unit radius.
fn pie_wedges(slices: &[Slice]) -> Vec<(usize, Vec<[f64; 2]>)> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = TAU / 4.0;
    let mut wedges = Vec::new();
    for (i, slice) in slices.iter().enumerate() {
        let sweep = slice.value / total * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = ((sweep / TAU) * 128.0).ceil().max(2.0) as usize;
        let mut outline = vec![[0.0, 0.0]];
        for k in 0..=steps {
            let a = start - sweep * k as f64 / steps as f64;
            outline.push([a.cos(), a.sin()]);
        }
        wedges.push((i, outline));
        start -= sweep;
    }
    wedges
}

fn pie_plot(ui: &mut Ui, id: &str, slices: &[Slice], colors: &ColorMap) {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let wedges = pie_wedges(slices);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, outline) in wedges {
                let slice = &slices[i];
                let name = format!("{} ({:.1}%)", slice.label, slice.value / total * 100.0);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(outline))
                        .name(name)
                        .fill_color(colors.color_for(&slice.label))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(category: &str, value: f64) -> BarMark {
        BarMark {
            category: category.to_string(),
            value,
        }
    }

    #[test]
    fn bars_stack_per_category() {
        let (cats, segs) = stack_bars(&[mark("PS2", 1.0), mark("Wii", 2.0), mark("PS2", 0.5)]);
        assert_eq!(cats, ["PS2", "Wii"]);
        assert_eq!(segs, vec![(0, 0.0, 1.0), (1, 0.0, 2.0), (0, 1.0, 0.5)]);
    }

    #[test]
    fn zero_pie_has_no_wedges() {
        let slices = vec![
            Slice { label: "NA_Sales".to_string(), value: 0.0 },
            Slice { label: "EU_Sales".to_string(), value: 0.0 },
        ];
        assert!(pie_wedges(&slices).is_empty());
    }

    #[test]
    fn wedges_skip_zero_slices() {
        let slices = vec![
            Slice { label: "NA_Sales".to_string(), value: 3.0 },
            Slice { label: "EU_Sales".to_string(), value: 0.0 },
            Slice { label: "JP_Sales".to_string(), value: 1.0 },
        ];
        let wedges = pie_wedges(&slices);
        let indices: Vec<usize> = wedges.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
        for (_, outline) in &wedges {
            assert_eq!(outline[0], [0.0, 0.0]);
            let [x, y] = outline[1];
            assert!(((x * x + y * y) - 1.0).abs() < 1e-9);
        }
    }
}
