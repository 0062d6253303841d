//! The five chart builders. They only reshape data; numeric work happens in
//! [`crate::data::aggregate`].

use super::{BarMark, ChartBody, ChartSpec, Series, Slice};
use crate::data::aggregate::RegionTotals;
use crate::data::filter::FilteredView;
use crate::data::model::Region;

const GLOBAL_SALES: &str = "Global_Sales";

/// Global sales by platform, one stacked segment per title.
pub fn bar_chart(view: &FilteredView<'_>, genre: &str) -> ChartSpec {
    let bars = view
        .iter()
        .map(|rec| BarMark {
            category: rec.platform.clone(),
            value: rec.global_sales,
        })
        .collect();

    ChartSpec {
        title: format!("Global Sales by Platform for {genre}"),
        x_label: "Platform".to_string(),
        y_label: "Sales in millions".to_string(),
        legend_title: None,
        body: ChartBody::Bar { bars },
    }
}

/// Average global sales per year, from [`crate::data::aggregate::mean_by_year`].
pub fn line_chart(means: &[(i32, f64)], genre: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Average Global Sales Per Year for {genre}"),
        x_label: "Year".to_string(),
        y_label: "Average Sales in millions".to_string(),
        legend_title: None,
        body: ChartBody::Line {
            series: vec![year_series(means)],
        },
    }
}

/// Total global sales per year, from [`crate::data::aggregate::sum_by_year`].
pub fn area_chart(sums: &[(i32, f64)], genre: &str) -> ChartSpec {
    ChartSpec {
        title: format!("Total Global Sales Over Years for {genre}"),
        x_label: "Year".to_string(),
        y_label: "Total Sales in millions".to_string(),
        legend_title: None,
        body: ChartBody::Area {
            series: vec![year_series(sums)],
        },
    }
}

/// Regional sales against release year, one series per region column.
pub fn scatter_chart(view: &FilteredView<'_>, genre: &str) -> ChartSpec {
    let series = Region::ALL
        .iter()
        .map(|&region| Series {
            name: region.column().to_string(),
            points: view
                .iter()
                .filter_map(|rec| Some([rec.year? as f64, rec.sales(region)]))
                .collect(),
        })
        .collect();

    ChartSpec {
        title: format!("Sales Comparison by Region for {genre}"),
        x_label: "Year".to_string(),
        y_label: "Sales in millions".to_string(),
        legend_title: Some("Region".to_string()),
        body: ChartBody::Scatter { series },
    }
}

/// Share of each region in total sales.
pub fn pie_chart(totals: &RegionTotals, genre: &str) -> ChartSpec {
    let slices = totals
        .iter()
        .map(|(region, value)| Slice {
            label: region.column().to_string(),
            value,
        })
        .collect();

    ChartSpec {
        title: format!("Sales Distribution by Region for {genre}"),
        x_label: String::new(),
        y_label: "Sales in millions".to_string(),
        legend_title: None,
        body: ChartBody::Pie { slices },
    }
}

fn year_series(rows: &[(i32, f64)]) -> Series {
    Series {
        name: GLOBAL_SALES.to_string(),
        points: rows.iter().map(|&(year, v)| [year as f64, v]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::data::aggregate::sum_by_region;
    use crate::data::filter::filter;
    use crate::data::model::tests::scenario_dataset;

    #[test]
    fn bar_has_one_segment_per_record() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Action", 2000, 2020);
        let spec = bar_chart(&view, "Action");
        assert_eq!(spec.title, "Global Sales by Platform for Action");
        assert_eq!(
            spec.body,
            ChartBody::Bar {
                bars: vec![
                    BarMark { category: "PS2".to_string(), value: 1.0 },
                    BarMark { category: "X360".to_string(), value: 2.0 },
                ],
            }
        );
    }

    #[test]
    fn scatter_has_four_region_series() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Action", 2000, 2020);
        let spec = scatter_chart(&view, "Action");
        assert_eq!(spec.legend_title.as_deref(), Some("Region"));
        let ChartBody::Scatter { series } = &spec.body else {
            panic!("expected scatter body");
        };
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["NA_Sales", "EU_Sales", "JP_Sales", "Other_Sales"]);
        assert_eq!(series[0].points, vec![[2005.0, 0.6], [2010.0, 1.2]]);
    }

    #[test]
    fn empty_inputs_give_valid_specs() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Sports", 2000, 2020);
        let specs = [
            bar_chart(&view, "Sports"),
            line_chart(&[], "Sports"),
            area_chart(&[], "Sports"),
            scatter_chart(&view, "Sports"),
            pie_chart(&sum_by_region(&view), "Sports"),
        ];
        for spec in &specs {
            assert!(spec.is_empty(), "{:?} should be empty", spec.kind());
            assert!(spec.title.ends_with("for Sports"));
        }
        let ChartBody::Pie { slices } = &specs[4].body else {
            panic!("expected pie body");
        };
        assert_eq!(slices.len(), 4);
        assert_eq!(specs[4].kind(), ChartKind::Pie);
    }

    #[test]
    fn line_and_area_titles() {
        let rows = [(2005, 1.5), (2006, 2.5)];
        let line = line_chart(&rows, "Puzzle");
        let area = area_chart(&rows, "Puzzle");
        assert_eq!(line.title, "Average Global Sales Per Year for Puzzle");
        assert_eq!(line.y_label, "Average Sales in millions");
        assert_eq!(area.title, "Total Global Sales Over Years for Puzzle");
        assert_eq!(area.y_label, "Total Sales in millions");
    }
}
