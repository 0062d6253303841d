use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::Region;

// ---------------------------------------------------------------------------
// Per-year reducers
// ---------------------------------------------------------------------------

/// Global sales summed per year, ascending by year.
pub fn sum_by_year(view: &FilteredView<'_>) -> Vec<(i32, f64)> {
    group_by_year(view)
        .into_iter()
        .map(|(year, (total, _))| (year, total))
        .collect()
}

/// Mean global sales per title, per year, ascending by year.
pub fn mean_by_year(view: &FilteredView<'_>) -> Vec<(i32, f64)> {
    group_by_year(view)
        .into_iter()
        .map(|(year, (total, count))| (year, total / count as f64))
        .collect()
}

/// year → (sum of Global_Sales, row count). Rows without a year are skipped;
/// a filtered view never holds any.
fn group_by_year(view: &FilteredView<'_>) -> BTreeMap<i32, (f64, usize)> {
    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for rec in view.iter() {
        let Some(year) = rec.year else {
            continue;
        };
        let entry = groups.entry(year).or_insert((0.0, 0));
        entry.0 += rec.global_sales;
        entry.1 += 1;
    }
    groups
}

// ---------------------------------------------------------------------------
// Regional totals
// ---------------------------------------------------------------------------

/// Total sales for each of the four regions. Every region is always present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionTotals([f64; 4]);

impl RegionTotals {
    pub fn get(&self, region: Region) -> f64 {
        self.0[region.index()]
    }

    /// `(region, total)` pairs in region order.
    pub fn iter(&self) -> impl Iterator<Item = (Region, f64)> + '_ {
        Region::ALL.iter().map(|&r| (r, self.get(r)))
    }
}

/// Sum each regional column across the view.
pub fn sum_by_region(view: &FilteredView<'_>) -> RegionTotals {
    let mut totals = [0.0; 4];
    for rec in view.iter() {
        for region in Region::ALL {
            totals[region.index()] += rec.sales(region);
        }
    }
    RegionTotals(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::Dataset;
    use crate::data::model::tests::{record, scenario_dataset};
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scenario_sums() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Action", 2005, 2005);
        assert_eq!(sum_by_year(&view), vec![(2005, 1.0)]);

        let regions = sum_by_region(&view);
        assert!(close(regions.get(Region::NA), 0.6));
        assert!(close(regions.get(Region::EU), 0.2));
        assert!(close(regions.get(Region::JP), 0.1));
        assert!(close(regions.get(Region::Other), 0.1));
    }

    #[test]
    fn empty_view_yields_empty_and_zero() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Sports", 2000, 2020);
        assert!(sum_by_year(&view).is_empty());
        assert!(mean_by_year(&view).is_empty());
        let regions = sum_by_region(&view);
        assert_eq!(regions, RegionTotals::default());
        let pairs: Vec<(Region, f64)> = regions.iter().collect();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn groups_are_sorted_by_year() {
        let ds = Dataset::from_records(vec![
            record("Action", Some(2010), "X360", [2.0, 0.0, 0.0, 0.0, 0.0]),
            record("Action", Some(2005), "PS2", [1.0, 0.0, 0.0, 0.0, 0.0]),
            record("Action", Some(2010), "PS3", [4.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let view = filter(&ds, "Action", 2000, 2020);
        assert_eq!(sum_by_year(&view), vec![(2005, 1.0), (2010, 6.0)]);
        assert_eq!(mean_by_year(&view), vec![(2005, 1.0), (2010, 3.0)]);
    }

    #[test]
    fn region_total_matches_sum_of_regions() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Action", 2000, 2020);
        let regions = sum_by_region(&view);
        let total: f64 = regions.iter().map(|(_, v)| v).sum();
        assert!(close(total, 1.8 + 0.7 + 0.3 + 0.2));
    }

    proptest! {
        #[test]
        fn region_sums_match_reference(
            rows in prop::collection::vec((0.0..5.0f64, 0.0..5.0f64, 0.0..5.0f64, 0.0..5.0f64), 0..40)
        ) {
            let ds = Dataset::from_records(
                rows.iter()
                    .map(|&(na, eu, jp, other)| {
                        record("Action", Some(2000), "PS2", [na + eu + jp + other, na, eu, jp, other])
                    })
                    .collect(),
            );
            let view = filter(&ds, "Action", 2000, 2000);
            let totals = sum_by_region(&view);

            let reference: [f64; 4] = rows.iter().fold([0.0; 4], |acc, &(na, eu, jp, other)| {
                [acc[0] + na, acc[1] + eu, acc[2] + jp, acc[3] + other]
            });
            for region in Region::ALL {
                prop_assert!(close(totals.get(region), reference[region.index()]));
            }
        }

        #[test]
        fn mean_times_count_is_sum(
            rows in prop::collection::vec((2000..2004i32, 0.0..5.0f64), 1..40)
        ) {
            let ds = Dataset::from_records(
                rows.iter()
                    .map(|&(y, g)| record("Action", Some(y), "PS2", [g, 0.0, 0.0, 0.0, 0.0]))
                    .collect(),
            );
            let view = filter(&ds, "Action", 2000, 2003);
            let sums = sum_by_year(&view);
            let means = mean_by_year(&view);
            prop_assert_eq!(sums.len(), means.len());
            for ((ys, total), (ym, mean)) in sums.iter().zip(means.iter()) {
                prop_assert_eq!(ys, ym);
                let count = rows.iter().filter(|(y, _)| y == ys).count() as f64;
                prop_assert!((mean * count - total).abs() < 1e-6);
            }
        }
    }
}
