use serde::Serialize;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter criteria: the genre and year range picked in the controls
// ---------------------------------------------------------------------------

/// Genre preselected by the controls when the dataset has it.
pub const DEFAULT_GENRE: &str = "Action";

/// One selection made in the controls. Both year bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub genre: String,
    pub year_min: i32,
    pub year_max: i32,
}

impl FilterCriteria {
    pub fn new(genre: impl Into<String>, year_min: i32, year_max: i32) -> Self {
        Self {
            genre: genre.into(),
            year_min,
            year_max,
        }
    }

    /// The initial selection: [`DEFAULT_GENRE`] (or the first genre) over every year.
    pub fn full_range(dataset: &Dataset) -> Self {
        let genre = dataset
            .genres()
            .iter()
            .find(|g| g.as_str() == DEFAULT_GENRE)
            .or_else(|| dataset.genres().first())
            .cloned()
            .unwrap_or_default();
        let (year_min, year_max) = dataset.year_bounds().unwrap_or((0, 0));
        Self::new(genre, year_min, year_max)
    }

    /// Whether `record` passes both predicates. A record without a year never does.
    pub fn matches(&self, record: &Record) -> bool {
        selected(record, &self.genre, self.year_min, self.year_max)
    }
}

// ---------------------------------------------------------------------------
// Filtered view: borrowed rows of the dataset
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] that passed a filter, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return the records of `genre` whose year lies in `year_min..=year_max`.
///
/// Never fails: an unknown genre or an inverted range gives an empty view.
pub fn filter<'a>(dataset: &'a Dataset, genre: &str, year_min: i32, year_max: i32) -> FilteredView<'a> {
    let rows = dataset
        .records()
        .iter()
        .filter(|r| selected(r, genre, year_min, year_max))
        .collect();
    FilteredView { rows }
}

fn selected(record: &Record, genre: &str, year_min: i32, year_max: i32) -> bool {
    record.genre == genre && record.year.is_some_and(|y| year_min <= y && y <= year_max)
}

/// [`filter`] driven by a [`FilterCriteria`].
pub fn filter_with<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    filter(dataset, &criteria.genre, criteria.year_min, criteria.year_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, scenario_dataset};
    use proptest::prelude::*;

    #[test]
    fn scenario_single_year() {
        let ds = scenario_dataset();
        let view = filter(&ds, "Action", 2005, 2005);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0], &ds.records()[0]);
    }

    #[test]
    fn absent_genre_is_empty() {
        let ds = scenario_dataset();
        assert!(filter(&ds, "Sports", 2000, 2020).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = scenario_dataset();
        assert!(filter(&ds, "Action", 2010, 2005).is_empty());
    }

    #[test]
    fn missing_year_never_matches() {
        let ds = Dataset::from_records(vec![
            record("Action", None, "PS2", [1.0; 5]),
            record("Action", Some(2000), "PS2", [1.0; 5]),
        ]);
        let view = filter(&ds, "Action", i32::MIN, i32::MAX);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].year, Some(2000));
    }

    #[test]
    fn full_range_prefers_action() {
        let ds = Dataset::from_records(vec![
            record("Sports", Some(1990), "Wii", [1.0; 5]),
            record("Action", Some(2012), "PS3", [1.0; 5]),
        ]);
        assert_eq!(FilterCriteria::full_range(&ds), FilterCriteria::new("Action", 1990, 2012));
    }

    #[test]
    fn full_range_falls_back_to_first_genre() {
        let ds = Dataset::from_records(vec![
            record("Sports", Some(1990), "Wii", [1.0; 5]),
            record("Puzzle", Some(1995), "GB", [1.0; 5]),
        ]);
        assert_eq!(FilterCriteria::full_range(&ds).genre, "Sports");
    }

    #[test]
    fn criteria_match_agrees_with_filter() {
        let ds = scenario_dataset();
        let criteria = FilterCriteria::new("Action", 2006, 2010);
        let view = filter_with(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert!(view.iter().all(|r| criteria.matches(r)));
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let genre = prop::sample::select(vec!["Action", "Sports", "Puzzle"]);
        let year = prop::option::weighted(0.9, 1980..2020i32);
        prop::collection::vec((genre, year, 0.0..10.0f64), 0..60).prop_map(|rows| {
            Dataset::from_records(
                rows.into_iter()
                    .map(|(g, y, s)| record(g, y, "PS2", [s, s / 2.0, s / 4.0, s / 8.0, s / 8.0]))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn filtered_rows_satisfy_both_predicates(
            ds in arb_dataset(),
            genre in prop::sample::select(vec!["Action", "Sports", "Racing"]),
            a in 1975..2025i32,
            b in 1975..2025i32,
        ) {
            let view = filter(&ds, genre, a, b);
            for r in view.iter() {
                prop_assert_eq!(r.genre.as_str(), genre);
                let y = r.year.unwrap();
                prop_assert!(a <= y && y <= b);
            }
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.genre == genre && r.year.is_some_and(|y| a <= y && y <= b))
                .count();
            prop_assert_eq!(view.len(), expected);
        }

        #[test]
        fn filter_is_idempotent_and_order_preserving(
            ds in arb_dataset(),
            a in 1975..2025i32,
            b in 1975..2025i32,
        ) {
            let first = filter(&ds, "Action", a, b);
            let second = filter(&ds, "Action", a, b);
            prop_assert_eq!(&first, &second);

            let positions: Vec<usize> = first
                .iter()
                .map(|r| {
                    ds.records()
                        .iter()
                        .position(|d| std::ptr::eq(d, r))
                        .unwrap()
                })
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
