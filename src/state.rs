use vgsales_dashboard::{Dashboard, Dataset, FilterCriteria, Region};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Table loaded at startup, never modified.
    pub dataset: Dataset,

    /// Current genre and year range.
    pub criteria: FilterCriteria,

    /// Charts for `criteria`, rebuilt together on every change.
    pub dashboard: Dashboard,

    /// Indices of records passing the current filter (for the record table).
    pub visible_indices: Vec<usize>,

    /// One colour per platform, stable across selections.
    pub platform_colors: ColorMap,

    /// One colour per region column.
    pub region_colors: ColorMap,

    /// Whether the record table is shown.
    pub show_table: bool,
}

impl AppState {
    /// Start with the default selection over the whole year range.
    pub fn new(dataset: Dataset) -> Self {
        let criteria = FilterCriteria::full_range(&dataset);
        let dashboard = Dashboard::build(&dataset, &criteria);
        let platform_colors =
            ColorMap::new(dataset.records().iter().map(|r| r.platform.as_str()));
        let region_colors = ColorMap::new(Region::ALL.iter().map(|r| r.column()));

        let mut state = Self {
            dataset,
            criteria,
            dashboard,
            visible_indices: Vec::new(),
            platform_colors,
            region_colors,
            show_table: false,
        };
        state.refresh_visible();
        state
    }

    /// `(min, max)` the year controls may take.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.dataset.year_bounds().unwrap_or((0, 0))
    }

    /// Rebuild all five charts from the current criteria.
    pub fn refresh(&mut self) {
        self.dashboard = Dashboard::build(&self.dataset, &self.criteria);
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible_indices = self
            .dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| self.criteria.matches(r))
            .map(|(i, _)| i)
            .collect();
    }

    pub fn set_genre(&mut self, genre: &str) {
        if self.criteria.genre != genre {
            self.criteria.genre = genre.to_string();
            self.refresh();
        }
    }

    /// Move the lower handle. Pushes the upper handle along so that `min <= max`.
    pub fn set_year_min(&mut self, year: i32) {
        let (lo, hi) = self.year_bounds();
        let year = year.clamp(lo, hi);
        self.criteria.year_min = year;
        if self.criteria.year_max < year {
            self.criteria.year_max = year;
        }
        self.refresh();
    }

    /// Move the upper handle. Pushes the lower handle along so that `min <= max`.
    pub fn set_year_max(&mut self, year: i32) {
        let (lo, hi) = self.year_bounds();
        let year = year.clamp(lo, hi);
        self.criteria.year_max = year;
        if self.criteria.year_min > year {
            self.criteria.year_min = year;
        }
        self.refresh();
    }

    /// Back to the initial selection.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::full_range(&self.dataset);
        self.refresh();
    }
}
