use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Region – the four regional sales columns
// ---------------------------------------------------------------------------

/// Sales regions, in source column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    NA,
    EU,
    JP,
    Other,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::NA, Region::EU, Region::JP, Region::Other];

    /// Name of the source column holding this region's sales.
    pub fn column(self) -> &'static str {
        match self {
            Region::NA => "NA_Sales",
            Region::EU => "EU_Sales",
            Region::JP => "JP_Sales",
            Region::Other => "Other_Sales",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the sales table
// ---------------------------------------------------------------------------

/// A single row of the sales table. Sales figures are in millions of units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Rank", default)]
    pub rank: Option<u32>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Platform")]
    pub platform: String,
    /// `None` when the source has `N/A`, an empty cell, or null.
    #[serde(rename = "Year", deserialize_with = "deserialize_year", default)]
    pub year: Option<i32>,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Publisher", default)]
    pub publisher: Option<String>,
    #[serde(rename = "NA_Sales")]
    pub na_sales: f64,
    #[serde(rename = "EU_Sales")]
    pub eu_sales: f64,
    #[serde(rename = "JP_Sales")]
    pub jp_sales: f64,
    #[serde(rename = "Other_Sales")]
    pub other_sales: f64,
    #[serde(rename = "Global_Sales")]
    pub global_sales: f64,
}

impl Record {
    /// Regional sales figure for `region`.
    pub fn sales(&self, region: Region) -> f64 {
        match region {
            Region::NA => self.na_sales,
            Region::EU => self.eu_sales,
            Region::JP => self.jp_sales,
            Region::Other => self.other_sales,
        }
    }
}

/// Accepts integers, whole floats (`2006.0`, as written by pandas when the
/// column holds NaN), numeric strings, and treats `N/A`, empty and null as missing.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = Option<i32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a year, `N/A`, or nothing")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            i32::try_from(v)
                .map(Some)
                .map_err(|_| E::custom(format!("year {v} out of range")))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i32::try_from(v)
                .map(Some)
                .map_err(|_| E::custom(format!("year {v} out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            year_from_f64(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse_year(v).map_err(E::custom)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(YearVisitor)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// Parse a textual year cell. Missing markers yield `Ok(None)`.
pub fn parse_year(s: &str) -> Result<Option<i32>, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(y) = s.parse::<i32>() {
        return Ok(Some(y));
    }
    match s.parse::<f64>() {
        Ok(f) => year_from_f64(f),
        Err(_) => Err(format!("'{s}' is not a year")),
    }
}

/// Convert a float year cell. `NaN` is a missing year; anything that is not a
/// whole number inside the `i32` range is rejected.
pub fn year_from_f64(v: f64) -> Result<Option<i32>, String> {
    if v.is_nan() {
        return Ok(None);
    }
    if v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 {
        return Err(format!("year {v} is not a whole number in range"));
    }
    Ok(Some(v as i32))
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table with the indices the controls need. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct genres in first-appearance order.
    genres: Vec<String>,
    /// Sorted distinct years present in the table.
    years: Vec<i32>,
}

impl Dataset {
    /// Build the genre and year indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut genres = Vec::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();

        for rec in &records {
            if seen.insert(rec.genre.as_str()) {
                genres.push(rec.genre.clone());
            }
            if let Some(y) = rec.year {
                years.insert(y);
            }
        }

        Dataset {
            genres,
            years: years.into_iter().collect(),
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// `(min, max)` over all present years, `None` when no row has a year.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand for building test rows.
    pub(crate) fn record(genre: &str, year: Option<i32>, platform: &str, sales: [f64; 5]) -> Record {
        let [global, na, eu, jp, other] = sales;
        Record {
            rank: None,
            name: None,
            platform: platform.to_string(),
            year,
            genre: genre.to_string(),
            publisher: None,
            na_sales: na,
            eu_sales: eu,
            jp_sales: jp,
            other_sales: other,
            global_sales: global,
        }
    }

    /// The two-row table used throughout the scenario tests.
    pub(crate) fn scenario_dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Action", Some(2005), "PS2", [1.0, 0.6, 0.2, 0.1, 0.1]),
            record("Action", Some(2010), "X360", [2.0, 1.2, 0.5, 0.2, 0.1]),
        ])
    }

    #[test]
    fn genres_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            record("Sports", Some(2006), "Wii", [1.0; 5]),
            record("Action", Some(2001), "PS2", [1.0; 5]),
            record("Sports", Some(2008), "Wii", [1.0; 5]),
            record("Puzzle", None, "GB", [1.0; 5]),
        ]);
        assert_eq!(ds.genres(), ["Sports", "Action", "Puzzle"]);
    }

    #[test]
    fn year_bounds_ignore_missing_years() {
        let ds = Dataset::from_records(vec![
            record("Sports", Some(2006), "Wii", [1.0; 5]),
            record("Sports", None, "Wii", [1.0; 5]),
            record("Sports", Some(1985), "NES", [1.0; 5]),
        ]);
        assert_eq!(ds.year_bounds(), Some((1985, 2006)));
        assert_eq!(ds.years(), [1985, 2006]);
    }

    #[test]
    fn year_bounds_absent_without_years() {
        let ds = Dataset::from_records(vec![record("Sports", None, "Wii", [1.0; 5])]);
        assert_eq!(ds.year_bounds(), None);
        assert!(Dataset::from_records(Vec::new()).year_bounds().is_none());
    }

    #[test]
    fn parse_year_handles_missing_markers() {
        assert_eq!(parse_year("N/A"), Ok(None));
        assert_eq!(parse_year(""), Ok(None));
        assert_eq!(parse_year("2006"), Ok(Some(2006)));
        assert_eq!(parse_year("2006.0"), Ok(Some(2006)));
        assert!(parse_year("soon").is_err());
    }

    #[test]
    fn out_of_range_or_fractional_years_are_rejected() {
        assert!(parse_year("1e12").is_err());
        assert!(parse_year("2006.5").is_err());
        assert!(parse_year("inf").is_err());
        assert_eq!(year_from_f64(f64::NAN), Ok(None));
        assert_eq!(year_from_f64(1999.0), Ok(Some(1999)));
        assert!(year_from_f64(-3.0e10).is_err());
    }

    #[test]
    fn record_sales_by_region() {
        let r = record("Action", Some(2005), "PS2", [1.0, 0.6, 0.2, 0.1, 0.05]);
        assert_eq!(r.sales(Region::NA), 0.6);
        assert_eq!(r.sales(Region::EU), 0.2);
        assert_eq!(r.sales(Region::JP), 0.1);
        assert_eq!(r.sales(Region::Other), 0.05);
        assert_eq!(Region::Other.column(), "Other_Sales");
    }
}
