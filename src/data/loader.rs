use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
    UInt32Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use thiserror::Error;

use super::model::{Dataset, Record, year_from_f64};

/// File the dashboard loads at startup.
pub const DEFAULT_DATASET_PATH: &str = "vgsales.csv";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Genre",
    "Year",
    "Platform",
    "Global_Sales",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
];

/// Structural problems with an input table.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },
    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, `Year` may be `N/A` or empty
/// * `.json`    – `[{ "Genre": ..., "Year": 2006, ... }, ...]`
/// * `.parquet` – one column per field, nullable `Year`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_json(std::io::BufReader::new(file))?
        }
        "parquet" | "pq" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_parquet(file)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    let missing_years = dataset.records().iter().filter(|r| r.year.is_none()).count();
    if missing_years > 0 {
        log::warn!("{missing_years} rows have no year and never match a year range");
    }
    match dataset.year_bounds() {
        Some((min, max)) => log::info!(
            "Loaded {} rows from {} ({} genres, years {min}-{max})",
            dataset.len(),
            path.display(),
            dataset.genres().len()
        ),
        None => log::warn!(
            "Loaded {} rows from {} but none has a year",
            dataset.len(),
            path.display()
        ),
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Extra columns are ignored.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn(required.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Name": "Wii Sports", "Platform": "Wii", "Year": 2006, "Genre": "Sports",
///     "NA_Sales": 41.49, "EU_Sales": 29.02, "JP_Sales": 3.77,
///     "Other_Sales": 8.46, "Global_Sales": 82.74 },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(input: R) -> Result<Dataset> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(input).context("parsing JSON")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        for required in REQUIRED_COLUMNS {
            // A null year is allowed, an absent one is not.
            if !row.contains_key(required) {
                return Err(SchemaError::MissingColumn(required.to_string()))
                    .with_context(|| format!("JSON row {i}"));
            }
        }
        let record: Record = serde_json::from_value(serde_json::Value::Object(row))
            .with_context(|| format!("JSON row {i}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by pandas (`df.to_parquet()`) or Polars.
///
/// Strings may be Utf8 or LargeUtf8, sales Float64 or Float32, and the year
/// any integer or float column (nulls and NaN mean "no year").
pub fn read_parquet<R: ChunkReader + 'static>(input: R) -> Result<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let genre = column(&batch, "Genre")?;
        let year_col = column(&batch, "Year")?;
        let platform = column(&batch, "Platform")?;
        let global = column(&batch, "Global_Sales")?;
        let na = column(&batch, "NA_Sales")?;
        let eu = column(&batch, "EU_Sales")?;
        let jp = column(&batch, "JP_Sales")?;
        let other = column(&batch, "Other_Sales")?;
        let rank = optional_column(&batch, "Rank");
        let name = optional_column(&batch, "Name");
        let publisher = optional_column(&batch, "Publisher");

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let abs = offset + row;
            let year = match number_at(year_col, row, "Year")? {
                Some(y) => year_from_f64(y)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Row {abs}"))?,
                None => None,
            };
            records.push(Record {
                rank: match rank {
                    Some(col) => rank_at(col, row, abs)?,
                    None => None,
                },
                name: match name {
                    Some(col) => string_at(col, row, "Name")?,
                    None => None,
                },
                platform: required_string(platform, row, abs, "Platform")?,
                year,
                genre: required_string(genre, row, abs, "Genre")?,
                publisher: match publisher {
                    Some(col) => string_at(col, row, "Publisher")?,
                    None => None,
                },
                na_sales: required_number(na, row, abs, "NA_Sales")?,
                eu_sales: required_number(eu, row, abs, "EU_Sales")?,
                jp_sales: required_number(jp, row, abs, "JP_Sales")?,
                other_sales: required_number(other, row, abs, "Other_Sales")?,
                global_sales: required_number(global, row, abs, "Global_Sales")?,
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn optional_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    let idx = batch.schema().index_of(name).ok()?;
    Some(batch.column(idx))
}

fn required_string(col: &ArrayRef, row: usize, abs: usize, name: &str) -> Result<String> {
    string_at(col, row, name)?.ok_or_else(|| {
        SchemaError::NullValue {
            row: abs,
            column: name.to_string(),
        }
        .into()
    })
}

fn required_number(col: &ArrayRef, row: usize, abs: usize, name: &str) -> Result<f64> {
    number_at(col, row, name)?.ok_or_else(|| {
        SchemaError::NullValue {
            row: abs,
            column: name.to_string(),
        }
        .into()
    })
}

/// Ranks are whole, non-negative and fit in a `u32`.
fn rank_at(col: &ArrayRef, row: usize, abs: usize) -> Result<Option<u32>> {
    match number_at(col, row, "Rank")? {
        None => Ok(None),
        Some(r) if r.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&r) => Ok(Some(r as u32)),
        Some(r) => bail!("Row {abs}: Rank {r} is not a whole number in 0..=u32::MAX"),
    }
}

/// Read a string cell from a Utf8 or LargeUtf8 column.
fn string_at(col: &ArrayRef, row: usize, name: &str) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => Err(unsupported(name, other)),
    }
}

/// Read a numeric cell as `f64` from any common integer or float column.
fn number_at(col: &ArrayRef, row: usize, name: &str) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map(|a| a.value(row) as f64),
        other => return Err(unsupported(name, other)),
    };
    value
        .map(Some)
        .with_context(|| format!("column '{name}' does not match its declared type"))
}

fn unsupported(name: &str, data_type: &DataType) -> anyhow::Error {
    SchemaError::UnsupportedType {
        column: name.to_string(),
        data_type: format!("{data_type:?}"),
    }
    .into()
}
