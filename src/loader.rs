use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::record::{AvocadoType, Record};
use chrono::NaiveDate;
use csv::StringRecord;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Date format of the `Date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DATE_COLUMN: &str = "Date";
pub const PRICE_COLUMN: &str = "AveragePrice";
pub const VOLUME_COLUMN: &str = "Total Volume";
pub const TYPE_COLUMN: &str = "type";
pub const REGION_COLUMN: &str = "region";

/// Positions of the required columns in the header row
struct ColumnMap {
    date: usize,
    price: usize,
    volume: usize,
    kind: usize,
    region: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, source_name: &str) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    DashboardError::data_load(source_name, format!("missing required column '{}'", name))
                })
        };

        Ok(ColumnMap {
            date: find(DATE_COLUMN)?,
            price: find(PRICE_COLUMN)?,
            volume: find(VOLUME_COLUMN)?,
            kind: find(TYPE_COLUMN)?,
            region: find(REGION_COLUMN)?,
        })
    }
}

/// Load the sales dataset from a CSV file
///
/// Reads every row, parses the `Date` column as `YYYY-MM-DD` and returns the
/// records sorted ascending by date. Loading is all-or-nothing: the first bad
/// row aborts the load.
///
/// # Arguments
/// * `path` - Path to the CSV file, e.g. `data/avocado.csv`
///
/// # Returns
/// * `Result<Dataset>` - The loaded dataset or the reason it could not be loaded
///
/// # Errors
/// * `DataLoad` if the file is missing, unreadable, malformed, empty or lacks a required column
/// * `DateParse` if any `Date` value is not a valid `YYYY-MM-DD` date
///
/// # Examples
/// ```no_run
/// use avocado_dashboard::loader::load;
///
/// match load("data/avocado.csv") {
///     Ok(dataset) => println!("Loaded {} records", dataset.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| DashboardError::data_load(&source_name, format!("cannot open file: {}", e)))?;

    let dataset = load_from_reader(file, &source_name)?;
    info!(
        "Loaded {} records ({} regions) from {}",
        dataset.len(),
        dataset.catalog().regions.len(),
        source_name
    );
    Ok(dataset)
}

/// Load the sales dataset from any reader
///
/// `source_name` only shows up in error messages.
pub fn load_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::data_load(source_name, format!("cannot read header row: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers, source_name)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = result.map_err(|e| DashboardError::data_load(source_name, format!("line {}: {}", line, e)))?;
        records.push(parse_row(&row, &columns, line, source_name)?);
    }

    if records.is_empty() {
        return Err(DashboardError::data_load(source_name, "no data rows"));
    }

    Ok(Dataset::from_records(records))
}

fn parse_row(row: &StringRecord, columns: &ColumnMap, line: usize, source_name: &str) -> Result<Record> {
    let cell = |idx: usize, name: &str| {
        row.get(idx).ok_or_else(|| {
            DashboardError::data_load(source_name, format!("line {}: missing value for '{}'", line, name))
        })
    };

    let raw_date = cell(columns.date, DATE_COLUMN)?;
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| DashboardError::DateParse {
        line,
        value: raw_date.to_string(),
    })?;

    let average_price = parse_decimal(cell(columns.price, PRICE_COLUMN)?, PRICE_COLUMN, line, source_name)?;
    let total_volume = parse_decimal(cell(columns.volume, VOLUME_COLUMN)?, VOLUME_COLUMN, line, source_name)?;

    let kind = cell(columns.kind, TYPE_COLUMN)?
        .parse::<AvocadoType>()
        .map_err(|e| DashboardError::data_load(source_name, format!("line {}: {}", line, e)))?;

    let region = cell(columns.region, REGION_COLUMN)?;
    if region.is_empty() {
        return Err(DashboardError::data_load(source_name, format!("line {}: empty region", line)));
    }

    Ok(Record::new(date, region, kind, average_price, total_volume))
}

fn parse_decimal(raw: &str, column: &str, line: usize, source_name: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DashboardError::data_load(
            source_name,
            format!("line {}: invalid {} value '{}'", line, column, raw),
        )),
    }
}
