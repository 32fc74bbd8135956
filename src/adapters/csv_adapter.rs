//! CSV file data adapter.

use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::record::Record;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub const DATE_COLUMN: &str = "Date";
pub const PRICE_COLUMN: &str = "AveragePrice";
pub const VOLUME_COLUMN: &str = "Total Volume";
pub const TYPE_COLUMN: &str = "type";
pub const REGION_COLUMN: &str = "region";

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn reads_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }
}

impl DataPort for CsvAdapter {
    fn load(&self) -> Result<Dataset, DashboardError> {
        if self.reads_stdin() {
            return read_dataset(std::io::stdin().lock()).map_err(|e| match e {
                DashboardError::ResourceNotFound { reason, .. } => DashboardError::ResourceNotFound {
                    path: self.describe(),
                    reason,
                },
                other => other,
            });
        }
        let file = File::open(&self.path).map_err(|e| DashboardError::ResourceNotFound {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        read_dataset(file).map_err(|e| match e {
            DashboardError::ResourceNotFound { reason, .. } => DashboardError::ResourceNotFound {
                path: self.path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    fn describe(&self) -> String {
        if self.reads_stdin() {
            return "<stdin>".to_string();
        }
        self.path.display().to_string()
    }
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    price: usize,
    volume: usize,
    avocado_type: usize,
    region: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DashboardError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashboardError::Schema {
                    column: name.to_string(),
                })
        };
        Ok(Self {
            date: find(DATE_COLUMN)?,
            price: find(PRICE_COLUMN)?,
            volume: find(VOLUME_COLUMN)?,
            avocado_type: find(TYPE_COLUMN)?,
            region: find(REGION_COLUMN)?,
        })
    }
}

/// Parse a full CSV document into a date-sorted [`Dataset`].
///
/// Columns are located by header name; any others are ignored. A single bad
/// row fails the whole load.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, DashboardError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(parse_row(&row, &columns, line)?);
    }

    Ok(Dataset::from_records(records))
}

fn parse_row(row: &csv::StringRecord, columns: &Columns, line: u64) -> Result<Record, DashboardError> {
    let field = move |idx: usize, name: &str| {
        row.get(idx).ok_or_else(|| DashboardError::MalformedInput {
            line,
            column: name.to_string(),
            value: String::new(),
            reason: "field missing".into(),
        })
    };

    let date_str = field(columns.date, DATE_COLUMN)?;
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
        DashboardError::MalformedInput {
            line,
            column: DATE_COLUMN.to_string(),
            value: date_str.to_string(),
            reason: e.to_string(),
        }
    })?;

    let average_price = parse_number(field(columns.price, PRICE_COLUMN)?, PRICE_COLUMN, line)?;
    let total_volume = parse_number(field(columns.volume, VOLUME_COLUMN)?, VOLUME_COLUMN, line)?;
    if total_volume < 0.0 {
        return Err(DashboardError::MalformedInput {
            line,
            column: VOLUME_COLUMN.to_string(),
            value: total_volume.to_string(),
            reason: "volume must not be negative".into(),
        });
    }

    Ok(Record {
        date,
        region: field(columns.region, REGION_COLUMN)?.to_string(),
        avocado_type: field(columns.avocado_type, TYPE_COLUMN)?.to_string(),
        average_price,
        total_volume,
    })
}

fn parse_number(value: &str, column: &str, line: u64) -> Result<f64, DashboardError> {
    let malformed = |reason: String| DashboardError::MalformedInput {
        line,
        column: column.to_string(),
        value: value.to_string(),
        reason,
    };
    let n: f64 = value.trim().parse().map_err(|e: std::num::ParseFloatError| malformed(e.to_string()))?;
    if !n.is_finite() {
        return Err(malformed("not a finite number".into()));
    }
    Ok(n)
}

fn csv_error(e: csv::Error) -> DashboardError {
    if e.is_io_error() {
        return DashboardError::ResourceNotFound {
            path: "<input>".into(),
            reason: e.to_string(),
        };
    }
    DashboardError::MalformedInput {
        line: e.position().map(|p| p.line()).unwrap_or_default(),
        column: "row".into(),
        value: String::new(),
        reason: e.to_string(),
    }
}
