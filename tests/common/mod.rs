#![allow(dead_code)]

use avocado_analytics::domain::dataset::Dataset;
use avocado_analytics::domain::error::DashboardError;
pub use avocado_analytics::domain::record::Record;
use avocado_analytics::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::io::Write;

pub const HEADER: &str = ",Date,AveragePrice,Total Volume,4046,4225,4770,Total Bags,type,year,region";

pub struct MockDataPort {
    pub records: Vec<Record>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load(&self) -> Result<Dataset, DashboardError> {
        if let Some(reason) = &self.error {
            return Err(DashboardError::ResourceNotFound {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(Dataset::from_records(self.records.clone()))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(date_str: &str, region: &str, avocado_type: &str, price: f64, volume: f64) -> Record {
    Record::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        region,
        avocado_type,
        price,
        volume,
    )
}

/// Albany organic on two January weeks, plus unrelated Chicago rows.
pub fn scenario_records() -> Vec<Record> {
    vec![
        make_record("2015-01-11", "Albany", "organic", 1.20, 1_500.0),
        make_record("2015-01-04", "Chicago", "organic", 1.49, 7_000.0),
        make_record("2015-01-04", "Albany", "organic", 1.00, 1_373.95),
        make_record("2015-01-11", "Chicago", "conventional", 0.98, 700_000.0),
        make_record("2015-02-01", "Albany", "organic", 1.35, 1_200.0),
    ]
}

pub fn scenario_dataset() -> Dataset {
    Dataset::from_records(scenario_records())
}

/// Render records as CSV rows in the published avocado layout.
pub fn to_csv(records: &[Record]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (i, r) in records.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},0,0,0,0,{},{},{}\n",
            i,
            r.date.format("%Y-%m-%d"),
            r.average_price,
            r.total_volume,
            r.avocado_type,
            r.date.format("%Y"),
            r.region
        ));
    }
    out
}

pub fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
