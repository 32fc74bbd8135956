//! A single avocado sales observation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub region: String,
    /// `conventional` or `organic` in the published dataset.
    pub avocado_type: String,
    pub average_price: f64,
    pub total_volume: f64,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        avocado_type: impl Into<String>,
        average_price: f64,
        total_volume: f64,
    ) -> Self {
        Self {
            date,
            region: region.into(),
            avocado_type: avocado_type.into(),
            average_price,
            total_volume,
        }
    }
}
