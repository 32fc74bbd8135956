//! Control catalogs and initial selections for the dashboard page.

use chrono::NaiveDate;
use serde::Serialize;

use super::dataset::Dataset;
use super::filter::FilterCriteria;

pub const DEFAULT_REGION: &str = "Albany";
pub const DEFAULT_TYPE: &str = "organic";

/// Everything the UI needs to populate its dropdowns and date picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub regions: Vec<String>,
    pub types: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub region: String,
    #[serde(rename = "type")]
    pub avocado_type: String,
}

impl Controls {
    /// A preferred region/type absent from the catalog falls back to the first
    /// catalog entry, so the initial charts are never empty by accident.
    pub fn from_dataset(dataset: &Dataset, preferred_region: &str, preferred_type: &str) -> Self {
        let regions = dataset.regions();
        let types = dataset.types();
        let bounds = dataset.date_bounds();
        let region = pick(&regions, preferred_region);
        let avocado_type = pick(&types, preferred_type);
        Self {
            regions,
            types,
            min_date: bounds.map(|(min, _)| min),
            max_date: bounds.map(|(_, max)| max),
            region,
            avocado_type,
        }
    }

    /// Criteria for the first render: default selections over the full date span.
    ///
    /// An empty dataset has no span; the criteria then cover every
    /// representable date and still select nothing.
    pub fn initial_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.region.clone(),
            self.avocado_type.clone(),
            self.min_date.unwrap_or(NaiveDate::MIN),
            self.max_date.unwrap_or(NaiveDate::MAX),
        )
    }
}

fn pick(catalog: &[String], preferred: &str) -> String {
    if catalog.iter().any(|c| c == preferred) {
        return preferred.to_string();
    }
    catalog
        .first()
        .cloned()
        .unwrap_or_else(|| preferred.to_string())
}
