//! HTML templates using Askama.

use askama::Template;
use chrono::NaiveDate;

use crate::domain::chart::ChartFigures;
use crate::domain::dashboard::Controls;
use crate::domain::filter::FilterCriteria;

pub const PAGE_TITLE: &str = "Avocado Analytics: Understand Your Avocados!";
pub const HEADER_TITLE: &str = "Avocado Analytics";
pub const HEADER_DESCRIPTION: &str = "Analyze the behaviour of avocado prices and the number of avocados sold in the US between 2015 and 2018";

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

fn options(catalog: &[String], selected: &str) -> Vec<SelectOption> {
    catalog
        .iter()
        .map(|v| SelectOption {
            value: v.clone(),
            selected: v == selected,
        })
        .collect()
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub page_title: &'static str,
    pub header_title: &'static str,
    pub header_description: &'static str,
    pub regions: Vec<SelectOption>,
    pub types: Vec<SelectOption>,
    pub min_date: String,
    pub max_date: String,
    pub start_date: String,
    pub end_date: String,
    /// Initial figures, already escaped for embedding in a `<script>` element.
    pub figures_json: String,
}

impl DashboardTemplate {
    pub fn new(
        controls: &Controls,
        criteria: &FilterCriteria,
        figures: &ChartFigures,
    ) -> Result<Self, serde_json::Error> {
        let figures_json = serde_json::to_string(figures)?.replace('<', "\\u003c");
        Ok(Self {
            page_title: PAGE_TITLE,
            header_title: HEADER_TITLE,
            header_description: HEADER_DESCRIPTION,
            regions: options(&controls.regions, &criteria.region),
            types: options(&controls.types, &criteria.avocado_type),
            min_date: date_value(controls.min_date),
            max_date: date_value(controls.max_date),
            start_date: date_value(controls.min_date),
            end_date: date_value(controls.max_date),
            figures_json,
        })
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
