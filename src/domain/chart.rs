//! Price and volume chart payloads derived from a filtered dataset.
//!
//! [`render`] is the whole of the dashboard's reactive logic: the UI calls it on
//! every control change and hands the resulting [`Figure`]s to the browser-side
//! charting library unchanged.

use chrono::NaiveDate;
use serde::Serialize;

use super::dataset::Dataset;
use super::filter::{FilterCriteria, select};

pub const PRICE_TITLE: &str = "Average Price of Avocados";
pub const PRICE_COLOR: &str = "#17B897";
pub const PRICE_HOVER_TEMPLATE: &str = "$%{y:.2f}<extra></extra>";
pub const VOLUME_TITLE: &str = "Avocados Sold";
pub const VOLUME_COLOR: &str = "#E12D39";

const TRACE_STYLE: &str = "lines";
const TITLE_X: f64 = 0.05;
const TITLE_XANCHOR: &str = "left";

/// One chart's data plus the display metadata it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub label: &'static str,
    pub color: &'static str,
    /// Client-side hover template; `None` uses the library default.
    pub hover_format: Option<&'static str>,
    pub tick_prefix: Option<&'static str>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Server-side rendering of each point's hover text.
    pub fn hover_labels(&self) -> Vec<String> {
        self.y
            .iter()
            .map(|&v| match self.hover_format {
                Some(_) => format_price_hover(v),
                None => v.to_string(),
            })
            .collect()
    }

    pub fn to_figure(&self) -> Figure {
        Figure {
            data: vec![Trace {
                x: self.x.clone(),
                y: self.y.clone(),
                kind: TRACE_STYLE.to_string(),
                hovertemplate: self.hover_format.map(str::to_string),
            }],
            layout: Layout {
                title: Title {
                    text: self.label.to_string(),
                    x: TITLE_X,
                    xanchor: TITLE_XANCHOR.to_string(),
                },
                xaxis: Axis {
                    fixedrange: true,
                    tickprefix: None,
                },
                yaxis: Axis {
                    fixedrange: true,
                    tickprefix: self.tick_prefix.map(str::to_string),
                },
                colorway: vec![self.color.to_string()],
            },
        }
    }
}

/// Chart description in the shape the browser charting library consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub colorway: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub xanchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub fixedrange: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickprefix: Option<String>,
}

/// Both dashboard figures, as returned to the UI after each input change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigures {
    pub price: Figure,
    pub volume: Figure,
}

/// Filter `dataset` by `criteria` and build the price and volume series.
///
/// An empty selection (including an inverted date range) yields two empty
/// series rather than an error.
pub fn render(dataset: &Dataset, criteria: &FilterCriteria) -> (ChartSeries, ChartSeries) {
    let selected = select(dataset, criteria);
    let dates: Vec<NaiveDate> = selected.iter().map(|r| r.date).collect();

    let price = ChartSeries {
        x: dates.clone(),
        y: selected.iter().map(|r| r.average_price).collect(),
        label: PRICE_TITLE,
        color: PRICE_COLOR,
        hover_format: Some(PRICE_HOVER_TEMPLATE),
        tick_prefix: Some("$"),
    };
    let volume = ChartSeries {
        x: dates,
        y: selected.iter().map(|r| r.total_volume).collect(),
        label: VOLUME_TITLE,
        color: VOLUME_COLOR,
        hover_format: None,
        tick_prefix: None,
    };
    (price, volume)
}

/// [`render`] followed by conversion to the wire payload.
pub fn render_figures(dataset: &Dataset, criteria: &FilterCriteria) -> ChartFigures {
    let (price, volume) = render(dataset, criteria);
    ChartFigures {
        price: price.to_figure(),
        volume: volume.to_figure(),
    }
}

/// Currency with exactly two decimals: `1.5` -> `"$1.50"`.
pub fn format_price_hover(value: f64) -> String {
    format!("${:.2}", value)
}
