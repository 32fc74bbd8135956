//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    http::{Uri, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::adapters::chart_svg::render_series_svg;
use crate::domain::chart::{ChartFigures, ChartSeries, render, render_figures};
use crate::domain::dashboard::Controls;
use crate::domain::filter::{FilterCriteria, parse_filter_date};

use super::{ApiError, AppState, WebError};

/// Query string sent by the dashboard controls. Absent parameters fall back to
/// the initial selections.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ChartQuery {
    pub region: Option<String>,
    #[serde(rename = "type")]
    pub avocado_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ChartQuery {
    pub fn to_criteria(&self, controls: &Controls) -> Result<FilterCriteria, ApiError> {
        let initial = controls.initial_criteria();
        let start_date = match non_blank(&self.start_date) {
            Some(s) => parse_filter_date(s)
                .map_err(|e| ApiError::bad_request(format!("invalid start_date '{}': {}", s, e)))?,
            None => initial.start_date,
        };
        let end_date = match non_blank(&self.end_date) {
            Some(s) => parse_filter_date(s)
                .map_err(|e| ApiError::bad_request(format!("invalid end_date '{}': {}", s, e)))?,
            None => initial.end_date,
        };
        Ok(FilterCriteria {
            region: self.region.clone().unwrap_or(initial.region),
            avocado_type: self.avocado_type.clone().unwrap_or(initial.avocado_type),
            start_date,
            end_date,
        })
    }
}

/// A cleared date picker submits an empty string.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let criteria = state.controls.initial_criteria();
    let figures = render_figures(&state.dataset, &criteria);
    let template = super::templates::DashboardTemplate::new(&state.controls, &criteria, &figures)
        .map_err(|e| WebError::internal(e.to_string()))?;
    let html = template
        .render()
        .map_err(|e| WebError::internal(e.to_string()))?;
    Ok(Html(html).into_response())
}

pub async fn charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartFigures>, ApiError> {
    let criteria = query.to_criteria(&state.controls)?;
    let figures = render_figures(&state.dataset, &criteria);
    log::debug!(
        "charts region={} type={} {}..={}: {} points",
        criteria.region,
        criteria.avocado_type,
        criteria.start_date,
        criteria.end_date,
        figures.price.data.first().map(|t| t.x.len()).unwrap_or_default()
    );
    Ok(Json(figures))
}

pub async fn options(State(state): State<Arc<AppState>>) -> Json<Controls> {
    Json(state.controls.clone())
}

pub async fn price_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ApiError> {
    let (price, _) = series_for(&state, &query)?;
    Ok(svg_response(&price))
}

pub async fn volume_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ApiError> {
    let (_, volume) = series_for(&state, &query)?;
    Ok(svg_response(&volume))
}

fn series_for(state: &AppState, query: &ChartQuery) -> Result<(ChartSeries, ChartSeries), ApiError> {
    let criteria = query.to_criteria(&state.controls)?;
    Ok(render(&state.dataset, &criteria))
}

fn svg_response(series: &ChartSeries) -> Response {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_series_svg(series),
    )
        .into_response()
}

pub async fn not_found(uri: Uri) -> WebError {
    log::debug!("no route for {}", uri.path());
    WebError::not_found("Page not found")
}
