//! Web server adapter.
//!
//! Serves the dashboard page and the JSON endpoint its controls call on every
//! change. The dataset is loaded before the router exists and is shared
//! read-only by all handlers.

mod error;
mod handlers;
mod templates;

pub use error::{ApiError, WebError};
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::domain::dashboard::Controls;
use crate::domain::dataset::Dataset;

pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub controls: Controls,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, default_region: &str, default_type: &str) -> Self {
        let controls = Controls::from_dataset(&dataset, default_region, default_type);
        Self { dataset, controls }
    }
}

pub fn build_router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/charts", get(handlers::charts))
        .route("/api/options", get(handlers::options))
        .route("/charts/price.svg", get(handlers::price_svg))
        .route("/charts/volume.svg", get(handlers::volume_svg))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
