#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Dashboard page renders controls and the initial figures
//! - Chart endpoint filtering, defaults and bad dates
//! - Options endpoint catalogs
//! - SVG fallback charts
//! - Static assets
//! - Unknown routes

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use avocado_analytics::adapters::web::{AppState, build_router};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use common::*;

fn create_app_with_static(static_dir: &TempDir) -> Router {
    let state = AppState::new(Arc::new(scenario_dataset()), "Albany", "organic");
    build_router(state, static_dir.path().to_path_buf())
}

fn create_test_app() -> Router {
    // The directory is removed on return; these apps never serve /static.
    let static_dir = TempDir::new().unwrap();
    create_app_with_static(&static_dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8_lossy(&body).to_string())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(create_test_app(), uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn dashboard_renders_with_ok_status() {
        let (status, _, _) = get(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_contains_header_and_controls() {
        let (_, content_type, html) = get(create_test_app(), "/").await;
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(html.contains("Avocado Analytics"));
        assert!(html.contains("id=\"region-filter\""));
        assert!(html.contains("id=\"type-filter\""));
        assert!(html.contains("id=\"price-chart\""));
        assert!(html.contains("id=\"volume-chart\""));
        assert!(html.contains("<option value=\"Albany\" selected>"));
        assert!(html.contains("<option value=\"Chicago\">"));
        assert!(html.contains("<option value=\"organic\" selected>"));
    }

    #[tokio::test]
    async fn dashboard_date_picker_spans_dataset() {
        let (_, _, html) = get(create_test_app(), "/").await;
        assert!(html.contains("min=\"2015-01-04\""));
        assert!(html.contains("max=\"2015-02-01\""));
    }

    #[tokio::test]
    async fn dashboard_embeds_initial_figures() {
        let (_, _, html) = get(create_test_app(), "/").await;
        assert!(html.contains("id=\"initial-figures\""));
        assert!(html.contains("\"colorway\":[\"#17B897\"]"));
        assert!(html.contains("\"x\":[\"2015-01-04\",\"2015-01-11\",\"2015-02-01\"]"));
    }
}

mod chart_api_tests {
    use super::*;

    #[tokio::test]
    async fn filters_by_all_criteria() {
        let (status, json) = get_json(
            "/api/charts?region=Albany&type=organic&start_date=2015-01-01&end_date=2015-01-31",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let trace = &json["price"]["data"][0];
        assert_eq!(trace["x"], serde_json::json!(["2015-01-04", "2015-01-11"]));
        assert_eq!(trace["y"], serde_json::json!([1.0, 1.2]));
        assert_eq!(trace["hovertemplate"], "$%{y:.2f}<extra></extra>");
        assert_eq!(json["volume"]["data"][0]["y"], serde_json::json!([1373.95, 1500.0]));
    }

    #[tokio::test]
    async fn no_matches_returns_empty_series() {
        let (status, json) = get_json("/api/charts?region=Albany&type=conventional").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["price"]["data"][0]["x"], serde_json::json!([]));
        assert_eq!(json["volume"]["data"][0]["x"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn inverted_range_returns_empty_series() {
        let (status, json) =
            get_json("/api/charts?region=Albany&type=organic&start_date=2015-02-01&end_date=2015-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["price"]["data"][0]["y"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn missing_params_use_initial_selection() {
        let (_, json) = get_json("/api/charts").await;
        assert_eq!(
            json["price"]["data"][0]["x"],
            serde_json::json!(["2015-01-04", "2015-01-11", "2015-02-01"])
        );
    }

    #[tokio::test]
    async fn accepts_datetime_strings() {
        let (status, json) = get_json(
            "/api/charts?region=Albany&type=organic&start_date=2015-01-11T00:00:00&end_date=2015-01-11T00:00:00",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["price"]["data"][0]["x"], serde_json::json!(["2015-01-11"]));
    }

    #[tokio::test]
    async fn bad_date_is_bad_request() {
        let (status, json) = get_json("/api/charts?start_date=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("start_date"));
    }
}

mod options_tests {
    use super::*;

    #[tokio::test]
    async fn options_lists_catalogs_and_defaults() {
        let (status, json) = get_json("/api/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["regions"], serde_json::json!(["Albany", "Chicago"]));
        assert_eq!(json["types"], serde_json::json!(["conventional", "organic"]));
        assert_eq!(json["min_date"], "2015-01-04");
        assert_eq!(json["max_date"], "2015-02-01");
        assert_eq!(json["region"], "Albany");
        assert_eq!(json["type"], "organic");
    }
}

mod svg_tests {
    use super::*;

    #[tokio::test]
    async fn price_svg_draws_selection() {
        let (status, content_type, body) = get(
            create_test_app(),
            "/charts/price.svg?region=Albany&type=organic&start_date=2015-01-01&end_date=2015-01-31",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
        assert!(body.contains("<polyline"));
        assert!(body.contains("2015-01-11: $1.20"));
    }

    #[tokio::test]
    async fn volume_svg_empty_selection_shows_placeholder() {
        let (status, _, body) =
            get(create_test_app(), "/charts/volume.svg?region=Chicago&type=hydroponic").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No data for this selection"));
    }
}

mod static_tests {
    use super::*;

    #[tokio::test]
    async fn serves_files_from_static_dir() {
        let static_dir = TempDir::new().unwrap();
        std::fs::write(static_dir.path().join("style.css"), "body { margin: 0; }").unwrap();

        let (status, _, body) = get(create_app_with_static(&static_dir), "/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body { margin: 0; }");
    }

    #[tokio::test]
    async fn missing_static_file_is_not_found() {
        let static_dir = TempDir::new().unwrap();
        let (status, _, _) = get(create_app_with_static(&static_dir), "/static/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod fallback_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_route_is_not_found_page() {
        let (status, _, html) = get(create_test_app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("Error 404"));
    }
}
