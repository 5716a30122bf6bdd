//! # API REST
//!
//! HTTP layer for the scenic spots backend.
//!
//! Handles:
//! - JSON endpoints under `/api` with axum
//! - Admin data-entry forms under `/admin`, rendered as HTML
//! - OpenAPI document at `/api-docs/openapi.json`
//! - CORS response headers on every route
//!
//! All storage goes through the `SpotStore` held in [`AppState`]; handlers
//! validate request shape and make exactly one store call each.

#![warn(rust_2018_idioms)]

pub mod admin;
pub mod error;
pub mod html;
pub mod json_api;
pub mod state;

pub use json_api::ApiDoc;
pub use state::AppState;

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    routing::get,
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Builds the full application router.
///
/// # Routes
/// - `GET /api/health`
/// - `GET|POST|OPTIONS /api/spots`
/// - `GET|PUT|PATCH|DELETE|OPTIONS /api/spots/:spot_id`
/// - `GET /api-docs/openapi.json`
/// - `GET|POST /admin/spots/new`
/// - `GET|POST /admin/spots/:spot_id/details/new`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(json_api::health))
        .route(
            "/api/spots",
            get(json_api::list_spots)
                .post(json_api::create_spot)
                .options(json_api::preflight),
        )
        .route(
            "/api/spots/:spot_id",
            get(json_api::get_spot)
                .put(json_api::update_spot)
                .patch(json_api::patch_spot)
                .delete(json_api::delete_spot)
                .options(json_api::preflight),
        )
        .route("/api-docs/openapi.json", get(json_api::openapi_json))
        .route(
            "/admin/spots/new",
            get(admin::new_spot_form).post(admin::create_spot),
        )
        .route(
            "/admin/spots/:spot_id/details/new",
            get(admin::new_detail_form).post(admin::create_detail),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
