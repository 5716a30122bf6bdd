//! JSON API handlers under `/api`.

use api_shared::{DetailSectionDoc, ErrorRes, HealthRes, HealthService, ListSpotsRes, SpotDoc};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{Map, Value};
use spots_core::{constants::ID_KEY, validation::missing_fields, SpotRecord};
use utoipa::OpenApi;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(health, list_spots, get_spot, create_spot, update_spot, patch_spot, delete_spot),
    components(schemas(HealthRes, ListSpotsRes, ErrorRes, SpotDoc, DetailSectionDoc))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document for the JSON API.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Answers CORS preflight requests; the CORS headers themselves are added by the router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/spots",
    responses(
        (status = 200, description = "All spots in stored order", body = ListSpotsRes),
        (status = 500, description = "Data file unreadable", body = ErrorRes)
    )
)]
/// List all spots.
///
/// # Errors
/// Returns `500 Internal Server Error` if the data file cannot be read or decoded.
#[axum::debug_handler]
pub async fn list_spots(State(state): State<AppState>) -> ApiResult<Json<ListSpotsRes>> {
    let spots = state.store.list_spots().map_err(|e| {
        tracing::error!("List spots error: {:?}", e);
        ApiError::Storage(e)
    })?;
    Ok(Json(ListSpotsRes::new(spots)))
}

#[utoipa::path(
    get,
    path = "/api/spots/{spot_id}",
    params(("spot_id" = String, Path, description = "Spot id, matched case-insensitively")),
    responses(
        (status = 200, description = "The spot", body = SpotDoc),
        (status = 404, description = "No such spot", body = ErrorRes),
        (status = 500, description = "Data file unreadable", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
) -> ApiResult<Json<SpotRecord>> {
    match state.store.get_spot(&spot_id) {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(ApiError::SpotNotFound(spot_id)),
        Err(e) => {
            tracing::error!("Get spot error: {:?}", e);
            Err(ApiError::Storage(e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/spots",
    request_body = SpotDoc,
    responses(
        (status = 201, description = "Spot stored", body = SpotDoc),
        (status = 400, description = "Malformed body, missing fields or storage error", body = ErrorRes),
        (status = 415, description = "Body is not JSON", body = ErrorRes)
    )
)]
/// Create a spot, or replace the spot with the same id.
///
/// The body must be a JSON object with `id` and `name` keys.
#[axum::debug_handler]
pub async fn create_spot(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SpotRecord>)> {
    let payload = require_json_body(&headers, &body, &[ID_KEY, "name"])?;
    let record = upsert(&state, payload)?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/api/spots/{spot_id}",
    params(("spot_id" = String, Path, description = "Default id when the body has none")),
    request_body = SpotDoc,
    responses(
        (status = 200, description = "Spot stored", body = SpotDoc),
        (status = 400, description = "Malformed body or storage error", body = ErrorRes),
        (status = 415, description = "Body is not JSON", body = ErrorRes)
    )
)]
/// Replace (or create) a spot.
///
/// The body's `id` wins over the path when both are present.
#[axum::debug_handler]
pub async fn update_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<SpotRecord>> {
    let mut payload = require_json_body(&headers, &body, &[])?;
    payload
        .entry(ID_KEY)
        .or_insert_with(|| Value::String(spot_id));
    let record = upsert(&state, payload)?;
    Ok(Json(record))
}

#[utoipa::path(
    patch,
    path = "/api/spots/{spot_id}",
    params(("spot_id" = String, Path, description = "Default id when the body has none")),
    request_body = SpotDoc,
    responses(
        (status = 200, description = "Spot stored", body = SpotDoc),
        (status = 400, description = "Malformed body or storage error", body = ErrorRes),
        (status = 415, description = "Body is not JSON", body = ErrorRes)
    )
)]
/// Same as [`update_spot`]: the stored record is overwritten, not merged.
#[axum::debug_handler]
pub async fn patch_spot(
    state: State<AppState>,
    spot_id: Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<SpotRecord>> {
    update_spot(state, spot_id, headers, body).await
}

#[utoipa::path(
    delete,
    path = "/api/spots/{spot_id}",
    params(("spot_id" = String, Path, description = "Spot id, matched case-insensitively")),
    responses(
        (status = 204, description = "Spot deleted"),
        (status = 404, description = "No such spot", body = ErrorRes),
        (status = 500, description = "Data file unreadable", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
) -> ApiResult<StatusCode> {
    match state.store.delete_spot(&spot_id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::SpotNotFound(spot_id)),
        Err(e) => {
            tracing::error!("Delete spot error: {:?}", e);
            Err(ApiError::Storage(e))
        }
    }
}

fn upsert(state: &AppState, payload: Map<String, Value>) -> ApiResult<SpotRecord> {
    state
        .store
        .upsert_spot(SpotRecord::from(payload))
        .map_err(|e| {
            tracing::warn!("Upsert spot rejected: {}", e);
            ApiError::Rejected(e)
        })
}

/// Checks that the request carries a JSON object containing every `required` key.
fn require_json_body(
    headers: &HeaderMap,
    body: &[u8],
    required: &[&str],
) -> ApiResult<Map<String, Value>> {
    if !is_json_content_type(headers) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let Ok(Value::Object(payload)) = serde_json::from_slice::<Value>(body) else {
        return Err(ApiError::MalformedBody);
    };

    let missing = missing_fields(required, |field| payload.contains_key(field));
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    Ok(payload)
}

/// `application/json` or any `application/*+json` media type.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
