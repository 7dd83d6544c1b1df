//! HTTP request handlers

use crate::types::{
    ErrorBody, FillRequest, HealthResponse, TemplateListResponse, TemplateResponse, UploadRequest,
    DOCX_CONTENT_TYPE,
};
use crate::ApiState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::prelude::{Engine, BASE64_STANDARD};
use doc_pack::DocPackage;
use field_store::{ingest_template, FieldStoreError};
use tracing::{info, warn};

/// Status code plus JSON error body
pub type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Map store failures onto user-facing status distinctions
fn store_error(err: FieldStoreError) -> ApiError {
    match err {
        FieldStoreError::NotFound(id) => {
            error_response(StatusCode::NOT_FOUND, format!("Template not found: {id}"))
        }
        FieldStoreError::NoPlaceholders => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No placeholders detected. Ensure format is {placeholderName}.",
        ),
        FieldStoreError::Malformed(detail) => error_response(
            StatusCode::BAD_REQUEST,
            format!("Malformed template package: {detail}"),
        ),
        FieldStoreError::Unavailable(detail) => {
            warn!(error = %detail, "field store unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Field store unavailable. Try again or supply template bytes directly.",
            )
        }
        other => {
            warn!(error = %other, "store operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure")
        }
    }
}

fn check_api_key(state: &ApiState, supplied: &str) -> Result<(), ApiError> {
    if supplied != state.api_key {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized: Invalid API Key",
        ));
    }
    Ok(())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fill a template with field values and return the rendered document
///
/// The template arrives either inline as base64 bytes or by the id of a
/// stored record. On success the response body is the raw `.docx` stream;
/// every failure is a JSON error, never a partial document.
pub async fn fill(
    State(state): State<ApiState>,
    Json(request): Json<FillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_api_key(&state, &request.api_key)?;

    let template_bytes = match (&request.template, &request.template_id) {
        (Some(encoded), None) => BASE64_STANDARD.decode(encoded).map_err(|e| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid base64 template: {e}"),
            )
        })?,
        (None, Some(id)) => state.store.get(id).await.map_err(store_error)?.content,
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Provide exactly one of \"template\" (base64) and \"template_id\".",
            ))
        }
    };

    // Open first so bad input is distinguishable from a render failure
    let package = DocPackage::open(&template_bytes).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Malformed template package: {e}"),
        )
    })?;

    let output = fill_engine::render(&package, &request.data)
        .and_then(|filled| Ok(filled.to_bytes()?))
        .map_err(|e| {
            warn!(error = %e, "render failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Generation failed: {e}"),
            )
        })?;

    info!(bytes = output.len(), "rendered document");
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=generated.docx",
            ),
        ],
        output,
    ))
}

/// Upload a template: derive its field set and persist it
pub async fn upload_template(
    State(state): State<ApiState>,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    check_api_key(&state, &request.api_key)?;

    let content = BASE64_STANDARD.decode(&request.content).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid base64 content: {e}"),
        )
    })?;

    let record = ingest_template(&request.name, content).map_err(store_error)?;
    let response = TemplateResponse::from(&record);
    state.store.put(record).await.map_err(store_error)?;

    info!(id = %response.id, name = %response.name, fields = response.field_count, "template uploaded");
    Ok((StatusCode::CREATED, Json(response)))
}

/// List summaries of all stored templates
pub async fn list_templates(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let templates = state.store.list().await.map_err(store_error)?;
    Ok(Json(TemplateListResponse { templates }))
}

/// Fetch one stored template's metadata and field list
pub async fn get_template(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.store.get(&id).await.map_err(store_error)?;
    Ok(Json(TemplateResponse::from(&record)))
}

/// Delete a stored template
///
/// Requires the API key in the `x-api-key` header.
pub async fn delete_template(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let supplied = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    check_api_key(&state, supplied)?;

    state.store.delete(&id).await.map_err(store_error)?;
    info!(id, "template deleted");
    Ok(StatusCode::NO_CONTENT)
}
