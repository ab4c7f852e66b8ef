use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info_span, warn};
use uuid::Uuid;

use crate::error::TranslateError;
use crate::orchestrator::{translate_batch, translate_single, TranslationRequestField};
use crate::state::AppState;
use crate::translate::Locale;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/running", get(running))
        // Translation
        .route("/translate/:locale", post(translate_many))
        .route("/translate_custom/:locale", post(translate_custom))
}

/// Assemble the full application: routes, tracing, panic recovery and CORS
pub fn build_router(state: AppState) -> Router {
    let body_limit = match state.config.limits.max_body_bytes {
        0 => DefaultBodyLimit::disable(),
        bytes => DefaultBodyLimit::max(bytes),
    };

    Router::new()
        .merge(create_routes())
        .layer(body_limit)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        info_span!(
                            "http_request",
                            request_id = %Uuid::new_v4(),
                            method = %request.method(),
                            uri = %request.uri(),
                        )
                    }),
                )
                .layer(CorsLayer::very_permissive())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

async fn running() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"status": "running"})))
}

async fn translate_many(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, TranslateError> {
    let locale = Locale::from(locale);
    let body = request_body(body)?;
    let fields = text_obj(&body)
        .and_then(batch_fields)
        .map_err(|e| {
            warn!("Invalid batch request for {}", locale);
            e
        })?;

    let translations = translate_batch(
        &state.translation_client,
        &fields,
        &locale,
        state.config.translator.max_concurrency,
    )
    .await?;

    let body: Map<String, Value> = translations
        .into_iter()
        .map(|(key, text)| (key, Value::String(text)))
        .collect();
    Ok(Json(Value::Object(body)))
}

async fn translate_custom(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, TranslateError> {
    let locale = Locale::from(locale);
    let body = request_body(body)?;
    let text = text_obj(&body)
        .and_then(single_text)
        .map_err(|e| {
            warn!("Invalid single-text request for {}", locale);
            e
        })?;

    let translated = translate_single(
        &state.translation_client,
        text.as_deref(),
        &locale,
        state.config.limits.max_text_length,
    )
    .await
    .map_err(|e| {
        if let TranslateError::LengthExceeded { length, limit } = &e {
            warn!(
                "Rejected text of {} chars for {} (limit {})",
                length, locale, limit
            );
        }
        e
    })?;

    Ok(Json(json!({ "custom_text": translated })))
}

/// Body rejections become JSON errors like every other failure
fn request_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, TranslateError> {
    body.map_err(|rejection| {
        warn!("Request body rejected: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            TranslateError::BodyTooLarge
        } else {
            TranslateError::Validation
        }
    })
}

/// Pull `text_obj` out of a JSON object body
fn text_obj(body: &[u8]) -> Result<Value, TranslateError> {
    let mut data: Value = serde_json::from_slice(body).map_err(|_| TranslateError::Validation)?;
    data.as_object_mut()
        .and_then(|envelope| envelope.remove("text_obj"))
        .ok_or(TranslateError::Validation)
}

/// `text_obj` must map names to strings or null
fn batch_fields(text_obj: Value) -> Result<Vec<TranslationRequestField>, TranslateError> {
    let Value::Object(entries) = text_obj else {
        return Err(TranslateError::Validation);
    };

    entries
        .into_iter()
        .map(|(name, value)| match value {
            Value::Null => Ok(TranslationRequestField::new(name, None)),
            Value::String(text) => Ok(TranslationRequestField::new(name, Some(text.as_str()))),
            _ => Err(TranslateError::Validation),
        })
        .collect()
}

/// `text_obj` must be a string; null is passed on as absent
fn single_text(text_obj: Value) -> Result<Option<String>, TranslateError> {
    match text_obj {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        _ => Err(TranslateError::Validation),
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Request handler panicked: {}", message);
    TranslateError::Unexpected(message).into_response()
}
