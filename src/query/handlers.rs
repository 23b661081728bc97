use super::types::{ResponseFormat, SearchParams};
use crate::error::RequestError;
use crate::registry::InterfaceRegistry;
use axum::extract::{Extension, Path, Query};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// The HTTP surface: one search route per interface name.
pub fn router(registry: Arc<InterfaceRegistry>) -> Router {
    Router::new()
        .route("/:interface", get(handle_search))
        .layer(Extension(registry))
        .layer(TraceLayer::new_for_http())
}

/// Answers one search request.
///
/// The query string is taken as a plain map, so a repeated key keeps its last
/// value instead of failing extraction.
pub async fn handle_search(
    Path(interface): Path<String>,
    Query(pairs): Query<HashMap<String, String>>,
    Extension(registry): Extension<Arc<InterfaceRegistry>>,
    uri: Uri,
) -> Response {
    let params = SearchParams::from(pairs);
    match resolve(&registry, &interface, &params) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            ],
            body,
        )
            .into_response(),
        Err(err) => {
            match &err {
                RequestError::Internal(_) => {
                    tracing::error!("{} {} ({})", err.status().as_u16(), uri, err)
                }
                _ => tracing::warn!("{} {} ({})", err.status().as_u16(), uri, err),
            }
            err.into_response()
        }
    }
}

/// Resolves one request to the serialized result list.
pub fn resolve(
    registry: &InterfaceRegistry,
    interface: &str,
    params: &SearchParams,
) -> Result<Vec<u8>, RequestError> {
    ResponseFormat::parse(params.format.as_deref())?;

    let iface = registry
        .get(interface)
        .ok_or_else(|| RequestError::UnknownInterface(interface.to_string()))?;

    let results = iface.search(params.query(), params.limit());
    tracing::debug!(
        "[{}] '{}' -> {} results",
        interface,
        params.query(),
        results.len()
    );

    serde_json::to_vec(&results).map_err(|e| RequestError::Internal(e.to_string()))
}
