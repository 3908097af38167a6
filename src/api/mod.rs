//! HTTP API surface.
//!
//! A single `POST /graph` endpoint accepts `{"field": <root field>, "arguments": {..}}`, where the
//! root field is one of the query/mutation names clients already use (`Transaction`,
//! `AllTransaction`, `AddTransaction`, `UpdateTransaction`, `DeleteTransaction`, and the same
//! five for `User`). The field name is split into an operation and an entity, the arguments are
//! handed to the resolver untouched, and the result is returned as `{"data": ..}`.

mod error;

pub use error::ApiError;

use crate::core::{Arguments, EntityKind, Operation, Resolved, Resolver};
use crate::errors::Result;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of a `POST /graph` request.
#[derive(Debug, Deserialize)]
pub struct GraphRequest {
    /// Root field name, e.g. `UpdateTransaction`
    pub field: String,
    /// Named arguments for the field
    #[serde(default)]
    pub arguments: Arguments,
}

/// Body of a successful response.
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    /// The resolved record(s) or deleted identifier
    pub data: Resolved,
}

/// Splits a root field name into the operation and entity it addresses.
#[must_use]
pub fn parse_field(field: &str) -> Option<(Operation, EntityKind)> {
    let (operation, entity) = [
        ("All", Operation::ReadAll),
        ("Add", Operation::Create),
        ("Update", Operation::Update),
        ("Delete", Operation::Delete),
    ]
    .into_iter()
    .find_map(|(prefix, operation)| field.strip_prefix(prefix).map(|rest| (operation, rest)))
    .unwrap_or((Operation::ReadOne, field));

    let entity = match entity {
        "Transaction" => EntityKind::Transaction,
        "User" => EntityKind::User,
        _ => return None,
    };
    Some((operation, entity))
}

async fn graph(
    State(resolver): State<Resolver>,
    payload: std::result::Result<Json<GraphRequest>, JsonRejection>,
) -> std::result::Result<Json<GraphResponse>, ApiError> {
    let Json(request) = payload?;
    let (operation, entity) =
        parse_field(&request.field).ok_or_else(|| ApiError::UnknownField(request.field.clone()))?;
    let data = resolver
        .resolve(operation, entity, &request.arguments)
        .await?;
    Ok(Json(GraphResponse { data }))
}

async fn health() -> &'static str {
    "ok"
}

/// Builds the router with the resolver as shared state.
pub fn router(resolver: Resolver) -> Router {
    Router::new()
        .route("/graph", post(graph))
        .route("/health", get(health))
        .with_state(resolver)
}

/// Binds `address` and serves the API until the process is stopped.
///
/// # Errors
/// Returns `Error::Io` if the address cannot be bound or the server fails.
pub async fn serve(resolver: Resolver, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on http://{}/graph", listener.local_addr()?);
    axum::serve(listener, router(resolver)).await?;
    Ok(())
}
