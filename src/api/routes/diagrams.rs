//! Diagram routes.
//!
//! CRUD, listing and search endpoints for stored Mermaid diagrams. Each handler
//! makes a single store call (two for create/update, which re-read the row).

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
    routing::get,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{CreateDiagramRequest, DeleteDiagramResponse, Diagram, UpdateDiagramRequest};
use crate::storage::DiagramStore;

type Store = Arc<dyn DiagramStore>;

/// Create the diagram router
///
/// `/recent` and `/search/{query}` are static segments, which axum matches
/// ahead of the `/{id}` capture.
pub fn diagrams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_diagrams).post(create_diagram))
        .route("/recent", get(get_recent_diagram))
        .route("/search/{query}", get(search_diagrams))
        .route(
            "/{id}",
            get(get_diagram).put(update_diagram).delete(delete_diagram),
        )
}

/// POST /api/diagrams - Create a new diagram
#[utoipa::path(
    post,
    path = "/api/diagrams",
    tag = "Diagrams",
    request_body = CreateDiagramRequest,
    responses(
        (status = 200, description = "Diagram created successfully", body = Diagram),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_diagram(
    State(store): State<Store>,
    payload: Result<Json<CreateDiagramRequest>, JsonRejection>,
) -> Result<Json<Diagram>, ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::unprocessable)?;

    let id = store
        .create(&request.title, &request.content, request.tags.as_deref())
        .await?;

    match store.get(id).await? {
        Some(diagram) => Ok(Json(diagram)),
        None => Err(ApiError::internal("Failed to retrieve saved diagram")),
    }
}

/// GET /api/diagrams - List all diagrams, most recently updated first
#[utoipa::path(
    get,
    path = "/api/diagrams",
    tag = "Diagrams",
    responses(
        (status = 200, description = "Diagrams retrieved successfully", body = Vec<Diagram>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_diagrams(State(store): State<Store>) -> Result<Json<Vec<Diagram>>, ApiError> {
    Ok(Json(store.list_all().await?))
}

/// GET /api/diagrams/search/{query} - Search titles and tags
#[utoipa::path(
    get,
    path = "/api/diagrams/search/{query}",
    tag = "Diagrams",
    params(
        ("query" = String, Path, description = "Substring to look for in title or tags")
    ),
    responses(
        (status = 200, description = "Matching diagrams, possibly none", body = Vec<Diagram>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_diagrams(
    State(store): State<Store>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Diagram>>, ApiError> {
    Ok(Json(store.search(&query).await?))
}

/// GET /api/diagrams/recent - Get the most recently updated diagram
#[utoipa::path(
    get,
    path = "/api/diagrams/recent",
    tag = "Diagrams",
    responses(
        (status = 200, description = "Most recently updated diagram", body = Diagram),
        (status = 404, description = "No diagrams stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_recent_diagram(State(store): State<Store>) -> Result<Json<Diagram>, ApiError> {
    store
        .most_recent()
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// GET /api/diagrams/{id} - Get a diagram by ID
#[utoipa::path(
    get,
    path = "/api/diagrams/{id}",
    tag = "Diagrams",
    params(
        ("id" = i64, Path, description = "Diagram ID")
    ),
    responses(
        (status = 200, description = "Diagram retrieved successfully", body = Diagram),
        (status = 400, description = "ID is not an integer"),
        (status = 404, description = "Diagram not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_diagram(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Diagram>, ApiError> {
    store.get(id).await?.map(Json).ok_or_else(ApiError::not_found)
}

/// PUT /api/diagrams/{id} - Overwrite a diagram
#[utoipa::path(
    put,
    path = "/api/diagrams/{id}",
    tag = "Diagrams",
    params(
        ("id" = i64, Path, description = "Diagram ID")
    ),
    request_body = UpdateDiagramRequest,
    responses(
        (status = 200, description = "Diagram updated successfully", body = Diagram),
        (status = 404, description = "Diagram not found"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_diagram(
    State(store): State<Store>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateDiagramRequest>, JsonRejection>,
) -> Result<Json<Diagram>, ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::unprocessable)?;

    let updated = store
        .update(id, &request.title, &request.content, request.tags.as_deref())
        .await?;
    if !updated {
        return Err(ApiError::not_found());
    }

    match store.get(id).await? {
        Some(diagram) => Ok(Json(diagram)),
        None => {
            // Deleted between the two statements
            warn!("Diagram {} vanished after update", id);
            Err(ApiError::internal("Failed to retrieve updated diagram"))
        }
    }
}

/// DELETE /api/diagrams/{id} - Delete a diagram
#[utoipa::path(
    delete,
    path = "/api/diagrams/{id}",
    tag = "Diagrams",
    params(
        ("id" = i64, Path, description = "Diagram ID")
    ),
    responses(
        (status = 200, description = "Diagram deleted", body = DeleteDiagramResponse),
        (status = 404, description = "Diagram not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_diagram(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteDiagramResponse>, ApiError> {
    if !store.delete(id).await? {
        return Err(ApiError::not_found());
    }

    info!("Diagram {} removed via API", id);
    Ok(Json(DeleteDiagramResponse { success: true }))
}
