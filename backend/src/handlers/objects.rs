//! HTTP handlers for construction object endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::object::{ConstructionObject, CreateObjectInput, UpdateObjectInput};
use crate::services::ObjectService;
use crate::AppState;

/// Create a construction object
pub async fn create_object(
    State(state): State<AppState>,
    Json(input): Json<CreateObjectInput>,
) -> AppResult<(StatusCode, Json<ConstructionObject>)> {
    let service = ObjectService::new(state.db);
    let object = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(object)))
}

/// Get a construction object by ID
pub async fn get_object(
    State(state): State<AppState>,
    Path(object_id): Path<i64>,
) -> AppResult<Json<ConstructionObject>> {
    let service = ObjectService::new(state.db);
    let object = service.get(object_id).await?;
    Ok(Json(object))
}

/// List all construction objects
pub async fn list_objects(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ConstructionObject>>> {
    let service = ObjectService::new(state.db);
    let objects = service.list().await?;
    Ok(Json(objects))
}

/// Update a construction object
pub async fn update_object(
    State(state): State<AppState>,
    Path(object_id): Path<i64>,
    Json(input): Json<UpdateObjectInput>,
) -> AppResult<Json<ConstructionObject>> {
    let service = ObjectService::new(state.db);
    let object = service.update(object_id, input).await?;
    Ok(Json(object))
}

/// Delete a construction object
pub async fn delete_object(
    State(state): State<AppState>,
    Path(object_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = ObjectService::new(state.db);
    service.delete(object_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
