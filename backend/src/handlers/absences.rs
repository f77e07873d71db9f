//! HTTP handlers for absence and deduction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::absence::{Absence, CreateAbsenceInput, UpdateAbsenceInput};
use crate::services::AbsenceService;
use crate::AppState;

/// Record an absence or deduction
pub async fn create_absence(
    State(state): State<AppState>,
    Json(input): Json<CreateAbsenceInput>,
) -> AppResult<(StatusCode, Json<Absence>)> {
    let service = AbsenceService::new(state.db);
    let absence = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(absence)))
}

/// List all absences
pub async fn list_absences(State(state): State<AppState>) -> AppResult<Json<Vec<Absence>>> {
    let service = AbsenceService::new(state.db);
    let absences = service.list().await?;
    Ok(Json(absences))
}

/// Update an absence record
pub async fn update_absence(
    State(state): State<AppState>,
    Path(absence_id): Path<i64>,
    Json(input): Json<UpdateAbsenceInput>,
) -> AppResult<Json<Absence>> {
    let service = AbsenceService::new(state.db);
    let absence = service.update(absence_id, input).await?;
    Ok(Json(absence))
}

/// Delete an absence record
pub async fn delete_absence(
    State(state): State<AppState>,
    Path(absence_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = AbsenceService::new(state.db);
    service.delete(absence_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
