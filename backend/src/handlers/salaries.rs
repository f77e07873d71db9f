//! HTTP handlers for salary accrual endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::salary::{CreateSalaryInput, Salary, UpdateSalaryInput};
use crate::services::SalaryService;
use crate::AppState;

/// Create a salary accrual
pub async fn create_salary(
    State(state): State<AppState>,
    Json(input): Json<CreateSalaryInput>,
) -> AppResult<(StatusCode, Json<Salary>)> {
    let service = SalaryService::new(state.db);
    let salary = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(salary)))
}

/// List all salary accruals
pub async fn list_salaries(State(state): State<AppState>) -> AppResult<Json<Vec<Salary>>> {
    let service = SalaryService::new(state.db);
    let salaries = service.list().await?;
    Ok(Json(salaries))
}

/// Update a salary accrual
pub async fn update_salary(
    State(state): State<AppState>,
    Path(salary_id): Path<i64>,
    Json(input): Json<UpdateSalaryInput>,
) -> AppResult<Json<Salary>> {
    let service = SalaryService::new(state.db);
    let salary = service.update(salary_id, input).await?;
    Ok(Json(salary))
}

/// Delete a salary accrual
pub async fn delete_salary(
    State(state): State<AppState>,
    Path(salary_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = SalaryService::new(state.db);
    service.delete(salary_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
