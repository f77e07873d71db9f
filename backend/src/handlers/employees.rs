//! HTTP handlers for employee endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::employee::{CreateEmployeeInput, Employee, UpdateEmployeeInput};
use crate::services::EmployeeService;
use crate::AppState;

/// Create an employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let service = EmployeeService::new(state.db);
    let employee = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get an employee by ID
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service.get(employee_id).await?;
    Ok(Json(employee))
}

/// List all employees
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let service = EmployeeService::new(state.db);
    let employees = service.list().await?;
    Ok(Json(employees))
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service.update(employee_id, input).await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = EmployeeService::new(state.db);
    service.delete(employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
