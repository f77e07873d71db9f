//! HTTP handlers for cash desk endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::cash::{CashTransaction, CreateCashInput, UpdateCashInput};
use crate::services::CashService;
use crate::AppState;

/// Record a cash income or expense
pub async fn create_cash_transaction(
    State(state): State<AppState>,
    Json(input): Json<CreateCashInput>,
) -> AppResult<(StatusCode, Json<CashTransaction>)> {
    let service = CashService::new(state.db);
    let transaction = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// List all cash transactions
pub async fn list_cash_transactions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CashTransaction>>> {
    let service = CashService::new(state.db);
    let transactions = service.list().await?;
    Ok(Json(transactions))
}

/// Update a cash transaction
pub async fn update_cash_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
    Json(input): Json<UpdateCashInput>,
) -> AppResult<Json<CashTransaction>> {
    let service = CashService::new(state.db);
    let transaction = service.update(transaction_id, input).await?;
    Ok(Json(transaction))
}

/// Delete a cash transaction
pub async fn delete_cash_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = CashService::new(state.db);
    service.delete(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
