//! HTTP handlers for payment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::payment::{CreatePaymentInput, Payment, UpdatePaymentInput};
use crate::services::PaymentService;
use crate::AppState;

/// Record a payment against a source document
pub async fn create_payment(
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentInput>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let service = PaymentService::new(state.db);
    let payment = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// List all payments
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<Payment>>> {
    let service = PaymentService::new(state.db);
    let payments = service.list().await?;
    Ok(Json(payments))
}

/// Update a payment
pub async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Json(input): Json<UpdatePaymentInput>,
) -> AppResult<Json<Payment>> {
    let service = PaymentService::new(state.db);
    let payment = service.update(payment_id, input).await?;
    Ok(Json(payment))
}

/// Delete a payment
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = PaymentService::new(state.db);
    service.delete(payment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
