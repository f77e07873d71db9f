//! HTTP handlers for customer invoice endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::invoice::{CreateInvoiceInput, Invoice, UpdateInvoiceInput};
use crate::services::InvoiceService;
use crate::AppState;

/// Create an invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(input): Json<CreateInvoiceInput>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    let service = InvoiceService::new(state.db);
    let invoice = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Get an invoice by ID
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    let service = InvoiceService::new(state.db);
    let invoice = service.get(invoice_id).await?;
    Ok(Json(invoice))
}

/// List all invoices
pub async fn list_invoices(State(state): State<AppState>) -> AppResult<Json<Vec<Invoice>>> {
    let service = InvoiceService::new(state.db);
    let invoices = service.list().await?;
    Ok(Json(invoices))
}

/// Update an invoice
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
    Json(input): Json<UpdateInvoiceInput>,
) -> AppResult<Json<Invoice>> {
    let service = InvoiceService::new(state.db);
    let invoice = service.update(invoice_id, input).await?;
    Ok(Json(invoice))
}

/// Delete an invoice
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = InvoiceService::new(state.db);
    service.delete(invoice_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
