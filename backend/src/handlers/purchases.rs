//! HTTP handlers for purchase and stock endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::purchase::{
    CreatePurchaseInput, Purchase, StockBalance, StockSummaryRow, UpdatePurchaseInput,
};
use crate::services::PurchaseService;
use crate::AppState;

/// Query parameters for the stock availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub item: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
}

/// Create a purchase; outflow statuses are gated on available stock
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseInput>,
) -> AppResult<(StatusCode, Json<Purchase>)> {
    let service = PurchaseService::new(state.db);
    let purchase = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Get a purchase by ID
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<i64>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.get(purchase_id).await?;
    Ok(Json(purchase))
}

/// List all purchases
pub async fn list_purchases(State(state): State<AppState>) -> AppResult<Json<Vec<Purchase>>> {
    let service = PurchaseService::new(state.db);
    let purchases = service.list().await?;
    Ok(Json(purchases))
}

/// Update a purchase; the stock gate re-checks the resulting movement
pub async fn update_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<i64>,
    Json(input): Json<UpdatePurchaseInput>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.update(purchase_id, input).await?;
    Ok(Json(purchase))
}

/// Delete a purchase
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = PurchaseService::new(state.db);
    service.delete(purchase_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Available stock balance for one item/unit/type bucket
pub async fn get_stock_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<StockBalance>> {
    let service = PurchaseService::new(state.db);
    let balance = service
        .available_for(
            &query.item,
            query.unit.as_deref(),
            query.material_type.as_deref(),
        )
        .await?;
    Ok(Json(balance))
}

/// Stock summary across all recorded item/unit/type combinations
pub async fn get_stock_summary(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StockSummaryRow>>> {
    let service = PurchaseService::new(state.db);
    let summary = service.stock_summary().await?;
    Ok(Json(summary))
}

/// Stock movement history (purchases with an inflow or outflow status)
pub async fn get_stock_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Purchase>>> {
    let service = PurchaseService::new(state.db);
    let movements = service.history().await?;
    Ok(Json(movements))
}
