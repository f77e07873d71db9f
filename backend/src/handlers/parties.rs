//! HTTP handlers for supplier and customer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::party::{CreatePartyInput, Party, PartyKind, UpdatePartyInput};
use crate::services::PartyService;
use crate::AppState;

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreatePartyInput>,
) -> AppResult<(StatusCode, Json<Party>)> {
    let service = PartyService::new(state.db);
    let party = service.create(PartyKind::Supplier, input).await?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Party>>> {
    let service = PartyService::new(state.db);
    let parties = service.list(PartyKind::Supplier).await?;
    Ok(Json(parties))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
    Json(input): Json<UpdatePartyInput>,
) -> AppResult<Json<Party>> {
    let service = PartyService::new(state.db);
    let party = service.update(PartyKind::Supplier, supplier_id, input).await?;
    Ok(Json(party))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = PartyService::new(state.db);
    service.delete(PartyKind::Supplier, supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CreatePartyInput>,
) -> AppResult<(StatusCode, Json<Party>)> {
    let service = PartyService::new(state.db);
    let party = service.create(PartyKind::Customer, input).await?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// List all customers
pub async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Party>>> {
    let service = PartyService::new(state.db);
    let parties = service.list(PartyKind::Customer).await?;
    Ok(Json(parties))
}

/// Update a customer
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(input): Json<UpdatePartyInput>,
) -> AppResult<Json<Party>> {
    let service = PartyService::new(state.db);
    let party = service.update(PartyKind::Customer, customer_id, input).await?;
    Ok(Json(party))
}

/// Delete a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = PartyService::new(state.db);
    service.delete(PartyKind::Customer, customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
