//! HTTP handlers for financial report endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::services::finance::{JournalEntry, PayablesReport, ReceivableEntry, ReportFilter};
use crate::services::FinanceService;
use crate::AppState;
use shared::finance::{CashflowReport, PnlReport};

/// Unified chronological journal of income and expenses
pub async fn get_journal(State(state): State<AppState>) -> AppResult<Json<Vec<JournalEntry>>> {
    let service = FinanceService::new(state.db);
    let entries = service.journal().await?;
    Ok(Json(entries))
}

/// Invoices with outstanding amounts
pub async fn get_receivables(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReceivableEntry>>> {
    let service = FinanceService::new(state.db);
    let entries = service.receivables().await?;
    Ok(Json(entries))
}

/// Debts to suppliers and employees
pub async fn get_payables(State(state): State<AppState>) -> AppResult<Json<PayablesReport>> {
    let service = FinanceService::new(state.db);
    let report = service.payables().await?;
    Ok(Json(report))
}

/// Profit and loss for an optional date range and object
pub async fn get_pnl(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<PnlReport>> {
    let service = FinanceService::new(state.db);
    let report = service.pnl(&filter).await?;
    Ok(Json(report))
}

/// Cashflow split by payment method
pub async fn get_cashflow(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<CashflowReport>> {
    let service = FinanceService::new(state.db);
    let report = service.cashflow(&filter).await?;
    Ok(Json(report))
}
