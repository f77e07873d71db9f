//! Route definitions for the SiteLedger back-office API

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public login/register, protected profile)
        .nest("/auth", auth_routes())
        // Protected routes - construction objects
        .nest("/objects", object_routes())
        // Protected routes - employees
        .nest("/employees", employee_routes())
        // Protected routes - counterparties
        .nest("/suppliers", supplier_routes())
        .nest("/customers", customer_routes())
        // Protected routes - catalog items
        .nest("/items", item_routes())
        // Protected routes - purchases and the stock ledger
        .nest("/purchases", purchase_routes())
        .nest("/materials", material_routes())
        // Protected routes - payroll
        .nest("/salaries", salary_routes())
        .nest("/absences", absence_routes())
        // Protected routes - money
        .nest("/invoices", invoice_routes())
        .nest("/payments", payment_routes())
        .nest("/cash", cash_routes())
        .nest("/expenses", expense_routes())
        // Protected routes - derived financial reports
        .nest("/finance", finance_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::me))
                .route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// Construction object routes (protected)
fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_objects).post(handlers::create_object))
        .route(
            "/:object_id",
            get(handlers::get_object)
                .put(handlers::update_object)
                .delete(handlers::delete_object),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Employee routes (protected)
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_employees).post(handlers::create_employee))
        .route(
            "/:employee_id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            put(handlers::update_supplier).delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Customer routes (protected)
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_customers).post(handlers::create_customer))
        .route(
            "/:customer_id",
            put(handlers::update_customer).delete(handlers::delete_customer),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Catalog item routes (protected)
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase routes (protected)
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchases).post(handlers::create_purchase))
        .route(
            "/:purchase_id",
            get(handlers::get_purchase)
                .put(handlers::update_purchase)
                .delete(handlers::delete_purchase),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock ledger routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/available", get(handlers::get_stock_availability))
        .route("/stock", get(handlers::get_stock_summary))
        .route("/history", get(handlers::get_stock_history))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Salary routes (protected)
fn salary_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_salaries).post(handlers::create_salary))
        .route(
            "/:salary_id",
            put(handlers::update_salary).delete(handlers::delete_salary),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Absence routes (protected)
fn absence_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_absences).post(handlers::create_absence))
        .route(
            "/:absence_id",
            put(handlers::update_absence).delete(handlers::delete_absence),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Invoice routes (protected)
fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_invoices).post(handlers::create_invoice))
        .route(
            "/:invoice_id",
            get(handlers::get_invoice)
                .put(handlers::update_invoice)
                .delete(handlers::delete_invoice),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Payment routes (protected)
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_payments).post(handlers::create_payment))
        .route(
            "/:payment_id",
            put(handlers::update_payment).delete(handlers::delete_payment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Cash desk routes (protected)
fn cash_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_cash_transactions).post(handlers::create_cash_transaction),
        )
        .route(
            "/:transaction_id",
            put(handlers::update_cash_transaction)
                .delete(handlers::delete_cash_transaction),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Other-expense routes (protected)
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_expenses).post(handlers::create_expense))
        .route(
            "/:expense_id",
            put(handlers::update_expense).delete(handlers::delete_expense),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Financial report routes (protected)
fn finance_routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(handlers::get_journal))
        .route("/receivables", get(handlers::get_receivables))
        .route("/payables", get(handlers::get_payables))
        .route("/pnl", get(handlers::get_pnl))
        .route("/cashflow", get(handlers::get_cashflow))
        .route_layer(middleware::from_fn(auth_middleware))
}
