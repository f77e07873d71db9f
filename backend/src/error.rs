//! Error handling for the SiteLedger back-office API
//!
//! Provides consistent error responses in Russian and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ledger::StockShortage;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String, message_ru: String },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_ru: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // The central domain error: an outflow would overdraw a stock bucket.
    // Always recoverable by the caller adjusting quantity or status.
    #[error("Insufficient stock for {}: requested {}, available {}", .0.item, .0.requested, .0.available)]
    StockInsufficient(StockShortage),

    // Database errors. Storage failures are surfaced as 500s and never
    // retried silently; masking a partial write in a financial ledger is
    // unacceptable.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_ru: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Machine-readable shortage figures, present only for
    /// `STOCK_INSUFFICIENT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<StockShortage>,
}

impl ErrorDetail {
    fn new(code: &str, message_en: String, message_ru: String) -> Self {
        Self {
            code: code.to_string(),
            message_en,
            message_ru,
            field: None,
            stock: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new(
                    "INVALID_CREDENTIALS",
                    "Invalid username or password".to_string(),
                    "Неверное имя пользователя или пароль".to_string(),
                ),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new(
                    "TOKEN_EXPIRED",
                    "Token has expired".to_string(),
                    "Срок действия токена истёк".to_string(),
                ),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new(
                    "INVALID_TOKEN",
                    "Invalid token".to_string(),
                    "Недействительный токен".to_string(),
                ),
            ),
            AppError::Unauthorized {
                message,
                message_ru,
            } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("UNAUTHORIZED", message.clone(), message_ru.clone()),
            ),
            AppError::Validation {
                field,
                message,
                message_ru,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone(), message_ru.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(
                    "VALIDATION_ERROR",
                    msg.clone(),
                    format!("Некорректные данные: {}", msg),
                ),
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new(
                        "DUPLICATE_ENTRY",
                        format!("A record with this {} already exists", field),
                        format!("Запись с таким {} уже существует", field),
                    )
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new(
                    "NOT_FOUND",
                    format!("{} not found", resource),
                    format!("{} не найдено", resource),
                ),
            ),
            AppError::StockInsufficient(shortage) => {
                let unit = shortage.unit.as_deref().unwrap_or("");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorDetail {
                        stock: Some(shortage.clone()),
                        ..ErrorDetail::new(
                            "STOCK_INSUFFICIENT",
                            format!(
                                "Insufficient stock. Available: {} {}. Requested: {} {}.",
                                shortage.available, unit, shortage.requested, unit
                            ),
                            format!(
                                "Недостаточно на складе. Доступно: {} {}. Запрошено: {} {}.",
                                shortage.available, unit, shortage.requested, unit
                            ),
                        )
                    },
                )
            }
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    "Ошибка базы данных".to_string(),
                ),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "CONFIGURATION_ERROR",
                    format!("Configuration error: {}", msg),
                    format!("Ошибка конфигурации: {}", msg),
                ),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    msg.clone(),
                    "Внутренняя ошибка сервера".to_string(),
                ),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    "Внутренняя ошибка сервера".to_string(),
                ),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// The shortage response carries the machine-readable figures next to
    /// both messages.
    #[tokio::test]
    async fn stock_insufficient_response_shape() {
        let err = AppError::StockInsufficient(StockShortage {
            available: 100.0,
            requested: 150.0,
            item: "Brick".to_string(),
            unit: Some("pcs".to_string()),
            mtype: Some("materials".to_string()),
        });
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "STOCK_INSUFFICIENT");
        assert_eq!(
            body["error"]["stock"],
            serde_json::json!({
                "available": 100.0,
                "requested": 150.0,
                "item": "Brick",
                "unit": "pcs",
                "type": "materials",
            })
        );
        let ru = body["error"]["message_ru"].as_str().unwrap();
        assert!(ru.contains("Недостаточно на складе"));
        assert!(ru.contains("100"));
        assert!(ru.contains("150"));
    }

    /// Non-stock errors omit the stock and field keys entirely
    #[tokio::test]
    async fn not_found_response_shape() {
        let (status, body) = body_json(AppError::NotFound("Purchase".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"].get("stock").is_none());
        assert!(body["error"].get("field").is_none());
    }

    /// Validation errors name the offending field
    #[tokio::test]
    async fn validation_response_carries_field() {
        let err = AppError::Validation {
            field: "qty".to_string(),
            message: "quantity cannot be negative".to_string(),
            message_ru: "Некорректное количество".to_string(),
        };
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "qty");
    }
}
