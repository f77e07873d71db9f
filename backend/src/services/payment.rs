//! Unified payments applied to a source document.
//!
//! A payment's sign carries its direction: positive amounts are money in,
//! negative amounts are money out. The cashflow report relies on this.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PaymentService {
    db: PgPool,
}

/// What kind of document a payment settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    Invoice,
    Purchase,
    Salary,
    Other,
}

impl PaymentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentSource::Invoice => "invoice",
            PaymentSource::Purchase => "purchase",
            PaymentSource::Salary => "salary",
            PaymentSource::Other => "other",
        }
    }
}

/// A recorded payment
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub source_type: String,
    pub source_id: i64,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub counterparty: Option<String>,
    pub object_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentInput {
    pub source_type: PaymentSource,
    pub source_id: i64,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub counterparty: Option<String>,
    pub object_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePaymentInput {
    pub source_type: Option<PaymentSource>,
    pub source_id: Option<i64>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub counterparty: Option<String>,
    pub object_id: Option<i64>,
    pub notes: Option<String>,
}

const PAYMENT_COLUMNS: &str = r#"id, source_type, source_id, amount, date, method,
           counterparty, object_id, notes, created_at"#;

impl PaymentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreatePaymentInput) -> AppResult<Payment> {
        if !input.amount.is_finite() {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "amount must be a finite number".to_string(),
                message_ru: "Некорректная сумма".to_string(),
            });
        }

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (source_type, source_id, amount, date, method,
                                  counterparty, object_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(input.source_type.as_str())
        .bind(input.source_id)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.method)
        .bind(&input.counterparty)
        .bind(input.object_id)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(payment)
    }

    pub async fn update(&self, id: i64, input: UpdatePaymentInput) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET source_type = COALESCE($1, source_type),
                source_id = COALESCE($2, source_id),
                amount = COALESCE($3, amount),
                date = COALESCE($4, date),
                method = COALESCE($5, method),
                counterparty = COALESCE($6, counterparty),
                object_id = COALESCE($7, object_id),
                notes = COALESCE($8, notes)
            WHERE id = $9
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(input.source_type.map(|s| s.as_str()))
        .bind(input.source_id)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.method)
        .bind(&input.counterparty)
        .bind(input.object_id)
        .bind(&input.notes)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment".to_string()))?;

        Ok(payment)
    }

    pub async fn list(&self) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(payments)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Payment".to_string()));
        }
        Ok(())
    }
}
