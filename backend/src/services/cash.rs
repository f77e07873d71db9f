//! Cash-desk transactions service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CashService {
    db: PgPool,
}

/// Direction of a cash transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashKind {
    Income,
    Expense,
}

impl CashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashKind::Income => "income",
            CashKind::Expense => "expense",
        }
    }
}

/// A cash-desk transaction
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CashTransaction {
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub object_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCashInput {
    pub kind: CashKind,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub object_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCashInput {
    pub kind: Option<CashKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub object_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub notes: Option<String>,
}

const CASH_COLUMNS: &str = r#"id, kind, amount, category, description, date,
           payment_method, object_id, employee_id, notes, created_at"#;

impl CashService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateCashInput) -> AppResult<CashTransaction> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "amount must be a non-negative number".to_string(),
                message_ru: "Сумма не может быть отрицательной".to_string(),
            });
        }

        let transaction = sqlx::query_as::<_, CashTransaction>(&format!(
            r#"
            INSERT INTO cash_transactions (kind, amount, category, description, date,
                                           payment_method, object_id, employee_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CASH_COLUMNS}
            "#
        ))
        .bind(input.kind.as_str())
        .bind(input.amount)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.date)
        .bind(&input.payment_method)
        .bind(input.object_id)
        .bind(input.employee_id)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(transaction)
    }

    pub async fn update(&self, id: i64, input: UpdateCashInput) -> AppResult<CashTransaction> {
        let transaction = sqlx::query_as::<_, CashTransaction>(&format!(
            r#"
            UPDATE cash_transactions
            SET kind = COALESCE($1, kind),
                amount = COALESCE($2, amount),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                date = COALESCE($5, date),
                payment_method = COALESCE($6, payment_method),
                object_id = COALESCE($7, object_id),
                employee_id = COALESCE($8, employee_id),
                notes = COALESCE($9, notes)
            WHERE id = $10
            RETURNING {CASH_COLUMNS}
            "#
        ))
        .bind(input.kind.map(|k| k.as_str()))
        .bind(input.amount)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.date)
        .bind(&input.payment_method)
        .bind(input.object_id)
        .bind(input.employee_id)
        .bind(&input.notes)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cash transaction".to_string()))?;

        Ok(transaction)
    }

    pub async fn list(&self) -> AppResult<Vec<CashTransaction>> {
        let transactions = sqlx::query_as::<_, CashTransaction>(&format!(
            "SELECT {CASH_COLUMNS} FROM cash_transactions ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(transactions)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cash_transactions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cash transaction".to_string()));
        }
        Ok(())
    }
}
