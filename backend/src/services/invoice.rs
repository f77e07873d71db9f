//! Outgoing invoices service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::validation::validate_amount;

#[derive(Clone)]
pub struct InvoiceService {
    db: PgPool,
}

/// An invoice issued to a customer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i64,
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub customer: Option<String>,
    pub customer_details: Option<String>,
    pub description: Option<String>,
    pub object_id: Option<i64>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceInput {
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub customer: Option<String>,
    pub customer_details: Option<String>,
    pub description: Option<String>,
    pub object_id: Option<i64>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceInput {
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub customer: Option<String>,
    pub customer_details: Option<String>,
    pub description: Option<String>,
    pub object_id: Option<i64>,
    pub comment: Option<String>,
}

const INVOICE_COLUMNS: &str = r#"id, number, date, amount, status, due_date, customer,
           customer_details, description, object_id, comment, created_at, updated_at"#;

impl InvoiceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateInvoiceInput) -> AppResult<Invoice> {
        validate_amount(input.amount).map_err(|msg| AppError::Validation {
            field: "amount".to_string(),
            message: msg.to_string(),
            message_ru: "Некорректная сумма".to_string(),
        })?;

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (number, date, amount, status, due_date, customer,
                                  customer_details, description, object_id, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(&input.number)
        .bind(input.date)
        .bind(input.amount)
        .bind(&input.status)
        .bind(input.due_date)
        .bind(&input.customer)
        .bind(&input.customer_details)
        .bind(&input.description)
        .bind(input.object_id)
        .bind(&input.comment)
        .fetch_one(&self.db)
        .await?;

        Ok(invoice)
    }

    pub async fn update(&self, id: i64, input: UpdateInvoiceInput) -> AppResult<Invoice> {
        validate_amount(input.amount).map_err(|msg| AppError::Validation {
            field: "amount".to_string(),
            message: msg.to_string(),
            message_ru: "Некорректная сумма".to_string(),
        })?;

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices
            SET number = COALESCE($1, number),
                date = COALESCE($2, date),
                amount = COALESCE($3, amount),
                status = COALESCE($4, status),
                due_date = COALESCE($5, due_date),
                customer = COALESCE($6, customer),
                customer_details = COALESCE($7, customer_details),
                description = COALESCE($8, description),
                object_id = COALESCE($9, object_id),
                comment = COALESCE($10, comment),
                updated_at = now()
            WHERE id = $11
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(&input.number)
        .bind(input.date)
        .bind(input.amount)
        .bind(&input.status)
        .bind(input.due_date)
        .bind(&input.customer)
        .bind(&input.customer_details)
        .bind(&input.description)
        .bind(input.object_id)
        .bind(&input.comment)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;

        Ok(invoice)
    }

    pub async fn get(&self, id: i64) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice".to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(invoices)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Invoice".to_string()));
        }
        Ok(())
    }
}
