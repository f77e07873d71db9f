//! Other (non-purchase) expenses service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
}

/// An expense outside the purchases ledger (rent, services, fees)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Expense {
    pub id: i64,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub object_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub description: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseInput {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub object_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub description: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseInput {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub object_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub description: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

const EXPENSE_COLUMNS: &str = r#"id, category, amount, date, object_id, supplier_id,
           description, payment_status, due_date, created_at"#;

impl ExpenseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateExpenseInput) -> AppResult<Expense> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO other_expenses (category, amount, date, object_id, supplier_id,
                                        description, payment_status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.date)
        .bind(input.object_id)
        .bind(input.supplier_id)
        .bind(&input.description)
        .bind(&input.payment_status)
        .bind(input.due_date)
        .fetch_one(&self.db)
        .await?;

        Ok(expense)
    }

    pub async fn update(&self, id: i64, input: UpdateExpenseInput) -> AppResult<Expense> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE other_expenses
            SET category = COALESCE($1, category),
                amount = COALESCE($2, amount),
                date = COALESCE($3, date),
                object_id = COALESCE($4, object_id),
                supplier_id = COALESCE($5, supplier_id),
                description = COALESCE($6, description),
                payment_status = COALESCE($7, payment_status),
                due_date = COALESCE($8, due_date)
            WHERE id = $9
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.date)
        .bind(input.object_id)
        .bind(input.supplier_id)
        .bind(&input.description)
        .bind(&input.payment_status)
        .bind(input.due_date)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense".to_string()))?;

        Ok(expense)
    }

    pub async fn list(&self) -> AppResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM other_expenses ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(expenses)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM other_expenses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }
        Ok(())
    }
}
