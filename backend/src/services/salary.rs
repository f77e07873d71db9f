//! Salary accruals service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SalaryService {
    db: PgPool,
}

/// A salary accrual for an employee
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Salary {
    pub id: i64,
    pub employee_id: i64,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub kind: Option<String>,
    pub object_id: Option<i64>,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSalaryInput {
    pub employee_id: i64,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub kind: Option<String>,
    pub object_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSalaryInput {
    pub employee_id: Option<i64>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub kind: Option<String>,
    pub object_id: Option<i64>,
    pub paid: Option<bool>,
}

const SALARY_COLUMNS: &str =
    "id, employee_id, amount, date, reason, kind, object_id, paid, paid_at, created_at";

impl SalaryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateSalaryInput) -> AppResult<Salary> {
        let salary = sqlx::query_as::<_, Salary>(&format!(
            r#"
            INSERT INTO salaries (employee_id, amount, date, reason, kind, object_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SALARY_COLUMNS}
            "#
        ))
        .bind(input.employee_id)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.reason)
        .bind(&input.kind)
        .bind(input.object_id)
        .fetch_one(&self.db)
        .await?;

        Ok(salary)
    }

    /// Partial update; marking `paid` also stamps `paid_at`.
    pub async fn update(&self, id: i64, input: UpdateSalaryInput) -> AppResult<Salary> {
        let salary = sqlx::query_as::<_, Salary>(&format!(
            r#"
            UPDATE salaries
            SET employee_id = COALESCE($1, employee_id),
                amount = COALESCE($2, amount),
                date = COALESCE($3, date),
                reason = COALESCE($4, reason),
                kind = COALESCE($5, kind),
                object_id = COALESCE($6, object_id),
                paid = COALESCE($7, paid),
                paid_at = CASE WHEN $7 IS TRUE THEN now() ELSE paid_at END
            WHERE id = $8
            RETURNING {SALARY_COLUMNS}
            "#
        ))
        .bind(input.employee_id)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.reason)
        .bind(&input.kind)
        .bind(input.object_id)
        .bind(input.paid)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Salary".to_string()))?;

        Ok(salary)
    }

    pub async fn list(&self) -> AppResult<Vec<Salary>> {
        let salaries = sqlx::query_as::<_, Salary>(&format!(
            "SELECT {SALARY_COLUMNS} FROM salaries ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(salaries)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM salaries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Salary".to_string()));
        }
        Ok(())
    }
}
