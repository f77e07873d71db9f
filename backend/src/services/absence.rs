//! Absences and deductions service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AbsenceService {
    db: PgPool,
}

/// An absence or payroll deduction
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Absence {
    pub id: i64,
    pub employee_id: i64,
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
    pub object_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAbsenceInput {
    pub employee_id: i64,
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
    pub object_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAbsenceInput {
    pub employee_id: Option<i64>,
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
    pub object_id: Option<i64>,
}

const ABSENCE_COLUMNS: &str =
    "id, employee_id, kind, amount, date, comment, object_id, created_at";

impl AbsenceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateAbsenceInput) -> AppResult<Absence> {
        let absence = sqlx::query_as::<_, Absence>(&format!(
            r#"
            INSERT INTO absences (employee_id, kind, amount, date, comment, object_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ABSENCE_COLUMNS}
            "#
        ))
        .bind(input.employee_id)
        .bind(&input.kind)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.comment)
        .bind(input.object_id)
        .fetch_one(&self.db)
        .await?;

        Ok(absence)
    }

    pub async fn update(&self, id: i64, input: UpdateAbsenceInput) -> AppResult<Absence> {
        let absence = sqlx::query_as::<_, Absence>(&format!(
            r#"
            UPDATE absences
            SET employee_id = COALESCE($1, employee_id),
                kind = COALESCE($2, kind),
                amount = COALESCE($3, amount),
                date = COALESCE($4, date),
                comment = COALESCE($5, comment),
                object_id = COALESCE($6, object_id)
            WHERE id = $7
            RETURNING {ABSENCE_COLUMNS}
            "#
        ))
        .bind(input.employee_id)
        .bind(&input.kind)
        .bind(input.amount)
        .bind(input.date)
        .bind(&input.comment)
        .bind(input.object_id)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Absence".to_string()))?;

        Ok(absence)
    }

    pub async fn list(&self) -> AppResult<Vec<Absence>> {
        let absences = sqlx::query_as::<_, Absence>(&format!(
            "SELECT {ABSENCE_COLUMNS} FROM absences ORDER BY COALESCE(date, created_at::date) DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(absences)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM absences WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Absence".to_string()));
        }
        Ok(())
    }
}
