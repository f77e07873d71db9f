//! Construction objects (sites) service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Object service for managing construction sites
#[derive(Clone)]
pub struct ObjectService {
    db: PgPool,
}

/// A construction site
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ConstructionObject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an object
#[derive(Debug, Deserialize)]
pub struct CreateObjectInput {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

/// Input for updating an object
#[derive(Debug, Default, Deserialize)]
pub struct UpdateObjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

const OBJECT_COLUMNS: &str =
    "id, name, description, address, start_date, end_date, budget, status, created_at";

impl ObjectService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateObjectInput) -> AppResult<ConstructionObject> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "name is required".to_string(),
                message_ru: "Укажите название объекта".to_string(),
            });
        }

        let object = sqlx::query_as::<_, ConstructionObject>(&format!(
            r#"
            INSERT INTO objects (name, description, address, start_date, end_date, budget, status)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'active'))
            RETURNING {OBJECT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.address)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.budget)
        .bind(&input.status)
        .fetch_one(&self.db)
        .await?;

        Ok(object)
    }

    pub async fn update(&self, id: i64, input: UpdateObjectInput) -> AppResult<ConstructionObject> {
        let object = sqlx::query_as::<_, ConstructionObject>(&format!(
            r#"
            UPDATE objects
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                address = COALESCE($3, address),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                budget = COALESCE($6, budget),
                status = COALESCE($7, status)
            WHERE id = $8
            RETURNING {OBJECT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.address)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.budget)
        .bind(&input.status)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Object".to_string()))?;

        Ok(object)
    }

    pub async fn get(&self, id: i64) -> AppResult<ConstructionObject> {
        sqlx::query_as::<_, ConstructionObject>(&format!(
            "SELECT {OBJECT_COLUMNS} FROM objects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Object".to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<ConstructionObject>> {
        let objects = sqlx::query_as::<_, ConstructionObject>(&format!(
            "SELECT {OBJECT_COLUMNS} FROM objects ORDER BY id DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(objects)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM objects WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Object".to_string()));
        }
        Ok(())
    }
}
