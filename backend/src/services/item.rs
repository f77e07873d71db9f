//! Material catalog (nomenclature) service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// A catalog item with default unit/type, dimensions and price
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub depth: Option<f64>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub depth: Option<f64>,
    pub price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub depth: Option<f64>,
    pub price: Option<f64>,
}

const ITEM_COLUMNS: &str =
    "id, name, unit, type AS material_type, width, height, length, depth, price, created_at";

impl ItemService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateItemInput) -> AppResult<Item> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "name is required".to_string(),
                message_ru: "Укажите наименование".to_string(),
            });
        }

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE name = $1")
                .bind(&input.name)
                .fetch_one(&self.db)
                .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, unit, type, width, height, length, depth, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.unit)
        .bind(&input.material_type)
        .bind(input.width)
        .bind(input.height)
        .bind(input.length)
        .bind(input.depth)
        .bind(input.price)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    pub async fn update(&self, id: i64, input: UpdateItemInput) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = COALESCE($1, name),
                unit = COALESCE($2, unit),
                type = COALESCE($3, type),
                width = COALESCE($4, width),
                height = COALESCE($5, height),
                length = COALESCE($6, length),
                depth = COALESCE($7, depth),
                price = COALESCE($8, price)
            WHERE id = $9
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.unit)
        .bind(&input.material_type)
        .bind(input.width)
        .bind(input.height)
        .bind(input.length)
        .bind(input.depth)
        .bind(input.price)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(item)
    }

    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }
        Ok(())
    }
}
