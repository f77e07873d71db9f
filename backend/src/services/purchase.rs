//! Purchases: the movement store behind the materials stock ledger.
//!
//! Create and update run through the availability gate from `shared::ledger`
//! inside a single transaction. A per-stock-key advisory lock serializes
//! concurrent outflows against the same bucket, so two requests cannot both
//! read the same balance and overdraw it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, AppResult};
use shared::ledger::{
    self, check_outflow_create, check_outflow_update, overlay_movement, Movement, MovementPatch,
    StockKey, IN_STATUSES, OUT_STATUSES,
};
use shared::validation::{validate_item_name, validate_quantity};

/// Purchase service managing movements and stock queries
#[derive(Clone)]
pub struct PurchaseService {
    db: PgPool,
}

/// A purchase record: one inflow or outflow movement plus descriptive fields
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Purchase {
    pub id: i64,
    pub item: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub object_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub url: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    fn as_movement(&self) -> Movement {
        Movement {
            id: self.id,
            item: self.item.clone(),
            unit: self.unit.clone(),
            mtype: self.material_type.clone(),
            qty: self.qty,
            status: self.status.clone(),
        }
    }
}

/// Input for creating a purchase
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseInput {
    pub item: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub object_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub url: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Input for partially updating a purchase; absent fields keep their value
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePurchaseInput {
    pub item: Option<String>,
    pub qty: Option<f64>,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub object_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub url: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// One row of the stock summary report.
///
/// Grouping is by raw (item, unit, type) as entered, so spelling variants of
/// one normalized bucket show up as separate rows here.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct StockSummaryRow {
    pub item: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub in_qty: f64,
    pub out_qty: f64,
    pub balance: f64,
}

/// Current available balance for a normalized stock key
#[derive(Debug, Serialize)]
pub struct StockBalance {
    pub item: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub available: f64,
}

const PURCHASE_COLUMNS: &str = r#"id, item, qty, unit, type AS material_type, status, amount,
           date, notes, object_id, assignee_id, supplier_id, url,
           payment_status, due_date, created_at"#;

impl PurchaseService {
    /// Create a new PurchaseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a movement, rejecting outflows that would overdraw the stock
    pub async fn create(&self, input: CreatePurchaseInput) -> AppResult<Purchase> {
        validate_item_name(&input.item).map_err(|msg| AppError::Validation {
            field: "item".to_string(),
            message: msg.to_string(),
            message_ru: "Укажите наименование".to_string(),
        })?;
        validate_quantity(input.qty).map_err(|msg| AppError::Validation {
            field: "qty".to_string(),
            message: msg.to_string(),
            message_ru: "Некорректное количество".to_string(),
        })?;

        let candidate = Movement {
            id: 0,
            item: input.item.clone(),
            unit: input.unit.clone(),
            mtype: input.material_type.clone(),
            qty: input.qty,
            status: input.status.clone(),
        };

        let mut tx = self.db.begin().await?;

        // The gate only needs the lock and the balance read for outflows;
        // inflows and neutral statuses insert directly.
        if ledger::direction_of(candidate.status.as_deref().unwrap_or(""))
            == Some(ledger::Direction::Out)
            && candidate.qty.unwrap_or(0.0) > 0.0
        {
            let key = StockKey::of_movement(&candidate);
            Self::lock_stock_key(&mut tx, &key).await?;
            let existing = Self::movements_for_item(&mut tx, &candidate.item).await?;
            check_outflow_create(&existing, &candidate).map_err(AppError::StockInsufficient)?;
        }

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            INSERT INTO purchases (item, qty, unit, type, status, amount, date, notes,
                                   object_id, assignee_id, supplier_id, url,
                                   payment_status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(&input.item)
        .bind(input.qty)
        .bind(&input.unit)
        .bind(&input.material_type)
        .bind(&input.status)
        .bind(input.amount)
        .bind(date)
        .bind(&input.notes)
        .bind(input.object_id)
        .bind(input.assignee_id)
        .bind(input.supplier_id)
        .bind(&input.url)
        .bind(&input.payment_status)
        .bind(input.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(purchase)
    }

    /// Partially update a movement.
    ///
    /// The target state is the existing record with the patch overlaid; if
    /// that target is an outflow, it is validated with the record's own old
    /// outflow quantity added back to the available balance.
    pub async fn update(&self, id: i64, input: UpdatePurchaseInput) -> AppResult<Purchase> {
        validate_quantity(input.qty).map_err(|msg| AppError::Validation {
            field: "qty".to_string(),
            message: msg.to_string(),
            message_ru: "Некорректное количество".to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase".to_string()))?;

        let current_movement = current.as_movement();
        let patch = MovementPatch {
            item: input.item.clone(),
            unit: input.unit.clone(),
            mtype: input.material_type.clone(),
            qty: input.qty,
            status: input.status.clone(),
        };
        let target = overlay_movement(&current_movement, &patch);

        if ledger::direction_of(target.status.as_deref().unwrap_or(""))
            == Some(ledger::Direction::Out)
            && target.qty.unwrap_or(0.0) > 0.0
        {
            let key = StockKey::of_movement(&target);
            Self::lock_stock_key(&mut tx, &key).await?;
            let movements = Self::movements_for_item(&mut tx, &target.item).await?;
            check_outflow_update(&movements, &current_movement, &target)
                .map_err(AppError::StockInsufficient)?;
        }

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            UPDATE purchases
            SET item = $1, qty = $2, unit = $3, type = $4, status = $5,
                amount = $6, date = $7, notes = $8, object_id = $9,
                assignee_id = $10, supplier_id = $11, url = $12,
                payment_status = $13, due_date = $14
            WHERE id = $15
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(&target.item)
        .bind(target.qty)
        .bind(&target.unit)
        .bind(&target.mtype)
        .bind(&target.status)
        .bind(input.amount.or(current.amount))
        .bind(input.date.or(current.date))
        .bind(input.notes.or(current.notes))
        .bind(input.object_id.or(current.object_id))
        .bind(input.assignee_id.or(current.assignee_id))
        .bind(input.supplier_id.or(current.supplier_id))
        .bind(input.url.or(current.url))
        .bind(input.payment_status.or(current.payment_status))
        .bind(input.due_date.or(current.due_date))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(purchase)
    }

    /// Get a purchase by id
    pub async fn get(&self, id: i64) -> AppResult<Purchase> {
        sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase".to_string()))
    }

    /// List all purchases, newest first
    pub async fn list(&self) -> AppResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            SELECT {PURCHASE_COLUMNS} FROM purchases
            ORDER BY COALESCE(date, created_at::date) DESC, id DESC
            "#
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(purchases)
    }

    /// Delete a purchase
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase".to_string()));
        }
        Ok(())
    }

    /// Available balance for a normalized stock key
    pub async fn available_for(
        &self,
        item: &str,
        unit: Option<&str>,
        material_type: Option<&str>,
    ) -> AppResult<StockBalance> {
        validate_item_name(item).map_err(|msg| AppError::Validation {
            field: "item".to_string(),
            message: msg.to_string(),
            message_ru: "Укажите наименование".to_string(),
        })?;

        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, item, qty, unit, type AS mtype, status
            FROM purchases
            WHERE lower(item) = lower($1)
            "#,
        )
        .bind(item)
        .fetch_all(&self.db)
        .await?;

        let movements: Vec<Movement> = rows.into_iter().map(Movement::from).collect();
        let key = StockKey::new(item, unit, material_type);

        Ok(StockBalance {
            item: item.to_string(),
            unit: unit.map(str::to_string),
            material_type: material_type.map(str::to_string),
            available: ledger::available_for(&movements, &key),
        })
    }

    /// Stock summary grouped by raw (item, unit, type)
    pub async fn stock_summary(&self) -> AppResult<Vec<StockSummaryRow>> {
        let rows = sqlx::query_as::<_, StockSummaryRow>(
            r#"
            SELECT item, unit, type AS material_type,
                   COALESCE(SUM(CASE WHEN lower(COALESCE(status, '')) = ANY($1)
                                     THEN COALESCE(qty, 0) ELSE 0 END), 0) AS in_qty,
                   COALESCE(SUM(CASE WHEN lower(COALESCE(status, '')) = ANY($2)
                                     THEN COALESCE(qty, 0) ELSE 0 END), 0) AS out_qty,
                   COALESCE(SUM(CASE WHEN lower(COALESCE(status, '')) = ANY($1)
                                     THEN COALESCE(qty, 0)
                                     WHEN lower(COALESCE(status, '')) = ANY($2)
                                     THEN -COALESCE(qty, 0) ELSE 0 END), 0) AS balance
            FROM purchases
            GROUP BY item, unit, type
            ORDER BY lower(item)
            "#,
        )
        .bind(status_vec(&IN_STATUSES))
        .bind(status_vec(&OUT_STATUSES))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    /// Movement history: purchases whose status is in the IN or OUT set
    pub async fn history(&self) -> AppResult<Vec<Purchase>> {
        let mut statuses = status_vec(&IN_STATUSES);
        statuses.extend(status_vec(&OUT_STATUSES));

        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            SELECT {PURCHASE_COLUMNS} FROM purchases
            WHERE lower(COALESCE(status, '')) = ANY($1)
            ORDER BY COALESCE(date, created_at::date) DESC, id DESC
            "#
        ))
        .bind(statuses)
        .fetch_all(&self.db)
        .await?;
        Ok(purchases)
    }

    /// Serialize concurrent outflows against one stock bucket for the rest
    /// of the transaction.
    async fn lock_stock_key(
        tx: &mut Transaction<'_, Postgres>,
        key: &StockKey,
    ) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(key.lock_tag())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Load all movements for an item (any unit/type spelling); the ledger
    /// core filters them down to the normalized key.
    async fn movements_for_item(
        tx: &mut Transaction<'_, Postgres>,
        item: &str,
    ) -> AppResult<Vec<Movement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, item, qty, unit, type AS mtype, status
            FROM purchases
            WHERE lower(item) = lower($1)
            "#,
        )
        .bind(item)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(Movement::from).collect())
    }
}

/// Ledger projection of a purchase row
#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    id: i64,
    item: String,
    qty: Option<f64>,
    unit: Option<String>,
    mtype: Option<String>,
    status: Option<String>,
}

impl From<MovementRow> for Movement {
    fn from(row: MovementRow) -> Self {
        Movement {
            id: row.id,
            item: row.item,
            unit: row.unit,
            mtype: row.mtype,
            qty: row.qty,
            status: row.status,
        }
    }
}

fn status_vec(statuses: &[&str]) -> Vec<String> {
    statuses.iter().map(|s| s.to_string()).collect()
}
