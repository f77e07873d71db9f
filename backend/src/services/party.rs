//! Counterparties: suppliers and customers.
//!
//! Both tables share one shape, so one service covers them with the table
//! name fixed per method group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PartyService {
    db: PgPool,
}

/// A supplier or customer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Party {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePartyInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePartyInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Which counterparty table a call addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyKind {
    Supplier,
    Customer,
}

impl PartyKind {
    fn table(&self) -> &'static str {
        match self {
            PartyKind::Supplier => "suppliers",
            PartyKind::Customer => "customers",
        }
    }

    fn resource(&self) -> &'static str {
        match self {
            PartyKind::Supplier => "Supplier",
            PartyKind::Customer => "Customer",
        }
    }
}

const PARTY_COLUMNS: &str = "id, name, phone, email, url, address, notes, created_at";

impl PartyService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, kind: PartyKind, input: CreatePartyInput) -> AppResult<Party> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "name is required".to_string(),
                message_ru: "Укажите название контрагента".to_string(),
            });
        }

        let existing = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {} WHERE name = $1",
            kind.table()
        ))
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let party = sqlx::query_as::<_, Party>(&format!(
            r#"
            INSERT INTO {} (name, phone, email, url, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PARTY_COLUMNS}
            "#,
            kind.table()
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.url)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(party)
    }

    pub async fn update(
        &self,
        kind: PartyKind,
        id: i64,
        input: UpdatePartyInput,
    ) -> AppResult<Party> {
        let party = sqlx::query_as::<_, Party>(&format!(
            r#"
            UPDATE {}
            SET name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                email = COALESCE($3, email),
                url = COALESCE($4, url),
                address = COALESCE($5, address),
                notes = COALESCE($6, notes)
            WHERE id = $7
            RETURNING {PARTY_COLUMNS}
            "#,
            kind.table()
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.url)
        .bind(&input.address)
        .bind(&input.notes)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(kind.resource().to_string()))?;

        Ok(party)
    }

    pub async fn list(&self, kind: PartyKind) -> AppResult<Vec<Party>> {
        let parties = sqlx::query_as::<_, Party>(&format!(
            "SELECT {PARTY_COLUMNS} FROM {} ORDER BY name",
            kind.table()
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(parties)
    }

    pub async fn delete(&self, kind: PartyKind, id: i64) -> AppResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(kind.resource().to_string()));
        }
        Ok(())
    }
}
