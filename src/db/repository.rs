//! Expense repository over the connection factory
//!
//! Each operation acquires a fresh connection from the factory, uses it, and
//! releases it before returning, on success and on error alike. There is no
//! pool; the factory is cheap enough to call per operation.

use chrono::{DateTime, NaiveDate, Utc};
use mysql_async::prelude::Queryable;
use tokio_postgres::types::ToSql;
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::config::DatabaseConfig;
use crate::error::{ExpenseError, ExpenseResult};

use super::factory::ConnectionFactory;
use super::handle::ConnectionHandle;

mod sql {
    pub const ADD_POSTGRES: &str = "INSERT INTO expenses \
        (id, description, amount_cents, date, category_id, created_at) \
        VALUES ($1, $2, $3, $4, $5, $6)";
    pub const ADD_MYSQL: &str = "INSERT INTO expenses \
        (id, description, amount_cents, date, category_id, created_at) \
        VALUES (?, ?, ?, ?, ?, ?)";

    pub const GET_ALL: &str = "SELECT id, description, amount_cents, date, \
        category_id, created_at FROM expenses";

    pub const GET_BY_ID_POSTGRES: &str = "SELECT id, description, amount_cents, \
        date, category_id, created_at FROM expenses WHERE id = $1";
    pub const GET_BY_ID_MYSQL: &str = "SELECT id, description, amount_cents, \
        date, category_id, created_at FROM expenses WHERE id = ?";

    pub const UPDATE_POSTGRES: &str = "UPDATE expenses SET description = $2, \
        amount_cents = $3, date = $4, category_id = $5 WHERE id = $1";
    pub const UPDATE_MYSQL: &str = "UPDATE expenses SET description = ?, \
        amount_cents = ?, date = ?, category_id = ? WHERE id = ?";

    pub const DELETE_POSTGRES: &str = "DELETE FROM expenses WHERE id = $1";
    pub const DELETE_MYSQL: &str = "DELETE FROM expenses WHERE id = ?";
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An expense row as stored in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Raw column values shared by both drivers
type RawRow = (String, String, i64, String, String, String);

impl ExpenseRecord {
    fn from_raw((id, description, amount_cents, date, category_id, created_at): RawRow) -> ExpenseResult<Self> {
        Ok(Self {
            id: parse_uuid(&id)?,
            description,
            amount_cents,
            date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .map_err(|e| ExpenseError::Storage(format!("invalid date '{date}': {e}")))?,
            category_id: parse_uuid(&category_id)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| ExpenseError::Storage(format!("invalid timestamp '{created_at}': {e}")))?
                .with_timezone(&Utc),
        })
    }

    fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

fn parse_uuid(value: &str) -> ExpenseResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| ExpenseError::Storage(format!("invalid id '{value}': {e}")))
}

/// Repository for expense rows, one fresh connection per operation
pub struct ExpenseRepository {
    factory: ConnectionFactory,
    config: DatabaseConfig,
}

impl ExpenseRepository {
    pub fn new(factory: ConnectionFactory, config: DatabaseConfig) -> Self {
        Self { factory, config }
    }

    pub async fn add(&self, record: &ExpenseRecord, cancel: &CancellationToken) -> ExpenseResult<()> {
        let mut handle = self.factory.create_and_open(&self.config, cancel).await?;
        let result = Self::insert(&mut handle, record).await;
        Self::finish(handle, result).await
    }

    pub async fn get_all(&self, cancel: &CancellationToken) -> ExpenseResult<Vec<ExpenseRecord>> {
        let mut handle = self.factory.create_and_open(&self.config, cancel).await?;
        let result = Self::fetch_all(&mut handle).await;
        Self::finish(handle, result).await
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> ExpenseResult<Option<ExpenseRecord>> {
        let mut handle = self.factory.create_and_open(&self.config, cancel).await?;
        let result = Self::fetch_by_id(&mut handle, id).await;
        Self::finish(handle, result).await
    }

    pub async fn update(&self, record: &ExpenseRecord, cancel: &CancellationToken) -> ExpenseResult<()> {
        let mut handle = self.factory.create_and_open(&self.config, cancel).await?;
        let result = Self::apply_update(&mut handle, record).await;
        Self::finish(handle, result).await
    }

    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> ExpenseResult<()> {
        let mut handle = self.factory.create_and_open(&self.config, cancel).await?;
        let result = Self::remove(&mut handle, id).await;
        Self::finish(handle, result).await
    }

    /// Release the handle, preferring the operation's error over a close error
    async fn finish<T>(handle: ConnectionHandle, result: ExpenseResult<T>) -> ExpenseResult<T> {
        let closed = handle.close().await;
        let value = result?;
        closed?;
        Ok(value)
    }

    async fn insert(handle: &mut ConnectionHandle, record: &ExpenseRecord) -> ExpenseResult<()> {
        match handle {
            ConnectionHandle::Postgres { client, .. } => {
                let id = record.id.to_string();
                let date = record.date_text();
                let category_id = record.category_id.to_string();
                let created_at = record.created_at.to_rfc3339();
                let params: &[&(dyn ToSql + Sync)] = &[
                    &id,
                    &record.description,
                    &record.amount_cents,
                    &date,
                    &category_id,
                    &created_at,
                ];
                client
                    .execute(sql::ADD_POSTGRES, params)
                    .await
                    .map_err(crate::db::ConnectionError::from)?;
            }
            ConnectionHandle::MySql(conn) => {
                conn.exec_drop(
                    sql::ADD_MYSQL,
                    (
                        record.id.to_string(),
                        record.description.clone(),
                        record.amount_cents,
                        record.date_text(),
                        record.category_id.to_string(),
                        record.created_at.to_rfc3339(),
                    ),
                )
                .await
                .map_err(crate::db::ConnectionError::from)?;
            }
        }
        Ok(())
    }

    async fn fetch_all(handle: &mut ConnectionHandle) -> ExpenseResult<Vec<ExpenseRecord>> {
        let raw: Vec<RawRow> = match handle {
            ConnectionHandle::Postgres { client, .. } => {
                let rows = client
                    .query(sql::GET_ALL, &[])
                    .await
                    .map_err(crate::db::ConnectionError::from)?;
                rows.into_iter()
                    .map(raw_from_postgres)
                    .collect::<ExpenseResult<_>>()?
            }
            ConnectionHandle::MySql(conn) => conn
                .exec(sql::GET_ALL, ())
                .await
                .map_err(crate::db::ConnectionError::from)?,
        };

        raw.into_iter().map(ExpenseRecord::from_raw).collect()
    }

    async fn fetch_by_id(
        handle: &mut ConnectionHandle,
        id: Uuid,
    ) -> ExpenseResult<Option<ExpenseRecord>> {
        let raw: Option<RawRow> = match handle {
            ConnectionHandle::Postgres { client, .. } => client
                .query_opt(sql::GET_BY_ID_POSTGRES, &[&id.to_string() as &(dyn ToSql + Sync)])
                .await
                .map_err(crate::db::ConnectionError::from)?
                .map(raw_from_postgres)
                .transpose()?,
            ConnectionHandle::MySql(conn) => conn
                .exec_first(sql::GET_BY_ID_MYSQL, (id.to_string(),))
                .await
                .map_err(crate::db::ConnectionError::from)?,
        };

        raw.map(ExpenseRecord::from_raw).transpose()
    }

    async fn apply_update(handle: &mut ConnectionHandle, record: &ExpenseRecord) -> ExpenseResult<()> {
        match handle {
            ConnectionHandle::Postgres { client, .. } => {
                let id = record.id.to_string();
                let date = record.date_text();
                let category_id = record.category_id.to_string();
                let params: &[&(dyn ToSql + Sync)] = &[
                    &id,
                    &record.description,
                    &record.amount_cents,
                    &date,
                    &category_id,
                ];
                client
                    .execute(sql::UPDATE_POSTGRES, params)
                    .await
                    .map_err(crate::db::ConnectionError::from)?;
            }
            ConnectionHandle::MySql(conn) => {
                conn.exec_drop(
                    sql::UPDATE_MYSQL,
                    (
                        record.description.clone(),
                        record.amount_cents,
                        record.date_text(),
                        record.category_id.to_string(),
                        record.id.to_string(),
                    ),
                )
                .await
                .map_err(crate::db::ConnectionError::from)?;
            }
        }
        Ok(())
    }

    async fn remove(handle: &mut ConnectionHandle, id: Uuid) -> ExpenseResult<()> {
        match handle {
            ConnectionHandle::Postgres { client, .. } => {
                client
                    .execute(sql::DELETE_POSTGRES, &[&id.to_string() as &(dyn ToSql + Sync)])
                    .await
                    .map_err(crate::db::ConnectionError::from)?;
            }
            ConnectionHandle::MySql(conn) => {
                conn.exec_drop(sql::DELETE_MYSQL, (id.to_string(),))
                    .await
                    .map_err(crate::db::ConnectionError::from)?;
            }
        }
        Ok(())
    }
}

fn raw_from_postgres(row: tokio_postgres::Row) -> ExpenseResult<RawRow> {
    let get = |idx: usize| -> ExpenseResult<String> {
        row.try_get(idx)
            .map_err(|e| ExpenseError::Storage(format!("column {idx}: {e}")))
    };
    let amount: i64 = row
        .try_get(2)
        .map_err(|e| ExpenseError::Storage(format!("column 2: {e}")))?;
    Ok((get(0)?, get(1)?, amount, get(3)?, get(4)?, get(5)?))
}
