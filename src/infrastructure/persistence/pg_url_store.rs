//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl};
use crate::domain::error::StoreError;
use crate::domain::links::{LinkBuilder, validate_batch};
use crate::domain::repositories::UrlStore;
use crate::utils::url_validator::validate_url;

/// Persistent store over the `urls` table.
///
/// Keys come from the `id` sequence. Duplicate `(uid, original_url)` pairs
/// among live rows are rejected by a partial unique index, so concurrent
/// identical writes resolve to one row.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
    links: LinkBuilder,
}

/// Live and removed row counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlCounts {
    pub live: i64,
    pub removed: i64,
}

impl PgUrlStore {
    /// Creates a store with a database connection pool.
    pub fn new(pool: Arc<PgPool>, links: LinkBuilder) -> Self {
        Self { pool, links }
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    /// Counts live and removed rows across all owners.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] on query failure.
    pub async fn counts(&self) -> Result<UrlCounts, StoreError> {
        let (live, removed): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE NOT deleted),
                COUNT(*) FILTER (WHERE deleted)
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlCounts { live, removed })
    }

    fn key_to_id(key: u64) -> Option<i64> {
        i64::try_from(key).ok()
    }

    fn id_to_key(id: i64) -> Result<u64, StoreError> {
        u64::try_from(id).map_err(|_| StoreError::StorageUnavailable(format!("negative id {id}")))
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, StoreError> {
        self.pool
            .begin()
            .await
            .map_err(|e| StoreError::StorageUnavailable(format!("tx begin: {e}")))
    }
}

/// Commits on success; rolls back and reports the cause otherwise.
///
/// Input errors pass through unchanged after the rollback. Any other
/// failure is reported as `callback failed`.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| StoreError::StorageUnavailable(format!("tx commit: {e}")))?;
            Ok(value)
        }
        Err(err) => {
            tx.rollback()
                .await
                .map_err(|e| StoreError::StorageUnavailable(format!("tx rollback: {e}")))?;

            if err.is_bad_input() {
                Err(err)
            } else {
                Err(StoreError::StorageUnavailable(format!("callback failed: {err}")))
            }
        }
    }
}

/// Rounds of insert-then-select before giving up on a pair whose live row
/// keeps disappearing under concurrent removals.
const INSERT_ATTEMPTS: usize = 3;

/// Inserts a live row or finds the live row that blocks it.
///
/// Returns the row id and whether it was newly created. The two statements
/// see separate snapshots, so a blocking row tombstoned in between is
/// retried with a fresh insert.
async fn insert_or_existing(
    conn: &mut PgConnection,
    url: &str,
    owner: &str,
) -> Result<(i64, bool), StoreError> {
    for attempt in 1..=INSERT_ATTEMPTS {
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO urls (uid, original_url)
            VALUES ($1, $2)
            ON CONFLICT (uid, original_url) WHERE NOT deleted DO NOTHING
            RETURNING id
            "#,
        )
        .bind(owner)
        .bind(url)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(id) = inserted {
            return Ok((id, true));
        }

        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM urls WHERE uid = $1 AND original_url = $2 AND NOT deleted",
        )
        .bind(owner)
        .bind(url)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(id) = existing {
            return Ok((id, false));
        }

        tracing::debug!(attempt, "Conflicting row removed before select, retrying insert");
    }

    Err(StoreError::StorageUnavailable(
        "conflicting row not visible".to_string(),
    ))
}

async fn insert_batch(
    conn: &mut PgConnection,
    links: &LinkBuilder,
    owner: &str,
    items: Vec<BatchItem>,
) -> Result<Vec<BatchResult>, StoreError> {
    let mut results = Vec::with_capacity(items.len());

    for item in items {
        let (id, _) = insert_or_existing(conn, &item.original_url, owner).await?;
        results.push(BatchResult {
            correlation_id: item.correlation_id,
            short_url: links.short_url(PgUrlStore::id_to_key(id)?),
        });
    }

    Ok(results)
}

#[async_trait]
impl UrlStore for PgUrlStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn write_url(&self, url: &str, owner: &str) -> Result<String, StoreError> {
        validate_url(url)?;

        let mut conn = self.pool.acquire().await?;
        let (id, created) = insert_or_existing(&mut conn, url, owner).await?;
        let short_url = self.links.short_url(Self::id_to_key(id)?);

        if created {
            tracing::debug!(id, "Stored new url");
            Ok(short_url)
        } else {
            Err(StoreError::Conflict { short_url })
        }
    }

    async fn read_url(&self, code: &str) -> Result<String, StoreError> {
        let key = self.links.key(code)?;
        let Some(id) = Self::key_to_id(key) else {
            return Err(StoreError::NotFound);
        };

        sqlx::query_scalar("SELECT original_url FROM urls WHERE id = $1 AND NOT deleted")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn batch_write(
        &self,
        owner: &str,
        items: Vec<BatchItem>,
    ) -> Result<Vec<BatchResult>, StoreError> {
        validate_batch(&items)?;

        let count = items.len();
        let mut tx = self.begin().await?;
        let outcome = insert_batch(&mut tx, &self.links, owner, items).await;
        let results = finish(tx, outcome).await?;

        tracing::debug!(count, "Stored url batch");
        Ok(results)
    }

    async fn batch_remove(&self, owner: &str, codes: Vec<String>) -> Result<(), StoreError> {
        if owner.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = codes
            .iter()
            .filter_map(|code| self.links.key(code).ok())
            .filter_map(Self::key_to_id)
            .collect();

        if ids.is_empty() {
            return Ok(());
        }

        let mut tx = self.begin().await?;
        let outcome = sqlx::query(
            "UPDATE urls SET deleted = TRUE WHERE uid = $1 AND id = ANY($2) AND NOT deleted",
        )
        .bind(owner)
        .bind(ids.as_slice())
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from);
        let done = finish(tx, outcome).await?;

        tracing::debug!(
            requested = codes.len(),
            removed = done.rows_affected(),
            "Removed urls"
        );
        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedUrl>, StoreError> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT id, original_url FROM urls WHERE uid = $1 AND NOT deleted ORDER BY id",
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(id, original_url)| {
                let key = Self::id_to_key(id)?;
                Ok(OwnedUrl {
                    code: self.links.code(key),
                    short_url: self.links.short_url(key),
                    original_url,
                })
            })
            .collect()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(StoreError::from)
    }
}
