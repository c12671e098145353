//! In-process implementation of the URL store.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl, Record};
use crate::domain::error::StoreError;
use crate::domain::links::{LinkBuilder, validate_batch};
use crate::domain::repositories::UrlStore;
use crate::utils::url_validator::validate_url;

/// Keys below this value are never handed out.
pub const FIRST_KEY_OFFSET: u64 = 30;

/// Volatile store backed by a single locked table.
///
/// Every operation takes the lock once, so key allocation and record
/// insertion are observed together. Contents are lost when the process
/// exits.
pub struct MemoryUrlStore {
    links: LinkBuilder,
    table: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_key: u64,
    records: HashMap<u64, Record>,
    /// `(owner, url)` of every live record.
    live: HashMap<(String, String), u64>,
}

/// Outcome of inserting one URL into the table.
enum Insert {
    Created(u64),
    Existing(u64),
}

impl Table {
    fn with_offset(offset: u64) -> Self {
        Self {
            last_key: offset,
            ..Self::default()
        }
    }

    fn insert(&mut self, url: &str, owner: &str) -> Result<Insert, StoreError> {
        let index_key = (owner.to_string(), url.to_string());
        if let Some(&key) = self.live.get(&index_key) {
            return Ok(Insert::Existing(key));
        }

        let key = self
            .last_key
            .checked_add(1)
            .ok_or_else(|| StoreError::StorageUnavailable("key space exhausted".to_string()))?;
        self.last_key = key;

        self.records
            .insert(key, Record::new(key, url.to_string(), owner.to_string()));
        self.live.insert(index_key, key);

        Ok(Insert::Created(key))
    }

    fn remove(&mut self, owner: &str, key: u64) -> bool {
        let Some(record) = self.records.get_mut(&key) else {
            return false;
        };
        if !record.is_live() || !record.is_owned_by(owner) {
            return false;
        }

        record.deleted = true;
        self.live
            .remove(&(record.owner_id.clone(), record.original_url.clone()));
        true
    }
}

impl MemoryUrlStore {
    /// Creates an empty store whose first key is `FIRST_KEY_OFFSET + 1`.
    pub fn new(links: LinkBuilder) -> Self {
        Self {
            links,
            table: Mutex::new(Table::with_offset(FIRST_KEY_OFFSET)),
        }
    }

    /// Number of records ever created, removed ones included.
    pub fn len(&self) -> usize {
        self.table.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn write_url(&self, url: &str, owner: &str) -> Result<String, StoreError> {
        validate_url(url)?;

        let outcome = self.table.lock().insert(url, owner)?;

        match outcome {
            Insert::Created(key) => {
                tracing::debug!(key, "Stored new url");
                Ok(self.links.short_url(key))
            }
            Insert::Existing(key) => Err(StoreError::Conflict {
                short_url: self.links.short_url(key),
            }),
        }
    }

    async fn read_url(&self, code: &str) -> Result<String, StoreError> {
        let key = self.links.key(code)?;

        self.table
            .lock()
            .records
            .get(&key)
            .filter(|r| r.is_live())
            .map(|r| r.original_url.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn batch_write(
        &self,
        owner: &str,
        items: Vec<BatchItem>,
    ) -> Result<Vec<BatchResult>, StoreError> {
        validate_batch(&items)?;

        let mut table = self.table.lock();
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let key = match table.insert(&item.original_url, owner)? {
                Insert::Created(key) | Insert::Existing(key) => key,
            };
            results.push(BatchResult {
                correlation_id: item.correlation_id,
                short_url: self.links.short_url(key),
            });
        }

        tracing::debug!(count = results.len(), "Stored url batch");
        Ok(results)
    }

    async fn batch_remove(&self, owner: &str, codes: Vec<String>) -> Result<(), StoreError> {
        let keys: Vec<u64> = codes
            .iter()
            .filter_map(|code| self.links.key(code).ok())
            .collect();

        let mut table = self.table.lock();
        let removed = keys.into_iter().filter(|&key| table.remove(owner, key)).count();

        tracing::debug!(requested = codes.len(), removed, "Removed urls");
        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedUrl>, StoreError> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }

        let table = self.table.lock();
        let mut owned: Vec<&Record> = table
            .records
            .values()
            .filter(|r| r.is_live() && r.is_owned_by(owner))
            .collect();
        owned.sort_by_key(|r| r.key);

        Ok(owned
            .into_iter()
            .map(|r| OwnedUrl {
                code: self.links.code(r.key),
                short_url: self.links.short_url(r.key),
                original_url: r.original_url.clone(),
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::codec::Codec;
    use std::sync::Arc;

    fn store() -> MemoryUrlStore {
        MemoryUrlStore::new(LinkBuilder::new("http://localhost:8080", Codec::default()))
    }

    fn code_of(short_url: &str) -> &str {
        short_url.rsplit('/').next().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_first_key_is_past_offset() {
        let store = store();
        let short = store.write_url("https://example.org", "u1").await.unwrap();
        assert_eq!(short, "http://localhost:8080/v");
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = store();
        let short = store.write_url("https://example.org", "u1").await.unwrap();
        let url = store.read_url(code_of(&short)).await.unwrap();
        assert_eq!(url, "https://example.org");
    }

    #[tokio::test]
    async fn test_write_rejects_bad_input() {
        let store = store();
        assert_eq!(store.write_url("", "u1").await, Err(StoreError::EmptyInput));
        assert!(matches!(
            store.write_url("not-a-url", "u1").await,
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_write_conflicts() {
        let store = store();
        let first = store.write_url("https://example.org", "u1").await.unwrap();

        let second = store.write_url("https://example.org", "u1").await;
        assert_eq!(second, Err(StoreError::Conflict { short_url: first }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_same_url_different_owners() {
        let store = store();
        let a = store.write_url("https://example.org", "u1").await.unwrap();
        let b = store.write_url("https://example.org", "u2").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_anonymous_writes_deduplicated() {
        let store = store();
        let first = store.write_url("https://example.org", "").await.unwrap();
        assert_eq!(
            store.write_url("https://example.org", "").await,
            Err(StoreError::Conflict { short_url: first })
        );
    }

    #[tokio::test]
    async fn test_read_unknown_and_invalid() {
        let store = store();
        assert_eq!(store.read_url("zz").await, Err(StoreError::NotFound));
        assert!(matches!(
            store.read_url("A!").await,
            Err(StoreError::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_tombstones_record() {
        let store = store();
        let short = store.write_url("https://example.org", "u1").await.unwrap();
        let code = code_of(&short).to_string();

        store.batch_remove("u1", vec![code.clone()]).await.unwrap();

        assert_eq!(store.read_url(&code).await, Err(StoreError::NotFound));
        assert!(store.list_by_owner("u1").await.unwrap().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_key_not_reused_after_remove() {
        let store = store();
        let first = store.write_url("https://example.org", "u1").await.unwrap();
        store
            .batch_remove("u1", vec![code_of(&first).to_string()])
            .await
            .unwrap();

        let second = store.write_url("https://example.org", "u1").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(second, "http://localhost:8080/w");
    }

    #[tokio::test]
    async fn test_remove_skips_foreign_and_invalid_codes() {
        let store = store();
        let short = store.write_url("https://example.org", "u1").await.unwrap();
        let code = code_of(&short).to_string();

        store
            .batch_remove("u2", vec![code.clone(), "!!".to_string(), "zzzz".to_string()])
            .await
            .unwrap();

        assert_eq!(store.read_url(&code).await.unwrap(), "https://example.org");
    }

    #[tokio::test]
    async fn test_anonymous_records_cannot_be_removed() {
        let store = store();
        let short = store.write_url("https://example.org", "").await.unwrap();
        let code = code_of(&short).to_string();

        store.batch_remove("", vec![code.clone()]).await.unwrap();
        assert!(store.read_url(&code).await.is_ok());
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_resolves_conflicts() {
        let store = store();
        let existing = store.write_url("https://y.io", "u1").await.unwrap();

        let results = store
            .batch_write(
                "u1",
                vec![
                    BatchItem::new("a", "https://x.io"),
                    BatchItem::new("b", "https://y.io"),
                    BatchItem::new("c", "https://z.io"),
                ],
            )
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.correlation_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(results[1].short_url, existing);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let store = store();
        let result = store
            .batch_write(
                "u1",
                vec![
                    BatchItem::new("a", "https://x.io"),
                    BatchItem::new("b", "not-a-url"),
                ],
            )
            .await;

        assert!(matches!(
            result,
            Err(StoreError::InvalidBatchItem { index: 1, .. })
        ));
        assert!(store.list_by_owner("u1").await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let store = store();
        store.write_url("https://a.io", "u1").await.unwrap();
        store.write_url("https://b.io", "u2").await.unwrap();
        store.write_url("https://c.io", "").await.unwrap();
        store.write_url("https://d.io", "u1").await.unwrap();

        let listed = store.list_by_owner("u1").await.unwrap();
        let urls: Vec<&str> = listed.iter().map(|o| o.original_url.as_str()).collect();
        assert_eq!(urls, ["https://a.io", "https://d.io"]);

        assert!(store.list_by_owner("").await.unwrap().is_empty());
        assert!(store.list_by_owner("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_writes_get_distinct_keys() {
        let store = Arc::new(store());
        let mut handles = Vec::new();

        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .write_url(&format!("https://host{i}.io"), "u1")
                    .await
                    .unwrap()
            }));
        }

        let mut shorts = Vec::new();
        for handle in handles {
            shorts.push(handle.await.unwrap());
        }
        shorts.sort();
        shorts.dedup();
        assert_eq!(shorts.len(), 32);
    }

    #[tokio::test]
    async fn test_concurrent_identical_writes_create_one_record() {
        let store = Arc::new(store());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.write_url("https://same.io", "u1").await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(store().health_check().await.is_ok());
        assert_eq!(store().backend_name(), "memory");
    }
}
