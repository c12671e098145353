//! Behaviour every `UrlStore` backend must share.

use shortener_store::domain::entities::BatchItem;
use shortener_store::domain::error::StoreError;
use shortener_store::domain::repositories::UrlStore;

use super::code_of;

pub async fn duplicate_write_then_remove(store: &dyn UrlStore) {
    let c1 = store.write_url("https://example.org", "u1").await.unwrap();

    assert_eq!(
        store.write_url("https://example.org", "u1").await,
        Err(StoreError::Conflict {
            short_url: c1.clone()
        })
    );
    assert_eq!(
        store.read_url(code_of(&c1)).await.unwrap(),
        "https://example.org"
    );

    store
        .batch_remove("u1", vec![code_of(&c1).to_string()])
        .await
        .unwrap();

    assert_eq!(store.read_url(code_of(&c1)).await, Err(StoreError::NotFound));
}

pub async fn invalid_batch_writes_nothing(store: &dyn UrlStore) {
    let result = store
        .batch_write(
            "u1",
            vec![
                BatchItem::new("a", "https://x.io"),
                BatchItem::new("b", "not-a-url"),
            ],
        )
        .await;

    let err = result.unwrap_err();
    assert!(err.is_bad_input());
    assert!(matches!(
        err,
        StoreError::InvalidBatchItem { index: 1, ref correlation_id, .. } if correlation_id == "b"
    ));
    assert!(store.list_by_owner("u1").await.unwrap().is_empty());
}

pub async fn batch_preserves_order(store: &dyn UrlStore) {
    let existing = store.write_url("https://y.io", "u1").await.unwrap();

    let results = store
        .batch_write(
            "u1",
            vec![
                BatchItem::new("first", "https://x.io"),
                BatchItem::new("second", "https://y.io"),
                BatchItem::new("third", "https://z.io"),
                BatchItem::new("fourth", "https://x.io"),
            ],
        )
        .await
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.correlation_id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third", "fourth"]);
    assert_eq!(results[1].short_url, existing);
    assert_eq!(results[3].short_url, results[0].short_url);

    for result in &results {
        assert!(store.read_url(code_of(&result.short_url)).await.is_ok());
    }
    assert_eq!(store.list_by_owner("u1").await.unwrap().len(), 3);
}

pub async fn listing_is_owner_scoped(store: &dyn UrlStore) {
    store.write_url("https://a.io", "u1").await.unwrap();
    store.write_url("https://b.io", "u2").await.unwrap();
    store.write_url("https://c.io", "").await.unwrap();

    let listed = store.list_by_owner("u1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].original_url, "https://a.io");
    assert!(listed[0].short_url.ends_with(&format!("/{}", listed[0].code)));

    assert!(store.list_by_owner("").await.unwrap().is_empty());
}

pub async fn same_url_per_owner_is_distinct(store: &dyn UrlStore) {
    let mine = store.write_url("https://example.org", "u1").await.unwrap();
    let theirs = store.write_url("https://example.org", "u2").await.unwrap();
    let anonymous = store.write_url("https://example.org", "").await.unwrap();

    assert_ne!(mine, theirs);
    assert_ne!(mine, anonymous);
    assert_ne!(theirs, anonymous);

    store
        .batch_remove("u1", vec![code_of(&mine).to_string()])
        .await
        .unwrap();
    assert_eq!(
        store.read_url(code_of(&theirs)).await.unwrap(),
        "https://example.org"
    );
    assert_eq!(
        store.write_url("https://example.org", "u2").await,
        Err(StoreError::Conflict { short_url: theirs })
    );
}

pub async fn remove_skips_foreign_codes(store: &dyn UrlStore) {
    let theirs = store.write_url("https://b.io", "u2").await.unwrap();
    let unowned = store.write_url("https://c.io", "").await.unwrap();

    store
        .batch_remove(
            "u1",
            vec![
                code_of(&theirs).to_string(),
                code_of(&unowned).to_string(),
                "NOT-A-CODE".to_string(),
            ],
        )
        .await
        .unwrap();
    store
        .batch_remove("", vec![code_of(&unowned).to_string()])
        .await
        .unwrap();

    assert!(store.read_url(code_of(&theirs)).await.is_ok());
    assert!(store.read_url(code_of(&unowned)).await.is_ok());
}

pub async fn codes_never_reused(store: &dyn UrlStore) {
    let first = store.write_url("https://example.org", "u1").await.unwrap();
    store
        .batch_remove("u1", vec![code_of(&first).to_string()])
        .await
        .unwrap();

    let second = store.write_url("https://example.org", "u1").await.unwrap();
    assert_ne!(first, second);
    assert_eq!(store.read_url(code_of(&first)).await, Err(StoreError::NotFound));
    assert_eq!(
        store.read_url(code_of(&second)).await.unwrap(),
        "https://example.org"
    );
}

pub async fn input_errors(store: &dyn UrlStore) {
    assert_eq!(store.write_url("", "u1").await, Err(StoreError::EmptyInput));
    assert!(matches!(
        store.write_url("mailto:someone@example.org", "u1").await,
        Err(StoreError::InvalidUrl(_))
    ));
    assert!(matches!(
        store.read_url("Zz").await,
        Err(StoreError::InvalidIdentifier { .. })
    ));
    assert_eq!(store.read_url("zzzzzz").await, Err(StoreError::NotFound));
    assert!(store.health_check().await.is_ok());
}
