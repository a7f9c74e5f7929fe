// Shared map contract checks
//
// Each check starts from an empty map and is run against every
// KeyValueMap implementation.

#![allow(dead_code)]

use redis_map::{KeyValueMap, MapError};
use std::collections::{HashMap, HashSet};
use tokio_test::{assert_err, assert_ok};

pub async fn check_put_and_get<M: KeyValueMap>(map: &M) {
    assert_eq!(assert_ok!(map.put("key1", "value1").await), None);

    assert_eq!(
        map.get("key1").await.unwrap(),
        Some("value1".to_string()),
        "stored value should be returned"
    );
    assert!(map.contains_key("key1").await.unwrap());
    assert_eq!(
        map.get("key2").await.unwrap(),
        None,
        "missing key should return None"
    );
}

pub async fn check_put_returns_previous_value<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();
    assert_eq!(
        map.put("key1", "value2").await.unwrap(),
        Some("value1".to_string())
    );
    assert_eq!(map.get("key1").await.unwrap(), Some("value2".to_string()));
    assert_eq!(map.size().await.unwrap(), 1);
}

pub async fn check_put_rejects_null_key_or_value<M: KeyValueMap>(map: &M) {
    let err = assert_err!(map.put(&None::<&str>, "value1").await);
    assert!(matches!(err, MapError::InvalidArgument(_)), "put with null key");

    let err = assert_err!(map.put("key1", &None::<&str>).await);
    assert!(matches!(err, MapError::InvalidArgument(_)), "put with null value");

    assert!(map.is_empty().await.unwrap(), "rejected puts must not write");
    assert!(!map.contains_key("key1").await.unwrap());
}

pub async fn check_remove<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();

    assert_eq!(map.remove("key1").await.unwrap(), Some("value1".to_string()));
    assert_eq!(map.get("key1").await.unwrap(), None);
    assert_eq!(map.remove("key2").await.unwrap(), None);
}

pub async fn check_contains_key<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();

    assert!(map.contains_key("key1").await.unwrap());
    assert!(!map.contains_key("key2").await.unwrap());
    assert!(!map.contains_key(&[0xffu8, 0xfe][..]).await.unwrap());
    assert!(!map.contains_key(&None::<&str>).await.unwrap());
}

pub async fn check_contains_value<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();

    assert!(map.contains_value("value1").await.unwrap());
    assert!(!map.contains_value("value2").await.unwrap());
    assert!(!map.contains_value(&vec![0xc3u8]).await.unwrap());
}

pub async fn check_size_and_is_empty<M: KeyValueMap>(map: &M) {
    assert!(map.is_empty().await.unwrap());
    map.put("key1", "value1").await.unwrap();

    assert_eq!(map.size().await.unwrap(), 1);
    assert!(!map.is_empty().await.unwrap());

    map.clear().await.unwrap();
    assert!(map.is_empty().await.unwrap());
}

pub async fn check_put_all<M: KeyValueMap>(map: &M) {
    let input = HashMap::from([("key1", "value1"), ("key2", "value2")]);
    assert_ok!(map.put_all(input).await);

    assert_eq!(map.get("key1").await.unwrap(), Some("value1".to_string()));
    assert_eq!(map.get("key2").await.unwrap(), Some("value2".to_string()));
    assert_eq!(map.size().await.unwrap(), 2);
}

pub async fn check_put_all_rejects_null_entries<M: KeyValueMap>(map: &M) {
    let input = vec![
        (Some("key1".to_string()), Some("value1".to_string())),
        (None, Some("value2".to_string())),
    ];
    let err = assert_err!(map.put_all(input).await);
    assert!(matches!(err, MapError::InvalidArgument(_)));
    assert!(map.is_empty().await.unwrap(), "validation precedes writes");
}

pub async fn check_clear<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();
    map.put("key2", "value2").await.unwrap();

    map.clear().await.unwrap();
    assert!(map.is_empty().await.unwrap());
    assert_eq!(map.size().await.unwrap(), 0);
    assert_eq!(map.get("key1").await.unwrap(), None);

    // Clearing an empty map is a no-op
    map.clear().await.unwrap();
    assert!(map.is_empty().await.unwrap());
}

pub async fn check_keys<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();
    map.put("key2", "value2").await.unwrap();

    let expected: HashSet<String> = ["key1", "key2"].iter().map(|k| k.to_string()).collect();
    assert_eq!(map.keys().await.unwrap(), expected);
}

pub async fn check_values<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();
    map.put("key2", "value2").await.unwrap();

    let values = map.values().await.unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.contains(&"value1".to_string()));
    assert!(values.contains(&"value2".to_string()));
}

pub async fn check_values_keep_duplicates<M: KeyValueMap>(map: &M) {
    map.put("key1", "same").await.unwrap();
    map.put("key2", "same").await.unwrap();

    assert_eq!(map.values().await.unwrap(), vec!["same", "same"]);
}

pub async fn check_entries<M: KeyValueMap>(map: &M) {
    map.put("key1", "value1").await.unwrap();
    map.put("key2", "value2").await.unwrap();

    let entries = map.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.get("key1").map(String::as_str), Some("value1"));
    assert_eq!(entries.get("key2").map(String::as_str), Some("value2"));
}
