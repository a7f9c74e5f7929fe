// Map contract tests against the in-memory implementation

use crate::common;
use redis_map::MemoryMap;

#[tokio::test]
async fn test_put_and_get() {
    common::check_put_and_get(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_put_returns_previous_value() {
    common::check_put_returns_previous_value(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_put_null_key_or_value() {
    common::check_put_rejects_null_key_or_value(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_remove() {
    common::check_remove(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_contains_key() {
    common::check_contains_key(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_contains_value() {
    common::check_contains_value(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_size_and_is_empty() {
    common::check_size_and_is_empty(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_put_all() {
    common::check_put_all(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_put_all_null_entries() {
    common::check_put_all_rejects_null_entries(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_clear() {
    common::check_clear(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_keys() {
    common::check_keys(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_values() {
    common::check_values(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_values_keep_duplicates() {
    common::check_values_keep_duplicates(&MemoryMap::new()).await;
}

#[tokio::test]
async fn test_entry_set() {
    common::check_entries(&MemoryMap::new()).await;
}
