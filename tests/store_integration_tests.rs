//! Integration Tests for the Store and Sweeper
//!
//! Exercises the public API end to end: expiry, lifecycle gating, delete
//! semantics and concurrent use alongside an active sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use tokio_test::{assert_err, assert_ok};
use ttl_kv::{spawn_sweeper, DeleteError, Key, StoppedError, Store, Sweeper, SweeperState};

// == Helper Functions ==

fn seeded_store() -> Store<String> {
    let store = Store::new();
    assert_ok!(store.put(1, "a".to_string()));
    store
}

// == Expiry ==

#[test]
fn test_permanent_and_ttl_entries() {
    let store = seeded_store();
    assert_eq!(store.get(1).as_deref(), Some("a"));

    assert_ok!(store.put_with_ttl(2, "b".to_string(), 50));
    assert_eq!(store.get(2).as_deref(), Some("b"));
    assert_eq!(store.size(), 2);

    sleep(Duration::from_millis(100));

    assert!(store.get(2).is_none());
    assert_eq!(store.size(), 1);
    assert_eq!(store.get(1).as_deref(), Some("a"));
}

#[test]
fn test_lazy_eviction_only_touches_read_key() {
    let store: Store<String> = Store::new();
    assert_ok!(store.put_with_ttl(1, "x".to_string(), 10));
    assert_ok!(store.put_with_ttl(2, "y".to_string(), 10));

    sleep(Duration::from_millis(30));

    assert!(store.get(1).is_none());
    assert_eq!(store.size(), 1);

    let stats = store.stats();
    assert_eq!(stats.lazy_evictions, 1);
    assert_eq!(stats.total_entries, 1);
}

#[test]
fn test_overwrite_with_ttl_then_permanent() {
    let store: Store<String> = Store::new();
    assert_ok!(store.put(7, "v1".to_string()));
    assert_ok!(store.put_with_ttl(7, "v2".to_string(), 10));

    sleep(Duration::from_millis(30));
    assert!(store.get(7).is_none());

    assert_ok!(store.put_with_ttl(7, "v3".to_string(), 10));
    assert_ok!(store.put(7, "v4".to_string()));
    sleep(Duration::from_millis(30));
    assert_eq!(store.get(7).as_deref(), Some("v4"));
}

// == Lifecycle ==

#[test]
fn test_stop_blocks_mutation_not_reads() {
    let store = seeded_store();

    store.stop();
    assert_eq!(store.put(3, "x".to_string()), Err(StoppedError));
    assert_eq!(store.get(1).as_deref(), Some("a"));
    assert_eq!(store.size(), 1);

    store.start();
    assert_ok!(store.put(3, "x".to_string()));
    assert_eq!(store.get(3).as_deref(), Some("x"));
}

// == Delete ==

#[test]
fn test_delete_on_empty_store() {
    let store: Store<String> = Store::new();
    assert_eq!(store.delete(99), Err(DeleteError::NotFound(99)));
    assert_eq!(store.delete(99).unwrap_err().to_string(), "Key 99 not found");
}

#[test]
fn test_delete_expired_entry_before_purge() {
    let store: Store<String> = Store::new();
    assert_ok!(store.put_with_ttl(4, "old".to_string(), 10));
    sleep(Duration::from_millis(30));

    assert_ok!(store.delete(4));
    assert!(store.get(4).is_none());
    assert_err!(store.delete(4));
}

// == Sweeper ==

#[tokio::test]
async fn test_sweeper_purges_unread_entries() {
    let store = Arc::new(Store::new());
    for key in 0..20 {
        assert_ok!(store.put_with_ttl(key, format!("v{}", key), 20));
    }
    assert_ok!(store.put(100, "keep".to_string()));

    let (sweeper, handle) = spawn_sweeper(&store, Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(store.size(), 1);
    let stats = store.stats();
    assert_eq!(stats.swept, 20);
    assert_eq!(stats.lazy_evictions, 0);

    sweeper.shutdown();
    assert_ok!(handle.await);
    assert_eq!(sweeper.state(), SweeperState::Stopped);
}

#[tokio::test]
async fn test_sweeper_survives_store_restart_by_default() {
    let store = Arc::new(Store::new());
    let (sweeper, handle) = Sweeper::new(&store, Duration::from_millis(10)).spawn();

    store.stop();
    tokio::time::sleep(Duration::from_millis(30)).await;
    store.start();

    assert_ok!(store.put_with_ttl(1, "a".to_string(), 10));
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert!(sweeper.is_active());
    assert_eq!(store.size(), 0);

    sweeper.shutdown();
    assert_ok!(handle.await);
}

// == Concurrency ==

const WORKERS: Key = 4;
const OPS_PER_WORKER: usize = 250;
const KEYS_PER_WORKER: Key = 50;

/// Each worker owns a disjoint key range and checks the store against its own
/// model, while also writing short-lived entries into a shared range.
fn worker(store: Arc<Store<String>>, id: Key) -> HashMap<Key, String> {
    let base = id * 1000;
    let mut model = HashMap::new();
    let mut seed = id as u64 + 1;

    for op in 0..OPS_PER_WORKER {
        // xorshift, enough to interleave the operation kinds
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let key = base + (seed % KEYS_PER_WORKER as u64) as Key;

        match (seed >> 8) % 4 {
            0 => {
                let value = format!("w{}_{}", id, op);
                store.put(key, value.clone()).unwrap();
                model.insert(key, value);
            }
            1 => {
                let value = format!("w{}_{}_ttl", id, op);
                store.put_with_ttl(key, value.clone(), 60_000).unwrap();
                model.insert(key, value);
            }
            2 => {
                assert_eq!(store.get(key), model.get(&key).cloned());
            }
            _ => {
                let result = store.delete(key);
                if model.remove(&key).is_some() {
                    assert_eq!(result, Ok(()));
                } else {
                    assert_eq!(result, Err(DeleteError::NotFound(key)));
                }
            }
        }

        // Shared range of entries that expire while the sweeper runs
        let shared = -1 - (op as Key % 10);
        store.put_with_ttl(shared, "short".to_string(), 1).unwrap();
        let _ = store.get(shared);
    }

    model
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_callers_with_active_sweeper() {
    let store = Arc::new(Store::new());
    let (sweeper, sweeper_handle) = spawn_sweeper(&store, Duration::from_millis(1));

    let handles: Vec<_> = (0..WORKERS)
        .map(|id| {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || worker(store, id))
        })
        .collect();

    let mut expected = HashMap::new();
    for handle in handles {
        expected.extend(assert_ok!(handle.await));
    }

    // Let the shared short-lived entries lapse, then reap them
    tokio::time::sleep(Duration::from_millis(20)).await;
    store.purge_expired();

    assert_eq!(store.size(), expected.len());
    for (key, value) in &expected {
        assert_eq!(store.get(*key).as_ref(), Some(value));
    }

    sweeper.shutdown();
    assert_ok!(sweeper_handle.await);
}
