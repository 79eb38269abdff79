//! End-to-end store tests against a scripted backend and real cache files.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use fieldstore::remote::{RemoteResult, TransportKind};
use fieldstore::storage::open_cache;
use fieldstore::{
    CacheBackend, CacheBackendKind, FilesystemCache, MemoryCache, MutationOutcome, Record, RecordId,
    RefreshOutcome, RemoteCollection, RemoteError, ResourceKind, ResourceSpec, ResourceStore,
    ServerId, SqliteCache, StoreMode,
};
use serde_json::{Map, Value, json};
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;
use test_case::test_case;

/// Backend whose availability can be switched between calls.
struct Backend {
    up: Cell<bool>,
    rows: RefCell<Vec<Value>>,
    next_id: Cell<i64>,
    /// Creates accepted before the backend starts refusing them.
    create_budget: Cell<Option<usize>>,
}

impl Backend {
    fn new(rows: Vec<Value>) -> Self {
        Self {
            up: Cell::new(true),
            rows: RefCell::new(rows),
            next_id: Cell::new(100),
            create_budget: Cell::new(None),
        }
    }

    fn set_up(&self, up: bool) {
        self.up.set(up);
    }

    fn check(&self) -> RemoteResult<()> {
        if self.up.get() {
            Ok(())
        } else {
            Err(RemoteError::Transport {
                kind: TransportKind::Connect,
                message: "connection refused".to_string(),
            })
        }
    }

    fn row_names(&self) -> Vec<String> {
        self.rows
            .borrow()
            .iter()
            .filter_map(|row| row["name"].as_str().map(str::to_string))
            .collect()
    }
}

impl RemoteCollection for &Backend {
    fn endpoint(&self) -> &str {
        "http://backend.test/api/products"
    }

    fn list(&self) -> RemoteResult<Vec<Value>> {
        self.check()?;
        Ok(self.rows.borrow().clone())
    }

    fn create(&self, body: &Value) -> RemoteResult<Option<Value>> {
        self.check()?;
        if let Some(budget) = self.create_budget.get() {
            if budget == 0 {
                return Err(RemoteError::Status {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            self.create_budget.set(Some(budget - 1));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let mut row = body.clone();
        row["id"] = json!(id);
        self.rows.borrow_mut().push(row.clone());
        Ok(Some(row))
    }

    fn update(&self, id: &ServerId, body: &Value) -> RemoteResult<Option<Value>> {
        self.check()?;
        let target = serde_json::to_value(id).unwrap();
        let mut row = body.clone();
        row["id"] = target.clone();
        for existing in self.rows.borrow_mut().iter_mut() {
            if existing["id"] == target {
                *existing = row.clone();
            }
        }
        Ok(Some(row))
    }

    fn delete(&self, id: &ServerId) -> RemoteResult<()> {
        self.check()?;
        let target = serde_json::to_value(id).unwrap();
        self.rows.borrow_mut().retain(|row| row["id"] != target);
        Ok(())
    }
}

fn products() -> ResourceSpec {
    *ResourceKind::Products.spec()
}

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn paracetamol() -> Value {
    json!({"id": 1, "name": "Paracetamol", "category": "Tablet", "price": "25", "stock": 150})
}

fn cached_items(cache: &dyn CacheBackend) -> Vec<Record> {
    let raw = cache.load(products().cache_key).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_offline_stock_edit_survives_restart() {
    let dir = TempDir::new().unwrap();
    let backend = Backend::new(vec![paracetamol()]);

    {
        let cache = FilesystemCache::with_create(dir.path()).unwrap();
        let mut store = ResourceStore::open(products(), &backend, cache);
        assert!(store.refresh().is_refreshed());

        backend.set_up(false);
        let outcome = store
            .update(&RecordId::synced(1), &fields(json!({"stock": 140})))
            .unwrap();

        assert_eq!(
            outcome.to_string(),
            "saved locally (server error: connect error: connection refused)"
        );
        assert_eq!(store.mode(), StoreMode::Local);
        let banner = store.banner().unwrap().to_string();
        assert!(banner.starts_with("Products: API unreachable"));
    }

    let cache = FilesystemCache::new(dir.path());
    let store = ResourceStore::open(products(), &backend, cache);
    let record = store.find("1").unwrap();
    assert_eq!(record.get("stock"), Some(&json!(140)));
    assert_eq!(record.field_text("name").as_deref(), Some("Paracetamol"));
    // The backend never saw the edit.
    assert_eq!(backend.rows.borrow()[0]["stock"], json!(150));
}

#[test]
fn test_pending_records_survive_restart_and_push() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cache.db");
    let backend = Backend::new(vec![paracetamol()]);
    backend.set_up(false);

    let local_id = {
        let cache = SqliteCache::open(&db).unwrap();
        let mut store = ResourceStore::open(products(), &backend, cache);
        let outcome = store.create(fields(json!({"name": "Cough Syrup", "stock": 60})));
        assert!(!outcome.is_synced());
        store.items().last().unwrap().id.clone()
    };
    assert!(local_id.is_pending());

    backend.set_up(true);
    let cache = SqliteCache::open(&db).unwrap();
    let mut store = ResourceStore::open(products(), &backend, cache);
    assert_eq!(store.pending_count(), 1);
    assert!(store.find(&local_id.to_string()).is_some());

    let report = store.push_pending();
    assert_eq!(report.pushed, 1);
    assert!(report.is_complete());
    assert_eq!(store.mode(), StoreMode::Api);
    assert_eq!(store.pending_count(), 0);
    assert!(store.find(&local_id.to_string()).is_none());
    assert!(store.find("101").is_some());
    assert_eq!(backend.row_names(), vec!["Paracetamol", "Cough Syrup"]);
}

/// Filesystem cache whose next read fails.
struct BusyCache {
    inner: FilesystemCache,
    busy: AtomicBool,
}

impl CacheBackend for BusyCache {
    fn load(&self, key: &str) -> fieldstore::Result<Option<String>> {
        if self.busy.swap(false, Ordering::SeqCst) {
            return Err(fieldstore::Error::OperationFailed {
                operation: "read_cache".to_string(),
                cause: "resource temporarily unavailable".to_string(),
            });
        }
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> fieldstore::Result<()> {
        self.inner.save(key, value)
    }

    fn keys(&self) -> fieldstore::Result<Vec<String>> {
        self.inner.keys()
    }

    fn name(&self) -> &'static str {
        "busy"
    }
}

#[test]
fn test_pending_record_survives_cache_read_error() {
    let dir = TempDir::new().unwrap();
    let backend = Backend::new(vec![paracetamol()]);
    backend.set_up(false);

    {
        let cache = FilesystemCache::with_create(dir.path()).unwrap();
        let mut store = ResourceStore::open(products(), &backend, cache);
        store.create(fields(json!({"name": "Cough Syrup", "stock": 60})));
        assert_eq!(store.pending_count(), 1);
    }

    {
        let cache = BusyCache {
            inner: FilesystemCache::new(dir.path()),
            busy: AtomicBool::new(true),
        };
        let mut store = ResourceStore::open(products(), &backend, cache);
        assert!(store.is_mirror_suspended());
        assert_eq!(store.pending_count(), 0);
        // Seed data is shown, and editing it offline must not reach the cache.
        let outcome = store
            .update(&RecordId::synced(1001), &fields(json!({"stock": 1})))
            .unwrap();
        assert!(!outcome.is_synced());
    }

    let cache = FilesystemCache::new(dir.path());
    assert_eq!(
        cached_items(&cache).iter().filter(|r| r.is_pending()).count(),
        1
    );
    let store = ResourceStore::open(products(), &backend, cache);
    assert_eq!(store.pending_count(), 1);
}

#[test]
fn test_push_stops_at_first_failure() {
    let backend = Backend::new(Vec::new());
    backend.set_up(false);
    let cache = MemoryCache::new();
    let mut store = ResourceStore::open(products(), &backend, &cache);
    store.create(fields(json!({"name": "Cough Syrup"})));
    store.create(fields(json!({"name": "Vitamin D3"})));
    let seeded = store.items().len();

    backend.set_up(true);
    backend.create_budget.set(Some(1));
    let report = store.push_pending();

    assert_eq!(report.pushed, 1);
    assert_eq!(report.remaining, 1);
    assert!(!report.is_complete());
    assert_eq!(
        report.error,
        Some(RemoteError::Status {
            status: 500,
            message: "Internal Server Error".to_string()
        })
    );
    // No refresh after a partial push, so the remaining record is kept.
    assert_eq!(store.items().len(), seeded);
    assert_eq!(store.mode(), StoreMode::Local);
    assert_eq!(
        cached_items(&cache).iter().filter(|r| r.is_pending()).count(),
        1
    );
}

#[test]
fn test_refresh_reports_discarded_pending() {
    let backend = Backend::new(vec![paracetamol()]);
    backend.set_up(false);
    let mut store = ResourceStore::open(products(), &backend, MemoryCache::new());
    store.create(fields(json!({"name": "Cough Syrup"})));

    backend.set_up(true);
    let outcome = store.refresh();
    assert_eq!(
        outcome,
        RefreshOutcome::Refreshed {
            count: 1,
            discarded_pending: 1
        }
    );
    assert_eq!(store.pending_count(), 0);
}

#[test]
fn test_retry_clears_banner() {
    let backend = Backend::new(vec![paracetamol()]);
    backend.set_up(false);
    let mut store = ResourceStore::open(products(), &backend, MemoryCache::new());

    assert!(!store.refresh().is_refreshed());
    assert!(store.banner().is_some());
    assert_eq!(store.mode(), StoreMode::Local);

    backend.set_up(true);
    assert!(store.retry().is_refreshed());
    assert!(store.banner().is_none());
    assert_eq!(store.mode(), StoreMode::Api);
    assert_eq!(store.items().len(), 1);
}

#[test]
fn test_mode_follows_each_call() {
    let backend = Backend::new(vec![paracetamol()]);
    let mut store = ResourceStore::open(products(), &backend, MemoryCache::new());
    store.refresh();

    backend.set_up(false);
    let outcome = store.delete(&RecordId::synced(1)).unwrap();
    assert!(matches!(outcome, MutationOutcome::AppliedLocally { .. }));
    assert!(store.items().is_empty());
    assert_eq!(store.mode(), StoreMode::Local);

    backend.set_up(true);
    let outcome = store.create(fields(json!({"name": "Azithromycin", "stock": 12})));
    assert_eq!(outcome.outcome, MutationOutcome::Synced);
    assert_eq!(outcome.id, Some(RecordId::synced(101)));
    assert_eq!(outcome.to_string(), "101 saved to server");
    assert_eq!(store.mode(), StoreMode::Api);
    // The refresh after create restores the server's view, deleted row included.
    assert_eq!(store.items().len(), 2);
}

#[test]
fn test_dismiss_banner_keeps_mode() {
    let backend = Backend::new(Vec::new());
    backend.set_up(false);
    let mut store = ResourceStore::open(products(), &backend, MemoryCache::new());
    store.refresh();
    store.dismiss_banner();
    assert!(store.banner().is_none());
    assert_eq!(store.mode(), StoreMode::Local);
}

#[test_case(CacheBackendKind::Filesystem; "filesystem")]
#[test_case(CacheBackendKind::Sqlite; "sqlite")]
fn test_configured_backend_persists(kind: CacheBackendKind) {
    let dir = TempDir::new().unwrap();
    let backend = Backend::new(vec![paracetamol(), json!({"id": 2, "name": "Amoxicillin"})]);

    {
        let cache = open_cache(kind, dir.path()).unwrap();
        let mut store = ResourceStore::open(products(), &backend, cache);
        store.refresh();
    }

    backend.set_up(false);
    let cache = open_cache(kind, dir.path()).unwrap();
    let mut store = ResourceStore::open(products(), &backend, cache);
    assert!(!store.refresh().is_refreshed());
    let ids: Vec<String> = store.items().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_search_and_pages_over_seed_data() {
    let backend = Backend::new(Vec::new());
    backend.set_up(false);
    let mut store = ResourceStore::open(products(), &backend, MemoryCache::new()).with_items_per_page(2);
    let total = store.items().len();

    let view = store.render(99);
    assert_eq!(view.strip.current, total.div_ceil(2));
    assert!(view.rows.len() <= 2);

    store.set_search("ZZZ-no-such-product");
    let view = store.render(1);
    assert!(view.is_empty());
    assert_eq!(view.strip.total_pages, 0);
    assert_eq!(view.strip.current, 1);
}
