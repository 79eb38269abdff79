//! Resource store: a local mirror of one remote collection.
//!
//! The store prefers the network and never blocks on its availability:
//!
//! - a successful list replaces the local items and the cache mirror
//! - a failed call flips the store into [`StoreMode::Local`], keeps the
//!   local items, and raises a [`FallbackBanner`]
//! - mutations always try the server first and degrade per call
//!
//! Records created while offline carry a [`RecordId::Pending`] id and are
//! pushed with [`ResourceStore::push_pending`].

mod banner;
mod outcome;

pub use banner::FallbackBanner;
pub use outcome::{CreateOutcome, LocalReason, MutationOutcome, RefreshOutcome, SyncReport};

use crate::models::{LocalId, Record, RecordId, StoreMode};
use crate::remote::{RemoteCollection, RemoteError};
use crate::resources::ResourceSpec;
use crate::storage::CacheBackend;
use crate::view::{PageView, SearchFilter};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Client-side mirror of one REST collection.
pub struct ResourceStore<R, C> {
    spec: ResourceSpec,
    remote: R,
    cache: C,
    items: Vec<Record>,
    mode: StoreMode,
    banner: Option<FallbackBanner>,
    search: String,
    items_per_page: usize,
    /// Set when the cache entry could not be read at open. Writes are held
    /// back until a refresh succeeds so the unread entry is not overwritten.
    mirror_suspended: bool,
}

/// What the cache held for this resource at open.
enum CachedItems {
    Loaded(Vec<Record>),
    Missing,
    Unreadable,
}

impl<R: RemoteCollection, C: CacheBackend> ResourceStore<R, C> {
    /// Opens a store, loading items from the cache or the seed list.
    ///
    /// No network call is made; call [`refresh`](Self::refresh) next. A
    /// missing, blank or corrupt entry is replaced by the seed list. When the
    /// cache cannot be read at all the seed list is used in memory only and
    /// nothing is written back until the next successful refresh.
    pub fn open(spec: ResourceSpec, remote: R, cache: C) -> Self {
        let mut store = Self {
            items_per_page: spec.items_per_page,
            spec,
            remote,
            cache,
            items: Vec::new(),
            mode: StoreMode::Api,
            banner: None,
            search: String::new(),
            mirror_suspended: false,
        };

        match store.load_cached() {
            CachedItems::Loaded(items) => {
                tracing::debug!(
                    resource = store.spec.name,
                    count = items.len(),
                    backend = store.cache.name(),
                    "Loaded items from cache"
                );
                store.items = items;
            },
            CachedItems::Missing => {
                store.items = store.seed_items();
                tracing::debug!(
                    resource = store.spec.name,
                    count = store.items.len(),
                    "Seeded items"
                );
                store.persist();
            },
            CachedItems::Unreadable => {
                store.items = store.seed_items();
                store.mirror_suspended = true;
                tracing::warn!(
                    resource = store.spec.name,
                    backend = store.cache.name(),
                    "Cache unreadable, using seed data without writing it back"
                );
            },
        }
        store
    }

    /// Overrides the page size.
    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    /// Returns the resource spec.
    #[must_use]
    pub const fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    /// Returns the current items.
    #[must_use]
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Returns whether the last network call succeeded.
    #[must_use]
    pub const fn mode(&self) -> StoreMode {
        self.mode
    }

    /// Returns the offline banner, if raised.
    #[must_use]
    pub const fn banner(&self) -> Option<&FallbackBanner> {
        self.banner.as_ref()
    }

    /// Hides the banner without changing the mode.
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Returns true while cache writes are held back after a failed read.
    #[must_use]
    pub const fn is_mirror_suspended(&self) -> bool {
        self.mirror_suspended
    }

    /// Returns the page size.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Returns the number of pending records.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|record| record.is_pending()).count()
    }

    /// Fetches the collection and replaces the local items.
    ///
    /// Never fails: a network error leaves the items untouched, switches to
    /// local mode and raises the banner.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let fetched = self.remote.list().and_then(|values| {
            values
                .iter()
                .map(|value| self.spec.mapping.normalize(value))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| RemoteError::Payload(e.to_string()))
        });

        match fetched {
            Ok(items) => {
                let discarded_pending = self.pending_count();
                if discarded_pending > 0 {
                    tracing::warn!(
                        resource = self.spec.name,
                        discarded = discarded_pending,
                        "Refresh replaced unsynced local records"
                    );
                }
                self.items = items;
                self.mirror_suspended = false;
                self.persist();
                self.mode = StoreMode::Api;
                self.banner = None;
                metrics::counter!("fieldstore_refresh_total", "resource" => self.spec.name, "result" => "ok")
                    .increment(1);
                tracing::debug!(
                    resource = self.spec.name,
                    endpoint = self.remote.endpoint(),
                    count = self.items.len(),
                    "Refreshed from server"
                );
                RefreshOutcome::Refreshed {
                    count: self.items.len(),
                    discarded_pending,
                }
            },
            Err(error) => {
                metrics::counter!("fieldstore_refresh_total", "resource" => self.spec.name, "result" => "fallback")
                    .increment(1);
                self.degrade("refresh", &error);
                RefreshOutcome::Fallback { error }
            },
        }
    }

    /// Retry action behind the banner.
    pub fn retry(&mut self) -> RefreshOutcome {
        tracing::info!(resource = self.spec.name, "Retrying server connection");
        self.refresh()
    }

    /// Creates a record, trying the server first.
    ///
    /// When the server is unavailable the record is appended locally with a
    /// fresh pending id.
    pub fn create(&mut self, fields: Map<String, Value>) -> CreateOutcome {
        let body = Value::Object(self.spec.mapping.denormalize(&fields));
        match self.remote.create(&body) {
            Ok(echo) => {
                let echoed = echo.as_ref().map(|value| self.spec.mapping.normalize(value));
                let id = match &echoed {
                    Some(Ok(record)) => Some(record.id.clone()),
                    _ => None,
                };
                tracing::info!(
                    resource = self.spec.name,
                    id = id.as_ref().map(tracing::field::display),
                    "Created record on server"
                );
                if !self.refresh().is_refreshed() {
                    match echoed {
                        Some(Ok(record)) => {
                            self.items.push(record);
                            self.persist();
                        },
                        _ => tracing::warn!(
                            resource = self.spec.name,
                            "Created record has no usable echo; it will appear on the next refresh"
                        ),
                    }
                }
                CreateOutcome {
                    outcome: MutationOutcome::Synced,
                    id,
                }
            },
            Err(error) => {
                self.degrade("create", &error);
                let local_id = LocalId::generate(self.items.iter().map(|record| &record.id));
                tracing::info!(resource = self.spec.name, id = %local_id, "Created record locally");
                let id = RecordId::pending(local_id);
                self.items.push(Record::new(id.clone(), fields));
                self.persist();
                CreateOutcome {
                    outcome: MutationOutcome::fallback(&error),
                    id: Some(id),
                }
            },
        }
    }

    /// Applies `patch` to a record, trying the server first for synced
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has this id.
    pub fn update(&mut self, id: &RecordId, patch: &Map<String, Value>) -> Result<MutationOutcome> {
        let index = self.position(id)?;
        let Some(server_id) = id.server_id().cloned() else {
            self.items[index].merge(patch);
            self.persist();
            tracing::debug!(resource = self.spec.name, id = %id, "Updated pending record locally");
            return Ok(MutationOutcome::unsynced());
        };

        let mut merged = self.items[index].clone();
        merged.merge(patch);
        let body = Value::Object(self.spec.mapping.denormalize(&merged.fields));

        match self.remote.update(&server_id, &body) {
            Ok(echo) => {
                tracing::info!(resource = self.spec.name, id = %id, "Updated record on server");
                if !self.refresh().is_refreshed() {
                    let confirmed = echo
                        .as_ref()
                        .and_then(|value| self.spec.mapping.normalize(value).ok())
                        .filter(|record| record.id == *id)
                        .unwrap_or(merged);
                    self.replace(id, confirmed);
                }
                Ok(MutationOutcome::Synced)
            },
            Err(error) => {
                self.degrade("update", &error);
                self.replace(id, merged);
                Ok(MutationOutcome::fallback(&error))
            },
        }
    }

    /// Deletes a record, trying the server first for synced records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has this id.
    pub fn delete(&mut self, id: &RecordId) -> Result<MutationOutcome> {
        self.position(id)?;
        let Some(server_id) = id.server_id().cloned() else {
            self.remove_local(id);
            tracing::debug!(resource = self.spec.name, id = %id, "Deleted pending record locally");
            return Ok(MutationOutcome::unsynced());
        };

        match self.remote.delete(&server_id) {
            Ok(()) => {
                tracing::info!(resource = self.spec.name, id = %id, "Deleted record on server");
                if !self.refresh().is_refreshed() {
                    self.remove_local(id);
                }
                Ok(MutationOutcome::Synced)
            },
            Err(error) => {
                self.degrade("delete", &error);
                self.remove_local(id);
                Ok(MutationOutcome::fallback(&error))
            },
        }
    }

    /// Pushes pending records to the server, oldest first.
    ///
    /// Each accepted record takes the server's id in place. The first
    /// failure stops the push and leaves the rest pending. When every record
    /// was accepted the store refreshes.
    pub fn push_pending(&mut self) -> SyncReport {
        let pending: Vec<RecordId> = self
            .items
            .iter()
            .filter(|record| record.is_pending())
            .map(|record| record.id.clone())
            .collect();
        let mut report = SyncReport::default();

        for id in &pending {
            let Ok(index) = self.position(id) else {
                continue;
            };
            let body = Value::Object(self.spec.mapping.denormalize(&self.items[index].fields));
            match self.remote.create(&body) {
                Ok(echo) => {
                    report.pushed += 1;
                    metrics::counter!("fieldstore_pending_pushed_total", "resource" => self.spec.name)
                        .increment(1);
                    match echo.as_ref().map(|value| self.spec.mapping.normalize(value)) {
                        Some(Ok(record)) => {
                            tracing::info!(
                                resource = self.spec.name,
                                local_id = %id,
                                server_id = %record.id,
                                "Pushed pending record"
                            );
                            self.items[index] = record;
                        },
                        _ => {
                            tracing::info!(
                                resource = self.spec.name,
                                local_id = %id,
                                "Pushed pending record without echo"
                            );
                            self.items.remove(index);
                        },
                    }
                    self.persist();
                },
                Err(error) => {
                    self.degrade("push_pending", &error);
                    report.error = Some(error);
                    break;
                },
            }
        }

        if report.pushed > 0 && report.error.is_none() {
            self.refresh();
        }
        report.remaining = self.pending_count();
        report
    }

    /// Sets the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Returns the search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the items matching the search term.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Record> {
        SearchFilter::new(self.spec.search_fields, &self.search).apply(&self.items)
    }

    /// Renders one page of the filtered items.
    #[must_use]
    pub fn render(&self, page: usize) -> PageView {
        PageView::build(&self.filtered(), self.items_per_page, page, &self.search)
    }

    /// Finds a record by its rendered id (`"17"`, `"L1712345678901"`).
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Record> {
        let key = key.trim();
        self.items.iter().find(|record| record.id.to_string() == key)
    }

    /// Resolves a rendered id to a record id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has this id.
    pub fn resolve(&self, key: &str) -> Result<RecordId> {
        self.find(key)
            .map(|record| record.id.clone())
            .ok_or_else(|| self.not_found(key.trim()))
    }

    fn position(&self, id: &RecordId) -> Result<usize> {
        self.items
            .iter()
            .position(|record| record.id == *id)
            .ok_or_else(|| self.not_found(&id.to_string()))
    }

    fn not_found(&self, id: &str) -> Error {
        Error::RecordNotFound {
            resource: self.spec.name.to_string(),
            id: id.to_string(),
        }
    }

    fn replace(&mut self, id: &RecordId, record: Record) {
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.id == *id) {
            *slot = record;
            self.persist();
        }
    }

    fn remove_local(&mut self, id: &RecordId) {
        self.items.retain(|record| record.id != *id);
        self.persist();
    }

    fn degrade(&mut self, operation: &'static str, error: &RemoteError) {
        tracing::warn!(
            resource = self.spec.name,
            endpoint = self.remote.endpoint(),
            operation,
            error_kind = error.kind(),
            status = error.status(),
            error = %error,
            "Server unavailable, using local data"
        );
        if error.is_unauthorized() {
            tracing::warn!(
                resource = self.spec.name,
                "Server rejected the auth token; it may be expired"
            );
        }
        metrics::counter!(
            "fieldstore_fallback_total",
            "resource" => self.spec.name,
            "operation" => operation
        )
        .increment(1);
        self.mode = StoreMode::Local;
        self.banner = Some(FallbackBanner::new(self.spec.label, error.to_string()));
    }

    fn load_cached(&self) -> CachedItems {
        let raw = match self.cache.load(self.spec.cache_key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return CachedItems::Missing,
            Err(e) => {
                tracing::warn!(resource = self.spec.name, error = %e, "Failed to read cache");
                return CachedItems::Unreadable;
            },
        };
        match serde_json::from_str::<Vec<Record>>(&raw) {
            Ok(items) => CachedItems::Loaded(items),
            Err(e) => {
                tracing::warn!(
                    resource = self.spec.name,
                    cache_key = self.spec.cache_key,
                    error = %e,
                    "Ignoring unreadable cache entry"
                );
                CachedItems::Missing
            },
        }
    }

    fn seed_items(&self) -> Vec<Record> {
        (self.spec.seed)()
            .iter()
            .filter_map(|value| match self.spec.mapping.normalize(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(resource = self.spec.name, error = %e, "Skipping invalid seed record");
                    None
                },
            })
            .collect()
    }

    /// Mirrors the items into the cache. Failures are logged, not returned.
    fn persist(&self) {
        if self.mirror_suspended {
            tracing::warn!(
                resource = self.spec.name,
                "Cache write skipped until the server list is loaded"
            );
            return;
        }
        let result = serde_json::to_string(&self.items)
            .map_err(|e| Error::OperationFailed {
                operation: "serialize_items".to_string(),
                cause: e.to_string(),
            })
            .and_then(|json| self.cache.save(self.spec.cache_key, &json));
        if let Err(e) = result {
            tracing::warn!(
                resource = self.spec.name,
                backend = self.cache.name(),
                error = %e,
                "Failed to write cache"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerId;
    use crate::remote::RemoteResult;
    use crate::resources::ResourceKind;
    use crate::storage::MemoryCache;
    use serde_json::json;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remote that is either up (backed by a list) or down.
    #[derive(Default)]
    struct FakeRemote {
        up: bool,
        rows: RefCell<Vec<Value>>,
        next_id: RefCell<i64>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRemote {
        fn up(rows: Vec<Value>) -> Self {
            Self {
                up: true,
                rows: RefCell::new(rows),
                next_id: RefCell::new(500),
                calls: RefCell::default(),
            }
        }

        fn down() -> Self {
            Self::default()
        }

        fn check(&self, call: &str) -> RemoteResult<()> {
            self.calls.borrow_mut().push(call.to_string());
            if self.up {
                Ok(())
            } else {
                Err(RemoteError::Transport {
                    kind: crate::remote::TransportKind::Connect,
                    message: "connection refused".to_string(),
                })
            }
        }
    }

    impl RemoteCollection for FakeRemote {
        fn endpoint(&self) -> &str {
            "http://fake/api/products"
        }

        fn list(&self) -> RemoteResult<Vec<Value>> {
            self.check("list")?;
            Ok(self.rows.borrow().clone())
        }

        fn create(&self, body: &Value) -> RemoteResult<Option<Value>> {
            self.check("create")?;
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            let mut row = body.clone();
            row["id"] = json!(*next);
            self.rows.borrow_mut().push(row.clone());
            Ok(Some(row))
        }

        fn update(&self, id: &ServerId, body: &Value) -> RemoteResult<Option<Value>> {
            self.check("update")?;
            let mut row = body.clone();
            row["id"] = serde_json::to_value(id).unwrap_or(Value::Null);
            for existing in self.rows.borrow_mut().iter_mut() {
                if existing["id"] == row["id"] {
                    *existing = row.clone();
                }
            }
            Ok(Some(row))
        }

        fn delete(&self, id: &ServerId) -> RemoteResult<()> {
            self.check("delete")?;
            let target = serde_json::to_value(id).unwrap_or(Value::Null);
            self.rows.borrow_mut().retain(|row| row["id"] != target);
            Ok(())
        }
    }

    fn products() -> ResourceSpec {
        *ResourceKind::Products.spec()
    }

    fn paracetamol_cache() -> MemoryCache {
        let items = vec![Record::new(
            RecordId::synced(1),
            json!({"name": "Paracetamol", "stock": 150})
                .as_object()
                .cloned()
                .unwrap(),
        )];
        MemoryCache::with_entries([(
            products().cache_key,
            serde_json::to_string(&items).unwrap(),
        )])
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_open_seeds_and_mirrors() {
        let cache = MemoryCache::new();
        let store = ResourceStore::open(products(), FakeRemote::down(), &cache);
        assert!(!store.items().is_empty());
        assert_eq!(store.mode(), StoreMode::Api);
        assert!(cache.load(products().cache_key).unwrap().is_some());
    }

    #[test]
    fn test_open_keeps_empty_cached_list() {
        let cache = MemoryCache::with_entries([(products().cache_key, "[]")]);
        let store = ResourceStore::open(products(), FakeRemote::down(), cache);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_open_ignores_corrupt_cache() {
        let cache = MemoryCache::with_entries([(products().cache_key, "{not json")]);
        let store = ResourceStore::open(products(), FakeRemote::down(), cache);
        assert!(!store.items().is_empty());
    }

    /// Cache whose reads fail until `failures` reaches zero.
    struct UnreadableCache {
        inner: MemoryCache,
        failures: AtomicUsize,
    }

    impl CacheBackend for UnreadableCache {
        fn load(&self, key: &str) -> Result<Option<String>> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::OperationFailed {
                    operation: "read_cache".to_string(),
                    cause: "device busy".to_string(),
                });
            }
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) -> Result<()> {
            self.inner.save(key, value)
        }

        fn keys(&self) -> Result<Vec<String>> {
            self.inner.keys()
        }

        fn name(&self) -> &'static str {
            "unreadable"
        }
    }

    #[test]
    fn test_open_read_error_does_not_overwrite_cache() {
        let cache = UnreadableCache {
            inner: paracetamol_cache(),
            failures: AtomicUsize::new(1),
        };
        let mut store = ResourceStore::open(products(), FakeRemote::down(), &cache);
        assert!(store.is_mirror_suspended());
        assert!(!store.items().is_empty());

        store.refresh();
        store.create(fields(json!({"name": "Cough Syrup"})));
        let raw = cache.inner.load(products().cache_key).unwrap().unwrap();
        let kept: Vec<Record> = serde_json::from_str(&raw).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].field_text("name").as_deref(), Some("Paracetamol"));
    }

    #[test]
    fn test_refresh_resumes_mirror_after_read_error() {
        let cache = UnreadableCache {
            inner: paracetamol_cache(),
            failures: AtomicUsize::new(1),
        };
        let remote = FakeRemote::up(vec![json!({"id": 7, "name": "Azithromycin"})]);
        let mut store = ResourceStore::open(products(), remote, &cache);

        assert!(store.refresh().is_refreshed());
        assert!(!store.is_mirror_suspended());
        let raw = cache.inner.load(products().cache_key).unwrap().unwrap();
        let mirrored: Vec<Record> = serde_json::from_str(&raw).unwrap();
        assert_eq!(mirrored[0].id, RecordId::synced(7));
    }

    #[test]
    fn test_refresh_replaces_items() {
        let remote = FakeRemote::up(vec![json!({"id": 7, "name": "Azithromycin", "stock": 12})]);
        let mut store = ResourceStore::open(products(), remote, paracetamol_cache());

        let outcome = store.refresh();
        assert_eq!(
            outcome,
            RefreshOutcome::Refreshed {
                count: 1,
                discarded_pending: 0
            }
        );
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, RecordId::synced(7));
        assert_eq!(store.mode(), StoreMode::Api);
        assert!(store.banner().is_none());
    }

    #[test]
    fn test_refresh_failure_keeps_items() {
        let mut store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        let before = store.items().to_vec();

        let outcome = store.refresh();
        assert!(!outcome.is_refreshed());
        assert_eq!(store.items(), before.as_slice());
        assert_eq!(store.mode(), StoreMode::Local);
        assert!(store.banner().is_some());
    }

    #[test]
    fn test_refresh_rejects_unnormalizable_payload() {
        let remote = FakeRemote::up(vec![json!({"name": "no id"})]);
        let mut store = ResourceStore::open(products(), remote, paracetamol_cache());
        let outcome = store.refresh();
        assert!(matches!(
            outcome,
            RefreshOutcome::Fallback {
                error: RemoteError::Payload(_)
            }
        ));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_update_offline_applies_locally() {
        let mut store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        let outcome = store
            .update(&RecordId::synced(1), &fields(json!({"stock": 140})))
            .unwrap();

        assert!(outcome.fallback_message().is_some());
        assert_eq!(store.items()[0].get("stock"), Some(&json!(140)));
        assert_eq!(store.items()[0].field_text("name").as_deref(), Some("Paracetamol"));
        assert_eq!(store.mode(), StoreMode::Local);
        assert!(store.banner().is_some());
    }

    #[test]
    fn test_update_online_refreshes() {
        let remote = FakeRemote::up(vec![json!({"id": 1, "name": "Paracetamol", "stock": 150})]);
        let mut store = ResourceStore::open(products(), remote, paracetamol_cache());
        let outcome = store
            .update(&RecordId::synced(1), &fields(json!({"stock": 140})))
            .unwrap();

        assert_eq!(outcome, MutationOutcome::Synced);
        assert_eq!(store.items()[0].get("stock"), Some(&json!(140)));
        assert_eq!(store.mode(), StoreMode::Api);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        let err = store
            .update(&RecordId::synced(404), &Map::new())
            .unwrap_err();
        assert!(matches!(err, Error::RecordNotFound { .. }));
        assert_eq!(store.mode(), StoreMode::Api);
    }

    #[test]
    fn test_create_offline_then_push() {
        let mut store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        let outcome = store.create(fields(json!({"name": "Cough Syrup", "stock": 60})));
        assert!(!outcome.is_synced());
        assert_eq!(store.pending_count(), 1);

        let pending = store.items().last().unwrap().clone();
        assert!(pending.is_pending());
        assert_eq!(store.find(&pending.id.to_string()), Some(&pending));

        // Pending edits never touch the network.
        let outcome = store.update(&pending.id, &fields(json!({"stock": 55}))).unwrap();
        assert_eq!(outcome, MutationOutcome::unsynced());
        assert_eq!(store.mode(), StoreMode::Local);
    }

    #[test]
    fn test_push_pending_assigns_server_ids() {
        let cache = MemoryCache::new();
        {
            let mut offline = ResourceStore::open(products(), FakeRemote::down(), &cache);
            offline.create(fields(json!({"name": "Cough Syrup", "stock": 60})));
        }

        let remote = FakeRemote::up(Vec::new());
        let mut store = ResourceStore::open(products(), remote, &cache);
        let report = store.push_pending();

        assert_eq!(report.pushed, 1);
        assert!(report.is_complete());
        assert_eq!(store.pending_count(), 0);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, RecordId::synced(501));
        assert_eq!(store.mode(), StoreMode::Api);
    }

    #[test]
    fn test_create_online_reports_server_id() {
        let remote = FakeRemote::up(Vec::new());
        let mut store = ResourceStore::open(products(), remote, MemoryCache::new());
        let created = store.create(fields(json!({"name": "Azithromycin"})));

        assert!(created.is_synced());
        assert_eq!(created.id, Some(RecordId::synced(501)));
        assert!(store.find("501").is_some());
    }

    #[test]
    fn test_delete_pending_is_local() {
        let mut store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        store.create(fields(json!({"name": "Cough Syrup"})));
        let id = store.items().last().unwrap().id.clone();

        let outcome = store.delete(&id).unwrap();
        assert_eq!(outcome, MutationOutcome::unsynced());
        assert!(store.find(&id.to_string()).is_none());
    }

    #[test]
    fn test_delete_online() {
        let remote = FakeRemote::up(vec![json!({"id": 1, "name": "Paracetamol", "stock": 150})]);
        let mut store = ResourceStore::open(products(), remote, paracetamol_cache());
        let outcome = store.delete(&RecordId::synced(1)).unwrap();
        assert!(outcome.is_synced());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_render_filters_and_paginates() {
        let rows: Vec<Value> = (1..=12)
            .map(|i| json!({"id": i, "name": format!("Tablet {i}"), "stock": i}))
            .collect();
        let mut store =
            ResourceStore::open(products(), FakeRemote::up(rows), MemoryCache::new()).with_items_per_page(5);
        store.refresh();

        let page = store.render(3);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.strip.total_pages, 3);

        store.set_search("tablet 1");
        let page = store.render(1);
        assert_eq!(page.total_matches, 4);
        assert_eq!(store.search(), "tablet 1");
    }

    #[test]
    fn test_resolve() {
        let store = ResourceStore::open(products(), FakeRemote::down(), paracetamol_cache());
        assert_eq!(store.resolve(" 1 ").unwrap(), RecordId::synced(1));
        assert!(matches!(
            store.resolve("L1"),
            Err(Error::RecordNotFound { .. })
        ));
    }
}
