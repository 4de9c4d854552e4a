//! Cached entity repositories.
//!
//! A [`Repository`] owns the in-memory copy of one collection. Readers get
//! clones through [`Repository::snapshot`]; only repository operations change
//! the cache, and only after the record store has answered.
//!
//! Mutations on the same id are ordered by request: each `update`/`remove`
//! takes a ticket, and its response is applied to the cache only if no later
//! mutation of that id has been issued in the meantime. Fetches are not
//! ticketed; every completed fetch replaces the cache.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use harsia_core::types::DbId;
use harsia_db::store::{Collection, CollectionStore, Record, Recommendations, Reports, StoreError};
use tokio::sync::RwLock;

pub type ReportsRepository<S> = Repository<Reports, S>;
pub type RecommendationsRepository<S> = Repository<Recommendations, S>;

/// Point-in-time view of a repository for presentation.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    pub records: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Cache<R> {
    records: Vec<R>,
    error: Option<String>,
    next_ticket: u64,
    latest: HashMap<DbId, u64>,
}

impl<R> Cache<R> {
    fn issue_ticket(&mut self, id: DbId) -> u64 {
        self.next_ticket += 1;
        self.latest.insert(id, self.next_ticket);
        self.next_ticket
    }

    /// Whether `ticket` is still the newest request for `id`. Consumes the
    /// ticket when it is.
    fn settle(&mut self, id: DbId, ticket: u64) -> bool {
        if self.latest.get(&id) == Some(&ticket) {
            self.latest.remove(&id);
            true
        } else {
            false
        }
    }
}

/// Decrements the in-flight counter when a fetch finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Cache plus CRUD for one collection over a shared record store.
pub struct Repository<C, S>
where
    C: Collection,
    S: CollectionStore<C> + ?Sized,
{
    store: Arc<S>,
    cache: RwLock<Cache<C::Record>>,
    fetching: AtomicUsize,
    _collection: PhantomData<C>,
}

impl<C, S> Repository<C, S>
where
    C: Collection,
    S: CollectionStore<C> + ?Sized,
{
    /// Create a repository with an empty cache. Call [`fetch_all`] to load it.
    ///
    /// [`fetch_all`]: Repository::fetch_all
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            cache: RwLock::new(Cache {
                records: Vec::new(),
                error: None,
                next_ticket: 0,
                latest: HashMap::new(),
            }),
            fetching: AtomicUsize::new(0),
            _collection: PhantomData,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetching.load(Ordering::SeqCst) > 0
    }

    pub async fn records(&self) -> Vec<C::Record> {
        self.cache.read().await.records.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.cache.read().await.error.clone()
    }

    pub async fn snapshot(&self) -> Snapshot<C::Record> {
        let cache = self.cache.read().await;
        Snapshot {
            records: cache.records.clone(),
            loading: self.is_loading(),
            error: cache.error.clone(),
        }
    }

    /// Replace the cache with the store's current list.
    ///
    /// On failure the previous cache stays in place and the error message is
    /// recorded until the next successful fetch.
    pub async fn fetch_all(&self) -> Result<Vec<C::Record>, StoreError> {
        let _guard = InFlight::start(&self.fetching);
        match self.store.list().await {
            Ok(records) => {
                let mut cache = self.cache.write().await;
                cache.records = records.clone();
                cache.error = None;
                tracing::debug!(collection = C::NAME, count = records.len(), "Cache refreshed");
                Ok(records)
            }
            Err(err) => {
                tracing::warn!(collection = C::NAME, error = %err, "Fetch failed; keeping cached records");
                self.cache.write().await.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Read one record straight from the store. The cache is not touched.
    pub async fn get_by_id(&self, id: DbId) -> Result<C::Record, StoreError> {
        self.store.get(id).await.inspect_err(|err| {
            tracing::warn!(collection = C::NAME, id, error = %err, "Lookup failed");
        })
    }

    /// Insert a record and put the stored version at the front of the cache.
    pub async fn create(&self, input: C::Create) -> Result<C::Record, StoreError> {
        match self.store.insert(input).await {
            Ok(record) => {
                self.cache.write().await.records.insert(0, record.clone());
                tracing::info!(collection = C::NAME, id = record.id(), "Record created");
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(collection = C::NAME, error = %err, "Create failed");
                Err(err)
            }
        }
    }

    /// Patch a record, stamping the current time as its update time, and
    /// replace the cached copy in place.
    pub async fn update(&self, id: DbId, patch: C::Update) -> Result<C::Record, StoreError> {
        let ticket = self.cache.write().await.issue_ticket(id);
        let result = self.store.update(id, patch, Utc::now()).await;

        let mut cache = self.cache.write().await;
        let current = cache.settle(id, ticket);
        match &result {
            Ok(record) if current => {
                if let Some(slot) = cache.records.iter_mut().find(|r| r.id() == id) {
                    *slot = record.clone();
                }
                tracing::info!(collection = C::NAME, id, "Record updated");
            }
            Ok(_) => {
                tracing::debug!(collection = C::NAME, id, ticket, "Superseded update not applied to cache");
            }
            Err(err) => {
                tracing::warn!(collection = C::NAME, id, error = %err, "Update failed");
            }
        }
        result
    }

    /// Delete a record and drop it from the cache.
    pub async fn remove(&self, id: DbId) -> Result<(), StoreError> {
        let ticket = self.cache.write().await.issue_ticket(id);
        let result = self.store.delete(id).await;

        let mut cache = self.cache.write().await;
        let current = cache.settle(id, ticket);
        match &result {
            Ok(()) if current => {
                cache.records.retain(|r| r.id() != id);
                tracing::info!(collection = C::NAME, id, "Record deleted");
            }
            Ok(()) => {
                tracing::debug!(collection = C::NAME, id, ticket, "Superseded delete not applied to cache");
            }
            Err(err) => {
                tracing::warn!(collection = C::NAME, id, error = %err, "Delete failed");
            }
        }
        result
    }
}
