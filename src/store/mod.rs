//! Record store - the sole owner of persisted smartlinks.
//!
//! [`SmartlinkStore`] implements the record lifecycle (create, update,
//! delete) and the usage counters on top of a [`SmartlinkRepository`]
//! backend. All operations are synchronous and run under one store-wide
//! lock, so each read-modify-write completes before the next begins.
//!
//! Counter operations (`record_view`, `record_click`) are called
//! speculatively from page events: unknown ids are a logged no-op, and they
//! never refresh `updated_at`.
//!
//! # Example
//!
//! ```ignore
//! use smartlink::store::SmartlinkStore;
//!
//! let store = SmartlinkStore::open("smartlinks.db".as_ref())?;
//! let link = store.create(form)?;
//! store.record_view(&link.id)?;
//! store.record_click(&link.id, "spotify")?;
//! ```

mod memory;
mod repository;
mod sqlite;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;

use crate::ids;
use crate::model::{Smartlink, SmartlinkFormData};

pub use memory::MemoryRepository;
pub use repository::SmartlinkRepository;
pub use sqlite::{DEFAULT_DB_NAME, SqliteRepository};

/// Record store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Smartlink not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to encode smartlink: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to create store directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),
}

struct Inner<R> {
    repo: R,
    /// Every id this store has handed out, including deleted ones
    issued: HashSet<String>,
}

/// Smartlink record store over a repository backend.
pub struct SmartlinkStore<R: SmartlinkRepository = SqliteRepository> {
    inner: Mutex<Inner<R>>,
}

impl SmartlinkStore<SqliteRepository> {
    /// Open a SQLite-backed store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(SqliteRepository::open(path)?))
    }
}

impl SmartlinkStore<MemoryRepository> {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryRepository::new())
    }
}

impl<R: SmartlinkRepository> SmartlinkStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            inner: Mutex::new(Inner {
                repo,
                issued: HashSet::new(),
            }),
        }
    }

    /// Persist a new smartlink built from `form`.
    pub fn create(&self, form: SmartlinkFormData) -> Result<Smartlink, StoreError> {
        let mut inner = self.inner.lock();

        let id = inner.fresh_id()?;
        let link = Smartlink::from_form(id, form, Utc::now());
        inner.repo.save(&link)?;

        tracing::info!(target: "smartlink::store", id = %link.id, title = %link.title, "Created smartlink");
        Ok(link)
    }

    /// Replace the editable fields of an existing smartlink.
    pub fn update(&self, id: &str, form: SmartlinkFormData) -> Result<Smartlink, StoreError> {
        let mut inner = self.inner.lock();

        let mut link = inner
            .repo
            .load(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        link.apply_form(form, Utc::now());
        inner.repo.save(&link)?;

        tracing::info!(target: "smartlink::store", id = %link.id, "Updated smartlink");
        Ok(link)
    }

    /// Look up a smartlink.
    pub fn get(&self, id: &str) -> Result<Option<Smartlink>, StoreError> {
        self.inner.lock().repo.load(id)
    }

    /// Look up a smartlink that must exist.
    pub fn require(&self, id: &str) -> Result<Smartlink, StoreError> {
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// All smartlinks, oldest first (ties broken by id).
    pub fn list(&self) -> Result<Vec<Smartlink>, StoreError> {
        let mut links = self.inner.lock().repo.load_all()?;
        links.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(links)
    }

    /// Delete a smartlink. Returns true if one was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.inner.lock().repo.remove(id)?;
        if removed {
            tracing::info!(target: "smartlink::store", id, "Deleted smartlink");
        }
        Ok(removed)
    }

    /// Count one page view. Returns false (and changes nothing) for unknown ids.
    pub fn record_view(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate_counters(id, |link| link.views += 1)
    }

    /// Count one click on `platform_id`, which need not be listed on the page.
    /// Returns false (and changes nothing) for unknown ids.
    pub fn record_click(&self, id: &str, platform_id: &str) -> Result<bool, StoreError> {
        self.mutate_counters(id, |link| {
            *link.clicks.entry(platform_id.to_string()).or_insert(0) += 1;
        })
    }

    fn mutate_counters(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Smartlink),
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();

        let Some(mut link) = inner.repo.load(id)? else {
            tracing::warn!(target: "smartlink::store", id, "Ignoring counter update for unknown smartlink");
            return Ok(false);
        };
        mutate(&mut link);
        inner.repo.save(&link)?;
        Ok(true)
    }
}

impl<R: SmartlinkRepository> Inner<R> {
    /// An id never issued by this store nor present in (or retired from) the backend.
    fn fresh_id(&mut self) -> Result<String, StoreError> {
        loop {
            let candidate = ids::new_smartlink_id();
            if self.issued.contains(&candidate) || self.repo.is_id_taken(&candidate)? {
                tracing::debug!(target: "smartlink::store", candidate = %candidate, "Id collision, regenerating");
                continue;
            }
            self.issued.insert(candidate.clone());
            return Ok(candidate);
        }
    }
}
