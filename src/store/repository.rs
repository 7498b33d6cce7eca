//! Storage backend trait.
//!
//! A repository is a plain keyed collection of [`Smartlink`] documents. It
//! holds no business rules: id generation, timestamps and counters belong to
//! [`SmartlinkStore`](super::SmartlinkStore), which also serializes access.

use super::StoreError;
use crate::model::Smartlink;

/// Keyed persistence for smartlink documents.
pub trait SmartlinkRepository: Send {
    /// Load one record.
    fn load(&self, id: &str) -> Result<Option<Smartlink>, StoreError>;

    /// Load every record (any order).
    fn load_all(&self) -> Result<Vec<Smartlink>, StoreError>;

    /// Insert or replace a record.
    fn save(&mut self, link: &Smartlink) -> Result<(), StoreError>;

    /// Remove a record and retire its id. Returns true if it existed.
    fn remove(&mut self, id: &str) -> Result<bool, StoreError>;

    /// Whether `id` is stored or was retired by a removal.
    fn is_id_taken(&self, id: &str) -> Result<bool, StoreError>;
}
