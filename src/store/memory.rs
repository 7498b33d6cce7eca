//! In-memory repository, for tests and throw-away sessions.

use std::collections::{BTreeMap, HashSet};

use super::{SmartlinkRepository, StoreError};
use crate::model::Smartlink;

/// Repository backed by a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    links: BTreeMap<String, Smartlink>,
    retired: HashSet<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartlinkRepository for MemoryRepository {
    fn load(&self, id: &str) -> Result<Option<Smartlink>, StoreError> {
        Ok(self.links.get(id).cloned())
    }

    fn load_all(&self) -> Result<Vec<Smartlink>, StoreError> {
        Ok(self.links.values().cloned().collect())
    }

    fn save(&mut self, link: &Smartlink) -> Result<(), StoreError> {
        self.links.insert(link.id.clone(), link.clone());
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let existed = self.links.remove(id).is_some();
        if existed {
            self.retired.insert(id.to_string());
        }
        Ok(existed)
    }

    fn is_id_taken(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.links.contains_key(id) || self.retired.contains(id))
    }
}
