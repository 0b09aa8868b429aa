use crate::errors::{Result, SheetLinkError};
use crate::host::PropertyStore;
use crate::model::SheetRef;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded most-recently-used list of spreadsheet references, persisted as a
/// single JSON record in the session's property store.
///
/// One logical owner per session; the in-memory list is authoritative between
/// mutations and the full list is written back after every mutation.
pub struct RecentSheets {
    store: Arc<dyn PropertyStore>,
    key: String,
    cache: RwLock<LruCache<String, SheetRef>>,
}

impl RecentSheets {
    /// Loads the persisted list for `session`. Read or deserialization
    /// failures degrade to an empty list; losing recency history is
    /// non-fatal.
    pub fn new(store: Arc<dyn PropertyStore>, session: &str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity >= 1");
        let key = format!("recent_sheets/{session}");

        let mut cache = LruCache::new(capacity);
        match store.get(&key) {
            Ok(Some(serialized)) => match serde_json::from_str::<Vec<SheetRef>>(&serialized) {
                Ok(entries) => {
                    // Stored most-recent-first; replay oldest-first so the
                    // most recent entry ends up at the front.
                    for entry in entries.into_iter().rev() {
                        cache.put(entry.id.clone(), entry);
                    }
                }
                Err(err) => {
                    tracing::warn!(%key, "discarding unreadable recent-sheets record: {err}")
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(%key, "failed to load recent sheets: {err}"),
        }

        Self {
            store,
            key,
            cache: RwLock::new(cache),
        }
    }

    /// Inserts or promotes `id` to the front, evicting the oldest entry past
    /// capacity, and persists the updated list. Store write failures
    /// propagate.
    pub fn touch(&self, id: &str, name: &str) -> Result<SheetRef> {
        let entry = SheetRef {
            id: id.to_string(),
            name: name.to_string(),
            last_used: chrono::Utc::now().timestamp_millis(),
        };

        let snapshot = {
            let mut cache = self.cache.write();
            cache.put(entry.id.clone(), entry.clone());
            collect_mru(&cache)
        };
        self.persist(&snapshot)?;
        Ok(entry)
    }

    /// Current list, most recently used first.
    pub fn list(&self) -> Vec<SheetRef> {
        collect_mru(&self.cache.read())
    }

    pub fn names(&self) -> Vec<String> {
        self.cache
            .read()
            .iter()
            .map(|(_, entry)| entry.name.clone())
            .collect()
    }

    /// Empties the list and deletes the persisted record.
    pub fn clear(&self) -> Result<()> {
        self.cache.write().clear();
        self.store.delete(&self.key)
    }

    fn persist(&self, entries: &[SheetRef]) -> Result<()> {
        let serialized = serde_json::to_string(entries).map_err(SheetLinkError::host)?;
        self.store.set(&self.key, &serialized)
    }
}

fn collect_mru(cache: &LruCache<String, SheetRef>) -> Vec<SheetRef> {
    // LruCache iterates most recently used first.
    cache.iter().map(|(_, entry)| entry.clone()).collect()
}
