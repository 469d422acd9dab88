use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use lru::LruCache;
use tracing::debug;

use crate::reflect::ColumnDescriptor;

/// Call signature of a cached reflection query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    SchemaNames,
    TableNames { schema: String },
    Columns { schema: String, table: String },
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Names(Vec<String>),
    Columns(Vec<ColumnDescriptor>),
}

/// LRU cache of reflection results for one session.
///
/// Created together with its session and dropped with it, so entries never
/// outlive the connection they were read from.
pub struct ReflectionCache {
    cache: Option<Mutex<LruCache<CacheKey, CachedValue>>>,
    hits: Mutex<u64>,
}

impl ReflectionCache {
    /// `capacity == 0` disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: Mutex::new(0),
        }
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let cache = self.cache.as_ref()?;
        let value = Self::lock(cache).get(key).cloned();
        if value.is_some() {
            *Self::lock(&self.hits) += 1;
            debug!(key = ?key, "Reflection cache hit");
        }
        value
    }

    pub fn put(&self, key: CacheKey, value: CachedValue) {
        if let Some(cache) = &self.cache {
            Self::lock(cache).put(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map(|c| Self::lock(c).len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        *Self::lock(&self.hits)
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            Self::lock(cache).clear();
        }
    }
}
