//! Capacity- and TTL-bounded cache for extracted analysis results.
//!
//! Keys combine the file path with a content fingerprint (size + mtime), so
//! an edited file is a miss without any explicit invalidation. Entries older
//! than the TTL are treated as absent on lookup; when the entry count
//! exceeds capacity, the least-recently-used entry is evicted. Extraction
//! errors are never stored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant, UNIX_EPOCH};

use super::AnalysisInfo;

/// Content identity of a file at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub size: u64,
    pub mtime_nanos: u128,
}

impl Fingerprint {
    /// Fingerprint a file from its metadata, without reading its contents.
    pub fn of(path: &Path) -> anyhow::Result<Self> {
        let metadata = fs::metadata(path)?;
        let mtime_nanos = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos();
        Ok(Self {
            size: metadata.len(),
            mtime_nanos,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    fingerprint: Fingerprint,
}

struct CacheEntry {
    info: AnalysisInfo,
    created_at: Instant,
    /// Logical access clock value; higher is more recent.
    last_access: u64,
}

struct CacheInner {
    map: HashMap<CacheKey, CacheEntry>,
    clock: u64,
}

/// Thread-safe analysis cache shared by all scan workers.
pub struct AstCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AstCache {
    /// Create a cache. A capacity of zero disables caching entirely.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                clock: 0,
            }),
            capacity,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up an entry, refreshing its recency on a hit.
    ///
    /// An entry older than the TTL is dropped and reported as a miss.
    pub fn get(&self, path: &Path, fingerprint: Fingerprint) -> Option<AnalysisInfo> {
        if self.capacity == 0 {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        let key = CacheKey {
            path: path.to_path_buf(),
            fingerprint,
        };

        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(_) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };
        inner.clock += 1;
        let clock = inner.clock;

        match inner.map.get_mut(&key) {
            Some(entry) if entry.created_at.elapsed() <= self.ttl => {
                entry.last_access = clock;
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.info.clone())
            }
            Some(_) => {
                // Expired: physically drop it now rather than waiting for
                // capacity pressure.
                inner.map.remove(&key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert an entry, evicting the least-recently-used one on overflow.
    pub fn put(&self, path: &Path, fingerprint: Fingerprint, info: AnalysisInfo) {
        if self.capacity == 0 {
            return;
        }

        let key = CacheKey {
            path: path.to_path_buf(),
            fingerprint,
        };

        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.clock += 1;
        let clock = inner.clock;
        inner.map.insert(
            key,
            CacheEntry {
                info,
                created_at: Instant::now(),
                last_access: clock,
            },
        );

        while inner.map.len() > self.capacity {
            let Some(lru_key) = inner
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            inner.map.remove(&lru_key);
        }
    }

    /// Current entry count.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters for diagnostic display.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats {
            entries: self.len(),
            hits,
            misses,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics snapshot.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries, {} hits, {} misses, {:.1}% hit rate",
            self.entries,
            self.hits,
            self.misses,
            self.hit_rate * 100.0
        )
    }
}
