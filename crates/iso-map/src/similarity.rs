//! Weighted edit-distance similarity with a bounded memo.
//!
//! Deletion and insertion cost 1, substitution costs 2, so the distance is
//! `len(a) + len(b) - 2 * lcs(a, b)` and the ratio
//! `(len(a) + len(b) - distance) / (len(a) + len(b))` lies in `[0, 1]`.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;

const INSERT_COST: usize = 1;
const DELETE_COST: usize = 1;
const SUBSTITUTE_COST: usize = 2;

/// Edit distance between `a` and `b` over Unicode scalar values.
///
/// Fills the full `(len(a)+1) x (len(b)+1)` matrix.
pub fn weighted_edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let width = b.len() + 1;
    let mut matrix = vec![0usize; (a.len() + 1) * width];

    for i in 0..=a.len() {
        matrix[i * width] = i * DELETE_COST;
    }
    for j in 0..=b.len() {
        matrix[j] = j * INSERT_COST;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { SUBSTITUTE_COST };
            let deletion = matrix[(i - 1) * width + j] + DELETE_COST;
            let insertion = matrix[i * width + j - 1] + INSERT_COST;
            let replace = matrix[(i - 1) * width + j - 1] + substitution;
            matrix[i * width + j] = deletion.min(insertion).min(replace);
        }
    }

    matrix[a.len() * width + b.len()]
}

/// Similarity ratio in `[0, 1]`; two empty strings are identical.
///
/// ```
/// use iso_map::similarity;
///
/// assert_eq!(similarity("canada", "canada"), 1.0);
/// assert!((similarity("cnada", "canada") - 10.0 / 11.0).abs() < 1e-12);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let distance = weighted_edit_distance(a, b);
    (total - distance) as f64 / total as f64
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizing front end to [`similarity`].
///
/// Keys are order-normalized pairs, so `(a, b)` and `(b, a)` share an entry.
/// The cache sits behind a `Mutex`; the engine is `Send + Sync`.
#[derive(Debug)]
pub struct SimilarityEngine {
    cache: Mutex<LruCache<(String, String), f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SimilarityEngine {
    /// Create an engine holding at most `capacity` scores (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        let cache = match NonZeroUsize::new(capacity) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            cache: Mutex::new(cache),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Similarity of `a` and `b`, served from the cache when possible.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };

        if let Some(score) = self.lock().get(&key).copied() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return score;
        }

        let score = similarity(&key.0, &key.1);
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.lock().put(key, score);
        score
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock().len(),
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<(String, String), f64>> {
        // Every write is a single `put`, so a poisoned cache is still consistent.
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_CACHE_CAPACITY)
    }
}
