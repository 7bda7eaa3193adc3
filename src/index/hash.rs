//! Chained hash index for secondary string attributes (title, author).
//!
//! Keys are arbitrary strings; callers are expected to normalize
//! (case-fold, trim) before use — the structure stores keys verbatim.
//! Buckets chain colliding pairs in insertion order. The table doubles
//! when the load factor crosses 0.75, rehashing every pair, so chains
//! stay short under growth.

const DEFAULT_CAPACITY: usize = 500;
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Hash table with separate chaining, keyed by `String`.
pub struct ChainedHashIndex<V> {
    buckets: Vec<Vec<(String, V)>>,
    size: usize,
}

impl<V> Default for ChainedHashIndex<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> ChainedHashIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buckets: (0..capacity).map(|_| Vec::new()).collect(),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Polynomial rolling hash (base 31) over the key's characters.
    fn bucket_of(&self, key: &str) -> usize {
        let capacity = self.buckets.len() as u64;
        let mut hash: u64 = 0;
        for ch in key.chars() {
            hash = (hash.wrapping_mul(31).wrapping_add(ch as u64)) % capacity;
        }
        hash as usize
    }

    /// Insert a key-value pair, overwriting the value when the key is
    /// already chained in its bucket.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let index = self.bucket_of(&key);
        for entry in &mut self.buckets[index] {
            if entry.0 == key {
                entry.1 = value;
                return;
            }
        }
        self.buckets[index].push((key, value));
        self.size += 1;
        if self.size as f64 > self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2;
        let old = std::mem::replace(
            &mut self.buckets,
            (0..capacity).map(|_| Vec::new()).collect(),
        );
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_of(&key);
            self.buckets[index].push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.bucket_of(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove a key. Returns `true` when a pair was actually removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = self.bucket_of(key);
        let bucket = &mut self.buckets[index];
        if let Some(pos) = bucket.iter().position(|(k, _)| k == key) {
            bucket.remove(pos);
            self.size -= 1;
            true
        } else {
            false
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flatten()
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.buckets.iter().flatten().map(|(_, v)| v).collect()
    }

    /// All pairs, in bucket order.
    pub fn enumerate(&self) -> Vec<(&str, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }
}
