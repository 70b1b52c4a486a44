//! An associative array implemented with an open-chaining hash table.

use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::iter::Flatten;
use std::ops::Index;
use std::slice;

use tracing::debug;

use crate::error::{Error, Result};

/// Deterministic hasher used when no other is given, so that iteration order
/// only depends on the sequence of insertions and removals.
pub type DefaultBuildHasher = BuildHasherDefault<DefaultHasher>;

/// Sizing parameters of a [`HashTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableOptions {
    /// Initial number of buckets.
    pub capacity: usize,
    /// Largest ratio of entries to buckets tolerated before the bucket count doubles.
    pub load_factor: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            capacity: 16,
            load_factor: 0.75,
        }
    }
}

impl TableOptions {
    fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidOptions("capacity must be at least 1".to_string()));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(Error::InvalidOptions(format!(
                "load factor must be a positive number, got {}",
                self.load_factor
            )));
        }
        Ok(())
    }
}

/// A hash table resolving collisions by chaining entries in per-bucket vectors.
///
/// Iteration visits buckets in index order and the entries of a bucket in
/// insertion order.
///
/// ```
/// use avl_multiset::HashTable;
/// let mut table = HashTable::new();
/// table.put("one", 1);
/// table.put("two", 2);
/// assert_eq!(table.get(&"one"), Ok(&1));
/// table.remove(&"one").unwrap();
/// assert!(!table.contains(&"one"));
/// assert!(table.get(&"one").is_err());
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultBuildHasher> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    load_factor: f64,
    hash_builder: S,
}

impl<K: Hash + Eq, V> HashTable<K, V, DefaultBuildHasher> {
    /// Creates an empty table with 16 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        Self::with_parts(TableOptions::default(), DefaultBuildHasher::default())
    }

    /// Creates an empty table sized by `options`.
    pub fn with_options(options: TableOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_parts(options, DefaultBuildHasher::default()))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Creates an empty table sized by `options` that hashes keys with `hash_builder`.
    pub fn with_hasher(options: TableOptions, hash_builder: S) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_parts(options, hash_builder))
    }

    fn with_parts(options: TableOptions, hash_builder: S) -> Self {
        Self {
            buckets: Self::empty_buckets(options.capacity),
            len: 0,
            load_factor: options.load_factor,
            hash_builder,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts a key-value pair, replacing and returning the previous value of the key.
    ///
    /// The bucket count doubles first if one more entry would push the load
    /// above the load factor.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if (self.len + 1) as f64 / self.capacity() as f64 > self.load_factor {
            self.resize();
        }
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some((_, slot)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        bucket.push((key, value));
        self.len += 1;
        None
    }

    /// Returns a reference to the value of the key.
    pub fn get(&self, key: &K) -> Result<&V>
    where
        K: Debug,
    {
        self.find(key)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::KeyNotFound(format!("{key:?}")))
    }

    /// Returns a mutable reference to the value of the key.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V>
    where
        K: Debug,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::KeyNotFound(format!("{key:?}")))
    }

    /// Removes the key and returns its value.
    pub fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Debug,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| Error::KeyNotFound(format!("{key:?}")))?;
        // Keep the remaining entries of the bucket in insertion order.
        let (_, value) = bucket.remove(position);
        self.len -= 1;
        Ok(value)
    }

    /// Returns whether the table holds an entry for the key.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.items().map(|(k, _)| k)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.items().map(|(_, v)| v)
    }

    /// Returns an iterator over the key-value pairs.
    pub fn items(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    fn find(&self, key: &K) -> Option<&(K, V)> {
        self.buckets[self.bucket_index(key)].iter().find(|(k, _)| k == key)
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    // Doubles the bucket count and redistributes every entry, visiting the old
    // buckets in order so entries sharing a new bucket keep their relative order.
    fn resize(&mut self) {
        let capacity = self.capacity() * 2;
        let old = std::mem::replace(&mut self.buckets, Self::empty_buckets(capacity));
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
        debug!(from = capacity / 2, to = capacity, len = self.len, "resized hash table");
    }

    fn empty_buckets(capacity: usize) -> Vec<Vec<(K, V)>> {
        std::iter::repeat_with(Vec::new).take(capacity).collect()
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V, DefaultBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Debug, V, S: BuildHasher> Index<&K> for HashTable<K, V, S> {
    type Output = V;

    /// Returns the value of the key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Renders the table as `{key: value, ...}` in iteration order.
impl<K: Display, V: Display, S> Display for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let entries = self.buckets.iter().flatten();
        for (i, (key, value)) in entries.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// An iterator over the entries of a [`HashTable`].
pub struct Iter<'a, K, V> {
    entries: Flatten<slice::Iter<'a, Vec<(K, V)>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.entries.next()?;
        self.remaining -= 1;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}
