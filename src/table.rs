use std::{fmt, iter::FusedIterator, mem, ops::Index, slice, vec};

use log::{debug, trace};

use crate::{Entry, TableConfig, TableError, hash};

/// Entries whose keys hashed to the same index
pub(crate) type Bucket<V> = Vec<Entry<V>>;

/// A hash table mapping `String` keys to values of type `V`
///
/// Collisions are resolved by separate chaining: every bucket holds a short
/// sequence of entries. The bucket array doubles as soon as
/// `size() / capacity()` reaches the configured load factor threshold, so
/// after any insertion completes the ratio is strictly below it.
/// Capacity never shrinks, not even on [`Table::remove`] or [`Table::clear`].
#[derive(Clone)]
pub struct Table<V> {
    pub(crate) buckets: Vec<Bucket<V>>,
    pub(crate) occupied: usize,
    config: TableConfig,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new_with_buckets(TableConfig::default())
    }
}

impl<V> Table<V> {
    /// Creates an empty table with 50 buckets and a 0.75 load factor threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with `cap` buckets and the default threshold
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `cap` is 0
    pub fn with_capacity(cap: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::default().with_initial_capacity(cap))
    }

    /// Creates an empty table from `config`
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not pass [`TableConfig::validate`]
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::new_with_buckets(config))
    }

    // expects an already validated config
    fn new_with_buckets(config: TableConfig) -> Self {
        Self {
            buckets: (0..config.initial_capacity).map(|_| Vec::new()).collect(),
            occupied: 0,
            config,
        }
    }

    /// The configuration this table was created with
    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// Returns the number of stored key-value pairs
    pub fn size(&self) -> usize {
        self.occupied
    }

    /// Same as [`Table::size`]
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Shorthand for `self.size() == 0`
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns the number of buckets, or "slots" of the table
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Computed as num of entries / num of buckets
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.capacity() as f64
    }

    /// Stores `value` under `key`, silently replacing any previous value
    ///
    /// May grow the table before returning.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let _ = self.insert(key, value);
    }

    /// Stores `value` under `key`, returning the previous value (if there was any)
    ///
    /// Replacing the value of an existing key never resizes the table.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let i = self.idx(&key);

        if let Some(entry) = self.buckets[i].iter_mut().find(|e| e.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        trace!(target: "insert", "new key {key:?} in bucket {i}");
        self.buckets[i].push(Entry::new(key, value));
        self.occupied += 1;

        if self.reaches_threshold(self.occupied, self.capacity()) {
            self.resize();
        }

        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let i = self.idx(key);
        self.buckets[i]
            .iter()
            .find(|e| e.key == key)
            .map(Entry::value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = self.idx(key);
        self.buckets[i]
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Returns `true` if a value is stored under `key`
    pub fn has(&self, key: &str) -> bool {
        let i = self.idx(key);
        self.buckets[i].iter().any(|e| e.key == key)
    }

    /// Removes `key` from the table, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` from the table, returning the stored pair
    ///
    /// Only the entries of the key's own bucket move; their relative order is
    /// kept.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let i = self.idx(key);
        let bucket = &mut self.buckets[i];
        let pos = bucket.iter().position(|e| e.key == key)?;

        let removed = bucket.remove(pos);
        self.occupied -= 1;
        trace!(target: "remove", "removed key {key:?} from bucket {i}");

        Some(removed.into_pair())
    }

    /// Removes every entry but keeps the current capacity
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        trace!(target: "clear", "dropped {} entries", self.occupied);
        self.occupied = 0;

        self.debug_check_invariants();
    }

    // [adapters]

    /// Iterates over `(key, value)` pairs in bucket order
    pub fn entries(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.occupied,
        }
    }

    /// Same as [`Table::entries`]
    pub fn iter(&self) -> Iter<'_, V> {
        self.entries()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            remaining: self.occupied,
            buckets: self.buckets.iter_mut(),
            chain: Default::default(),
        }
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.entries() }
    }

    /// Iterates over the stored values in bucket order
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.entries() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    // [private]

    fn idx(&self, key: &str) -> usize {
        hash::bucket_index(key, self.capacity())
    }

    // same ratio as `load_factor`, so growth stops exactly when it drops below the threshold
    fn reaches_threshold(&self, entries: usize, buckets: usize) -> bool {
        entries as f64 / buckets as f64 >= self.config.load_factor_threshold
    }

    /// Doubles the bucket array until the load factor is back under the
    /// threshold, then rehashes every entry against the new capacity
    ///
    /// # Panics
    ///
    /// This will not allocate more than [`TableConfig::MAX_BUCKETS`]
    /// and will panic if it ever tries to
    fn resize(&mut self) {
        let old_cap = self.capacity();
        let mut new_cap = old_cap;
        loop {
            new_cap = match new_cap.checked_mul(2) {
                Some(cap) if cap <= TableConfig::MAX_BUCKETS => cap,
                _ => panic!(
                    "cannot grow table past {} buckets ({} entries)",
                    TableConfig::MAX_BUCKETS,
                    self.occupied
                ),
            };
            if !self.reaches_threshold(self.occupied, new_cap) {
                break;
            }
        }

        let mut new_buckets: Vec<Bucket<V>> = (0..new_cap).map(|_| Vec::new()).collect();
        for bucket in self.buckets.drain(..) {
            for entry in bucket {
                let i = hash::bucket_index(&entry.key, new_cap);
                new_buckets[i].push(entry);
            }
        }
        self.buckets = new_buckets;

        debug!(
            "resized table from {old_cap} to {new_cap} buckets ({} entries)",
            self.occupied
        );
        self.debug_check_invariants();
    }

    fn debug_check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let stored: usize = self.buckets.iter().map(Vec::len).sum();
        debug_assert_eq!(
            self.occupied, stored,
            "occupied count does not match the stored entries"
        );

        let cap = self.capacity();
        for (i, bucket) in self.buckets.iter().enumerate() {
            for entry in bucket {
                debug_assert_eq!(
                    hash::bucket_index(&entry.key, cap),
                    i,
                    "key {:?} sits in the wrong bucket",
                    entry.key
                );
            }
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Table<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for Table<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for Table<V> {}

impl<V> Index<&str> for Table<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not in the table
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key {key:?} not found in table"),
        }
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for Table<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Table<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<V> IntoIterator for Table<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            remaining: self.occupied,
            buckets: self.buckets.into_iter(),
            chain: Default::default(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Table<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut Table<V> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> IterMut<'a, V> {
        self.iter_mut()
    }
}

/// Borrowing iterator over the `(key, value)` pairs of a [`Table`]
pub struct Iter<'a, V> {
    buckets: slice::Iter<'a, Bucket<V>>,
    chain: slice::Iter<'a, Entry<V>>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chain.next() {
                Some(entry) => {
                    self.remaining -= 1;
                    return Some((entry.key(), entry.value()));
                }
                None => self.chain = self.buckets.next()?.iter(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over `(key, &mut value)` pairs of a [`Table`]
#[derive(Debug)]
pub struct IterMut<'a, V> {
    buckets: slice::IterMut<'a, Bucket<V>>,
    chain: slice::IterMut<'a, Entry<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chain.next() {
                Some(entry) => {
                    self.remaining -= 1;
                    return Some((entry.key.as_str(), &mut entry.value));
                }
                None => self.chain = self.buckets.next()?.iter_mut(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// Owning iterator returned by `Table::into_iter`
#[derive(Debug)]
pub struct IntoIter<V> {
    buckets: vec::IntoIter<Bucket<V>>,
    chain: vec::IntoIter<Entry<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chain.next() {
                Some(entry) => {
                    self.remaining -= 1;
                    return Some(entry.into_pair());
                }
                None => self.chain = self.buckets.next()?.into_iter(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> fmt::Debug for Keys<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
impl<V> FusedIterator for Keys<'_, V> {}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Values<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
impl<V> FusedIterator for Values<'_, V> {}

#[derive(Debug)]
pub struct ValuesMut<'a, V> {
    inner: IterMut<'a, V>,
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}
impl<V> FusedIterator for ValuesMut<'_, V> {}
