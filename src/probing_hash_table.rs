//! ProbingHashTable: the public map over [`RawTable`].
//!
//! Hashes keys with `hashbrown`'s default hash builder, enters the debug
//! reentrancy guard, and delegates slot work to the raw layer.

use crate::config::{ConfigError, TableConfig, Validated};
use crate::raw_table::RawTable;
use crate::reentrancy::Reentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// An open-addressing hash map with step-7 linear probing and tombstone
/// deletion.
///
/// The table grows (capacity doubled, all live entries rehashed) when an
/// insertion brings the number of live entries up to
/// `floor(capacity * load_factor)`. Removal leaves a tombstone and never
/// shrinks the table.
///
/// ```
/// use probing_hashtable::ProbingHashTable;
///
/// let mut t = ProbingHashTable::with_capacity_and_load_factor(4, 0.5);
/// assert_eq!(t.put("a", 1), None);
/// assert_eq!(t.put("b", 2), None);
/// assert_eq!(t.capacity(), 8);
/// assert_eq!(t.remove("a"), Some(1));
/// assert_eq!(t.get("a"), None);
/// assert_eq!(t.len(), 1);
/// ```
pub struct ProbingHashTable<K, V> {
    raw: RawTable<K, V>,
    hasher: DefaultHashBuilder,
    reentrancy: Reentrancy,
}

impl<K, V> ProbingHashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with capacity 500 and load factor 0.5.
    pub fn new() -> Self {
        Self::from_config(TableConfig::default())
    }

    /// Panics if `initial_capacity` is zero.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::from_config(TableConfig::new().with_capacity(initial_capacity))
    }

    /// `load_factor` is clamped into `[0.0, 1.0]`. Panics if it is NaN.
    pub fn with_load_factor(load_factor: f64) -> Self {
        Self::from_config(TableConfig::new().with_load_factor(load_factor))
    }

    /// Panics on a zero capacity or a NaN load factor; see
    /// [`try_with_capacity_and_load_factor`](Self::try_with_capacity_and_load_factor).
    pub fn with_capacity_and_load_factor(initial_capacity: usize, load_factor: f64) -> Self {
        Self::from_config(
            TableConfig::new()
                .with_capacity(initial_capacity)
                .with_load_factor(load_factor),
        )
    }

    pub fn try_with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Self::try_from_config(
            TableConfig::new()
                .with_capacity(initial_capacity)
                .with_load_factor(load_factor),
        )
    }

    pub fn from_config(config: TableConfig) -> Self {
        match Self::try_from_config(config) {
            Ok(table) => table,
            Err(e) => panic!("invalid table configuration: {e}"),
        }
    }

    pub fn try_from_config(config: TableConfig) -> Result<Self, ConfigError> {
        let Validated {
            capacity,
            load_factor,
        } = config.validate()?;
        Ok(Self {
            raw: RawTable::new(capacity, load_factor),
            hasher: DefaultHashBuilder::default(),
            reentrancy: Reentrancy::new(),
        })
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.raw.len()
    }
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }
    /// Current length of the slot array.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }
    /// Live-entry count at which the next insertion grows the table.
    pub fn threshold(&self) -> usize {
        self.raw.threshold()
    }
    /// Removed slots not yet reclaimed by a resize.
    pub fn tombstones(&self) -> usize {
        self.raw.tombstones()
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    ///
    /// On overwrite the stored key is kept and `key` is dropped. Inserting a
    /// new key may grow the table.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter("put");
        let hash = self.make_hash(&key);
        match self.raw.find(hash, |k| *k == key) {
            Some(idx) => Some(core::mem::replace(
                &mut self.raw.entry_mut(idx).value,
                value,
            )),
            None => {
                self.raw.insert_new(hash, key, value);
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("get");
        let hash = self.make_hash(key);
        let idx = self.raw.find(hash, |k| key == k.borrow())?;
        Some(&self.raw.entry(idx).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("get_mut");
        let hash = self.make_hash(key);
        let idx = self.raw.find(hash, |k| key == k.borrow())?;
        Some(&mut self.raw.entry_mut(idx).value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("contains_key");
        let hash = self.make_hash(key);
        self.raw.find(hash, |k| key == k.borrow()).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot. Never shrinks.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Like [`remove`](Self::remove), but also returns the stored key.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("remove");
        let hash = self.make_hash(key);
        let idx = self.raw.find(hash, |k| key == k.borrow())?;
        let entry = self.raw.bury(idx);
        Some((entry.key, entry.value))
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.raw.assert_invariants();
    }
}

impl<K, V> Default for ProbingHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ProbingHashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, K, V>(&'a RawTable<K, V>);
        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.entries().map(|e| (&e.key, &e.value)))
                    .finish()
            }
        }

        f.debug_struct("ProbingHashTable")
            .field("len", &self.raw.len())
            .field("capacity", &self.raw.capacity())
            .field("threshold", &self.raw.threshold())
            .field("tombstones", &self.raw.tombstones())
            .field("entries", &Entries(&self.raw))
            .finish()
    }
}
