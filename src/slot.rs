//! Slot: the three states a cell of the backing array can be in.

/// A live key/value pair plus the hash it was placed with.
///
/// Rehashing reuses `hash`, so `K: Hash` is never called again after the
/// entry is first inserted.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

/// One cell of the slot array.
///
/// `Tombstone` keeps probe chains intact after a removal: lookups walk past
/// it, insertions may reuse it. Only a full rehash turns tombstones back
/// into `Empty` (by allocating a fresh array).
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied(Entry<K, V>),
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// True for slots an insertion may claim.
    #[inline]
    pub(crate) fn is_free(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    /// Replace an occupied slot with a tombstone, handing back the entry.
    /// Leaves non-occupied slots untouched and returns `None`.
    pub(crate) fn bury(&mut self) -> Option<Entry<K, V>> {
        if !matches!(self, Slot::Occupied(_)) {
            return None;
        }
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(e) => Some(e),
            _ => unreachable!(),
        }
    }
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}
