//! RawTable: slot-array management below the public map.
//!
//! Works purely on precomputed `u64` hashes and caller-supplied key
//! predicates; it never hashes keys itself. Growth rehashes from the hashes
//! cached in each [`Entry`].

use crate::config::threshold_for;
use crate::probe::{home_slot, is_coprime, next_coprime_capacity, ProbeSeq, PROBE_STEP};
use crate::slot::{Entry, Slot};

pub(crate) struct RawTable<K, V> {
    slots: Vec<Slot<K, V>>,
    /// Live entries; tombstones excluded.
    len: usize,
    tombstones: usize,
    load_factor: f64,
    threshold: usize,
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}

impl<K, V> RawTable<K, V> {
    /// `capacity` and `load_factor` must come from a validated config.
    pub(crate) fn new(capacity: usize, load_factor: f64) -> Self {
        assert!(
            is_coprime(PROBE_STEP, capacity),
            "capacity {capacity} shares a factor with probe step {PROBE_STEP}"
        );
        Self {
            slots: empty_slots(capacity),
            len: 0,
            tombstones: 0,
            load_factor,
            threshold: threshold_for(capacity, load_factor),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }
    #[inline]
    pub(crate) fn threshold(&self) -> usize {
        self.threshold
    }
    #[inline]
    pub(crate) fn load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    fn probe(&self, hash: u64) -> ProbeSeq {
        let cap = self.capacity();
        ProbeSeq::new(home_slot(hash, cap), PROBE_STEP, cap)
    }

    /// Index of the live entry with this hash whose key satisfies `eq`.
    ///
    /// Stops at the first Empty slot, walks past tombstones and stops after
    /// one full lap, so a table saturated with tombstones still terminates.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        for idx in self.probe(hash) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(e) if e.hash == hash && eq(&e.key) => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// The entry at `idx`. Panics if the slot is not occupied.
    #[inline]
    pub(crate) fn entry(&self, idx: usize) -> &Entry<K, V> {
        self.slots[idx].entry().expect("slot index from find is occupied")
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, idx: usize) -> &mut Entry<K, V> {
        self.slots[idx]
            .entry_mut()
            .expect("slot index from find is occupied")
    }

    /// Store a key known to be absent, then grow if the threshold is reached.
    pub(crate) fn insert_new(&mut self, hash: u64, key: K, value: V) {
        self.claim(Entry { key, value, hash });
        if self.len >= self.threshold {
            self.grow();
        }
        debug_assert!(self.len < self.capacity());
    }

    /// Place `entry` in the first Empty or Tombstone slot of its probe
    /// sequence. Does not check for duplicates or growth.
    fn claim(&mut self, entry: Entry<K, V>) {
        let idx = self
            .probe(entry.hash)
            .find(|&i| self.slots[i].is_free())
            .unwrap_or_else(|| {
                panic!(
                    "no free slot in probe sequence (len {}, capacity {})",
                    self.len,
                    self.capacity()
                )
            });
        if self.slots[idx].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[idx] = Slot::Occupied(entry);
        self.len += 1;
    }

    /// Tombstone the entry at `idx` and return it.
    pub(crate) fn bury(&mut self, idx: usize) -> Entry<K, V> {
        let entry = self.slots[idx]
            .bury()
            .expect("slot index from find is occupied");
        self.len -= 1;
        self.tombstones += 1;
        debug_assert!(self.len + self.tombstones <= self.capacity());
        entry
    }

    /// Double the capacity (kept coprime with the step) and rehash every live
    /// entry into a fresh array. Tombstones are dropped.
    fn grow(&mut self) {
        let doubled = self
            .capacity()
            .checked_mul(2)
            .expect("capacity overflow");
        let new_cap = next_coprime_capacity(doubled, PROBE_STEP);
        debug_assert!(is_coprime(PROBE_STEP, new_cap));

        let old = core::mem::replace(&mut self.slots, empty_slots(new_cap));
        self.len = 0;
        self.tombstones = 0;
        self.threshold = threshold_for(new_cap, self.load_factor);

        for slot in old {
            if let Slot::Occupied(entry) = slot {
                self.claim(entry);
            }
        }
    }

    /// Live entries in slot order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.slots.iter().filter_map(Slot::entry)
    }

    /// Full O(capacity) consistency check, for tests.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let live = self.slots.iter().filter(|s| s.entry().is_some()).count();
        let dead = self.slots.iter().filter(|s| s.is_tombstone()).count();
        assert_eq!(live, self.len, "len counter out of sync");
        assert_eq!(dead, self.tombstones, "tombstone counter out of sync");
        assert!(self.len < self.capacity(), "table has no empty slot");
        assert!(is_coprime(PROBE_STEP, self.capacity()));
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some(e) = slot.entry() {
                let reachable = self
                    .probe(e.hash)
                    .take_while(|&i| i != idx)
                    .all(|i| !matches!(self.slots[i], Slot::Empty));
                assert!(reachable, "entry at {idx} is cut off by an empty slot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(capacity: usize, lf: f64) -> RawTable<u32, u32> {
        RawTable::new(capacity, lf)
    }

    /// Invariant: entries sharing a hash chain along the probe sequence and are
    /// told apart by the key predicate.
    #[test]
    fn same_hash_entries_chain_along_probe_sequence() {
        let mut t = raw(11, 1.0);
        for k in 0..5 {
            t.insert_new(42, k, k * 10);
        }
        let seq: Vec<usize> = t.probe(42).take(5).collect();
        for (k, idx) in seq.iter().enumerate() {
            assert_eq!(t.entry(*idx).key, k as u32);
        }
        for k in 0..5 {
            let idx = t.find(42, |x| *x == k).unwrap();
            assert_eq!(t.entry(idx).value, k * 10);
        }
        assert_eq!(t.find(42, |x| *x == 99), None);
        t.assert_invariants();
    }

    /// Invariant: a tombstone does not end the search, and insertion reuses it.
    #[test]
    fn tombstone_is_skipped_by_find_and_reused_by_insert() {
        let mut t = raw(11, 1.0);
        t.insert_new(7, 1, 1);
        t.insert_new(7, 2, 2);
        let first = t.find(7, |k| *k == 1).unwrap();
        let e = t.bury(first);
        assert_eq!((e.key, e.value), (1, 1));
        assert_eq!(t.tombstones(), 1);

        assert!(t.find(7, |k| *k == 2).is_some());
        assert_eq!(t.find(7, |k| *k == 1), None);

        t.insert_new(7, 3, 3);
        assert_eq!(t.find(7, |k| *k == 3), Some(first));
        assert_eq!(t.tombstones(), 0);
        t.assert_invariants();
    }

    /// Invariant: lookups terminate in a table with no Empty slot left, and
    /// insertion still finds a tombstone to reuse.
    #[test]
    fn find_terminates_without_empty_slots() {
        let mut t = raw(5, 1.0);
        t.insert_new(1, 1, 10);
        for slot in t.slots.iter_mut().filter(|s| matches!(s, Slot::Empty)) {
            *slot = Slot::Tombstone;
        }
        t.tombstones = 4;

        assert_eq!(t.find(9_999, |_| true), None);
        assert!(t.find(1, |k| *k == 1).is_some());

        t.insert_new(2, 2, 20);
        assert_eq!(t.tombstones(), 3);
        assert_eq!(t.capacity(), 5);
        let idx = t.find(2, |k| *k == 2).unwrap();
        assert_eq!(t.entry(idx).value, 20);
    }

    /// Invariant: growth doubles capacity, clears tombstones and keeps entries.
    #[test]
    fn grow_rehashes_live_entries_only() {
        let mut t = raw(10, 0.5);
        t.insert_new(1, 1, 10);
        t.insert_new(2, 2, 20);
        let idx = t.find(2, |k| *k == 2).unwrap();
        t.bury(idx);
        t.insert_new(3, 3, 30);
        t.insert_new(4, 4, 40);
        t.insert_new(5, 5, 50);
        // Four live entries after one removal; threshold is 5.
        assert_eq!(t.capacity(), 10);
        t.insert_new(6, 6, 60);
        assert_eq!(t.capacity(), 20);
        assert_eq!(t.threshold(), 10);
        assert_eq!(t.tombstones(), 0);
        assert_eq!(t.len(), 5);
        for k in [1u32, 3, 4, 5, 6] {
            let idx = t.find(k as u64, |x| *x == k).unwrap();
            assert_eq!(t.entry(idx).value, k * 10);
        }
        assert_eq!(t.find(2, |k| *k == 2), None);
        t.assert_invariants();
    }

    /// Invariant: the capacity stays coprime with the step across growth.
    #[test]
    fn grow_keeps_capacity_coprime_with_step() {
        let mut t = raw(2, 0.5);
        t.insert_new(1, 1, 1);
        assert_eq!(t.capacity(), 4);
        for k in 2..10u32 {
            t.insert_new(k as u64, k, k);
            assert!(is_coprime(PROBE_STEP, t.capacity()));
        }
        t.assert_invariants();
    }
}
