//! probing-hashtable: an open-addressing hash map with fixed-step linear
//! probing, tombstone deletion and load-factor driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a single mutable key/value table whose probing, deletion and
//!   growth rules are simple enough to check by hand.
//! - Layers:
//!   - `probe`: home-slot hashing (Fibonacci multiplicative hashing) and
//!     the probe sequence `(home + i * 7) mod capacity`.
//!   - `RawTable<K, V>`: owns the slot array and the counters; finds,
//!     claims and tombstones slots by precomputed hash; grows and rehashes.
//!   - `ProbingHashTable<K, V>`: public API. Hashes keys, guards against
//!     reentrancy in debug builds, maps raw slot indices to values.
//!
//! Slots
//! - Each slot is `Empty`, `Occupied(entry)` or `Tombstone`.
//! - Lookups stop at `Empty`, skip `Tombstone`, and give up after one full
//!   lap of the probe sequence (reachable when churn has replaced every
//!   `Empty` with a `Tombstone`).
//! - Insertions take the first `Empty` or `Tombstone` on the key's probe
//!   sequence once the key is known to be absent.
//!
//! Growth
//! - After a new key is stored, if `len >= threshold` the capacity is
//!   doubled and every live entry is moved into a fresh array. Tombstones
//!   are discarded; this is the only way they are reclaimed.
//! - `threshold = floor(capacity * load_factor)`, bounded to
//!   `[1, capacity - 1]` so an `Empty` slot always exists after growth.
//! - Removal never shrinks the table.
//!
//! Capacity and step
//! - The probe order covers every slot iff `gcd(7, capacity) == 1`.
//!   Capacities are normalised at construction to the next value coprime
//!   with 7 (and at least 2); doubling keeps them coprime since 7 is prime,
//!   and growth re-checks anyway.
//!
//! Hasher and rehashing invariants
//! - Each entry stores the `u64` hash it was placed with; growth reuses it,
//!   so `K: Hash` is never invoked after insertion.
//! - Keys are hashed with `hashbrown`'s default hash builder; there is no
//!   way to plug in another.
//!
//! Reentrancy
//! - `K: Hash`/`K: Eq` run while probing. A debug-only guard panics if
//!   such code re-enters the same table. Release builds carry no guard
//!   state.
//!
//! Notes and non-goals
//! - Single-threaded: the table is `Send` but not `Sync`. Wrap it in a
//!   `Mutex` to share it.
//! - No iteration, no shrink, no custom hashers, no ordering guarantees.
//! - A load factor of `0.0` yields a threshold of 1, so every insertion of
//!   a new key doubles the capacity.

mod config;
mod probe;
mod probing_hash_table;
mod probing_hash_table_proptest;
mod raw_table;
mod reentrancy;
mod slot;

// Public surface
pub use config::{ConfigError, TableConfig, Validated, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use probe::PROBE_STEP;
pub use probing_hash_table::ProbingHashTable;
