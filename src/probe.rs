//! Hash-to-slot mapping and the probe sequence shared by insertion and lookup.
//!
//! The home slot is computed by Fibonacci hashing: the hash code is
//! multiplied by the golden-ratio conjugate (0.618...), the fractional part
//! is kept and scaled by the capacity. All of this is done in 64-bit fixed
//! point so no precision is lost for large hash codes.
//!
//! Collisions are resolved by visiting `(home + i * step) mod capacity` for
//! `i = 0, 1, 2, ...`. That order covers every slot exactly once iff
//! `gcd(step, capacity) == 1`; callers keep capacities coprime with the step
//! via [`next_coprime_capacity`].

/// Stride between consecutive probes.
pub const PROBE_STEP: usize = 7;

/// `2^64 / φ`, i.e. the golden-ratio conjugate as a 64-bit binary fraction.
const GOLDEN_FRACTION: u64 = 0x9E37_79B9_7F4A_7C15;

/// Map a hash code to its home slot in `[0, capacity)`.
///
/// Computes `floor(capacity * frac(hash * 0.6180339887...))`.
#[inline]
pub(crate) fn home_slot(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    let frac = hash.wrapping_mul(GOLDEN_FRACTION);
    ((frac as u128 * capacity as u128) >> 64) as usize
}

pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[inline]
pub(crate) fn is_coprime(step: usize, capacity: usize) -> bool {
    gcd(step, capacity) == 1
}

/// Smallest capacity `>= min` whose probe order with `step` is exhaustive.
///
/// Panics on `usize` overflow.
pub(crate) fn next_coprime_capacity(min: usize, step: usize) -> usize {
    assert!(step > 0, "probe step must be positive");
    let mut capacity = min.max(1);
    while !is_coprime(step, capacity) {
        capacity = capacity.checked_add(1).expect("capacity overflow");
    }
    capacity
}

/// Iterator over the slot indices of one probe sequence.
///
/// Yields exactly `capacity` indices, starting at the home slot, then stops.
/// With a coprime step this is a permutation of `0..capacity`.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    next: usize,
    stride: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub(crate) fn new(home: usize, step: usize, capacity: usize) -> Self {
        debug_assert!(home < capacity);
        Self {
            next: home,
            stride: step % capacity,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.next;
        self.next += self.stride;
        if self.next >= self.capacity {
            self.next -= self.capacity;
        }
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
