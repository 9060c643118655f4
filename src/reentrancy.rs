//! Debug-only detection of user code re-entering a table mid-operation.
//!
//! Probing calls `K: Hash` and `K: Eq`. If one of those impls reaches back
//! into the same table (only possible through raw pointers or interior
//! mutability), the slot array may be observed half-updated. Each table
//! embeds a [`Reentrancy`] tracker; public operations call
//! `self.reentrancy.enter("op")` and hold the returned guard for the
//! duration. In release builds both types are zero-sized and do nothing.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug, Default)]
pub(crate) struct Reentrancy {
    /// Name of the operation currently inside the table, if any.
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
}

impl Reentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
        }
    }

    /// Mark `op` as running. Panics in debug builds if another operation is
    /// already inside this table.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> OpGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!("reentrant `{op}` while `{outer}` is in progress on the same table");
            }
            self.active.set(Some(op));
            return OpGuard {
                owner: self,
                _op: PhantomData,
            };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return OpGuard { _op: PhantomData };
        }
    }

    #[cfg(all(test, debug_assertions))]
    pub(crate) fn active(&self) -> Option<&'static str> {
        self.active.get()
    }
}

/// Clears the active operation on drop.
pub(crate) struct OpGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a Reentrancy,
    _op: PhantomData<&'a ()>,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
