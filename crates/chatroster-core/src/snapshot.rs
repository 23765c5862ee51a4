//! Single-owner wrapper around backend-allocated snapshots.
//!
//! The backend hands out objects that are only valid for the duration of a
//! callback. Anything the engine keeps is first copied into an
//! [`OwnedSnapshot`], which releases it exactly once when dropped. There is no
//! `Clone`: ownership moves, it is never shared.

use std::fmt;
use std::ops::Deref;

use crate::error::RosterError;
use crate::handle::ForeignHandle;

/// An immutable entity state handed over by the backend.
pub trait BackendObject {
    /// Human-readable entity name used in errors.
    const ENTITY: &'static str;

    fn handle(&self) -> ForeignHandle;

    /// Hook run exactly once, when the owning snapshot is dropped.
    fn release(&mut self) {}
}

pub struct OwnedSnapshot<T: BackendObject> {
    inner: Box<T>,
}

impl<T: BackendObject> OwnedSnapshot<T> {
    /// Take ownership of a backend allocation. A null source is an
    /// ownership-contract violation and fails loudly.
    pub fn adopt(source: Option<Box<T>>) -> Result<Self, RosterError> {
        match source {
            Some(inner) => Ok(Self { inner }),
            None => Err(RosterError::NullSnapshot { entity: T::ENTITY }),
        }
    }

    pub fn new(value: T) -> Self {
        Self {
            inner: Box::new(value),
        }
    }

    /// Copy a callback-scoped object so it can outlive the callback.
    pub fn copy_of(borrowed: &T) -> Self
    where
        T: Clone,
    {
        Self::new(borrowed.clone())
    }

    pub fn handle(&self) -> ForeignHandle {
        self.inner.handle()
    }
}

impl<T: BackendObject> Deref for OwnedSnapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: BackendObject> Drop for OwnedSnapshot<T> {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl<T: BackendObject + fmt::Debug> fmt::Debug for OwnedSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedSnapshot").field(&self.inner).finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Backend object that counts how often it was released.
    #[derive(Debug, Clone)]
    pub struct Tracked {
        pub handle: ForeignHandle,
        pub releases: Rc<Cell<usize>>,
    }

    impl Tracked {
        pub fn new(raw: u64) -> (Self, Rc<Cell<usize>>) {
            let releases = Rc::new(Cell::new(0));
            (
                Self {
                    handle: ForeignHandle::new(raw),
                    releases: releases.clone(),
                },
                releases,
            )
        }
    }

    impl BackendObject for Tracked {
        const ENTITY: &'static str = "tracked object";

        fn handle(&self) -> ForeignHandle {
            self.handle
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }
}
