//! Traversal of interior-mutability cells.
//!
//! Through an exclusive reference a cell is opened with `get_mut`, which
//! never blocks. Through a shared reference the cell is borrowed or locked
//! with the non-blocking `try_*` variant; a busy cell is skipped. A poisoned
//! std lock is still walked, since mutation does not depend on the invariant
//! the panicking thread may have broken.

use std::{
    cell::RefCell,
    sync::{Mutex, PoisonError, RwLock, TryLockError},
};

use crate::mutation::{Mutable, Traversal};

// =============================================================================
// RefCell
// =============================================================================

impl<T> Mutable for RefCell<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        self.get_mut().mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self.try_borrow_mut() {
            Ok(mut inner) => (*inner).mutate_with(traversal),
            Err(_) => tracing::trace!("RefCell already borrowed, skipping"),
        }
    }
}

// =============================================================================
// std::sync locks
// =============================================================================

impl<T> Mutable for Mutex<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        self.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self.try_lock() {
            Ok(mut inner) => (*inner).mutate_with(traversal),
            Err(TryLockError::Poisoned(poisoned)) => {
                (*poisoned.into_inner()).mutate_with(traversal);
            }
            Err(TryLockError::WouldBlock) => tracing::trace!("Mutex already locked, skipping"),
        }
    }
}

impl<T> Mutable for RwLock<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        self.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self.try_write() {
            Ok(mut inner) => (*inner).mutate_with(traversal),
            Err(TryLockError::Poisoned(poisoned)) => {
                (*poisoned.into_inner()).mutate_with(traversal);
            }
            Err(TryLockError::WouldBlock) => tracing::trace!("RwLock already locked, skipping"),
        }
    }
}

// =============================================================================
// parking_lot locks
// =============================================================================

impl<T> Mutable for parking_lot::Mutex<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        self.get_mut().mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self.try_lock() {
            Some(mut inner) => (*inner).mutate_with(traversal),
            None => tracing::trace!("Mutex already locked, skipping"),
        }
    }
}

impl<T> Mutable for parking_lot::RwLock<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        self.get_mut().mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self.try_write() {
            Some(mut inner) => (*inner).mutate_with(traversal),
            None => tracing::trace!("RwLock already locked, skipping"),
        }
    }
}
