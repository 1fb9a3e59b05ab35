//! Traversal of single-value wrappers and reference types.
//!
//! Wrappers are transparent: they are not recorded in the visited set, and a
//! hook lookup only ever happens at the record member or map entry that
//! holds the wrapper.
//!
//! A detached traversal (see [`Mutator::mutated`](crate::Mutator::mutated))
//! stops at every `Rc`, `Arc` or `Weak` it does not uniquely own, since the
//! contents belong to the value the clone was taken from.

use std::{
    rc::{self, Rc},
    sync::{self, Arc},
};

use crate::mutation::{Mutable, Traversal};

// =============================================================================
// Owning wrappers
// =============================================================================

impl<T> Mutable for Option<T>
where
    T: Mutable,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if let Some(value) = self {
            value.mutate_with(traversal);
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        if let Some(value) = self {
            value.mutate_shared(traversal);
        }
    }
}

impl<T, E> Mutable for Result<T, E>
where
    T: Mutable,
    E: Mutable,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        match self {
            Ok(value) => value.mutate_with(traversal),
            Err(err) => err.mutate_with(traversal),
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        match self {
            Ok(value) => value.mutate_shared(traversal),
            Err(err) => err.mutate_shared(traversal),
        }
    }
}

impl<T> Mutable for Box<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        (**self).mutate_with(traversal);
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        (**self).mutate_shared(traversal);
    }
}

// =============================================================================
// Reference-counted handles
// =============================================================================

impl<T> Mutable for Rc<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        match Rc::get_mut(self) {
            Some(inner) => inner.mutate_with(traversal),
            None if traversal.is_detached() => {
                tracing::trace!("shared Rc in a detached traversal, skipping");
            }
            None => (**self).mutate_shared(traversal),
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        (**self).mutate_shared(traversal);
    }
}

impl<T> Mutable for Arc<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        match Arc::get_mut(self) {
            Some(inner) => inner.mutate_with(traversal),
            None if traversal.is_detached() => {
                tracing::trace!("shared Arc in a detached traversal, skipping");
            }
            None => (**self).mutate_shared(traversal),
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        (**self).mutate_shared(traversal);
    }
}

impl<T> Mutable for rc::Weak<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if !traversal.is_detached() {
            self.mutate_shared(traversal);
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        if let Some(strong) = self.upgrade() {
            (*strong).mutate_shared(traversal);
        }
    }
}

impl<T> Mutable for sync::Weak<T>
where
    T: Mutable + ?Sized,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if !traversal.is_detached() {
            self.mutate_shared(traversal);
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        if let Some(strong) = self.upgrade() {
            (*strong).mutate_shared(traversal);
        }
    }
}
