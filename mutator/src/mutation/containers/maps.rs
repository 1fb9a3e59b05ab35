//! Traversal of key-value containers.
//!
//! Every entry is offered to [`Traversal::map_entry`] with its own key. The
//! map itself is recorded in the visited set so that a map reached twice is
//! walked once.

use std::collections::{BTreeMap, HashMap};

use crate::{
    mutation::{Mutable, Traversal},
    registry::ToHookKey,
};

// =============================================================================
// Map container implementations
// =============================================================================

impl<K, V, S> Mutable for HashMap<K, V, S>
where
    K: ToHookKey + 'static,
    V: Mutable,
    S: 'static,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if !traversal.enter(&*self) {
            return;
        }
        for (key, value) in self.iter_mut() {
            traversal.map_entry(key, value);
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        if !traversal.enter(self) {
            return;
        }
        for value in self.values() {
            value.mutate_shared(traversal);
        }
    }
}

impl<K, V> Mutable for BTreeMap<K, V>
where
    K: ToHookKey + 'static,
    V: Mutable,
{
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if !traversal.enter(&*self) {
            return;
        }
        for (key, value) in self.iter_mut() {
            traversal.map_entry(key, value);
        }
    }

    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        if !traversal.enter(self) {
            return;
        }
        for value in self.values() {
            value.mutate_shared(traversal);
        }
    }
}
