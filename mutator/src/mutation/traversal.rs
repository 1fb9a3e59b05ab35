//! Per-call traversal state.
//!
//! A [`Traversal`] lives for exactly one [`Mutator::execute`] call. It holds
//! the visited set that makes the walk terminate on cyclic graphs, and the
//! helpers that derived and container implementations call at each member
//! boundary.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashSet,
    fmt, mem, ptr,
    sync::Arc,
};

use super::{MatchStrategy, Mutator, traits::Mutable};
use crate::{
    hooks::MutateHook,
    registry::{HookKey, ToHookKey},
};

/// Identity of an addressable location: its address and the type stored there.
///
/// The type is part of the identity because a record and its first member
/// share an address.
type Location = (usize, TypeId);

/// State of a single traversal.
///
/// Obtained only through [`Mutator::execute`]; `Mutable` implementations
/// receive it as a parameter and call back into it.
pub struct Traversal<'m> {
    mutator: &'m Mutator,
    visited: HashSet<Location>,
    detached: bool,
}

impl<'m> Traversal<'m> {
    pub(super) fn new(mutator: &'m Mutator) -> Self {
        Self {
            mutator,
            visited: HashSet::new(),
            detached: false,
        }
    }

    /// A traversal over a fresh clone.
    ///
    /// Shared handles in a clone still point at the source value's contents,
    /// so a detached traversal never follows a handle it does not own.
    pub(super) fn detached(mutator: &'m Mutator) -> Self {
        Self {
            detached: true,
            ..Self::new(mutator)
        }
    }

    /// Returns `true` when contents reachable only through shared handles
    /// must be left alone.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// The mutator driving this traversal.
    pub fn mutator(&self) -> &'m Mutator {
        self.mutator
    }

    /// Number of distinct locations recorded so far.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Records the location of `node`.
    ///
    /// Returns `false` when the location was already visited during this
    /// traversal, in which case the caller must not descend into it again.
    /// Zero-sized values have no distinct address and are never recorded.
    pub fn enter<T>(&mut self, node: &T) -> bool
    where
        T: Any + ?Sized,
    {
        if mem::size_of_val(node) == 0 {
            return true;
        }
        let address = ptr::from_ref(node).cast::<()>().addr();
        if self.visited.insert((address, TypeId::of::<T>())) {
            return true;
        }
        tracing::trace!(
            type_name = type_name::<T>(),
            address,
            "location already visited, skipping"
        );
        false
    }

    /// Offers one member of a record to the registry.
    ///
    /// `get` and `get_mut` project the member out of `owner`; they return
    /// `None` when the member does not exist in the current value (an
    /// inactive enum variant). On a hook match the hook receives `owner` and
    /// the member, and its replacement is assigned to the member. Without a
    /// match the traversal recurses into the member.
    ///
    /// # Panics
    ///
    /// Panics if the hook returns a value whose type is not the member's type.
    pub fn record_field<O, F, G, M>(
        &mut self,
        owner: &mut O,
        type_name: &str,
        field: &'static str,
        get: G,
        get_mut: M,
    ) where
        O: Any,
        F: Mutable,
        G: Fn(&O) -> Option<&F>,
        M: Fn(&mut O) -> Option<&mut F>,
    {
        let Some(current) = get(owner) else {
            return;
        };
        match self.field_hook(type_name, field) {
            Some((key, hook)) => {
                tracing::trace!(%key, "mutate hook matched record field");
                let owner_view: &dyn Any = &*owner;
                let replacement = hook.mutate(Some(owner_view), current);
                if let (Some(replacement), Some(slot)) = (replacement, get_mut(owner)) {
                    assign_replacement(slot, replacement, &key);
                }
            }
            None => {
                if let Some(member) = get_mut(owner) {
                    member.mutate_with(self);
                }
            }
        }
    }

    /// Offers one entry of a key-value container to the registry.
    ///
    /// The entry key is looked up as-is, whatever the [`MatchStrategy`]. On a
    /// match the hook receives no owner and the entry value, and its
    /// replacement is written back under the same key. Without a match the
    /// traversal recurses into the value.
    ///
    /// # Panics
    ///
    /// Panics if the hook returns a value whose type is not the value type.
    pub fn map_entry<K, V>(&mut self, key: &K, value: &mut V)
    where
        K: ToHookKey + ?Sized,
        V: Mutable,
    {
        let matched = key
            .to_hook_key()
            .and_then(|key| self.mutator.hooks().get(&key).map(|hook| (key, hook)));
        match matched {
            Some((key, hook)) => {
                tracing::trace!(%key, "mutate hook matched map entry");
                if let Some(replacement) = hook.mutate(None, &*value) {
                    assign_replacement(value, replacement, &key);
                }
            }
            None => value.mutate_with(self),
        }
    }

    fn field_hook(
        &self,
        type_name: &str,
        field: &'static str,
    ) -> Option<(HookKey, Arc<dyn MutateHook>)> {
        let key = match self.mutator.strategy() {
            MatchStrategy::FieldName => HookKey::from_static(field),
            MatchStrategy::TypeQualified => HookKey::qualified(type_name, field),
        };
        self.mutator.hooks().get(&key).map(|hook| (key, hook))
    }
}

impl fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("strategy", &self.mutator.strategy())
            .field("visited", &self.visited.len())
            .field("detached", &self.detached)
            .finish()
    }
}

/// Writes a hook's replacement into `slot`.
///
/// A replacement of the wrong type is a bug in the hook, not a traversal
/// condition, so it panics instead of being skipped.
#[track_caller]
fn assign_replacement<T>(slot: &mut T, replacement: Box<dyn Any>, location: &HookKey)
where
    T: Any,
{
    match replacement.downcast::<T>() {
        Ok(value) => *slot = *value,
        Err(_) => panic!(
            "mutate hook for `{location}` returned a value that is not a `{}`",
            type_name::<T>()
        ),
    }
}

// =============================================================================
// Tests
// =============================================================================
