//! `Mutable` for `serde_json` values.
//!
//! A JSON object is a key-value container: each member is offered to
//! [`Traversal::map_entry`] under its string key, and hooks receive the
//! member as a `serde_json::Value`. Arrays are sequences and every other
//! variant is a scalar, so neither is descended into.

use serde_json::{Map, Value};

use super::{Mutable, Traversal};

impl Mutable for Value {
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if let Self::Object(map) = self {
            map.mutate_with(traversal);
        }
    }
}

impl Mutable for Map<String, Value> {
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>) {
        if !traversal.enter(&*self) {
            return;
        }
        for (key, value) in self.iter_mut() {
            traversal.map_entry(key, value);
        }
    }
}
