//! The mutation engine.
//!
//! - `traits`: the [`Mutable`] shape trait.
//! - `traversal`: per-call state and the member hook points.
//! - `containers`: [`Mutable`] for std leaves, wrappers, cells and maps.
//! - `json`: [`Mutable`] for `serde_json` values (feature `json`).

mod containers;
#[cfg(feature = "json")]
mod json;
mod traits;
mod traversal;

pub use traits::Mutable;
pub use traversal::Traversal;

use crate::registry::HookRegistry;

/// How a record member is turned into a registry key.
///
/// Map entries are always looked up by their own key, whatever the strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MatchStrategy {
    /// The key is the bare member name: `"password"`.
    #[default]
    FieldName,
    /// The key is the owning type's name joined to the member name:
    /// `"my_app::Smtp.password"`.
    TypeQualified,
}

/// Walks values and replaces matched members in place.
///
/// A `Mutator` owns a [`HookRegistry`] and a fixed [`MatchStrategy`]. It is
/// `Send + Sync`: one instance can be shared by threads that each execute
/// on their own values, and hooks may be registered while traversals run.
///
/// ```
/// use mutator::{Mutable, Mutator, PasswordMask};
///
/// #[derive(Mutable)]
/// #[mutate(type_name = "Smtp")]
/// struct Smtp {
///     password: String,
/// }
///
/// #[derive(Mutable)]
/// #[mutate(type_name = "Database")]
/// struct Database {
///     password: String,
/// }
///
/// let mutator = Mutator::type_qualified();
/// mutator.hooks().add("Smtp.password", PasswordMask::new());
///
/// let mut smtp = Smtp { password: "a".into() };
/// let mut database = Database { password: "b".into() };
/// mutator.execute(&mut smtp);
/// mutator.execute(&mut database);
///
/// assert_eq!(smtp.password, "********");
/// assert_eq!(database.password, "b");
/// ```
#[derive(Debug, Default)]
pub struct Mutator {
    hooks: HookRegistry,
    strategy: MatchStrategy,
}

impl Mutator {
    /// Creates a mutator with an empty registry.
    #[must_use]
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            hooks: HookRegistry::new(),
            strategy,
        }
    }

    /// Creates a mutator that matches record members by bare name.
    #[must_use]
    pub fn field_match() -> Self {
        Self::new(MatchStrategy::FieldName)
    }

    /// Creates a mutator that matches record members by `"<type>.<member>"`.
    #[must_use]
    pub fn type_qualified() -> Self {
        Self::new(MatchStrategy::TypeQualified)
    }

    /// The registry this mutator looks hooks up in.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// The strategy fixed at construction.
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Walks `target` and replaces every matched member in place.
    ///
    /// Unmatched members are walked recursively. Locations already visited
    /// during this call are not walked again, so cyclic graphs terminate.
    ///
    /// # Panics
    ///
    /// Panics if a hook returns a value of the wrong type for the location it
    /// matched.
    pub fn execute<T>(&self, target: &mut T)
    where
        T: Mutable + ?Sized,
    {
        tracing::debug!(
            strategy = ?self.strategy,
            hooks = self.hooks.len(),
            "mutation started"
        );
        let mut traversal = Traversal::new(self);
        target.mutate_with(&mut traversal);
        tracing::debug!(visited = traversal.visited(), "mutation finished");
    }

    /// Walks `target` through a shared reference.
    ///
    /// Only contents behind interior mutability (`RefCell`, `Mutex`,
    /// `RwLock`) can be replaced this way; everything else is walked but
    /// left untouched.
    pub fn execute_shared<T>(&self, target: &T)
    where
        T: Mutable + ?Sized,
    {
        tracing::debug!(strategy = ?self.strategy, "shared mutation started");
        let mut traversal = Traversal::new(self);
        target.mutate_shared(&mut traversal);
        tracing::debug!(visited = traversal.visited(), "shared mutation finished");
    }

    /// Returns a mutated clone of `value`, leaving `value` untouched.
    ///
    /// Shared handles (`Rc`, `Arc`, `Weak`) are cloned shallowly, so their
    /// contents still belong to `value`. The walk stops at such handles and
    /// the clone keeps their contents unmutated.
    #[must_use]
    pub fn mutated<T>(&self, value: &T) -> T
    where
        T: Mutable + Clone,
    {
        let mut copy = value.clone();
        tracing::debug!(strategy = ?self.strategy, "detached mutation started");
        let mut traversal = Traversal::detached(self);
        copy.mutate_with(&mut traversal);
        tracing::debug!(visited = traversal.visited(), "detached mutation finished");
        copy
    }
}
