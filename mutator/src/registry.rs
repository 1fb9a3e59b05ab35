//! Hook registry: the mapping from member identity to mutation hook.
//!
//! Keys are [`HookKey`] values. A key has no required structure: it can be a
//! bare field name (`"password"`), a type-qualified name
//! (`"my_app::Smtp.password"`), or the key of a map entry (a string, an
//! integer, a `bool` or a `char`).
//!
//! The registry is safe to share between threads. Writers take an exclusive
//! lock for the duration of the map edit; lookups take a shared lock and
//! return a cloned handle, so a hook never runs while the lock is held.

use std::{borrow::Cow, collections::HashMap, fmt, rc::Rc, sync::Arc};

use parking_lot::RwLock;

use crate::hooks::MutateHook;

// =============================================================================
// HookKey
// =============================================================================

/// Identity of a registered hook.
///
/// All integer widths (except `u128`) normalise to [`HookKey::Int`], so a hook
/// registered for `7` matches a `HashMap<u8, _>` entry and a
/// `BTreeMap<i64, _>` entry alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookKey {
    /// A field name, a type-qualified field name or a string map key.
    Str(Cow<'static, str>),
    /// An integer map key.
    Int(i128),
    /// A boolean map key.
    Bool(bool),
    /// A character map key.
    Char(char),
}

impl HookKey {
    /// Builds the `"<type>.<field>"` key used by type-qualified matching.
    #[must_use]
    pub fn qualified(type_name: &str, field: &str) -> Self {
        Self::Str(Cow::Owned(format!("{type_name}.{field}")))
    }

    /// Builds a string key without allocating.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }

    /// Returns the string form of the key, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for HookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for HookKey {
    fn from(value: &str) -> Self {
        Self::Str(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for HookKey {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for HookKey {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for HookKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for HookKey {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

macro_rules! impl_integer_hook_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for HookKey {
                fn from(value: $ty) -> Self {
                    Self::Int(i128::from(value))
                }
            }

            impl ToHookKey for $ty {
                fn to_hook_key(&self) -> Option<HookKey> {
                    Some(HookKey::Int(i128::from(*self)))
                }
            }
        )*
    };
}

impl_integer_hook_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for HookKey {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Self::Int(value as i128)
    }
}

impl From<usize> for HookKey {
    fn from(value: usize) -> Self {
        Self::Int(value as i128)
    }
}

// =============================================================================
// ToHookKey - map keys that can be matched against the registry
// =============================================================================

/// Converts a map key into the [`HookKey`] it is looked up by.
///
/// Map containers only participate in traversal when their key type
/// implements this trait. Returning `None` means the entry can never match a
/// hook; its value is still traversed.
pub trait ToHookKey {
    /// Returns the registry key for this map key.
    fn to_hook_key(&self) -> Option<HookKey>;
}

impl ToHookKey for HookKey {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(self.clone())
    }
}

impl ToHookKey for String {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(Cow::Owned(self.clone())))
    }
}

impl ToHookKey for &'static str {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(Cow::Borrowed(*self)))
    }
}

impl ToHookKey for Cow<'static, str> {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(self.clone()))
    }
}

impl ToHookKey for Box<str> {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(Cow::Owned(self.to_string())))
    }
}

impl ToHookKey for Rc<str> {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(Cow::Owned(self.to_string())))
    }
}

impl ToHookKey for Arc<str> {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Str(Cow::Owned(self.to_string())))
    }
}

impl ToHookKey for bool {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Bool(*self))
    }
}

impl ToHookKey for char {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::Char(*self))
    }
}

impl ToHookKey for isize {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::from(*self))
    }
}

impl ToHookKey for usize {
    fn to_hook_key(&self) -> Option<HookKey> {
        Some(HookKey::from(*self))
    }
}

// =============================================================================
// HookRegistry
// =============================================================================

/// Lock-guarded mapping from [`HookKey`] to [`MutateHook`].
///
/// Every [`Mutator`](crate::Mutator) owns one registry; there is no global
/// registry. Registration may happen at any time, including while another
/// thread is executing a traversal with the same mutator. A lookup racing a
/// concurrent `add` may or may not observe the new hook.
///
/// `add` and `remove` return `&Self` so registrations can be chained:
///
/// ```
/// use mutator::{HookRegistry, PasswordMask};
///
/// let registry = HookRegistry::new();
/// registry
///     .add("password", PasswordMask::new())
///     .add("token", PasswordMask::with_mask("[token]"));
///
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<HashMap<HookKey, Arc<dyn MutateHook>>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` for `key`, replacing any hook already registered for it.
    pub fn add<K, H>(&self, key: K, hook: H) -> &Self
    where
        K: Into<HookKey>,
        H: MutateHook + 'static,
    {
        self.add_shared(key, Arc::new(hook))
    }

    /// Registers an already shared hook for `key`.
    ///
    /// Use this to register one hook instance under several keys.
    pub fn add_shared<K>(&self, key: K, hook: Arc<dyn MutateHook>) -> &Self
    where
        K: Into<HookKey>,
    {
        let key = key.into();
        tracing::trace!(%key, "registering mutate hook");
        self.hooks.write().insert(key, hook);
        self
    }

    /// Removes the hook registered for `key`. Removing an absent key is a no-op.
    pub fn remove<K>(&self, key: K) -> &Self
    where
        K: Into<HookKey>,
    {
        let key = key.into();
        if self.hooks.write().remove(&key).is_some() {
            tracing::trace!(%key, "removed mutate hook");
        }
        self
    }

    /// Returns the hook registered for `key`.
    pub fn get(&self, key: &HookKey) -> Option<Arc<dyn MutateHook>> {
        self.hooks.read().get(key).cloned()
    }

    /// Returns `true` if a hook is registered for `key`.
    pub fn contains(&self, key: &HookKey) -> bool {
        self.hooks.read().contains_key(key)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Returns `true` if no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    /// Returns the registered keys in sorted order.
    pub fn keys(&self) -> Vec<HookKey> {
        let mut keys: Vec<HookKey> = self.hooks.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Removes every registered hook.
    pub fn clear(&self) {
        self.hooks.write().clear();
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::{any::Any, sync::Arc, thread};

    use super::{HookKey, HookRegistry, ToHookKey};
    use crate::hooks::{MutateHook, PasswordMask};

    struct Constant(&'static str);

    impl MutateHook for Constant {
        fn mutate(&self, _owner: Option<&dyn Any>, _current: &dyn Any) -> Option<Box<dyn Any>> {
            Some(Box::new(self.0.to_string()))
        }
    }

    fn run(registry: &HookRegistry, key: &HookKey) -> Option<String> {
        let hook = registry.get(key)?;
        let replacement = hook.mutate(None, &String::new())?;
        replacement.downcast::<String>().ok().map(|value| *value)
    }

    #[test]
    fn add_then_get_returns_hook() {
        let registry = HookRegistry::new();
        registry.add("password", Constant("masked"));

        assert_eq!(
            run(&registry, &HookKey::from("password")).as_deref(),
            Some("masked")
        );
        assert!(registry.get(&HookKey::from("username")).is_none());
    }

    #[test]
    fn add_overwrites_existing_key() {
        let registry = HookRegistry::new();
        registry.add("password", Constant("first"));
        registry.add("password", Constant("second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            run(&registry, &HookKey::from("password")).as_deref(),
            Some("second")
        );
    }

    #[test]
    fn remove_deletes_and_tolerates_absent_keys() {
        let registry = HookRegistry::new();
        registry
            .add("password", Constant("masked"))
            .remove("password")
            .remove("never-registered");

        assert!(registry.is_empty());
        assert!(!registry.contains(&HookKey::from("password")));
    }

    #[test]
    fn owned_and_borrowed_strings_are_the_same_key() {
        let registry = HookRegistry::new();
        registry.add(String::from("token"), Constant("masked"));

        assert!(registry.contains(&HookKey::from("token")));
    }

    #[test]
    fn integer_widths_normalise_to_one_key() {
        let registry = HookRegistry::new();
        registry.add(7_i32, Constant("seven"));

        assert_eq!(7_u8.to_hook_key(), Some(HookKey::Int(7)));
        assert!(registry.contains(&7_u64.to_hook_key().unwrap()));
        assert!(registry.contains(&7_usize.to_hook_key().unwrap()));
        assert!(!registry.contains(&HookKey::from("7")));
    }

    #[test]
    fn qualified_key_joins_type_and_field() {
        assert_eq!(
            HookKey::qualified("app::Smtp", "password"),
            HookKey::from("app::Smtp.password")
        );
    }

    #[test]
    fn keys_are_sorted_and_debug_lists_them() {
        let registry = HookRegistry::new();
        registry
            .add("b", PasswordMask::new())
            .add("a", PasswordMask::new());

        assert_eq!(registry.keys(), vec![HookKey::from("a"), HookKey::from("b")]);
        assert_eq!(
            format!("{registry:?}"),
            r#"HookRegistry { keys: [Str("a"), Str("b")] }"#
        );
    }

    #[test]
    fn one_hook_shared_under_several_keys() {
        let registry = HookRegistry::new();
        let mask: Arc<dyn MutateHook> = Arc::new(PasswordMask::new());
        registry
            .add_shared("Password", Arc::clone(&mask))
            .add_shared("password", mask);

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn concurrent_registration_keeps_every_key() {
        let registry = HookRegistry::new();

        thread::scope(|scope| {
            for worker in 0..8_i32 {
                let registry = &registry;
                scope.spawn(move || {
                    for index in 0..50_i32 {
                        registry.add(worker * 1000 + index, PasswordMask::new());
                        let _ = registry.get(&HookKey::from(worker * 1000));
                    }
                });
            }
        });

        assert_eq!(registry.len(), 8 * 50);
    }

    #[test]
    fn clear_removes_everything() {
        let registry = HookRegistry::new();
        registry.add(true, PasswordMask::new()).add('x', PasswordMask::new());
        registry.clear();

        assert!(registry.is_empty());
    }

    #[test]
    fn runtime_strings_address_the_same_hook() {
        let registry = HookRegistry::new();
        registry.add(HookKey::from_static("password"), PasswordMask::new());
        let name = String::from("password");

        assert!(registry.get(&HookKey::from(name.as_str())).is_some());
        registry.remove(name.as_str());

        assert!(registry.is_empty());
    }
}
