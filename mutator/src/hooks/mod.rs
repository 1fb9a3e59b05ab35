//! Mutation hooks: the callbacks that compute replacement values.
//!
//! This module provides:
//!
//! - **The contract** ([`MutateHook`]): given the owning record and the
//!   current value, produce a replacement.
//! - **Closure adapters** ([`from_fn`], [`typed`]): build hooks without a
//!   dedicated type.
//! - **Built-in hooks** (`mask`): [`PasswordMask`], [`TextMask`] and
//!   [`Replace`].
//!
//! # Example
//!
//! ```rust
//! use mutator::{MutateHook, PasswordMask, TextMask, typed};
//!
//! let mask = PasswordMask::new();
//! let replaced = mask.mutate(None, &String::from("hunter2")).unwrap();
//! assert_eq!(*replaced.downcast::<String>().unwrap(), "********");
//!
//! let tail = TextMask::keep_last(4);
//! assert_eq!(tail.apply_to("sk_live_abc123"), "**********c123");
//!
//! let upper = typed(|value: &String| value.to_uppercase());
//! let replaced = upper.mutate(None, &String::from("admin")).unwrap();
//! assert_eq!(*replaced.downcast::<String>().unwrap(), "ADMIN");
//! ```

use std::{any::Any, fmt, marker::PhantomData, sync::Arc};

mod mask;

pub use mask::{MASK_CHAR, PASSWORD_MASK, PasswordMask, Replace, TextMask};

// =============================================================================
// MutateHook - the callback contract
// =============================================================================

/// Computes the replacement for a matched struct field or map entry.
///
/// `owner` is the record that contains the field, or `None` for map entries.
/// `current` is the value found at the matched location.
///
/// Returning `Some(value)` replaces the location with `value`. Returning
/// `None` keeps the current value. Either way the location is not traversed
/// further: a matched member is final.
///
/// # Panics
///
/// The replacement must have exactly the type of the matched location. If it
/// does not, the traversal panics at the point of assignment. Hooks that can
/// be registered for locations of several types should inspect `current`
/// (e.g. with [`Any::downcast_ref`]) and return `None` for types they do not
/// handle.
pub trait MutateHook: Send + Sync {
    /// Returns the replacement for `current`, or `None` to keep it.
    fn mutate(&self, owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>>;
}

impl<H> MutateHook for Arc<H>
where
    H: MutateHook + ?Sized,
{
    fn mutate(&self, owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        (**self).mutate(owner, current)
    }
}

impl<H> MutateHook for Box<H>
where
    H: MutateHook + ?Sized,
{
    fn mutate(&self, owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        (**self).mutate(owner, current)
    }
}

// =============================================================================
// Closure adapters
// =============================================================================

/// Hook backed by an untyped closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

/// Creates a hook from a closure with the full [`MutateHook`] signature.
///
/// ```rust
/// use std::any::Any;
///
/// use mutator::{MutateHook, from_fn};
///
/// let hook = from_fn(|owner: Option<&dyn Any>, current: &dyn Any| {
///     let len = current.downcast_ref::<String>()?.len();
///     owner.map(|_| Box::new("*".repeat(len)) as Box<dyn Any>)
/// });
///
/// assert!(hook.mutate(None, &String::from("abc")).is_none());
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(Option<&dyn Any>, &dyn Any) -> Option<Box<dyn Any>> + Send + Sync,
{
    FromFn { f }
}

impl<F> MutateHook for FromFn<F>
where
    F: Fn(Option<&dyn Any>, &dyn Any) -> Option<Box<dyn Any>> + Send + Sync,
{
    fn mutate(&self, owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        (self.f)(owner, current)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Hook that maps values of one concrete type. Created by [`typed`].
///
/// Locations holding any other type are kept unchanged, so a `Typed` hook
/// can never cause an assignment mismatch.
pub struct Typed<T, F> {
    f: F,
    _marker: PhantomData<fn(&T) -> T>,
}

/// Creates a hook that replaces values of type `T` with `f(current)`.
///
/// ```rust
/// use mutator::{MutateHook, typed};
///
/// let hook = typed(|port: &u16| port.saturating_add(1));
/// let replaced = hook.mutate(None, &8080_u16).unwrap();
/// assert_eq!(*replaced.downcast::<u16>().unwrap(), 8081);
///
/// assert!(hook.mutate(None, &String::from("not a port")).is_none());
/// ```
pub fn typed<T, F>(f: F) -> Typed<T, F>
where
    T: Any,
    F: Fn(&T) -> T + Send + Sync,
{
    Typed {
        f,
        _marker: PhantomData,
    }
}

impl<T, F> MutateHook for Typed<T, F>
where
    T: Any,
    F: Fn(&T) -> T + Send + Sync,
{
    fn mutate(&self, _owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        let current = current.downcast_ref::<T>()?;
        Some(Box::new((self.f)(current)))
    }
}

impl<T, F> fmt::Debug for Typed<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
