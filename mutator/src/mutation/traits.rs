//! The structural accessor trait.
//!
//! [`Mutable`] is how a type exposes its shape to the traversal. Every
//! implementation falls into one of four categories:
//!
//! - **Record**: types deriving `Mutable`. Each member is offered to
//!   [`Traversal::record_field`], which either applies a hook or recurses.
//! - **Key-value container**: maps. Each entry is offered to
//!   [`Traversal::map_entry`].
//! - **Reference / wrapper**: `Option`, `Box`, `Rc`, `Arc`, `Weak` and the
//!   cell types. These dereference once and delegate.
//! - **Leaf**: everything else. The implementation does nothing.

use std::any::Any;

use super::traversal::Traversal;

/// A type that a [`Mutator`](crate::Mutator) can walk.
///
/// Implemented by `#[derive(Mutable)]` for records and by this crate for std
/// containers, wrappers and leaf types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Mutable`",
    label = "this type cannot be walked by a `Mutator`",
    note = "use `#[derive(Mutable)]` on the type definition",
    note = "or mark the field with `#[mutate(skip)]`"
)]
pub trait Mutable: Any {
    /// Walks `self` through an exclusive reference.
    ///
    /// Members of `self` are settable: matched members are replaced in place.
    fn mutate_with(&mut self, traversal: &mut Traversal<'_>);

    /// Walks `self` through a shared reference.
    ///
    /// Nothing reached this way is settable except through interior
    /// mutability, so only cell types (`RefCell`, `Mutex`, `RwLock`) do real
    /// work here; records and maps forward to their members. The default
    /// implementation stops, which is right for leaves.
    fn mutate_shared(&self, traversal: &mut Traversal<'_>) {
        let _ = traversal;
    }
}
