//! `Mutable` implementations for standard library types.
//!
//! ## Sequences Are Leaves
//!
//! `Vec`, `VecDeque`, arrays, slices, tuples and sets are not descended into.
//! A record nested inside a `Vec` is therefore never mutated. Only records,
//! maps and single-value wrappers are walked.
//!
//! ## Map Keys Are Not Mutated
//!
//! For map containers (`HashMap`, `BTreeMap`), the key selects the hook and
//! only the **value** is replaced. Keys are left untouched to preserve
//! hashing/ordering invariants.
//!
//! ## Shared Handles Need Interior Mutability
//!
//! A uniquely owned `Rc`/`Arc` is walked like a `Box`. A shared one can only
//! reach contents behind `RefCell`, `Mutex` or `RwLock`. A cell that is
//! already borrowed or locked is skipped; this is also how a reference cycle
//! through a cell ends.

mod cells;
mod maps;
mod passthrough;
mod wrappers;


// =============================================================================
// Leaf implementation helper
// =============================================================================

macro_rules! impl_mutable_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl crate::mutation::Mutable for $ty {
                fn mutate_with(&mut self, _traversal: &mut crate::mutation::Traversal<'_>) {}
            }
        )*
    };
}

pub(super) use impl_mutable_leaf;
