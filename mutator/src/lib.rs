//! Hook-driven, in-place mutation of nested data.
//!
//! A [`Mutator`] walks a value graph and, at every struct field or map entry,
//! looks the member up in its [`HookRegistry`]. When a hook is registered for
//! the member, the hook computes a replacement that is written back in place;
//! otherwise the walk descends into the member. The typical use is scrubbing
//! passwords and tokens before a value is logged or serialized.
//!
//! This crate separates:
//! - **Hooks**: what a matched value is replaced with ([`MutateHook`], and the
//!   built-in [`PasswordMask`], [`TextMask`], [`Replace`]).
//! - **Registry**: which members are matched ([`HookRegistry`], keyed by
//!   [`HookKey`]).
//! - **Traversal**: how a value is walked ([`Mutable`], derived with
//!   `#[derive(Mutable)]`, and implemented here for std containers).
//!
//! What it does not do:
//! - deep-copy the input; mutation is destructive
//! - mutate map keys; only values are replaced
//! - descend into sequences (`Vec`, arrays, slices, sets); they are leaves
//!
//! ```
//! use mutator::{Mutable, Mutator, PasswordMask};
//!
//! #[derive(Mutable)]
//! struct Credentials {
//!     username: String,
//!     password: String,
//! }
//!
//! let mutator = Mutator::field_match();
//! mutator.hooks().add("password", PasswordMask::new());
//!
//! let mut credentials = Credentials {
//!     username: "admin".into(),
//!     password: "Master#123".into(),
//! };
//! mutator.execute(&mut credentials);
//!
//! assert_eq!(credentials.username, "admin");
//! assert_eq!(credentials.password, "********");
//! ```
//!
//! The `Mutable` derive macro lives in `mutator-derive` and is re-exported
//! from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use mutator_derive::Mutable;

#[allow(unused_extern_crates)]
extern crate self as mutator;

// Module declarations
#[cfg(feature = "json")]
pub mod config;
pub mod hooks;
mod mutation;
pub mod registry;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tracing;

#[cfg(feature = "json")]
pub use config::MutatorConfig;
// Re-exports from hooks module
pub use hooks::{
    FromFn, MASK_CHAR, MutateHook, PASSWORD_MASK, PasswordMask, Replace, TextMask, Typed, from_fn,
    typed,
};
// Re-exports from mutation module
pub use mutation::{MatchStrategy, Mutable, Mutator, Traversal};
// Re-exports from registry module
pub use registry::{HookKey, HookRegistry, ToHookKey};
#[cfg(feature = "slog")]
pub use crate::slog::{MutatedJson, SlogMutatedExt};
pub use crate::tracing::TracingMutatedExt;
