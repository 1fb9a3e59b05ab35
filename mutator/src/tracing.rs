//! Adapter for emitting mutated values through `tracing`.
//!
//! [`TracingMutatedExt::tracing_mutated`] clones the value, runs the mutator
//! on the clone and wraps the clone's `Debug` output as a display value. The
//! original is never formatted.
//!
//! # Example
//!
//! ```
//! use mutator::{Mutable, Mutator, PasswordMask, TracingMutatedExt};
//!
//! #[derive(Clone, Debug, Mutable)]
//! struct Login {
//!     user: String,
//!     password: String,
//! }
//!
//! let mutator = Mutator::field_match();
//! mutator.hooks().add("password", PasswordMask::new());
//!
//! let login = Login { user: "admin".into(), password: "Master#123".into() };
//! tracing::info!(login = %login.tracing_mutated(&mutator), "signed in");
//! assert_eq!(login.password, "Master#123");
//! ```

use std::fmt;

use tracing::field::{DisplayValue, display};

use crate::mutation::{Mutable, Mutator};

/// Extension trait for logging mutated values as display strings.
///
/// This works with any tracing subscriber but the output is a flat string,
/// not structured data.
pub trait TracingMutatedExt {
    /// Mutates a clone of the value and wraps its `Debug` output for
    /// `tracing`.
    fn tracing_mutated(&self, mutator: &Mutator) -> DisplayValue<String>;
}

impl<T> TracingMutatedExt for T
where
    T: Mutable + Clone + fmt::Debug,
{
    fn tracing_mutated(&self, mutator: &Mutator) -> DisplayValue<String> {
        display(format!("{:?}", mutator.mutated(self)))
    }
}
