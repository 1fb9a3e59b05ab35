//! Adapter for emitting mutated values through `slog`.
//!
//! This module connects [`Mutator`] with `slog` by providing a
//! `slog::Value` that serializes a mutated clone as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is taken from the mutated clone, not
//!   from the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented
//!   as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog`.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::mutation::{Mutable, Mutator};

/// JSON form of a mutated value, ready to be logged with `slog`.
#[derive(Clone, Debug, PartialEq)]
pub struct MutatedJson {
    value: JsonValue,
}

impl MutatedJson {
    /// Wraps an already mutated JSON value.
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON value that is logged.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// Unwraps the JSON value.
    pub fn into_value(self) -> JsonValue {
        self.value
    }
}

impl SlogValue for MutatedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Extension trait for ergonomic slog logging of mutated values as JSON.
///
/// ## Example
/// ```ignore
/// use mutator::SlogMutatedExt;
///
/// info!(logger, "login"; "request" => request.slog_mutated_json(&mutator));
/// ```
pub trait SlogMutatedExt: Mutable + Clone + Serialize {
    /// Mutates a clone of `self` and returns a `slog::Value` that serializes
    /// as structured JSON.
    ///
    /// If converting the clone into `serde_json::Value` fails, the returned
    /// value stores a JSON string with the message
    /// `"Failed to serialize mutated value"`.
    fn slog_mutated_json(&self, mutator: &Mutator) -> MutatedJson {
        let mutated = mutator.mutated(self);
        let json_value = serde_json::to_value(mutated).unwrap_or_else(|err| {
            JsonValue::String(format!("Failed to serialize mutated value: {err}"))
        });
        MutatedJson::new(json_value)
    }
}

impl<T> SlogMutatedExt for T where T: Mutable + Clone + Serialize {}
