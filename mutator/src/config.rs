//! Declarative mutator configuration.
//!
//! A [`MutatorConfig`] names the strategy, the mask and the keys to mask, so
//! the set of scrubbed fields can live next to the rest of an application's
//! settings instead of in code.
//!
//! ```
//! use mutator::{MatchStrategy, MutatorConfig};
//!
//! let config = MutatorConfig::from_json_str(
//!     r#"{ "strategy": "type_qualified", "fields": ["Smtp.password"] }"#,
//! )?;
//! let mutator = config.build();
//!
//! assert_eq!(mutator.strategy(), MatchStrategy::TypeQualified);
//! assert_eq!(mutator.hooks().len(), 1);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    hooks::{MutateHook, PasswordMask},
    mutation::{MatchStrategy, Mutator},
};

/// Serializable description of a [`Mutator`] that masks a fixed set of keys.
///
/// Every entry of `fields` is registered as a string key with one shared
/// [`PasswordMask`], using `mask` when set and the default mask otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutatorConfig {
    /// Matching strategy for record members.
    pub strategy: MatchStrategy,
    /// Replacement text; `None` means the default password mask.
    pub mask: Option<String>,
    /// Keys to mask: member names, type-qualified names or map keys.
    pub fields: Vec<String>,
}

impl MutatorConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a mutator with a mask registered for every configured key.
    #[must_use]
    pub fn build(&self) -> Mutator {
        let mutator = Mutator::new(self.strategy);
        let mask: Arc<dyn MutateHook> = Arc::new(match &self.mask {
            Some(mask) => PasswordMask::with_mask(mask.clone()),
            None => PasswordMask::new(),
        });
        for field in &self.fields {
            mutator.hooks().add_shared(field.clone(), Arc::clone(&mask));
        }
        tracing::debug!(
            strategy = ?self.strategy,
            fields = self.fields.len(),
            "built mutator from configuration"
        );
        mutator
    }
}

#[cfg(test)]
mod tests {
    use super::MutatorConfig;
    use crate::{HookKey, MatchStrategy};

    #[test]
    fn empty_object_uses_defaults() {
        let config = MutatorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MutatorConfig::default());
        assert_eq!(config.strategy, MatchStrategy::FieldName);
        assert!(config.build().hooks().is_empty());
    }

    #[test]
    fn registers_every_field_with_custom_mask() {
        let config = MutatorConfig::from_json_str(
            r#"{ "mask": "[hidden]", "fields": ["password", "token"] }"#,
        )
        .unwrap();
        let mutator = config.build();

        assert_eq!(
            mutator.hooks().keys(),
            vec![HookKey::from("password"), HookKey::from("token")]
        );
        let hook = mutator.hooks().get(&HookKey::from("token")).unwrap();
        let replaced = hook
            .mutate(None, &String::from("abc"))
            .and_then(|value| value.downcast::<String>().ok());
        assert_eq!(replaced.as_deref().map(String::as_str), Some("[hidden]"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MutatorConfig::from_json_str(r#"{ "feilds": [] }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(MutatorConfig::from_json_str(r#"{ "strategy": "fuzzy" }"#).is_err());
    }

    #[test]
    fn strategy_names_round_trip() {
        let json = serde_json::to_string(&MatchStrategy::TypeQualified).unwrap();
        assert_eq!(json, r#""type_qualified""#);
    }
}
