//! Built-in masking hooks for string-like values.
//!
//! The masks recognise `String`, `Option<String>` and `Cow<'static, str>`
//! (plus `serde_json::Value::String` with the `json` feature). Values of any
//! other type are kept, so a mask registered for a key that also names a
//! non-string field never causes an assignment mismatch.

use std::{any::Any, borrow::Cow};

use super::MutateHook;

/// Mask written by [`PasswordMask::new`].
pub const PASSWORD_MASK: &str = "********";

/// Default character used by [`TextMask`].
pub const MASK_CHAR: char = '*';

/// Renders a replacement for the string-like value behind `current`.
fn replace_text(current: &dyn Any, render: impl Fn(&str) -> String) -> Option<Box<dyn Any>> {
    if let Some(value) = current.downcast_ref::<String>() {
        return Some(Box::new(render(value)));
    }
    if let Some(value) = current.downcast_ref::<Option<String>>() {
        return Some(Box::new(value.as_deref().map(&render)));
    }
    if let Some(value) = current.downcast_ref::<Cow<'static, str>>() {
        return Some(Box::new(Cow::<'static, str>::Owned(render(value))));
    }
    replace_json_text(current, &render)
}

#[cfg(feature = "json")]
fn replace_json_text(current: &dyn Any, render: &dyn Fn(&str) -> String) -> Option<Box<dyn Any>> {
    match current.downcast_ref::<serde_json::Value>() {
        Some(serde_json::Value::String(value)) => {
            Some(Box::new(serde_json::Value::String(render(value))))
        }
        _ => None,
    }
}

#[cfg(not(feature = "json"))]
fn replace_json_text(_current: &dyn Any, _render: &dyn Fn(&str) -> String) -> Option<Box<dyn Any>> {
    None
}

// =============================================================================
// PasswordMask
// =============================================================================

/// Replaces the whole value with a fixed mask.
///
/// The default mask is [`PASSWORD_MASK`]. When the mask is a `&'static str`,
/// `&'static str` fields are masked too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordMask {
    mask: Cow<'static, str>,
}

impl Default for PasswordMask {
    fn default() -> Self {
        Self {
            mask: Cow::Borrowed(PASSWORD_MASK),
        }
    }
}

impl PasswordMask {
    /// Creates a mask that writes [`PASSWORD_MASK`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mask that writes `mask`.
    #[must_use]
    pub fn with_mask(mask: impl Into<Cow<'static, str>>) -> Self {
        Self { mask: mask.into() }
    }

    /// The mask this hook writes.
    pub fn mask(&self) -> &str {
        &self.mask
    }
}

impl MutateHook for PasswordMask {
    fn mutate(&self, _owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        if current.is::<&'static str>() {
            return match self.mask {
                Cow::Borrowed(mask) => Some(Box::new(mask)),
                Cow::Owned(_) => None,
            };
        }
        replace_text(current, |_| self.mask.to_string())
    }
}

// =============================================================================
// TextMask
// =============================================================================

/// Masks the middle of a string while keeping a prefix and/or suffix visible.
///
/// The mask operates on Unicode scalar values. If the visible spans would
/// cover the whole value, the whole value is masked instead; empty values
/// stay empty.
///
/// Use [`TextMask::keep_first`], [`TextMask::keep_last`] or
/// [`TextMask::keep_both`] to create instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextMask {
    /// Number of leading characters to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the middle.
    mask_char: char,
}

impl TextMask {
    /// Keeps only the first `visible_prefix` characters visible.
    #[must_use]
    pub fn keep_first(visible_prefix: usize) -> Self {
        Self::keep_both(visible_prefix, 0)
    }

    /// Keeps only the last `visible_suffix` characters visible.
    #[must_use]
    pub fn keep_last(visible_suffix: usize) -> Self {
        Self::keep_both(0, visible_suffix)
    }

    /// Keeps both leading and trailing characters visible.
    #[must_use]
    pub fn keep_both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Applies the mask to a string value.
    pub fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();

        if self.visible_prefix.saturating_add(self.visible_suffix) >= total {
            chars.fill(self.mask_char);
            return chars.into_iter().collect();
        }

        for ch in &mut chars[self.visible_prefix..(total - self.visible_suffix)] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}

impl MutateHook for TextMask {
    fn mutate(&self, _owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        replace_text(current, |value| self.apply_to(value))
    }
}

// =============================================================================
// Replace
// =============================================================================

/// Replaces every value of type `T` with a clone of a fixed value.
///
/// Values of other types are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replace<T> {
    value: T,
}

impl<T> Replace<T>
where
    T: Any + Clone + Send + Sync,
{
    /// Creates a hook that writes `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> MutateHook for Replace<T>
where
    T: Any + Clone + Send + Sync,
{
    fn mutate(&self, _owner: Option<&dyn Any>, current: &dyn Any) -> Option<Box<dyn Any>> {
        current
            .is::<T>()
            .then(|| Box::new(self.value.clone()) as Box<dyn Any>)
    }
}

// =============================================================================
// Tests
// =============================================================================
