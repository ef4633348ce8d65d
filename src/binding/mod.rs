//! Binding of route, query and header values into value objects.
//!
//! Non-body sources deliver raw strings. A [`BindingAdapter`] runs the same
//! contract as the JSON codecs over them:
//!
//! 1. absent value: nothing is recorded and the target stays [`Binding::Unbound`]
//! 2. textual parse into the primitive; on failure one
//!    `"<name> is not a valid <kind>."` message under the binding name
//! 3. the value object's constructor, attributed to the binding name
//!
//! Only one of (2) and (3) can fail for a given input.
//!
//! # Examples
//!
//! ```
//! use field_rail::prelude::*;
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct PageSize(u32);
//!
//! impl ValueObject for PageSize {
//!     type Primitive = u32;
//!
//!     fn try_create(value: Option<u32>, field: Option<&str>) -> Result<Self, DomainError> {
//!         match value {
//!             Some(v) if (1..=100).contains(&v) => Ok(PageSize(v)),
//!             _ => Err(DomainError::validation(field.unwrap_or("pageSize"), "Page size must be between 1 and 100.")),
//!         }
//!     }
//!
//!     fn to_primitive(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let query: HashMap<String, String> = [("size".to_string(), "abc".to_string())].into();
//!
//! let result = field_rail::boundary::run(|| {
//!     BindingAdapter::<PageSize>::query("size").bind_from(&query)
//! });
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.messages("size").unwrap(), ["size is not a valid integer.".to_string()]);
//! ```
use crate::codec::{parse_raw, Maybe, ValidatingCodec};
use crate::config::MessageConfig;
use crate::scope::{self, current_config};
use crate::traits::ValueObject;
use crate::types::{Outcome, ValidationFailure};
use core::fmt;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Where a bound value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingSource {
    Route,
    Query,
    Header,
}

impl BindingSource {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Query => "query",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup of raw values by key.
pub trait ValueProvider {
    fn value(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ValueProvider for HashMap<String, String, S> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ValueProvider for BTreeMap<String, String> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ValueProvider for [(&str, &str)] {
    fn value(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl ValueProvider for Vec<(String, String)> {
    fn value(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<T: ValueProvider + ?Sized> ValueProvider for &T {
    fn value(&self, key: &str) -> Option<&str> {
        (**self).value(key)
    }
}

/// Result of binding one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding<V> {
    /// No value was supplied; nothing was recorded.
    Unbound,
    Bound(V),
    /// A value was supplied and rejected; the failure is in the scope.
    Failed,
}

impl<V> Binding<V> {
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    #[inline]
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::Unbound)
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Bound(value) => Some(value),
            _ => None,
        }
    }
}

/// Binds one named route, query or header value into `V`.
pub struct BindingAdapter<V> {
    name: Cow<'static, str>,
    source: BindingSource,
    codec: ValidatingCodec<V>,
}

impl<V: ValueObject> BindingAdapter<V> {
    #[inline]
    pub fn new(source: BindingSource, name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), source, codec: ValidatingCodec::new() }
    }

    #[inline]
    pub fn route(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(BindingSource::Route, name)
    }

    #[inline]
    pub fn query(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(BindingSource::Query, name)
    }

    #[inline]
    pub fn header(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(BindingSource::Header, name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn source(&self) -> BindingSource {
        self.source
    }

    /// Parses and constructs without touching any scope.
    ///
    /// Absence is [`Outcome::Absent`]; the caller decides whether that matters.
    pub fn evaluate(&self, raw: Option<&str>, config: &MessageConfig) -> Outcome<V> {
        match raw {
            None => Outcome::Absent,
            Some(raw) => parse_raw::<V::Primitive>(raw, &self.name, config)
                .and_then(|primitive| self.codec.evaluate(Some(primitive), Some(&*self.name), config)),
        }
    }

    /// Binds a raw value, recording any failure into the active scope.
    ///
    /// The constructor runs with the binding name as the current property, so
    /// codecs it calls attribute their failures to this binding.
    pub fn bind(&self, raw: Option<&str>) -> Binding<V> {
        scope::with_property(&self.name, || self.bind_in_property(raw))
    }

    fn bind_in_property(&self, raw: Option<&str>) -> Binding<V> {
        let outcome = self.evaluate(raw, &current_config());
        tracing::trace!(
            source = %self.source,
            name = %self.name,
            present = raw.is_some(),
            valid = outcome.is_valid(),
            "binding value"
        );
        match outcome {
            Outcome::Absent => Binding::Unbound,
            outcome => match outcome.report() {
                Some(value) => Binding::Bound(value),
                None => Binding::Failed,
            },
        }
    }

    /// Looks the value up by this adapter's name and binds it.
    #[inline]
    pub fn bind_from<P: ValueProvider + ?Sized>(&self, provider: &P) -> Binding<V> {
        self.bind(provider.value(&self.name))
    }

    /// Binds a value that must be present, recording an absence failure if not.
    pub fn bind_required(&self, raw: Option<&str>) -> Option<V> {
        match self.bind(raw) {
            Binding::Bound(value) => Some(value),
            Binding::Failed => None,
            Binding::Unbound => {
                let message = current_config().required_message(&self.name);
                scope::record(ValidationFailure::absence(&*self.name, message));
                None
            },
        }
    }

    /// Binds an optional value: absence and failure both read as `Absent`.
    #[inline]
    pub fn bind_optional(&self, raw: Option<&str>) -> Maybe<V> {
        self.bind(raw).into_value().into()
    }
}

impl<V> Clone for BindingAdapter<V> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), source: self.source, codec: self.codec }
    }
}

impl<V> fmt::Debug for BindingAdapter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingAdapter")
            .field("source", &self.source)
            .field("name", &self.name)
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}
