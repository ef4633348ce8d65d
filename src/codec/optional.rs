//! Maybe-aware codec: absence is a value, not a failure.

use crate::codec::ValidatingCodec;
use crate::config::MessageConfig;
use crate::traits::{Scalar, ValueObject};
use crate::types::Outcome;
use core::fmt;

/// Two-state container for optional value-object fields.
///
/// Once read, a `Maybe` never changes state. A present wire value that fails
/// validation resolves to `Absent`; the failure itself sits in the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Maybe<V> {
    #[default]
    Absent,
    Present(V),
}

impl<V> Maybe<V> {
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub fn as_option(&self) -> Option<&V> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    #[inline]
    pub fn into_option(self) -> Option<V> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    #[inline]
    pub fn map<B, F>(self, f: F) -> Maybe<B>
    where
        F: FnOnce(V) -> B,
    {
        match self {
            Self::Present(value) => Maybe::Present(f(value)),
            Self::Absent => Maybe::Absent,
        }
    }

    #[inline]
    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }
}

impl<V> From<Option<V>> for Maybe<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }
}

impl<V> From<Maybe<V>> for Option<V> {
    fn from(value: Maybe<V>) -> Self {
        value.into_option()
    }
}

/// Wraps a [`ValidatingCodec`] so that a missing or null wire value reads as
/// [`Maybe::Absent`] without recording anything.
///
/// Present values are validated exactly as the inner codec does, failures
/// included.
///
/// # Examples
///
/// ```
/// use field_rail::{scope, DomainError, Maybe, OptionalCodec, ValueObject};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Nickname(String);
///
/// impl ValueObject for Nickname {
///     type Primitive = String;
///
///     fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
///         match value {
///             Some(v) if v.len() <= 10 => Ok(Nickname(v)),
///             _ => Err(DomainError::validation(field.unwrap_or("nickname"), "Nickname is too long.")),
///         }
///     }
///
///     fn to_primitive(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// let handle = scope::open();
/// let codec = OptionalCodec::<Nickname>::new();
///
/// assert_eq!(codec.read(None), Maybe::Absent);
/// assert!(!handle.scope().has_errors());
///
/// assert_eq!(codec.read(Some("far too long a nickname".into())), Maybe::Absent);
/// assert!(handle.scope().has_errors());
/// ```
pub struct OptionalCodec<V> {
    inner: ValidatingCodec<V>,
}

impl<V: ValueObject> OptionalCodec<V> {
    #[inline]
    pub const fn new() -> Self {
        Self { inner: ValidatingCodec::new() }
    }

    #[inline]
    pub fn inner(&self) -> &ValidatingCodec<V> {
        &self.inner
    }

    /// Converts without touching any scope. Absence is [`Outcome::Absent`].
    pub fn evaluate(
        &self,
        wire: Option<V::Primitive>,
        field: Option<&str>,
        config: &MessageConfig,
    ) -> Outcome<V> {
        match wire {
            None => Outcome::Absent,
            Some(primitive) => self.inner.evaluate(Some(primitive), field, config),
        }
    }

    pub fn read(&self, wire: Option<V::Primitive>) -> Maybe<V> {
        match wire {
            None => Maybe::Absent,
            Some(primitive) => self.inner.read(Some(primitive)).into(),
        }
    }

    pub fn read_scalar(&self, wire: Option<Scalar>) -> Maybe<V> {
        match wire.filter(|scalar| !scalar.is_null()) {
            None => Maybe::Absent,
            Some(scalar) => self.inner.read_scalar(Some(scalar)).into(),
        }
    }

    #[inline]
    pub fn write(&self, value: &Maybe<V>) -> Option<V::Primitive> {
        self.inner.write(value.as_option())
    }
}

impl<V> Clone for OptionalCodec<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for OptionalCodec<V> {}

impl<V> Default for OptionalCodec<V> {
    fn default() -> Self {
        Self { inner: ValidatingCodec::default() }
    }
}

impl<V> fmt::Debug for OptionalCodec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalCodec")
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}
