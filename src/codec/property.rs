//! Codecs bound to a known property name.
//!
//! A codec selected by *type* cannot tell which field it is converting. Binding it
//! to a property name makes every failure it reports carry that name, which is
//! what keeps two `Email` fields on one structure apart in the aggregate.

use crate::codec::{Maybe, OptionalCodec, ValidatingCodec};
use crate::config::MessageConfig;
use crate::scope::with_property;
use crate::traits::{Scalar, ValueObject};
use crate::types::Outcome;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use std::borrow::Cow;

/// A property name known at compile time.
///
/// Usually declared with [`property_name!`](crate::property_name).
pub trait PropertyName {
    const NAME: &'static str;
}

/// Runtime-named wrapper around a [`ValidatingCodec`].
///
/// Every conversion runs inside [`with_property`] for its name.
///
/// # Examples
///
/// ```
/// use field_rail::{scope, DomainError, PropertyBoundCodec, ValueObject};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Email(String);
///
/// impl ValueObject for Email {
///     type Primitive = String;
///
///     fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
///         match value {
///             Some(v) if v.contains('@') => Ok(Email(v)),
///             _ => Err(DomainError::validation(field.unwrap_or("email"), "Email must contain @.")),
///         }
///     }
///
///     fn to_primitive(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// let handle = scope::open();
/// PropertyBoundCodec::<Email>::new("billingEmail").read(Some("nope".into()));
/// PropertyBoundCodec::<Email>::new("shippingEmail").read(Some("nope".into()));
///
/// let err = handle.materialize().unwrap();
/// assert_eq!(err.fields().collect::<Vec<_>>(), ["billingEmail", "shippingEmail"]);
/// ```
pub struct PropertyBoundCodec<V> {
    name: Cow<'static, str>,
    inner: ValidatingCodec<V>,
}

impl<V: ValueObject> PropertyBoundCodec<V> {
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), inner: ValidatingCodec::new() }
    }

    /// Binds the codec to a compile-time property name.
    #[inline]
    pub fn named<N: PropertyName>() -> Self {
        Self::new(N::NAME)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn inner(&self) -> &ValidatingCodec<V> {
        &self.inner
    }

    /// Converts without touching any scope, attributing failures to this name.
    #[inline]
    pub fn evaluate(&self, wire: Option<V::Primitive>, config: &MessageConfig) -> Outcome<V> {
        self.inner.evaluate(wire, Some(&*self.name), config)
    }

    pub fn read(&self, wire: Option<V::Primitive>) -> Option<V> {
        with_property(&self.name, || self.inner.read(wire))
    }

    pub fn read_scalar(&self, wire: Option<Scalar>) -> Option<V> {
        with_property(&self.name, || self.inner.read_scalar(wire))
    }

    /// Reads through an [`OptionalCodec`] under this name.
    pub fn read_optional(&self, wire: Option<V::Primitive>) -> Maybe<V> {
        with_property(&self.name, || OptionalCodec::<V>::new().read(wire))
    }

    pub fn write(&self, value: Option<&V>) -> Option<V::Primitive> {
        with_property(&self.name, || self.inner.write(value))
    }
}

impl<V> Clone for PropertyBoundCodec<V> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), inner: self.inner }
    }
}

impl<V> fmt::Debug for PropertyBoundCodec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBoundCodec")
            .field("name", &self.name)
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}

/// Serde field wrapper that converts `C` under the compile-time property `N`.
///
/// `C` is typically [`Required<V>`](crate::Required) or [`Maybe<V>`]. The wrapper
/// dereferences to `C`.
pub struct Named<N, C> {
    inner: C,
    _name: PhantomData<fn() -> N>,
}

impl<N: PropertyName, C> Named<N, C> {
    #[inline]
    pub fn new(inner: C) -> Self {
        Self { inner, _name: PhantomData }
    }

    #[inline]
    pub fn name() -> &'static str {
        N::NAME
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<N, C> Deref for Named<N, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<N, C> DerefMut for Named<N, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<N, C: Clone> Clone for Named<N, C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), _name: PhantomData }
    }
}

impl<N, C: PartialEq> PartialEq for Named<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<N, C: Eq> Eq for Named<N, C> {}

impl<N, C: Default> Default for Named<N, C> {
    fn default() -> Self {
        Self { inner: C::default(), _name: PhantomData }
    }
}

impl<N: PropertyName, C: fmt::Debug> fmt::Debug for Named<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Named")
            .field("name", &N::NAME)
            .field("inner", &self.inner)
            .finish()
    }
}
