//! The validating codec: wire primitive <-> domain value.

use crate::codec::coerce_scalar;
use crate::config::MessageConfig;
use crate::scope::{current_config, current_property};
use crate::traits::{Scalar, ValueObject};
use crate::types::{DomainError, ErrorVec, Outcome, ValidationFailure};
use core::fmt;
use core::marker::PhantomData;

/// Converts a wire primitive into `V` through [`ValueObject::try_create`],
/// recording failures into the active scope instead of returning them.
///
/// `read` never fails: it returns `None` and leaves the failure in the scope.
/// The four failure kinds are handled as follows:
///
/// - absent and `V::REQUIRED`: one absence failure, `try_create` is not called
/// - wire value of the wrong shape (`read_scalar` only): one format failure,
///   `try_create` is not called
/// - [`DomainError::Validation`]: each message, attributed to the current field
/// - [`DomainError::Unexpected`]: flattened into one message under the current field
///
/// The field is the current property name when one is set, otherwise the name
/// the constructor reported, otherwise a type-derived default.
///
/// `write` is the structural inverse and never re-validates.
///
/// # Examples
///
/// ```
/// use field_rail::{scope, DomainError, ValidatingCodec, ValueObject};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Age(i32);
///
/// impl ValueObject for Age {
///     type Primitive = i32;
///
///     fn try_create(value: Option<i32>, field: Option<&str>) -> Result<Self, DomainError> {
///         match value {
///             Some(v) if v >= 0 => Ok(Age(v)),
///             _ => Err(DomainError::validation(field.unwrap_or("age"), "Age cannot be negative.")),
///         }
///     }
///
///     fn to_primitive(&self) -> i32 {
///         self.0
///     }
/// }
///
/// let handle = scope::open();
/// let codec = ValidatingCodec::<Age>::new();
///
/// assert_eq!(codec.read(Some(30)), Some(Age(30)));
/// assert_eq!(codec.read(Some(-1)), None);
/// assert_eq!(codec.write(Some(&Age(30))), Some(30));
///
/// let err = handle.materialize().unwrap();
/// assert_eq!(err.messages("age").unwrap(), ["Age cannot be negative.".to_string()]);
/// ```
pub struct ValidatingCodec<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V: ValueObject> ValidatingCodec<V> {
    #[inline]
    pub const fn new() -> Self {
        Self { _marker: PhantomData }
    }

    /// Field used when no property name is active and the constructor names none.
    pub fn default_field_name(config: &MessageConfig) -> String {
        match V::FIELD_NAME {
            Some(name) => name.to_owned(),
            None => config.naming.type_field_name::<V>(),
        }
    }

    /// Converts without touching any scope.
    pub fn evaluate(
        &self,
        wire: Option<V::Primitive>,
        field: Option<&str>,
        config: &MessageConfig,
    ) -> Outcome<V> {
        if wire.is_none() && V::REQUIRED {
            let field = field
                .map(str::to_owned)
                .unwrap_or_else(|| Self::default_field_name(config));
            let message = config.required_message(&field);
            return Outcome::invalid(ValidationFailure::absence(field, message));
        }

        match V::try_create(wire, field) {
            Ok(value) => Outcome::Valid(value),
            Err(error) => Outcome::Invalid(domain_failures::<V>(error, field, config)),
        }
    }

    /// Like [`evaluate`](Self::evaluate), starting from an uncoerced wire value.
    ///
    /// A value that cannot be coerced into `V::Primitive` is a format failure and
    /// short-circuits before the constructor runs.
    pub fn evaluate_scalar(
        &self,
        wire: Option<Scalar>,
        field: Option<&str>,
        config: &MessageConfig,
    ) -> Outcome<V> {
        match wire.filter(|scalar| !scalar.is_null()) {
            None => self.evaluate(None, field, config),
            Some(scalar) => {
                let name = field
                    .map(str::to_owned)
                    .unwrap_or_else(|| Self::default_field_name(config));
                coerce_scalar::<V::Primitive>(scalar, &name, config)
                    .and_then(|primitive| self.evaluate(Some(primitive), field, config))
            },
        }
    }

    /// Converts using the current property name and scope, recording failures.
    pub fn read(&self, wire: Option<V::Primitive>) -> Option<V> {
        let field = current_property();
        self.evaluate(wire, field.as_deref(), &current_config())
            .report()
    }

    /// Like [`read`](Self::read), starting from an uncoerced wire value.
    pub fn read_scalar(&self, wire: Option<Scalar>) -> Option<V> {
        let field = current_property();
        self.evaluate_scalar(wire, field.as_deref(), &current_config())
            .report()
    }

    #[inline]
    pub fn write(&self, value: Option<&V>) -> Option<V::Primitive> {
        value.map(ValueObject::to_primitive)
    }
}

/// Turns a constructor error into failures attributed to `field`.
fn domain_failures<V: ValueObject>(
    error: DomainError,
    field: Option<&str>,
    config: &MessageConfig,
) -> ErrorVec<ValidationFailure> {
    let fallback = || {
        field
            .map(str::to_owned)
            .unwrap_or_else(|| ValidatingCodec::<V>::default_field_name(config))
    };

    match error {
        DomainError::Validation(errors) if !errors.is_empty() => errors
            .pairs()
            .map(|(own, message)| {
                let attributed = match field {
                    Some(field) => field.to_owned(),
                    None if own.is_empty() => fallback(),
                    None => own.to_owned(),
                };
                ValidationFailure::domain(attributed, message)
            })
            .collect(),
        DomainError::Validation(_) => {
            let field = fallback();
            let message = config.unexpected_message(&field, "the value was rejected");
            smallvec::smallvec![ValidationFailure::unexpected(field, message)]
        },
        DomainError::Unexpected { code, detail } => {
            let field = fallback();
            tracing::debug!(field = %field, code = %code, "unexpected constructor failure flattened");
            let message = config.unexpected_message(&field, &detail);
            smallvec::smallvec![ValidationFailure::unexpected(field, message)]
        },
    }
}

impl<V> Clone for ValidatingCodec<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ValidatingCodec<V> {}

impl<V> Default for ValidatingCodec<V> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<V> fmt::Debug for ValidatingCodec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingCodec")
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}

/// A required value-object field.
///
/// Holds `None` only when reading failed; in that case the failure sits in the
/// scope and the aggregation boundary rejects the enclosing unit of work, so a
/// caller that got past the boundary sees every `Required` bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Required<V>(Option<V>);

impl<V> Required<V> {
    #[inline]
    pub fn new(value: V) -> Self {
        Self(Some(value))
    }

    /// A field whose read failed.
    #[inline]
    pub fn unbound() -> Self {
        Self(None)
    }

    #[inline]
    pub fn from_option(value: Option<V>) -> Self {
        Self(value)
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.0.as_ref()
    }

    #[inline]
    pub fn into_value(self) -> Option<V> {
        self.0
    }
}

impl<V> From<V> for Required<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
