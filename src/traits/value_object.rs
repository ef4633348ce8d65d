use crate::traits::Primitive;
use crate::types::DomainError;

/// Capability implemented by every domain value type a codec can produce.
///
/// This is the compile-time registration of a value object: its primitive shape
/// (`Primitive`), whether absence is an error (`REQUIRED`), its fallible
/// constructor and its inverse. The codecs never build a value any other way.
///
/// `try_create` receives the field name the caller is converting, when known, so
/// the same type can back several differently-named fields and report each one
/// correctly.
///
/// # Examples
///
/// ```
/// use field_rail::{DomainError, ValueObject};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Email(String);
///
/// impl ValueObject for Email {
///     type Primitive = String;
///
///     fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
///         let field = field.unwrap_or("email");
///         match value {
///             Some(v) if v.contains('@') => Ok(Email(v)),
///             _ => Err(DomainError::validation(field, "Email must contain @.")),
///         }
///     }
///
///     fn to_primitive(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// assert!(Email::try_create(Some("a@b.c".into()), None).is_ok());
/// ```
pub trait ValueObject: Sized {
    type Primitive: Primitive;

    /// When `true`, an absent wire value is an absence failure and
    /// `try_create` is never called with `None`.
    const REQUIRED: bool = true;

    /// Explicit default field name; otherwise one is derived from the type name.
    const FIELD_NAME: Option<&'static str> = None;

    fn try_create(primitive: Option<Self::Primitive>, field: Option<&str>) -> Result<Self, DomainError>;

    fn to_primitive(&self) -> Self::Primitive;
}
