use crate::types::FieldErrorSet;
use std::borrow::Cow;
use std::fmt;

/// Error returned by a value object's fallible constructor.
///
/// Codecs treat the two variants differently:
///
/// - [`DomainError::Validation`] is a declared rejection. Its messages are
///   recorded as-is, attributed to the field the codec is converting (falling back
///   to the field names carried in the set when no property is active).
/// - [`DomainError::Unexpected`] is any other failure. It is flattened into one
///   message under the current field so the aggregate keeps a uniform shape.
///
/// # Examples
///
/// ```
/// use field_rail::DomainError;
///
/// let err = DomainError::validation("firstName", "Name cannot be empty.");
/// assert!(err.is_validation());
/// assert_eq!(err.to_string(), "firstName: Name cannot be empty.");
///
/// let err = DomainError::unexpected("lookup.failed", "directory unavailable");
/// assert!(!err.is_validation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    Validation(FieldErrorSet),
    Unexpected { code: Cow<'static, str>, detail: String },
}

impl DomainError {
    /// A single declared validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut set = FieldErrorSet::new();
        set.push(field, message);
        Self::Validation(set)
    }

    /// Several declared validation failures at once.
    #[inline]
    pub fn validation_many(errors: FieldErrorSet) -> Self {
        Self::Validation(errors)
    }

    /// A failure that is not a validation rejection.
    #[inline]
    pub fn unexpected(code: impl Into<Cow<'static, str>>, detail: impl Into<String>) -> Self {
        Self::Unexpected { code: code.into(), detail: detail.into() }
    }

    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{}", errors),
            Self::Unexpected { code, detail } => write!(f, "{} ({})", detail, code),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<FieldErrorSet> for DomainError {
    fn from(errors: FieldErrorSet) -> Self {
        Self::Validation(errors)
    }
}
