use crate::types::{FieldEntry, FieldErrorSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The single, field-grouped failure materialised at the edge of a unit of work.
///
/// It is never empty: [`AggregateValidationError::from_set`] returns `None` for an
/// empty set. Serialises to the wire shape consumed by whatever renders the
/// response, e.g. `{"email": ["Email must contain @."]}`.
///
/// # Examples
///
/// ```
/// use field_rail::{AggregateValidationError, FieldErrorSet};
///
/// let mut set = FieldErrorSet::new();
/// set.push("email", "Email must contain @.");
/// let err = AggregateValidationError::from_set(set).unwrap();
///
/// assert_eq!(err.messages("email"), Some(&["Email must contain @.".to_string()][..]));
/// assert_eq!(
///     serde_json::to_string(&err).unwrap(),
///     r#"{"email":["Email must contain @."]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateValidationError {
    errors: FieldErrorSet,
}

impl AggregateValidationError {
    /// Title used when rendering the aggregate as a message.
    pub const TITLE: &'static str = "One or more validation errors occurred.";

    /// Wraps a non-empty set; `None` if nothing was recorded.
    #[inline]
    pub fn from_set(errors: FieldErrorSet) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The grouped errors.
    #[inline]
    pub fn errors(&self) -> &FieldErrorSet {
        &self.errors
    }

    /// Messages for one field.
    #[inline]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field)
    }

    /// Field names in the order they were first reported.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors.fields()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldEntry> {
        self.errors.iter()
    }

    #[inline]
    pub fn into_errors(self) -> FieldErrorSet {
        self.errors
    }
}

impl fmt::Display for AggregateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::TITLE, self.errors)
    }
}

impl std::error::Error for AggregateValidationError {}
