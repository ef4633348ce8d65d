use core::fmt;

use serde::{Deserialize, Serialize};

/// Where a recorded failure came from.
///
/// All kinds end up in the same [`FieldErrorSet`](crate::FieldErrorSet) with the
/// same shape; the kind is kept for logging and for callers that inspect an
/// [`Outcome`](crate::Outcome) before it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required value was missing or null.
    Absence,
    /// The wire primitive could not be coerced into the expected shape.
    Format,
    /// The value object's constructor rejected the value.
    Domain,
    /// The constructor failed with something other than a validation error.
    Unexpected,
}

impl FailureKind {
    /// Short lower-case label, used in log fields.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absence => "absence",
            Self::Format => "format",
            Self::Domain => "domain",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The atomic unit appended to a scope: a field name and a reason.
///
/// # Examples
///
/// ```
/// use field_rail::{FailureKind, ValidationFailure};
///
/// let failure = ValidationFailure::domain("email", "Email must contain @.");
/// assert_eq!(failure.field(), "email");
/// assert_eq!(failure.kind(), FailureKind::Domain);
/// assert_eq!(failure.to_string(), "email: Email must contain @.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFailure {
    field: String,
    reason: String,
    kind: FailureKind,
}

impl ValidationFailure {
    /// Creates a failure of an explicit kind.
    #[inline]
    pub fn new(kind: FailureKind, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into(), kind }
    }

    #[inline]
    pub fn absence(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Absence, field, reason)
    }

    #[inline]
    pub fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Format, field, reason)
    }

    #[inline]
    pub fn domain(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Domain, field, reason)
    }

    #[inline]
    pub fn unexpected(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Unexpected, field, reason)
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Re-attributes the failure to another field.
    #[must_use]
    #[inline]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Splits the failure into `(field, reason, kind)`.
    #[inline]
    pub fn into_parts(self) -> (String, String, FailureKind) {
        (self.field, self.reason, self.kind)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}
