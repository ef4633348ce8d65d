use crate::types::{ErrorVec, ValidationFailure};
use smallvec::smallvec;

/// Tagged result of a single codec conversion, before anything is reported.
///
/// Codecs compute an `Outcome` purely and then hand it to [`Outcome::report`],
/// which appends the failures to the active scope and yields the value, if any.
/// Keeping the two steps apart lets callers inspect or test a conversion without
/// an ambient scope.
///
/// # Variants
///
/// * `Valid(V)` - the conversion produced a value
/// * `Absent` - there was nothing to convert and that is not an error
/// * `Invalid(failures)` - one or more failures; never empty
///
/// # Examples
///
/// ```
/// use field_rail::{Outcome, ValidationFailure};
///
/// let ok: Outcome<i32> = Outcome::Valid(21);
/// assert_eq!(ok.map(|v| v * 2).into_value(), Some(42));
///
/// let bad: Outcome<i32> = Outcome::invalid(ValidationFailure::format("age", "age is not a valid integer."));
/// assert!(bad.is_invalid());
/// assert_eq!(bad.failures().len(), 1);
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Outcome<V> {
    Valid(V),
    Absent,
    Invalid(ErrorVec<ValidationFailure>),
}

impl<V> Outcome<V> {
    /// Creates an invalid outcome from a single failure.
    #[inline]
    pub fn invalid(failure: ValidationFailure) -> Self {
        Self::Invalid(smallvec![failure])
    }

    /// Creates an invalid outcome from several failures.
    ///
    /// An empty iterator yields [`Outcome::Absent`], never an empty `Invalid`.
    pub fn invalid_many<I>(failures: I) -> Self
    where
        I: IntoIterator<Item = ValidationFailure>,
    {
        let failures: ErrorVec<ValidationFailure> = failures.into_iter().collect();
        if failures.is_empty() {
            Self::Absent
        } else {
            Self::Invalid(failures)
        }
    }

    #[must_use]
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Maps the valid value, leaving `Absent` and failures untouched.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Outcome<B>
    where
        F: FnOnce(V) -> B,
    {
        match self {
            Self::Valid(value) => Outcome::Valid(f(value)),
            Self::Absent => Outcome::Absent,
            Self::Invalid(failures) => Outcome::Invalid(failures),
        }
    }

    /// Chains a further conversion that only runs on a valid value.
    ///
    /// This is how format coercion short-circuits domain validation: the domain
    /// step is the continuation and is never called once coercion fails.
    #[inline]
    pub fn and_then<B, F>(self, f: F) -> Outcome<B>
    where
        F: FnOnce(V) -> Outcome<B>,
    {
        match self {
            Self::Valid(value) => f(value),
            Self::Absent => Outcome::Absent,
            Self::Invalid(failures) => Outcome::Invalid(failures),
        }
    }

    /// Rewrites the field of every failure.
    pub fn attribute_to(self, field: &str) -> Self {
        match self {
            Self::Invalid(failures) => Self::Invalid(
                failures
                    .into_iter()
                    .map(|failure| failure.with_field(field))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Borrowed view of the failures; empty unless invalid.
    #[inline]
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::Invalid(failures) => failures,
            _ => &[],
        }
    }

    /// Extracts the value, if valid.
    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// Extracts the failures, if invalid.
    #[inline]
    pub fn into_failures(self) -> Option<ErrorVec<ValidationFailure>> {
        match self {
            Self::Invalid(failures) => Some(failures),
            _ => None,
        }
    }

    /// Converts into a `Result`, treating `Absent` as `Ok(None)`.
    #[inline]
    pub fn into_result(self) -> Result<Option<V>, ErrorVec<ValidationFailure>> {
        match self {
            Self::Valid(value) => Ok(Some(value)),
            Self::Absent => Ok(None),
            Self::Invalid(failures) => Err(failures),
        }
    }

    /// Appends any failures to the active scope and returns the value.
    ///
    /// Outside a scope the failures are dropped, which keeps codecs usable from
    /// code that never opened one.
    pub fn report(self) -> Option<V> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Absent => None,
            Self::Invalid(failures) => {
                for failure in failures {
                    crate::scope::record(failure);
                }
                None
            },
        }
    }
}

impl<V> From<Option<V>> for Outcome<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Self::Valid(value),
            None => Self::Absent,
        }
    }
}
