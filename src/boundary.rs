//! The edge of a unit of work: open a scope, run, materialise once.
//!
//! Everything a unit of work records is turned into at most one
//! [`AggregateValidationError`]. Partial successes are never handed out: if
//! anything was recorded, the bound value is dropped and only the aggregate is
//! returned.
//!
//! # Examples
//!
//! ```
//! use field_rail::{boundary, scope};
//!
//! let ok = boundary::run(|| 42);
//! assert_eq!(ok.unwrap(), 42);
//!
//! let err = boundary::run(|| {
//!     scope::report("email", "Email must contain @.");
//!     scope::report("age", "Age cannot be negative.");
//! })
//! .unwrap_err();
//!
//! assert_eq!(
//!     serde_json::to_value(&err).unwrap(),
//!     serde_json::json!({"email": ["Email must contain @."], "age": ["Age cannot be negative."]})
//! );
//! ```
use crate::config::MessageConfig;
use crate::scope::{self, ScopeHandle, ValidationScope};
use crate::types::AggregateValidationError;
use core::fmt;
use serde::{Deserialize, Deserializer};

/// Failure of a boundary that wraps a fallible inner operation.
#[derive(Debug)]
pub enum BoundaryError<E> {
    /// Field failures were recorded.
    Invalid(AggregateValidationError),
    /// The inner operation itself failed, e.g. the input was not well-formed.
    Inner(E),
}

impl<E> BoundaryError<E> {
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[inline]
    pub fn into_invalid(self) -> Option<AggregateValidationError> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Inner(_) => None,
        }
    }

    #[inline]
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Invalid(_) => None,
            Self::Inner(error) => Some(error),
        }
    }
}

impl<E: fmt::Display> fmt::Display for BoundaryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "{}", errors),
            Self::Inner(error) => write!(f, "{}", error),
        }
    }
}

impl<E> std::error::Error for BoundaryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Inner(error) => Some(error),
        }
    }
}

impl<E> From<AggregateValidationError> for BoundaryError<E> {
    fn from(errors: AggregateValidationError) -> Self {
        Self::Invalid(errors)
    }
}

/// Reads the handle's errors once and tears the scope down.
///
/// Returns `None` when nothing was recorded.
#[inline]
pub fn materialize(handle: ScopeHandle) -> Option<AggregateValidationError> {
    handle.materialize()
}

/// Runs `f` inside a fresh scope.
///
/// # Panics
///
/// Propagates panics from `f`; the scope is closed on the way out.
pub fn run<T>(f: impl FnOnce() -> T) -> Result<T, AggregateValidationError> {
    run_in(ValidationScope::new(), f)
}

/// Like [`run`], with `config` for the scope's messages.
pub fn run_with_config<T>(
    config: MessageConfig,
    f: impl FnOnce() -> T,
) -> Result<T, AggregateValidationError> {
    run_in(ValidationScope::with_config(config), f)
}

fn run_in<T>(scope: ValidationScope, f: impl FnOnce() -> T) -> Result<T, AggregateValidationError> {
    let value = scope.in_scope(f);
    finish(&scope, value)
}

/// Runs `future` inside a fresh scope that follows it across `.await` points.
#[cfg(feature = "async")]
pub async fn run_async<F>(future: F) -> Result<F::Output, AggregateValidationError>
where
    F: core::future::Future,
{
    let scope = ValidationScope::new();
    let value = scope.instrument(future).await;
    finish(&scope, value)
}

fn finish<T>(scope: &ValidationScope, value: T) -> Result<T, AggregateValidationError> {
    match scope.materialize() {
        None => Ok(value),
        Some(errors) => {
            tracing::debug!(
                scope = scope.id(),
                fields = errors.errors().len(),
                "unit of work rejected with validation errors"
            );
            Err(errors)
        },
    }
}

/// Deserializes `T` from `deserializer` inside a fresh scope.
///
/// A structural error from the deserializer wins over any field failures
/// recorded before it and is returned as [`BoundaryError::Inner`].
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, BoundaryError<D::Error>>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let handle = scope::open();
    let parsed = T::deserialize(deserializer);
    let invalid = handle.materialize();

    match (parsed, invalid) {
        (Err(error), _) => Err(BoundaryError::Inner(error)),
        (Ok(_), Some(errors)) => Err(BoundaryError::Invalid(errors)),
        (Ok(value), None) => Ok(value),
    }
}

/// Deserializes `T` from a JSON string inside a fresh scope.
#[cfg(feature = "json")]
pub fn from_json_str<'a, T>(input: &'a str) -> Result<T, BoundaryError<serde_json::Error>>
where
    T: Deserialize<'a>,
{
    let mut deserializer = serde_json::Deserializer::from_str(input);
    let value = deserialize(&mut deserializer)?;
    deserializer.end().map_err(BoundaryError::Inner)?;
    Ok(value)
}

/// Deserializes `T` from JSON bytes inside a fresh scope.
#[cfg(feature = "json")]
pub fn from_json_slice<'a, T>(input: &'a [u8]) -> Result<T, BoundaryError<serde_json::Error>>
where
    T: Deserialize<'a>,
{
    let mut deserializer = serde_json::Deserializer::from_slice(input);
    let value = deserialize(&mut deserializer)?;
    deserializer.end().map_err(BoundaryError::Inner)?;
    Ok(value)
}

/// Deserializes `T` from an already-parsed JSON value inside a fresh scope.
#[cfg(feature = "json")]
pub fn from_json_value<T>(value: serde_json::Value) -> Result<T, BoundaryError<serde_json::Error>>
where
    T: serde::de::DeserializeOwned,
{
    deserialize(value)
}
