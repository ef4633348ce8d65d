//! Data types shared by the scope, the codecs and the boundary.
//!
//! # Examples
//!
//! ```
//! use field_rail::{AggregateValidationError, FieldErrorSet, ValidationFailure};
//!
//! let set: FieldErrorSet = [
//!     ValidationFailure::domain("email", "Email must contain @."),
//!     ValidationFailure::domain("age", "Age cannot be negative."),
//! ]
//! .into_iter()
//! .collect();
//!
//! let err = AggregateValidationError::from_set(set).unwrap();
//! assert_eq!(err.fields().collect::<Vec<_>>(), ["email", "age"]);
//! ```
use smallvec::SmallVec;

pub mod aggregate;
pub mod domain_error;
pub mod failure;
pub mod field_error_set;
pub mod outcome;

pub use aggregate::*;
pub use domain_error::*;
pub use failure::*;
pub use field_error_set::*;
pub use outcome::*;

/// SmallVec-backed collection used for failures and per-field messages.
///
/// Uses inline storage for one element; most fields fail for exactly one reason.
pub type ErrorVec<E> = SmallVec<[E; 1]>;
