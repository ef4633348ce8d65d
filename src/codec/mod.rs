//! Validating codecs between wire primitives and value objects.
//!
//! - [`ValidatingCodec`]: required conversion, absence is a failure
//! - [`OptionalCodec`] / [`Maybe`]: absence is a valid "no value"
//! - [`PropertyBoundCodec`] / [`Named`]: a codec bound to a known property name
//! - [`Required`]: the serde field wrapper over [`ValidatingCodec`]
//!
//! All of them report into the active [scope](crate::scope) rather than failing,
//! so one deserialization pass surfaces every field error.
//!
//! # Examples
//!
//! ```
//! use field_rail::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Name(String);
//!
//! impl ValueObject for Name {
//!     type Primitive = String;
//!
//!     fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
//!         match value {
//!             Some(v) if !v.trim().is_empty() => Ok(Name(v)),
//!             _ => Err(DomainError::validation(field.unwrap_or("name"), "Name cannot be empty.")),
//!         }
//!     }
//!
//!     fn to_primitive(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! property_name!(struct FirstName = "FirstName");
//! property_name!(struct LastName = "LastName");
//!
//! #[derive(Deserialize)]
//! struct Person {
//!     first: Named<FirstName, Required<Name>>,
//!     last: Named<LastName, Required<Name>>,
//! }
//!
//! let err = field_rail::boundary::from_json_str::<Person>(r#"{"first":"","last":" "}"#)
//!     .err()
//!     .and_then(|e| e.into_invalid())
//!     .unwrap();
//!
//! assert_eq!(err.messages("FirstName").unwrap(), ["Name cannot be empty.".to_string()]);
//! assert_eq!(err.messages("LastName").unwrap(), ["Name cannot be empty.".to_string()]);
//! ```
use crate::config::MessageConfig;
use crate::traits::{Primitive, Scalar};
use crate::types::{Outcome, ValidationFailure};

pub mod optional;
pub mod property;
pub mod serde_impl;
pub mod validating;

pub use optional::{Maybe, OptionalCodec};
pub use property::{Named, PropertyBoundCodec, PropertyName};
pub use validating::{Required, ValidatingCodec};

/// Strict coercion of a structured wire value into `P`.
///
/// Failure is a format failure attributed to `field`.
pub fn coerce_scalar<P: Primitive>(scalar: Scalar, field: &str, config: &MessageConfig) -> Outcome<P> {
    match P::from_scalar(scalar) {
        Some(primitive) => Outcome::Valid(primitive),
        None => format_failure::<P>(field, config),
    }
}

/// Textual coercion of a raw route, query or header value into `P`.
pub fn parse_raw<P: Primitive>(raw: &str, field: &str, config: &MessageConfig) -> Outcome<P> {
    match P::parse(raw) {
        Some(primitive) => Outcome::Valid(primitive),
        None => format_failure::<P>(field, config),
    }
}

fn format_failure<P: Primitive>(field: &str, config: &MessageConfig) -> Outcome<P> {
    let message = config.format_message(field, P::KIND.label());
    Outcome::invalid(ValidationFailure::format(field, message))
}
