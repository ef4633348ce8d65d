//! Scoped validation-error aggregation for value-object codecs.
//!
//! One deserialization or binding pass can run many small, type-driven
//! conversions. Each of them may reject its input, and none of them knows which
//! field of the request it is converting. `field-rail` lets every conversion
//! report into an ambient, per-request [scope](scope) instead of failing, and
//! turns everything reported into a single [`AggregateValidationError`] at the
//! [boundary](boundary) of the unit of work.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `field_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Value objects and a JSON boundary
//!
//! ```
//! use field_rail::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Email(String);
//!
//! impl ValueObject for Email {
//!     type Primitive = String;
//!
//!     fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
//!         match value {
//!             Some(v) if v.contains('@') => Ok(Email(v)),
//!             _ => Err(DomainError::validation(field.unwrap_or("email"), "Email must contain @.")),
//!         }
//!     }
//!
//!     fn to_primitive(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Age(i32);
//!
//! impl ValueObject for Age {
//!     type Primitive = i32;
//!
//!     fn try_create(value: Option<i32>, field: Option<&str>) -> Result<Self, DomainError> {
//!         match value {
//!             Some(v) if v >= 0 => Ok(Age(v)),
//!             _ => Err(DomainError::validation(field.unwrap_or("age"), "Age cannot be negative.")),
//!         }
//!     }
//!
//!     fn to_primitive(&self) -> i32 {
//!         self.0
//!     }
//! }
//!
//! property_name!(struct EmailField = "email");
//! property_name!(struct AgeField = "age");
//!
//! #[derive(Deserialize)]
//! struct Customer {
//!     email: Named<EmailField, Required<Email>>,
//!     age: Named<AgeField, Required<Age>>,
//! }
//!
//! let err = field_rail::boundary::from_json_str::<Customer>(r#"{"email":"nope","age":-3}"#)
//!     .err()
//!     .and_then(|e| e.into_invalid())
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&err).unwrap(),
//!     serde_json::json!({"email": ["Email must contain @."], "age": ["Age cannot be negative."]})
//! );
//! ```
//!
//! ## Reporting without a scope
//!
//! ```
//! use field_rail::scope;
//!
//! // Outside any unit of work reports are discarded, never a panic.
//! assert!(!scope::report("email", "Email must contain @."));
//! ```

/// Request edge: open a scope, run, materialize once
pub mod boundary;
/// Route, query and header binding
pub mod binding;
/// Validating, optional and property-bound codecs
pub mod codec;
/// Message templates and field naming
pub mod config;
/// Declarative helpers
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Ambient scopes and the property-name cell
pub mod scope;
/// Object-graph validation with descent control
pub mod structure;
/// Value-object and primitive capabilities
pub mod traits;
/// Failures, error sets and the aggregate error
pub mod types;

/// Scope propagation across `.await` (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Async prelude - all async utilities in one import (requires `async` feature)
#[cfg(feature = "async")]
pub mod prelude_async;

/// Tower integration - one scope per request (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use binding::{Binding, BindingAdapter, BindingSource, ValueProvider};
pub use boundary::BoundaryError;
pub use codec::*;
pub use config::{FieldNaming, MessageConfig};
pub use scope::{ScopeGuard, ScopeHandle, ValidationScope};
pub use structure::{Descent, Validate, Validator};
pub use traits::*;
pub use types::*;
