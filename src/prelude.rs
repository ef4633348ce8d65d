//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use field_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`property_name!`], [`report!`]
//! - **Value objects**: [`ValueObject`], [`DomainError`], [`Primitive`]
//! - **Field wrappers**: [`Required`], [`Maybe`], [`Named`]
//! - **Binding**: [`BindingAdapter`], [`Binding`]
//! - **Scopes**: [`ValidationScope`], [`scope`], [`boundary`]
//! - **Errors**: [`AggregateValidationError`], [`BoundaryError`], [`Outcome`]
//!
//! # Examples
//!
//! ```
//! use field_rail::prelude::*;
//!
//! let result = boundary::run(|| {
//!     scope::report("email", "Email must contain @.");
//! });
//!
//! let err: AggregateValidationError = result.unwrap_err();
//! assert_eq!(err.to_string(), "One or more validation errors occurred. email: Email must contain @.");
//! ```

// Macros
pub use crate::{property_name, report};

// Modules used by path
pub use crate::{boundary, scope};

// Core types
pub use crate::binding::{Binding, BindingAdapter};
pub use crate::boundary::BoundaryError;
pub use crate::codec::{Maybe, Named, PropertyBoundCodec, PropertyName, Required};
pub use crate::config::MessageConfig;
pub use crate::scope::ValidationScope;
pub use crate::types::{AggregateValidationError, DomainError, Outcome, ValidationFailure};

// Traits
pub use crate::structure::{Validate, Validator};
pub use crate::traits::{Primitive, ValueObject};
