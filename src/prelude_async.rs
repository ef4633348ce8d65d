//! Async prelude - all async utilities in one import.
//!
//! Re-exports everything from the sync [`prelude`](crate::prelude) plus the
//! async scope propagation items.
//!
//! # Usage
//!
//! ```ignore
//! use field_rail::prelude_async::*;
//!
//! async fn register(body: String) -> Result<Customer, AggregateValidationError> {
//!     boundary::run_async(async move {
//!         let form = parse_form(&body);
//!         check_email_unique(&form.email).with_property("email").await;
//!         form
//!     })
//!     .await
//! }
//! ```
//!
//! # What's Included
//!
//! - Everything in [`prelude`](crate::prelude)
//! - **Traits**: [`FutureScopeExt`](crate::async_ext::FutureScopeExt)
//! - **Types**: [`Scoped`](crate::async_ext::Scoped), [`WithProperty`](crate::async_ext::WithProperty)
//! - **Functions**: [`validate_elements_async`](crate::async_ext::validate_elements_async)

pub use crate::prelude::*;

pub use crate::async_ext::{validate_elements_async, FutureScopeExt, Scoped, WithProperty};

#[cfg(feature = "async-tokio")]
pub use crate::async_ext::{spawn_in_scope, validate_elements_concurrently};
