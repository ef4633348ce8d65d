//! Async extensions for field-rail.
//!
//! Scopes follow the *task*, not the worker thread: a [`Scoped`] future
//! activates its scope only while it is being polled. Sibling branches of one
//! request share the scope by cloning it, and [`spawn_in_scope`] carries it onto
//! new Tokio tasks.
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! field-rail = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use field_rail::prelude_async::*;
//!
//! async fn bind_order(body: String) -> Result<Order, AggregateValidationError> {
//!     boundary::run_async(async move {
//!         let form: OrderForm = serde_json::from_str(&body).unwrap_or_default();
//!         check_stock(&form).with_property("lines").await;
//!         form.into_order()
//!     })
//!     .await
//! }
//! ```

mod scoped;
mod validation;

#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use scoped::{FutureScopeExt, Scoped, WithProperty};
pub use validation::validate_elements_async;

#[cfg(feature = "async-tokio")]
pub use tokio_ext::{spawn_in_scope, validate_elements_concurrently};
