//! Tokio-specific async extensions.
//!
//! Spawned tasks do not inherit anything from the task that spawned them. These
//! helpers capture the active scope and property name at spawn time so a branch
//! running on another worker keeps reporting into the request that started it.
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature:
//!
//! ```toml
//! [dependencies]
//! field-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

use core::future::Future;

use tokio::task::JoinHandle;

use crate::async_ext::FutureScopeExt;
use crate::scope;
use crate::structure::element_path;
use crate::types::ValidationFailure;

/// Spawns `future` onto the Tokio runtime inside the currently active scope.
///
/// With no active scope the task runs unscoped and its reports are discarded.
///
/// # Example
///
/// ```rust,ignore
/// use field_rail::async_ext::spawn_in_scope;
///
/// let handle = spawn_in_scope(async { check_sku_exists(&sku).await });
/// let exists = handle.await?;
/// ```
pub fn spawn_in_scope<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future.in_current_scope())
}

/// Converts the elements of one array-valued field as concurrent tasks.
///
/// Every element runs in the caller's scope with the property set to `field[i]`,
/// so sibling tasks append to the same error set. Results are collected in
/// element order once all tasks finish.
///
/// # Panics
///
/// A panic inside an element task is resumed on the caller. A task cancelled
/// by the runtime is recorded as an unexpected failure for its element.
pub async fn validate_elements_concurrently<T, Fut, I>(field: &str, elements: I) -> Option<Vec<T>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Option<T>> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<(String, JoinHandle<Option<T>>)> = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let path = element_path(field, index);
            let task = element.with_property(path.clone()).in_current_scope();
            (path, tokio::spawn(task))
        })
        .collect();

    tracing::trace!(field, elements = handles.len(), "validating elements concurrently");

    let mut values = Vec::with_capacity(handles.len());
    let mut complete = true;

    for (path, handle) in handles {
        match handle.await {
            Ok(Some(value)) => values.push(value),
            Ok(None) => complete = false,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => {
                let config = scope::current_config();
                let message = config.unexpected_message(&path, "the validation task was cancelled");
                scope::record(ValidationFailure::unexpected(path, message));
                complete = false;
            },
        }
    }

    complete.then_some(values)
}
