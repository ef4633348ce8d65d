//! Tower integration for field-rail.
//!
//! [`ValidationLayer`] turns every request through the wrapped service into one
//! unit of work: a fresh scope is active while the service is called and while
//! its future is polled, and the response is replaced with a single
//! [`AggregateValidationError`] if anything was recorded.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! field-rail = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use field_rail::tower::ValidationLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(ValidationLayer::new())
//!     .service(create_customer);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::async_ext::Scoped;
use crate::boundary::BoundaryError;
use crate::config::MessageConfig;
use crate::scope::ValidationScope;

/// A Tower [`Layer`] that opens one validation scope per request.
#[derive(Clone, Debug, Default)]
pub struct ValidationLayer {
    config: Option<Arc<MessageConfig>>,
}

impl ValidationLayer {
    /// Creates a layer whose scopes use the default message configuration.
    #[inline]
    pub const fn new() -> Self {
        Self { config: None }
    }

    /// Creates a layer whose scopes use `config` for their messages.
    #[inline]
    pub fn with_config(config: MessageConfig) -> Self {
        Self { config: Some(Arc::new(config)) }
    }

    #[inline]
    pub fn config(&self) -> Option<&MessageConfig> {
        self.config.as_deref()
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        ValidationService { inner, config: self.config.clone() }
    }
}

/// A Tower [`Service`] that aggregates validation failures per request.
///
/// Created by [`ValidationLayer`].
#[derive(Clone, Debug)]
pub struct ValidationService<S> {
    inner: S,
    config: Option<Arc<MessageConfig>>,
}

impl<S> ValidationService<S> {
    #[inline]
    pub const fn new(inner: S) -> Self {
        Self { inner, config: None }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn new_scope(&self) -> ValidationScope {
        match &self.config {
            Some(config) => ValidationScope::with_shared_config(Arc::clone(config)),
            None => ValidationScope::new(),
        }
    }
}

impl<S, Request> Service<Request> for ValidationService<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = BoundaryError<S::Error>;
    type Future = ValidationFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(BoundaryError::Inner)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let scope = self.new_scope();
        let inner = scope.in_scope(|| self.inner.call(request));
        tracing::trace!(scope = scope.id(), "request scope opened");
        ValidationFuture { inner: scope.instrument(inner), scope }
    }
}

pin_project! {
    /// Future returned by [`ValidationService`].
    ///
    /// Materializes the request's scope once the inner future completes.
    #[must_use = "futures do nothing unless polled"]
    pub struct ValidationFuture<F> {
        #[pin]
        inner: Scoped<F>,
        scope: ValidationScope,
    }
}

impl<F, T, E> Future for ValidationFuture<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Output = Result<T, BoundaryError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.inner.poll(cx) {
            Poll::Ready(Ok(response)) => match this.scope.materialize() {
                None => Poll::Ready(Ok(response)),
                Some(errors) => {
                    tracing::debug!(
                        scope = this.scope.id(),
                        fields = errors.errors().len(),
                        "request rejected with validation errors"
                    );
                    Poll::Ready(Err(BoundaryError::Invalid(errors)))
                },
            },
            Poll::Ready(Err(error)) => {
                let _ = this.scope.materialize();
                Poll::Ready(Err(BoundaryError::Inner(error)))
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T, E> FusedFuture for ValidationFuture<F>
where
    F: FusedFuture<Output = Result<T, E>>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.scope.is_materialized() || self.inner.is_terminated()
    }
}

/// Extension trait for wrapping services in a validation boundary.
pub trait ServiceValidationExt<Request>: Service<Request> + Sized {
    /// Wraps this service so each request runs in its own validation scope.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use field_rail::tower::ServiceValidationExt;
    ///
    /// let wrapped = create_customer.with_validation();
    /// ```
    fn with_validation(self) -> ValidationService<Self> {
        ValidationService::new(self)
    }
}

impl<S, Request> ServiceValidationExt<Request> for S where S: Service<Request> {}
