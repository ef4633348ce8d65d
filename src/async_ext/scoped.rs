//! Future wrappers that carry a scope and a property name across `.await`.
//!
//! Both wrappers install their state for the duration of each `poll` and remove
//! it before returning, whether the inner future is ready, pending, or panics.
//! Nothing is left on the worker thread between polls, so a task that migrates
//! threads keeps its scope and tasks that share a thread never see each other's.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::scope::property::PropertyGuard;
use crate::scope::{self, ScopeGuard, ValidationScope};

pin_project! {
    /// A future that runs with a validation scope active.
    ///
    /// Created by [`ValidationScope::instrument`] or
    /// [`FutureScopeExt::in_scope`]. The scope's property cell for this future
    /// is saved between polls, so `with_property` calls made while polling see a
    /// consistent value across suspension points.
    ///
    /// # Cancel Safety
    ///
    /// Dropping the future leaves no scope active anywhere.
    #[must_use = "futures do nothing unless polled"]
    pub struct Scoped<F> {
        #[pin]
        inner: F,
        scope: Option<ValidationScope>,
        property: Option<String>,
    }
}

impl<F> Scoped<F> {
    #[inline]
    pub(crate) fn new(inner: F, scope: Option<ValidationScope>, property: Option<String>) -> Self {
        Self { inner, scope, property }
    }

    /// The scope this future runs in, if any.
    #[inline]
    pub fn scope(&self) -> Option<&ValidationScope> {
        self.scope.as_ref()
    }
}

impl<F: Future> Future for Scoped<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.scope {
            Some(scope) => {
                let guard = ScopeGuard::activate(scope.clone(), this.property.take());
                let poll = this.inner.poll(cx);
                *this.property = guard.exit();
                poll
            },
            None => this.inner.poll(cx),
        }
    }
}

impl<F: FusedFuture> FusedFuture for Scoped<F> {
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

pin_project! {
    /// A future that runs with the current property set to a fixed name.
    ///
    /// Created by [`FutureScopeExt::with_property`]. The property is restored to
    /// its prior value after every poll.
    #[must_use = "futures do nothing unless polled"]
    pub struct WithProperty<F> {
        #[pin]
        inner: F,
        name: String,
    }
}

impl<F> WithProperty<F> {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F: Future> Future for WithProperty<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _restore = PropertyGuard::set(Some(this.name.clone()));
        this.inner.poll(cx)
    }
}

impl<F: FusedFuture> FusedFuture for WithProperty<F> {
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

impl ValidationScope {
    /// Wraps `future` so that it runs with this scope active on every poll.
    #[inline]
    pub fn instrument<F: Future>(&self, future: F) -> Scoped<F> {
        Scoped::new(future, Some(self.clone()), None)
    }
}

/// Extension trait for running futures inside validation scopes.
///
/// # Examples
///
/// ```rust,ignore
/// use field_rail::prelude_async::*;
///
/// async fn bind_order(body: &str) -> Option<Order> {
///     let scope = ValidationScope::new();
///     let order = parse_order(body).in_scope(&scope).await;
///     scope.materialize().map_or(order, |_| None)
/// }
/// ```
pub trait FutureScopeExt: Future + Sized {
    /// Runs this future with `scope` active.
    #[inline]
    fn in_scope(self, scope: &ValidationScope) -> Scoped<Self> {
        scope.instrument(self)
    }

    /// Runs this future in whatever scope is active *now*, together with the
    /// current property name.
    ///
    /// This is how a branch spawned onto another task keeps reporting into the
    /// request that spawned it. With no active scope the future runs unscoped.
    #[inline]
    fn in_current_scope(self) -> Scoped<Self> {
        Scoped::new(self, scope::current(), scope::current_property())
    }

    /// Runs this future with the current property set to `name`.
    #[inline]
    fn with_property(self, name: impl Into<String>) -> WithProperty<Self> {
        WithProperty { inner: self, name: name.into() }
    }
}

impl<F: Future> FutureScopeExt for F {}
