//! Ambient, logically isolated validation scopes.
//!
//! A [`ValidationScope`] owns one [`FieldErrorSet`] for one unit of work. While a
//! scope is *active*, codecs anywhere down the call graph can append to it
//! through [`record`] without being handed a reference.
//!
//! Activation lives on a thread-local stack, but only for the length of a
//! synchronous call ([`open`], [`ValidationScope::in_scope`]) or of a single
//! `Future::poll` ([`ValidationScope::instrument`]). A future therefore carries
//! its scope with it across suspension points and worker threads, and two tasks
//! polled on the same thread never observe each other's scope.
//!
//! Each activation also carries the property-name cell used by
//! [`with_property`](crate::scope::property::with_property).
//!
//! Appending or touching the property cell with no active scope is a no-op.
//! Closing scopes out of order is a programmer error and panics.
//!
//! # Examples
//!
//! ```
//! use field_rail::scope;
//!
//! let outer = scope::open();
//! scope::report("email", "Email must contain @.");
//!
//! {
//!     let inner = scope::open();
//!     scope::report("age", "Age cannot be negative.");
//!     assert_eq!(inner.scope().error_count(), 1);
//! }
//!
//! let err = outer.materialize().unwrap();
//! assert_eq!(err.fields().collect::<Vec<_>>(), ["email"]);
//!
//! // No scope: silently discarded.
//! assert!(!scope::report("email", "ignored"));
//! ```
use crate::config::MessageConfig;
use crate::types::{AggregateValidationError, FieldErrorSet, ValidationFailure};
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod property;

pub use property::{current_property, with_property};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

struct ScopeState {
    id: u64,
    errors: Mutex<FieldErrorSet>,
    config: Arc<MessageConfig>,
    materialized: AtomicBool,
}

/// A collector for one unit of work.
///
/// Cloning is cheap and yields a handle to the *same* scope; sibling branches of
/// one request (for example parallel validation of array elements) share a scope
/// by cloning it and appending concurrently.
#[derive(Clone)]
pub struct ValidationScope {
    state: Arc<ScopeState>,
}

struct Activation {
    scope: ValidationScope,
    property: Option<String>,
}

thread_local! {
    static ACTIVE: RefCell<Vec<Activation>> = const { RefCell::new(Vec::new()) };
}

impl ValidationScope {
    /// Creates an inactive scope with the default message configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_shared_config(MessageConfig::shared_default())
    }

    /// Creates an inactive scope using `config` for its messages.
    #[inline]
    pub fn with_config(config: MessageConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    pub fn with_shared_config(config: Arc<MessageConfig>) -> Self {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            state: Arc::new(ScopeState {
                id,
                errors: Mutex::new(FieldErrorSet::new()),
                config,
                materialized: AtomicBool::new(false),
            }),
        }
    }

    /// Process-unique identifier, used in log fields.
    #[inline]
    pub fn id(&self) -> u64 {
        self.state.id
    }

    #[inline]
    pub fn config(&self) -> &Arc<MessageConfig> {
        &self.state.config
    }

    /// Makes this scope the innermost active scope on the current thread until
    /// the returned guard is dropped.
    ///
    /// The guard is `!Send`; for async code use
    /// [`instrument`](ValidationScope::instrument) instead of holding a guard
    /// across an `.await`.
    #[inline]
    pub fn enter(&self) -> ScopeGuard {
        ScopeGuard::activate(self.clone(), None)
    }

    /// Runs `f` with this scope active.
    #[inline]
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }

    /// Appends a failure directly to this scope, active or not.
    ///
    /// Once the scope is materialized its set is read-only: the failure is
    /// dropped with a warning and `false` is returned.
    pub fn record(&self, failure: ValidationFailure) -> bool {
        let mut errors = self.lock();
        // Checked under the lock so a concurrent materialize never loses an append.
        if self.is_materialized() {
            tracing::warn!(
                scope = self.id(),
                field = failure.field(),
                "failure recorded after materialization; dropping"
            );
            return false;
        }
        tracing::debug!(
            scope = self.id(),
            field = failure.field(),
            kind = %failure.kind(),
            "validation failure recorded"
        );
        errors.record(failure)
    }

    /// Appends a domain failure for `field`.
    #[inline]
    pub fn push(&self, field: impl Into<String>, message: impl Into<String>) -> bool {
        self.record(ValidationFailure::domain(field, message))
    }

    /// Snapshot of what has been recorded so far.
    pub fn errors(&self) -> FieldErrorSet {
        self.lock().clone()
    }

    pub fn has_errors(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Total number of recorded messages.
    pub fn error_count(&self) -> usize {
        self.lock().message_count()
    }

    pub fn is_materialized(&self) -> bool {
        self.state.materialized.load(Ordering::Acquire)
    }

    /// Reads the error set exactly once.
    ///
    /// The first call takes the set and returns the aggregate, or `None` when
    /// nothing was recorded. Every later call returns `None`, so one scope can
    /// never report the same failures twice.
    pub fn materialize(&self) -> Option<AggregateValidationError> {
        if self.state.materialized.swap(true, Ordering::AcqRel) {
            tracing::warn!(scope = self.id(), "validation scope materialized twice; ignoring");
            return None;
        }

        let errors = core::mem::take(&mut *self.lock());
        tracing::trace!(
            scope = self.id(),
            fields = errors.len(),
            "validation scope materialized"
        );
        AggregateValidationError::from_set(errors)
    }

    fn lock(&self) -> MutexGuard<'_, FieldErrorSet> {
        self.state
            .errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ValidationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationScope")
            .field("id", &self.id())
            .field("errors", &self.error_count())
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

impl PartialEq for ValidationScope {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for ValidationScope {}

/// Keeps a scope active on the current thread; deactivates it on drop.
///
/// Guards must be dropped in reverse order of creation.
#[must_use = "the scope is deactivated as soon as the guard is dropped"]
pub struct ScopeGuard {
    id: u64,
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl ScopeGuard {
    pub(crate) fn activate(scope: ValidationScope, property: Option<String>) -> Self {
        let id = scope.id();
        let depth = ACTIVE.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(Activation { scope, property });
            stack.len()
        });
        tracing::trace!(scope = id, depth, "validation scope activated");
        Self { id, depth, _not_send: PhantomData }
    }

    /// Deactivates the scope and hands back its property cell as it stood.
    pub(crate) fn exit(self) -> Option<String> {
        let property = ACTIVE
            .try_with(|stack| {
                let mut stack = stack.borrow_mut();
                match stack.get_mut(self.depth - 1) {
                    Some(activation) if activation.scope.id() == self.id => {
                        activation.property.take()
                    },
                    _ => None,
                }
            })
            .ok()
            .flatten();
        drop(self);
        property
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let in_order = ACTIVE
            .try_with(|stack| {
                let mut stack = stack.borrow_mut();
                let in_order = stack.len() == self.depth
                    && stack.last().is_some_and(|top| top.scope.id() == self.id);
                stack.truncate(self.depth - 1);
                in_order
            })
            .unwrap_or(true);

        if in_order {
            tracing::trace!(scope = self.id, "validation scope deactivated");
        } else if !std::thread::panicking() {
            tracing::error!(scope = self.id, depth = self.depth, "validation scope closed out of order");
            panic!("validation scope {} closed out of order", self.id);
        }
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("scope", &self.id)
            .field("depth", &self.depth)
            .finish()
    }
}

/// A freshly opened, active scope owned by the unit of work that opened it.
///
/// Dropping the handle deactivates the scope and reactivates whatever was active
/// before. [`ScopeHandle::materialize`] reads the errors and then tears it down.
#[must_use = "the scope is closed as soon as the handle is dropped"]
#[derive(Debug)]
pub struct ScopeHandle {
    scope: ValidationScope,
    guard: ScopeGuard,
}

impl ScopeHandle {
    #[inline]
    pub fn scope(&self) -> &ValidationScope {
        &self.scope
    }

    /// Reads the accumulated errors once and closes the scope.
    pub fn materialize(self) -> Option<AggregateValidationError> {
        let ScopeHandle { scope, guard } = self;
        let aggregate = scope.materialize();
        drop(guard);
        aggregate
    }
}

/// Opens a new, empty scope nested inside whatever is currently active.
///
/// The nested scope does not inherit or forward its parent's errors.
#[inline]
pub fn open() -> ScopeHandle {
    open_with(ValidationScope::new())
}

/// Like [`open`], with a message configuration for the new scope.
#[inline]
pub fn open_with_config(config: MessageConfig) -> ScopeHandle {
    open_with(ValidationScope::with_config(config))
}

fn open_with(scope: ValidationScope) -> ScopeHandle {
    let guard = scope.enter();
    ScopeHandle { scope, guard }
}

/// The innermost active scope on this logical context, if any.
pub fn current() -> Option<ValidationScope> {
    ACTIVE
        .try_with(|stack| stack.borrow().last().map(|top| top.scope.clone()))
        .ok()
        .flatten()
}

#[inline]
pub fn is_active() -> bool {
    current().is_some()
}

/// Message configuration of the active scope, or the default.
pub fn current_config() -> Arc<MessageConfig> {
    current()
        .map(|scope| Arc::clone(scope.config()))
        .unwrap_or_else(MessageConfig::shared_default)
}

/// Appends `failure` to the active scope.
///
/// Returns `false` when there is no active scope (the failure is discarded),
/// when that scope was already materialized, or when the same message was
/// already recorded for that field.
pub fn record(failure: ValidationFailure) -> bool {
    match current() {
        Some(scope) => scope.record(failure),
        None => {
            tracing::trace!(
                field = failure.field(),
                "no active validation scope; failure discarded"
            );
            false
        },
    }
}

/// Appends a domain failure for `field` to the active scope.
#[inline]
pub fn report(field: impl Into<String>, message: impl Into<String>) -> bool {
    record(ValidationFailure::domain(field, message))
}

/// Replaces the innermost activation's property cell.
///
/// Returns the activation's position and scope id together with the previous
/// value, or `None` when no scope is active.
fn swap_top_property(name: Option<String>) -> Option<(usize, u64, Option<String>)> {
    ACTIVE
        .try_with(|stack| {
            let mut stack = stack.borrow_mut();
            let depth = stack.len();
            let top = stack.last_mut()?;
            let previous = core::mem::replace(&mut top.property, name);
            Some((depth, top.scope.id(), previous))
        })
        .ok()
        .flatten()
}

fn restore_property(depth: usize, id: u64, value: Option<String>) {
    let _ = ACTIVE.try_with(|stack| {
        let mut stack = stack.borrow_mut();
        if let Some(activation) = stack.get_mut(depth - 1) {
            if activation.scope.id() == id {
                activation.property = value;
            }
        }
    });
}

fn top_property() -> Option<String> {
    ACTIVE
        .try_with(|stack| stack.borrow().last().and_then(|top| top.property.clone()))
        .ok()
        .flatten()
}
