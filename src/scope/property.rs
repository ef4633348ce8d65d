//! Tracking of the property currently being converted.
//!
//! Codecs are selected by the *type* they convert, so on their own they cannot
//! know which field of the enclosing structure they are working on. Callers that
//! do know (a property-bound codec, a binding adapter, the structural validator)
//! wrap the conversion in [`with_property`]; the codec then asks
//! [`current_property`].
//!
//! The cell is restored to its *prior* value after every call, on success,
//! failure and unwinding alike, so nested calls compose at any depth.
//!
//! # Examples
//!
//! ```
//! use field_rail::scope::{self, current_property, with_property};
//!
//! let _scope = scope::open();
//! with_property("customer", || {
//!     with_property("email", || {
//!         assert_eq!(current_property().as_deref(), Some("email"));
//!     });
//!     assert_eq!(current_property().as_deref(), Some("customer"));
//! });
//! assert_eq!(current_property(), None);
//! ```

/// Restores the property cell it replaced when dropped.
#[derive(Debug)]
pub(crate) struct PropertyGuard {
    slot: Option<(usize, u64)>,
    previous: Option<String>,
}

impl PropertyGuard {
    /// Writes `name` into the innermost activation's cell.
    ///
    /// With no active scope nothing is written and the guard is inert.
    pub(crate) fn set(name: Option<String>) -> Self {
        match super::swap_top_property(name) {
            Some((depth, id, previous)) => Self { slot: Some((depth, id)), previous },
            None => Self { slot: None, previous: None },
        }
    }
}

impl Drop for PropertyGuard {
    fn drop(&mut self) {
        if let Some((depth, id)) = self.slot {
            super::restore_property(depth, id, self.previous.take());
        }
    }
}

/// Runs `body` with the current property set to `name`.
///
/// Names are opaque tokens: empty strings and arbitrary characters are stored
/// and restored verbatim.
pub fn with_property<R>(name: &str, body: impl FnOnce() -> R) -> R {
    let _restore = PropertyGuard::set(Some(name.to_owned()));
    body()
}

/// The property currently being converted, if a scope is active and one is set.
#[inline]
pub fn current_property() -> Option<String> {
    super::top_property()
}
