//! Declarative helpers.
//!
//! - [`macro@crate::property_name`] - declares a compile-time property name for
//!   [`Named`](crate::Named) and [`PropertyBoundCodec::named`](crate::PropertyBoundCodec::named).
//! - [`macro@crate::report`] - formats a message and appends it to the active scope.
//!
//! # Examples
//!
//! ```
//! use field_rail::{property_name, report, scope, PropertyName};
//!
//! property_name!(pub struct BillingEmail = "billingEmail");
//! assert_eq!(BillingEmail::NAME, "billingEmail");
//!
//! let handle = scope::open();
//! let limit = 3;
//! report!("tags", "At most {} tags are allowed.", limit);
//!
//! let err = handle.materialize().unwrap();
//! assert_eq!(err.messages("tags").unwrap(), ["At most 3 tags are allowed.".to_string()]);
//! ```

/// Declares a unit type implementing [`PropertyName`](crate::PropertyName).
///
/// # Examples
///
/// ```
/// use field_rail::{property_name, Named, PropertyName, Required};
///
/// property_name!(
///     /// The customer's primary address.
///     struct Email = "email"
/// );
///
/// assert_eq!(<Email as PropertyName>::NAME, "email");
/// assert_eq!(Named::<Email, Required<String>>::name(), "email");
/// ```
#[macro_export]
macro_rules! property_name {
    ($(#[$meta:meta])* $vis:vis struct $name:ident = $value:expr $(;)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::PropertyName for $name {
            const NAME: &'static str = $value;
        }
    };
}

/// Formats a message and appends it to the active scope as a domain failure.
///
/// Evaluates to `true` when the message was recorded.
///
/// # Syntax
///
/// - `report!(field, "literal")`
/// - `report!(field, "format {}", args...)`
#[macro_export]
macro_rules! report {
    ($field:expr, $msg:literal $(,)?) => {
        $crate::scope::report($field, ::std::format!($msg))
    };
    ($field:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::scope::report($field, ::std::format!($fmt, $($arg)+))
    };
}
