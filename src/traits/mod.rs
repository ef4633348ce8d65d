//! Capability traits that replace runtime codec discovery.
//!
//! - [`ValueObject`]: a domain value with a fallible constructor over a primitive
//! - [`Primitive`]: a wire primitive with strict and textual coercions
//!
//! A type opts into validating codecs by implementing [`ValueObject`]; whether a
//! codec applies and what its primitive shape is are both answered at compile time.

pub mod primitive;
pub mod value_object;

pub use primitive::{Primitive, PrimitiveKind, Scalar};
pub use value_object::ValueObject;
