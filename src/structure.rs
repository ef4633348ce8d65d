//! Structural object-graph validation with descent control.
//!
//! After binding, an application may walk the bound object graph to check
//! cross-field rules. [`Validator`] does the walking and tracks the path of the
//! node being visited, so failures come out as `customer.emails[1]`.
//!
//! Each node decides whether the walker may enter it through
//! [`Validate::descent`]. Optional wrappers answer [`Descent::Skip`] when they
//! hold no value, so an absent optional's payload is never visited.
//!
//! # Examples
//!
//! ```
//! use field_rail::structure::{validate_graph, Validate, Validator};
//! use field_rail::Maybe;
//!
//! struct Line {
//!     quantity: u32,
//! }
//!
//! impl Validate for Line {
//!     fn validate(&self, v: &mut Validator) {
//!         v.check(self.quantity > 0, "Quantity must be positive.");
//!     }
//! }
//!
//! struct Order {
//!     lines: Vec<Line>,
//!     gift: Maybe<Line>,
//! }
//!
//! impl Validate for Order {
//!     fn validate(&self, v: &mut Validator) {
//!         v.field("lines", &self.lines).field("gift", &self.gift);
//!     }
//! }
//!
//! let order = Order { lines: vec![Line { quantity: 1 }, Line { quantity: 0 }], gift: Maybe::Absent };
//! let outcome = validate_graph(&order);
//!
//! assert_eq!(outcome.failures()[0].field(), "lines[1]");
//! ```
use crate::codec::{Maybe, Named, Required};
use crate::scope;
use crate::types::{Outcome, ValidationFailure};
use core::fmt;

/// Whether a walker may enter a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Descent {
    #[default]
    Children,
    /// Do not call [`Validate::validate`] on this node.
    Skip,
}

/// A node of a validatable object graph.
///
/// The default `validate` checks nothing, so value objects, which are valid by
/// construction, only need an empty `impl Validate for Email {}`.
pub trait Validate {
    fn validate(&self, validator: &mut Validator) {
        let _ = validator;
    }

    #[inline]
    fn descent(&self) -> Descent {
        Descent::Children
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Walks an object graph and collects failures keyed by path.
#[derive(Default)]
pub struct Validator {
    path: Vec<Segment>,
    failures: Vec<ValidationFailure>,
    visited: usize,
    skipped: usize,
}

impl Validator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the node being visited, e.g. `customer.emails[1]`.
    ///
    /// Empty at the root.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                },
                Segment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                },
            }
        }
        out
    }

    /// Visits `value` as the child property `name` of the current node.
    pub fn field<T: Validate + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        self.path.push(Segment::Field(name.to_owned()));
        self.visit(value);
        self.path.pop();
        self
    }

    /// Visits `value` as element `index` of the current node.
    pub fn element<T: Validate + ?Sized>(&mut self, index: usize, value: &T) -> &mut Self {
        self.path.push(Segment::Index(index));
        self.visit(value);
        self.path.pop();
        self
    }

    /// Visits `value` at the current path, honouring its descent flag.
    pub fn visit<T: Validate + ?Sized>(&mut self, value: &T) {
        match value.descent() {
            Descent::Children => {
                self.visited += 1;
                value.validate(self);
            },
            Descent::Skip => {
                self.skipped += 1;
                tracing::trace!(path = %self.path(), "descent skipped");
            },
        }
    }

    /// Records `message` against the current path.
    pub fn fail(&mut self, message: impl Into<String>) -> &mut Self {
        let path = self.path();
        self.failures.push(ValidationFailure::domain(path, message));
        self
    }

    /// Records `message` against the child property `name` of the current node.
    pub fn fail_field(&mut self, name: &str, message: impl Into<String>) -> &mut Self {
        self.path.push(Segment::Field(name.to_owned()));
        self.fail(message);
        self.path.pop();
        self
    }

    /// Records `message` at the current path unless `condition` holds.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> bool {
        if !condition {
            self.fail(message);
        }
        condition
    }

    #[inline]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of nodes skipped because of their descent flag.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_outcome(self) -> Outcome<()> {
        if self.failures.is_empty() {
            Outcome::Valid(())
        } else {
            Outcome::invalid_many(self.failures)
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("path", &self.path())
            .field("failures", &self.failures.len())
            .field("visited", &self.visited)
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Walks `root` and returns what it found without touching any scope.
pub fn validate_graph<T: Validate + ?Sized>(root: &T) -> Outcome<()> {
    let mut validator = Validator::new();
    validator.visit(root);
    tracing::trace!(
        visited = validator.visited,
        skipped = validator.skipped,
        failures = validator.failures.len(),
        "object graph validated"
    );
    validator.into_outcome()
}

/// Walks `root` and records its failures into the active scope.
///
/// Returns `true` when the graph is valid.
pub fn report_graph<T: Validate + ?Sized>(root: &T) -> bool {
    let outcome = validate_graph(root);
    let valid = outcome.is_valid();
    for failure in outcome.failures() {
        scope::record(failure.clone());
    }
    valid
}

/// Path of element `index` of the array property `field`.
#[inline]
pub fn element_path(field: &str, index: usize) -> String {
    format!("{field}[{index}]")
}

impl<V: Validate> Validate for Maybe<V> {
    fn validate(&self, validator: &mut Validator) {
        if let Maybe::Present(value) = self {
            value.validate(validator);
        }
    }

    #[inline]
    fn descent(&self) -> Descent {
        match self {
            Maybe::Present(value) => value.descent(),
            Maybe::Absent => Descent::Skip,
        }
    }
}

impl<V: Validate> Validate for Required<V> {
    fn validate(&self, validator: &mut Validator) {
        if let Some(value) = self.value() {
            value.validate(validator);
        }
    }

    #[inline]
    fn descent(&self) -> Descent {
        match self.value() {
            Some(value) => value.descent(),
            None => Descent::Skip,
        }
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, validator: &mut Validator) {
        if let Some(value) = self {
            value.validate(validator);
        }
    }

    #[inline]
    fn descent(&self) -> Descent {
        match self {
            Some(value) => value.descent(),
            None => Descent::Skip,
        }
    }
}

impl<N, C: Validate> Validate for Named<N, C> {
    fn validate(&self, validator: &mut Validator) {
        (**self).validate(validator);
    }

    #[inline]
    fn descent(&self) -> Descent {
        (**self).descent()
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self, validator: &mut Validator) {
        for (index, item) in self.iter().enumerate() {
            validator.element(index, item);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, validator: &mut Validator) {
        self.as_slice().validate(validator);
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self, validator: &mut Validator) {
        (**self).validate(validator);
    }

    #[inline]
    fn descent(&self) -> Descent {
        (**self).descent()
    }
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(impl Validate for $ty {})*
    };
}

impl_leaf!(String, str, bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
