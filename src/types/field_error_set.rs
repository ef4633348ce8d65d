use crate::types::{ErrorVec, ValidationFailure};
use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One field together with the messages recorded against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldEntry {
    field: String,
    messages: ErrorVec<String>,
}

impl FieldEntry {
    /// The field name this entry is attributed to.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Messages in first-insertion order.
    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Ordered, deduplicated mapping from field name to messages.
///
/// Field names are unique within a set and keep the order in which they were
/// first seen. Messages under one field are deduplicated and also keep their
/// first-insertion order, so the same failure reported twice by two codec
/// invocations shows up once.
///
/// The set only grows: there is no per-message removal. It is created empty when
/// a scope opens and read once at the aggregation boundary.
///
/// # Examples
///
/// ```
/// use field_rail::FieldErrorSet;
///
/// let mut set = FieldErrorSet::new();
/// set.push("email", "Email must contain @.");
/// set.push("age", "Age cannot be negative.");
/// set.push("email", "Email must contain @.");
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get("email").unwrap(), ["Email must contain @.".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldErrorSet {
    entries: Vec<FieldEntry>,
}

impl FieldErrorSet {
    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends `message` under `field`.
    ///
    /// Returns `true` when the message was not already present for that field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) -> bool {
        let field = field.into();
        let message = message.into();

        match self.entries.iter_mut().find(|entry| entry.field == field) {
            Some(entry) => {
                if entry.messages.iter().any(|existing| *existing == message) {
                    false
                } else {
                    entry.messages.push(message);
                    true
                }
            },
            None => {
                let mut messages = ErrorVec::new();
                messages.push(message);
                self.entries.push(FieldEntry { field, messages });
                true
            },
        }
    }

    /// Appends a single failure, keyed by its field.
    #[inline]
    pub fn record(&mut self, failure: ValidationFailure) -> bool {
        let (field, reason, _) = failure.into_parts();
        self.push(field, reason)
    }

    /// Appends every `(field, message)` pair of `other`, preserving its order.
    pub fn merge(&mut self, other: FieldErrorSet) {
        for entry in other.entries {
            for message in entry.messages {
                self.push(entry.field.clone(), message);
            }
        }
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all fields.
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.messages.len()).sum()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.messages.as_slice())
    }

    /// Returns `true` if `field` has at least one message.
    #[inline]
    pub fn contains_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.field.as_str())
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldEntry> {
        self.entries.iter()
    }

    /// Flattens the set back into individual `(field, message)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().flat_map(|entry| {
            entry
                .messages
                .iter()
                .map(move |message| (entry.field.as_str(), message.as_str()))
        })
    }

    /// Removes everything, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<ValidationFailure> for FieldErrorSet {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<F, M> FromIterator<(F, M)> for FieldErrorSet
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (field, message) in iter {
            set.push(field, message);
        }
        set
    }
}

impl Extend<ValidationFailure> for FieldErrorSet {
    fn extend<I: IntoIterator<Item = ValidationFailure>>(&mut self, iter: I) {
        for failure in iter {
            self.record(failure);
        }
    }
}

impl IntoIterator for FieldErrorSet {
    type Item = FieldEntry;
    type IntoIter = std::vec::IntoIter<FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrorSet {
    type Item = &'a FieldEntry;
    type IntoIter = core::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for FieldErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.field, entry.messages.join(" "))?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.field, entry.messages.as_slice())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldErrorSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = FieldErrorSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from field name to a list of messages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = FieldErrorSet::new();
                while let Some((field, messages)) = access.next_entry::<String, Vec<String>>()? {
                    for message in messages {
                        set.push(field.clone(), message);
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
