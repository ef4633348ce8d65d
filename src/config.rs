//! Message templates and naming policy used by the codecs.
//!
//! A [`MessageConfig`] is attached to a scope when it is created; codecs running
//! inside that scope render their absence, format and unexpected-failure
//! messages from it. Outside any scope the [`Default`] configuration applies.
//!
//! Templates understand three placeholders:
//!
//! - `{field}` - the attributed field name
//! - `{kind}` - the primitive kind label (`integer`, `GUID`, ...), format messages only
//! - `{detail}` - the constructor's detail text, unexpected failures only
//!
//! # Examples
//!
//! ```
//! use field_rail::config::{FieldNaming, MessageConfig};
//!
//! let config = MessageConfig::default();
//! assert_eq!(config.required_message("email"), "email cannot be null.");
//! assert_eq!(config.format_message("age", "integer"), "age is not a valid integer.");
//!
//! let terse = MessageConfig::terse();
//! assert_eq!(terse.required_message("email"), "required");
//!
//! assert_eq!(FieldNaming::CamelCase.apply("EmailAddress"), "emailAddress");
//! ```
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

/// How a type name becomes a default field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldNaming {
    /// Keep the type name as written.
    AsIs,
    /// Lower-case the first character: `EmailAddress` -> `emailAddress`.
    #[default]
    CamelCase,
    /// Lower-case everything: `EmailAddress` -> `emailaddress`.
    LowerCase,
}

impl FieldNaming {
    /// Applies the policy to a bare type name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::AsIs => name.to_owned(),
            Self::LowerCase => name.to_lowercase(),
            Self::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            },
        }
    }

    /// Default field name for `V`: last path segment of its type name, generics
    /// stripped, with the policy applied.
    pub fn type_field_name<V: ?Sized>(&self) -> String {
        self.apply(short_type_name(core::any::type_name::<V>()))
    }
}

fn short_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Message templates and naming policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageConfig {
    pub required: Cow<'static, str>,
    pub format: Cow<'static, str>,
    /// `None` keeps the constructor's detail text verbatim.
    pub unexpected: Option<Cow<'static, str>>,
    pub naming: FieldNaming,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            required: Cow::Borrowed("{field} cannot be null."),
            format: Cow::Borrowed("{field} is not a valid {kind}."),
            unexpected: None,
            naming: FieldNaming::CamelCase,
        }
    }
}

impl MessageConfig {
    /// Short, field-free messages for clients that already key by field.
    #[inline]
    pub fn terse() -> Self {
        Self {
            required: Cow::Borrowed("required"),
            format: Cow::Borrowed("invalid {kind}"),
            unexpected: Some(Cow::Borrowed("invalid")),
            ..Default::default()
        }
    }

    /// Full sentences, including the detail of unexpected failures.
    #[inline]
    pub fn verbose() -> Self {
        Self {
            required: Cow::Borrowed("The {field} field is required and cannot be null."),
            format: Cow::Borrowed("The value supplied for {field} is not a valid {kind}."),
            unexpected: Some(Cow::Borrowed("{field} could not be processed: {detail}")),
            ..Default::default()
        }
    }

    #[must_use]
    #[inline]
    pub fn with_naming(mut self, naming: FieldNaming) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    #[inline]
    pub fn with_required(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.required = template.into();
        self
    }

    #[must_use]
    #[inline]
    pub fn with_format(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.format = template.into();
        self
    }

    #[must_use]
    #[inline]
    pub fn with_unexpected(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.unexpected = Some(template.into());
        self
    }

    pub fn required_message(&self, field: &str) -> String {
        self.required.replace("{field}", field)
    }

    pub fn format_message(&self, field: &str, kind: &str) -> String {
        self.format.replace("{field}", field).replace("{kind}", kind)
    }

    pub fn unexpected_message(&self, field: &str, detail: &str) -> String {
        match &self.unexpected {
            Some(template) => template.replace("{field}", field).replace("{detail}", detail),
            None => detail.to_owned(),
        }
    }

    /// Shared default instance handed out when no scope is active.
    pub fn shared_default() -> Arc<MessageConfig> {
        static DEFAULT: OnceLock<Arc<MessageConfig>> = OnceLock::new();
        Arc::clone(DEFAULT.get_or_init(|| Arc::new(MessageConfig::default())))
    }
}
