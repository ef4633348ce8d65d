//! Value objects shared by the integration tests.

use field_rail::{property_name, DomainError, FieldErrorSet, Validate, ValueObject};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl ValueObject for Name {
    type Primitive = String;

    fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(Name(v)),
            _ => Err(DomainError::validation(field.unwrap_or("name"), "Name cannot be empty.")),
        }
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

impl Validate for Name {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(pub String);

impl ValueObject for Email {
    type Primitive = String;

    fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v.contains('@') => Ok(Email(v)),
            _ => Err(DomainError::validation(field.unwrap_or("email"), "Email must contain @.")),
        }
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

impl Validate for Email {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(pub i32);

impl ValueObject for Age {
    type Primitive = i32;

    fn try_create(value: Option<i32>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v >= 0 => Ok(Age(v)),
            _ => Err(DomainError::validation(field.unwrap_or("age"), "Age cannot be negative.")),
        }
    }

    fn to_primitive(&self) -> i32 {
        self.0
    }
}

impl Validate for Age {}

/// Rejects everything with a non-validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broken(pub String);

impl ValueObject for Broken {
    type Primitive = String;

    fn try_create(_: Option<String>, _: Option<&str>) -> Result<Self, DomainError> {
        Err(DomainError::unexpected("lookup_failed", "Reference data is unavailable."))
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

/// Rejects with two messages for two different fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange(pub String);

impl ValueObject for DateRange {
    type Primitive = String;
    const FIELD_NAME: Option<&'static str> = Some("period");

    fn try_create(value: Option<String>, _: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v.contains("..") => Ok(DateRange(v)),
            _ => {
                let errors: FieldErrorSet =
                    [("start", "Start is missing."), ("end", "End is missing.")].into_iter().collect();
                Err(DomainError::validation_many(errors))
            },
        }
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

/// A value object whose absence is handed to the constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note(pub Option<String>);

impl ValueObject for Note {
    type Primitive = String;
    const REQUIRED: bool = false;

    fn try_create(value: Option<String>, _: Option<&str>) -> Result<Self, DomainError> {
        Ok(Note(value))
    }

    fn to_primitive(&self) -> String {
        self.0.clone().unwrap_or_default()
    }
}

property_name!(pub struct FirstName = "FirstName");
property_name!(pub struct LastName = "LastName");
property_name!(pub struct BillingEmail = "billingEmail");
property_name!(pub struct ShippingEmail = "shippingEmail");
property_name!(pub struct AgeField = "age");
property_name!(pub struct Nickname = "nickname");
