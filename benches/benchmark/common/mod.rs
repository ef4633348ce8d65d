use criterion::Criterion;
use field_rail::{property_name, DomainError, Named, Required, ValueObject};
use serde::Deserialize;
use std::time::Duration;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(pub String);

impl ValueObject for Email {
    type Primitive = String;

    fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v.contains('@') && v.len() <= 254 => Ok(Email(v)),
            _ => Err(DomainError::validation(field.unwrap_or("email"), "Email must contain @.")),
        }
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(pub i32);

impl ValueObject for Age {
    type Primitive = i32;

    fn try_create(value: Option<i32>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if (0..=150).contains(&v) => Ok(Age(v)),
            _ => Err(DomainError::validation(field.unwrap_or("age"), "Age is out of range.")),
        }
    }

    fn to_primitive(&self) -> i32 {
        self.0
    }
}

property_name! {
    pub struct BillingEmail = "billingEmail";
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Customer {
    pub email: Required<Email>,
    pub billing: Named<BillingEmail, Required<Email>>,
    pub age: Required<Age>,
}

pub const VALID_CUSTOMER: &str =
    r#"{"email":"kim@example.com","billing":"billing@example.com","age":34}"#;
pub const INVALID_CUSTOMER: &str = r#"{"email":"kim","billing":null,"age":"old"}"#;

// ============================================================================
// Configuration
// ============================================================================

pub fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05)
}
