//! Example: collecting every field failure of a request body in one pass.
//!
//! Run with: `cargo run --example quick_start`

use field_rail::prelude::*;
use serde::Deserialize;

// =============================================================================
// Value objects
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Email(String);

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

#[derive(Debug, Clone, Copy, PartialEq)]
struct Quantity(u32);

impl ValueObject for Quantity {
    type Primitive = u32;

    fn try_create(value: Option<u32>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if (1..=99).contains(&v) => Ok(Quantity(v)),
            _ => Err(DomainError::validation(
                field.unwrap_or("quantity"),
                "Quantity must be between 1 and 99.",
            )),
        }
    }

    fn to_primitive(&self) -> u32 {
        self.0
    }
}

property_name! {
    struct ContactEmail = "contactEmail";
}

#[derive(Debug, Deserialize)]
struct Order {
    contact: Named<ContactEmail, Required<Email>>,
    quantity: Required<Quantity>,
    gift_note: Maybe<Email>,
}

// =============================================================================
// Boundaries
// =============================================================================

fn submit(body: &str) {
    match boundary::from_json_str::<Order>(body) {
        Ok(order) => println!(
            "   Accepted: contact={:?} quantity={:?} gift_note_present={}",
            order.contact.value(),
            order.quantity.value(),
            order.gift_note.is_present()
        ),
        Err(BoundaryError::Invalid(err)) => {
            println!("   Rejected: {err}");
            if let Ok(json) = serde_json::to_string(&err) {
                println!("   Response body: {json}");
            }
        },
        Err(BoundaryError::Inner(err)) => println!("   Malformed body: {err}"),
    }
}

fn main() {
    println!("=== Quick Start ===\n");

    println!("1. A valid order:");
    submit(r#"{"contact":"kim@example.com","quantity":3,"gift_note":null}"#);

    println!("\n2. Every failure in one response:");
    submit(r#"{"contact":"kim","quantity":"three"}"#);

    println!("\n3. A missing required field:");
    submit(r#"{"quantity":0}"#);

    println!("\n4. Structural errors win:");
    submit(r#"{"contact":"kim@example.com","#);

    println!("\n5. Query values share the same contract:");
    let result = boundary::run(|| BindingAdapter::<Quantity>::query("qty").bind(Some("lots")));
    if let Err(err) = result {
        println!("   Rejected: {err}");
    }

    println!("\n=== Done ===");
}
