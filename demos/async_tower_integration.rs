//! Example: one validation scope per request with Tower.
//!
//! The layer opens a scope before the inner service runs and keeps it active
//! across every `.await`, so failures recorded while binding query values and
//! while deserializing the body end up in one aggregate error.
//!
//! Run with: `cargo run --example async_tower_integration --features tower`

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use field_rail::prelude::*;
use field_rail::tower::{ServiceValidationExt, ValidationLayer};
use serde::Deserialize;
use tower::{Layer, Service};

// =============================================================================
// Domain types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Username(String);

impl ValueObject for Username {
    type Primitive = String;

    fn try_create(value: Option<String>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if (3..=20).contains(&v.len()) => Ok(Username(v)),
            _ => Err(DomainError::validation(
                field.unwrap_or("username"),
                "Username must be 3 to 20 characters.",
            )),
        }
    }

    fn to_primitive(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Page(u32);

impl ValueObject for Page {
    type Primitive = u32;

    fn try_create(value: Option<u32>, field: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v >= 1 => Ok(Page(v)),
            _ => Err(DomainError::validation(field.unwrap_or("page"), "Page starts at 1.")),
        }
    }

    fn to_primitive(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Deserialize)]
struct Signup {
    username: Required<Username>,
}

#[derive(Debug, Clone)]
struct ApiError(String);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Mock service
// =============================================================================

struct Request {
    page: Option<&'static str>,
    body: &'static str,
}

#[derive(Clone)]
struct SignupService;

impl Service<Request> for SignupService {
    type Response = String;
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let page = BindingAdapter::<Page>::query("page").bind_optional(req.page);

        Box::pin(async move {
            tokio::task::yield_now().await;
            let signup: Signup = serde_json::from_str(req.body)
                .map_err(|err| ApiError(format!("malformed body: {err}")))?;
            Ok(format!(
                "created {:?} (page {})",
                signup.username.value(),
                page.map(|p| p.0).unwrap_or(1)
            ))
        })
    }
}

async fn show<S>(service: &mut S, req: Request)
where
    S: Service<Request, Response = String, Error = BoundaryError<ApiError>>,
{
    match service.call(req).await {
        Ok(response) => println!("   Success: {response}"),
        Err(BoundaryError::Invalid(err)) => println!("   Invalid: {err}"),
        Err(BoundaryError::Inner(err)) => println!("   Error: {err}"),
    }
}

// =============================================================================
// Using ValidationLayer
// =============================================================================

#[tokio::main]
async fn main() {
    println!("=== Tower Integration Example ===\n");

    println!("1. Using ValidationLayer:");
    let mut service = ValidationLayer::new().layer(SignupService);
    show(&mut service, Request { page: Some("2"), body: r#"{"username":"ada"}"# }).await;
    show(&mut service, Request { page: Some("0"), body: r#"{"username":"a"}"# }).await;

    println!("\n2. A layer with terse messages:");
    let mut service =
        ValidationLayer::with_config(MessageConfig::terse()).layer(SignupService);
    show(&mut service, Request { page: Some("x"), body: "{}" }).await;

    println!("\n3. ServiceValidationExt; inner errors pass through untouched:");
    let mut service = SignupService.with_validation();
    show(&mut service, Request { page: None, body: "not json" }).await;

    println!("\n=== Done ===");
}
