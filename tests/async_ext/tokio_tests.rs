//! Tests for Tokio integration.

use std::time::Duration;

use field_rail::prelude_async::*;
use field_rail::ValidatingCodec;
use serde::Deserialize;

use crate::common::{Age, Email};

#[derive(Debug, Deserialize)]
struct Signup {
    email: Required<Email>,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_concurrent_units_of_work_stay_isolated() {
    let handles: Vec<_> = (0..50)
        .map(|i| {
            tokio::spawn(async move {
                boundary::run_async(async move {
                    tokio::time::sleep(Duration::from_millis((i % 7) as u64)).await;
                    scope::report(format!("field{i}"), format!("error {i}"));
                    tokio::task::yield_now().await;
                    let signup: Signup = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
                    assert!(signup.email.is_bound());
                })
                .await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let err = handle.await.unwrap().unwrap_err();
        let field = format!("field{i}");
        assert_eq!(err.fields().collect::<Vec<_>>(), [field.as_str()]);
        assert_eq!(err.messages(&field).unwrap(), [format!("error {i}")]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawned_branches_report_into_the_spawning_scope() {
    let result = boundary::run_async(async {
        let branch = spawn_in_scope(
            async {
                tokio::task::yield_now().await;
                ValidatingCodec::<Age>::new().read(Some(-1))
            }
            .with_property("age"),
        );
        branch.await.unwrap()
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.messages("age").unwrap(), ["Age cannot be negative.".to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawned_branch_keeps_the_current_property() {
    let result = boundary::run_async(async {
        let handle = field_rail::scope::with_property("contact", || {
            spawn_in_scope(async {
                tokio::task::yield_now().await;
                ValidatingCodec::<Email>::new().read(Some("nope".into()))
            })
        });
        handle.await.unwrap()
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["contact"]);
}

#[tokio::test]
async fn spawn_without_scope_discards_reports() {
    let reported = spawn_in_scope(async { scope::report("x", "y") }).await.unwrap();
    assert!(!reported);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_elements_share_one_error_set() {
    let result = boundary::run_async(async {
        validate_elements_concurrently(
            "ages",
            (0..20).map(|i| async move {
                tokio::task::yield_now().await;
                let raw = if i % 2 == 0 { i } else { -i };
                ValidatingCodec::<Age>::new().read(Some(raw))
            }),
        )
        .await
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.errors().len(), 10);
    assert!(err.fields().all(|f| f.starts_with("ages[")));
    assert!(err.messages("ages[1]").is_some());
    assert!(err.messages("ages[0]").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_elements_return_values_in_order() {
    let values = boundary::run_async(async {
        validate_elements_concurrently(
            "ages",
            (0..5).map(|i| async move {
                tokio::time::sleep(Duration::from_millis(5 - i as u64)).await;
                ValidatingCodec::<Age>::new().read(Some(i))
            }),
        )
        .await
    })
    .await
    .unwrap();

    assert_eq!(values, Some((0..5).map(Age).collect::<Vec<_>>()));
}

#[tokio::test]
async fn aborted_request_does_not_poison_the_next_one() {
    let task = tokio::spawn(boundary::run_async(async {
        scope::report("first", "x");
        std::future::pending::<()>().await;
    }));
    tokio::task::yield_now().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    let second = boundary::run_async(async { scope::report("second", "y") }).await;
    let err = second.unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["second"]);
    assert!(!scope::is_active());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn detached_branch_cannot_write_after_the_boundary() {
    let (release, wait) = tokio::sync::oneshot::channel::<()>();
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<bool>();

    let result = boundary::run_async(async move {
        let _detached = spawn_in_scope(async move {
            let _ = wait.await;
            let _ = done_tx.send(scope::report("late", "outlived its request"));
        });
    })
    .await;

    assert!(result.is_ok());
    release.send(()).unwrap();
    assert!(!done_rx.await.unwrap());
}
