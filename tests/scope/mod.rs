use field_rail::config::MessageConfig;
use field_rail::scope::{self, current_property, with_property};
use field_rail::{ValidationFailure, ValidationScope};


#[test]
fn reports_without_scope_are_discarded() {
    assert!(!scope::is_active());
    assert!(!scope::report("email", "Email must contain @."));
    assert!(scope::current().is_none());
}

#[test]
fn open_activates_and_drop_restores_previous() {
    let outer = scope::open();
    assert_eq!(scope::current().as_ref(), Some(outer.scope()));

    {
        let inner = scope::open();
        assert_eq!(scope::current().as_ref(), Some(inner.scope()));
    }

    assert_eq!(scope::current().as_ref(), Some(outer.scope()));
    drop(outer);
    assert!(!scope::is_active());
}

#[test]
fn nested_scope_does_not_leak_into_outer() {
    let outer = scope::open();

    let inner = scope::open();
    scope::report("age", "Age cannot be negative.");
    let inner_errors = inner.materialize().unwrap();

    assert_eq!(inner_errors.fields().collect::<Vec<_>>(), ["age"]);
    assert!(outer.materialize().is_none());
}

#[test]
fn nested_scope_dropped_unmaterialized_leaves_outer_empty() {
    let outer = scope::open();
    {
        let _inner = scope::open();
        scope::report("age", "Age cannot be negative.");
    }
    assert!(outer.materialize().is_none());
}

#[test]
fn failures_keep_execution_order_and_dedup() {
    let handle = scope::open();
    scope::report("email", "Email must contain @.");
    scope::report("age", "Age cannot be negative.");
    assert!(!scope::report("email", "Email must contain @."));

    let scope = handle.scope().clone();
    assert_eq!(scope.error_count(), 2);

    let err = handle.materialize().unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["email", "age"]);
}

#[test]
fn materialize_is_take_once() {
    let scope = ValidationScope::new();
    scope.push("email", "Email must contain @.");

    assert!(scope.materialize().is_some());
    assert!(scope.is_materialized());
    assert!(scope.materialize().is_none());
}

#[test]
fn materialized_scope_rejects_late_appends() {
    let scope = ValidationScope::new();
    assert!(scope.push("email", "Email must contain @."));
    assert!(scope.materialize().is_some());

    assert!(!scope.push("late", "arrived after the boundary closed"));
    assert!(!scope.in_scope(|| scope::report("later", "also dropped")));
    assert!(!scope.has_errors());
    assert_eq!(scope.error_count(), 0);
    assert!(scope.errors().is_empty());
}

#[test]
fn materialize_on_empty_scope_is_none() {
    let handle = scope::open();
    assert!(handle.materialize().is_none());
}

#[test]
fn in_scope_activates_for_the_closure_only() {
    let scope = ValidationScope::new();
    scope.in_scope(|| {
        scope::record(ValidationFailure::domain("name", "Name cannot be empty."));
    });

    assert!(!scope::is_active());
    assert!(scope.has_errors());
}

#[test]
fn scope_config_is_visible_to_codecs() {
    let handle = scope::open_with_config(MessageConfig::terse());
    assert_eq!(scope::current_config().required_message("x"), "required");
    drop(handle);
    assert_eq!(scope::current_config().required_message("x"), "x cannot be null.");
}

#[test]
fn scope_is_torn_down_on_panic() {
    let result = std::panic::catch_unwind(|| {
        let _handle = scope::open();
        with_property("email", || panic!("conversion blew up"));
    });

    assert!(result.is_err());
    assert!(!scope::is_active());
    assert_eq!(current_property(), None);
}

#[test]
#[should_panic(expected = "closed out of order")]
fn closing_out_of_order_panics() {
    let outer = scope::open();
    let inner = scope::open();
    drop(outer);
    drop(inner);
}

#[test]
fn sibling_threads_append_to_a_shared_scope() {
    let scope = ValidationScope::new();

    std::thread::scope(|s| {
        for i in 0..8 {
            let scope = scope.clone();
            s.spawn(move || {
                scope.in_scope(|| {
                    for j in 0..25 {
                        scope::report(format!("items[{i}]"), format!("message {j}"));
                    }
                })
            });
        }
    });

    let err = scope.materialize().unwrap();
    assert_eq!(err.errors().len(), 8);
    assert_eq!(err.errors().message_count(), 200);
}
