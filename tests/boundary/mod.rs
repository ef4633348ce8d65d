use field_rail::boundary::{self, BoundaryError};
use field_rail::config::MessageConfig;
use field_rail::scope;
use field_rail::{Maybe, Named, Required};
use serde::Deserialize;

use crate::common::{
    Age, AgeField, BillingEmail, Email, FirstName, LastName, Name, Nickname, ShippingEmail,
};

#[derive(Debug, Deserialize)]
struct Person {
    first: Named<FirstName, Required<Name>>,
    last: Named<LastName, Required<Name>>,
    #[serde(default)]
    nickname: Named<Nickname, Maybe<Name>>,
}

#[derive(Debug, Deserialize)]
struct Order {
    billing: Named<BillingEmail, Required<Email>>,
    shipping: Named<ShippingEmail, Required<Email>>,
    age: Named<AgeField, Required<Age>>,
}

#[test]
fn empty_first_name_scenario() {
    let err = boundary::from_json_str::<Person>(r#"{"first":"","last":"Lovelace"}"#)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({"FirstName": ["Name cannot be empty."]})
    );
}

#[test]
fn valid_input_passes_through() {
    let person = boundary::from_json_str::<Person>(r#"{"first":"Ada","last":"Lovelace","nickname":"ada"}"#)
        .unwrap();
    assert_eq!(person.first.value(), Some(&Name("Ada".into())));
    assert_eq!(person.nickname.as_option(), Some(&Name("ada".into())));
}

#[test]
fn two_properties_of_one_type_report_separately() {
    let err = boundary::from_json_str::<Order>(r#"{"billing":"x","shipping":"y","age":3}"#)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({
            "billingEmail": ["Email must contain @."],
            "shippingEmail": ["Email must contain @."]
        })
    );
}

#[test]
fn every_field_error_surfaces_in_one_pass() {
    let err = boundary::from_json_str::<Order>(r#"{"billing":"x","age":"old"}"#)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(err.fields().collect::<Vec<_>>(), ["billingEmail", "age", "shippingEmail"]);
    assert_eq!(err.messages("age").unwrap(), ["age is not a valid integer.".to_string()]);
    assert_eq!(
        err.messages("shippingEmail").unwrap(),
        ["shippingEmail cannot be null.".to_string()]
    );
}

#[test]
fn partial_success_is_never_returned() {
    let result = boundary::from_json_str::<Order>(r#"{"billing":"a@b.c","shipping":"c@d.e","age":-1}"#);
    assert!(matches!(result, Err(BoundaryError::Invalid(_))));
}

#[test]
fn malformed_input_is_a_structural_error() {
    let result = boundary::from_json_str::<Person>(r#"{"first":"","last":"#);
    let err = result.unwrap_err();
    assert!(!err.is_invalid());
    assert!(err.into_inner().is_some());
    assert!(!scope::is_active());
}

#[test]
fn trailing_characters_are_rejected() {
    let result = boundary::from_json_str::<Person>(r#"{"first":"A","last":"B"} x"#);
    assert!(matches!(result, Err(BoundaryError::Inner(_))));
}

#[test]
fn slices_and_values_share_the_contract() {
    let err = boundary::from_json_slice::<Person>(br#"{"first":" ","last":"B"}"#)
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["FirstName"]);

    let value = serde_json::json!({"first": "A", "last": null});
    let err = boundary::from_json_value::<Person>(value)
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(err.messages("LastName").unwrap(), ["LastName cannot be null.".to_string()]);
}

#[test]
fn boundary_inside_an_outer_scope_keeps_them_apart() {
    let outer = scope::open();
    scope::report("header", "Header is missing.");

    let inner = boundary::from_json_str::<Person>(r#"{"first":"","last":""}"#);
    assert_eq!(inner.unwrap_err().into_invalid().unwrap().errors().len(), 2);

    let err = outer.materialize().unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["header"]);
}

#[test]
fn run_with_config_renders_custom_messages() {
    let err = boundary::run_with_config(MessageConfig::terse(), || {
        serde_json::from_str::<Person>(r#"{"first":"A"}"#).ok()
    })
    .unwrap_err();

    assert_eq!(err.messages("LastName").unwrap(), ["required".to_string()]);
}

#[test]
fn run_returns_value_when_nothing_was_recorded() {
    assert_eq!(boundary::run(|| "done").unwrap(), "done");
}

#[test]
fn materialize_helper_reads_once() {
    let handle = scope::open();
    scope::report("a", "b");
    let shared = handle.scope().clone();

    assert!(boundary::materialize(handle).is_some());
    assert!(shared.materialize().is_none());
}
