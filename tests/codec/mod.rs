use std::sync::atomic::{AtomicUsize, Ordering};

use field_rail::config::MessageConfig;
use field_rail::scope::{self, with_property};
use field_rail::{
    DomainError, FailureKind, Maybe, OptionalCodec, Outcome, PropertyBoundCodec, Scalar,
    ValidatingCodec, ValueObject,
};

use crate::common::{Age, Broken, DateRange, Email, Name, Note};


#[test]
fn valid_value_is_constructed() {
    let handle = scope::open();
    assert_eq!(ValidatingCodec::<Age>::new().read(Some(42)), Some(Age(42)));
    assert!(handle.materialize().is_none());
}

#[test]
fn absent_required_value_records_one_absence_under_default_name() {
    let handle = scope::open();
    assert_eq!(ValidatingCodec::<Age>::new().read(None), None);

    let err = handle.materialize().unwrap();
    assert_eq!(err.messages("age").unwrap(), ["age cannot be null.".to_string()]);
    assert_eq!(err.errors().message_count(), 1);
}

#[test]
fn absent_required_value_uses_current_property() {
    let handle = scope::open();
    with_property("FirstName", || ValidatingCodec::<Name>::new().read(None));

    let err = handle.materialize().unwrap();
    assert_eq!(
        err.messages("FirstName").unwrap(),
        ["FirstName cannot be null.".to_string()]
    );
}

#[test]
fn explicit_field_name_overrides_type_name() {
    let config = MessageConfig::default();
    let outcome = ValidatingCodec::<DateRange>::new().evaluate(None, None, &config);
    assert_eq!(outcome.failures()[0].field(), "period");
}

#[test]
fn non_required_value_object_receives_absence() {
    let handle = scope::open();
    assert_eq!(ValidatingCodec::<Note>::new().read(None), Some(Note(None)));
    assert!(handle.materialize().is_none());
}

#[test]
fn domain_failure_is_attributed_to_current_property() {
    let handle = scope::open();
    with_property("contactEmail", || {
        ValidatingCodec::<Email>::new().read(Some("nope".into()))
    });

    let err = handle.materialize().unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["contactEmail"]);
    assert_eq!(
        err.messages("contactEmail").unwrap(),
        ["Email must contain @.".to_string()]
    );
}

#[test]
fn domain_failure_without_property_uses_constructor_fields() {
    let handle = scope::open();
    ValidatingCodec::<DateRange>::new().read(Some("2024".into()));

    let err = handle.materialize().unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["start", "end"]);
}

#[test]
fn unexpected_failure_is_flattened_to_one_message() {
    let config = MessageConfig::default();
    let outcome = ValidatingCodec::<Broken>::new().evaluate(Some("x".into()), Some("region"), &config);

    let failures = outcome.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].field(), "region");
    assert_eq!(failures[0].reason(), "Reference data is unavailable.");
    assert_eq!(failures[0].kind(), FailureKind::Unexpected);
}

#[test]
fn unexpected_failure_uses_configured_template() {
    let config = MessageConfig::verbose();
    let outcome = ValidatingCodec::<Broken>::new().evaluate(Some("x".into()), Some("region"), &config);
    assert_eq!(
        outcome.failures()[0].reason(),
        "region could not be processed: Reference data is unavailable."
    );
}

#[test]
fn format_failure_short_circuits_the_constructor() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Quantity(i64);

    impl ValueObject for Quantity {
        type Primitive = i64;

        fn try_create(value: Option<i64>, field: Option<&str>) -> Result<Self, DomainError> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            match value {
                Some(v) if v > 0 => Ok(Quantity(v)),
                _ => Err(DomainError::validation(field.unwrap_or("quantity"), "Quantity must be positive.")),
            }
        }

        fn to_primitive(&self) -> i64 {
            self.0
        }
    }

    let handle = scope::open();
    let read = with_property("quantity", || {
        ValidatingCodec::<Quantity>::new().read_scalar(Some(Scalar::Str("abc".into())))
    });

    assert!(read.is_none());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);

    let err = handle.materialize().unwrap();
    assert_eq!(
        err.messages("quantity").unwrap(),
        ["quantity is not a valid integer.".to_string()]
    );

    let outcome = ValidatingCodec::<Quantity>::new().evaluate_scalar(
        Some(Scalar::Int(0)),
        Some("quantity"),
        &MessageConfig::default(),
    );
    assert_eq!(outcome.failures()[0].kind(), FailureKind::Domain);
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn composite_wire_value_is_a_format_failure() {
    let config = MessageConfig::default();
    let outcome = ValidatingCodec::<Name>::new().evaluate_scalar(Some(Scalar::Composite), Some("FirstName"), &config);
    assert_eq!(outcome.failures()[0].reason(), "FirstName is not a valid string.");
}

#[test]
fn write_is_the_structural_inverse() {
    let codec = ValidatingCodec::<Email>::new();
    let handle = scope::open();

    let value = Email("a@b.c".into());
    let wire = codec.write(Some(&value));
    assert_eq!(codec.read(wire), Some(value));
    assert_eq!(codec.write(None), None);
    assert!(handle.materialize().is_none());
}

#[test]
fn repeated_reads_are_identical() {
    let codec = ValidatingCodec::<Email>::new();
    let config = MessageConfig::default();

    let first = codec.evaluate(Some("nope".into()), Some("email"), &config);
    let second = codec.evaluate(Some("nope".into()), Some("email"), &config);
    assert_eq!(first, second);

    let scope = field_rail::ValidationScope::new();
    let a = scope.in_scope(|| codec.read(Some("nope".into())));
    let once = scope.errors();
    let b = scope.in_scope(|| codec.read(Some("nope".into())));
    assert_eq!(a, b);
    assert_eq!(scope.errors(), once);
}

#[test]
fn optional_absence_records_nothing_even_for_invalid_types() {
    let handle = scope::open();
    assert_eq!(OptionalCodec::<Broken>::new().read(None), Maybe::Absent);
    assert_eq!(OptionalCodec::<Age>::new().read_scalar(Some(Scalar::Null)), Maybe::Absent);
    assert!(handle.materialize().is_none());
}

#[test]
fn optional_present_invalid_records_and_resolves_absent() {
    let handle = scope::open();
    let read = with_property("nickname", || OptionalCodec::<Name>::new().read(Some("  ".into())));
    assert_eq!(read, Maybe::Absent);

    let err = handle.materialize().unwrap();
    assert_eq!(err.messages("nickname").unwrap(), ["Name cannot be empty.".to_string()]);
}

#[test]
fn optional_round_trips_present_values() {
    let codec = OptionalCodec::<Age>::new();
    let present = Maybe::Present(Age(7));

    let handle = scope::open();
    assert_eq!(codec.read(codec.write(&present)), present);
    assert_eq!(codec.write(&Maybe::Absent), None);
    assert!(handle.materialize().is_none());
}

#[test]
fn optional_evaluate_never_reports_absence() {
    let outcome = OptionalCodec::<Age>::new().evaluate(None, Some("age"), &MessageConfig::default());
    assert!(matches!(outcome, Outcome::Absent));
}

#[test]
fn same_type_under_two_names_reports_both() {
    let handle = scope::open();
    PropertyBoundCodec::<Email>::new("billingEmail").read(Some("x".into()));
    PropertyBoundCodec::<Email>::new("shippingEmail").read(Some("y".into()));

    let err = handle.materialize().unwrap();
    assert_eq!(err.fields().collect::<Vec<_>>(), ["billingEmail", "shippingEmail"]);
    for field in ["billingEmail", "shippingEmail"] {
        assert_eq!(err.messages(field).unwrap(), ["Email must contain @.".to_string()]);
    }
    assert!(err.messages("email").is_none());
}

#[test]
fn property_bound_codec_restores_outer_property() {
    let _handle = scope::open();
    with_property("customer", || {
        PropertyBoundCodec::<Age>::new("age").read(Some(-1));
        assert_eq!(scope::current_property().as_deref(), Some("customer"));
    });
}

#[test]
fn property_bound_codec_reads_optional() {
    let handle = scope::open();
    let codec = PropertyBoundCodec::<Age>::new("age");
    assert_eq!(codec.read_optional(None), Maybe::Absent);
    assert_eq!(codec.read_optional(Some(3)), Maybe::Present(Age(3)));
    assert_eq!(codec.write(Some(&Age(3))), Some(3));
    assert!(handle.materialize().is_none());
}
