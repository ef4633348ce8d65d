use field_rail::config::MessageConfig;

#[test]
fn default_templates_render_fixed_messages() {
    let config = MessageConfig::default();
    assert_eq!(config.required_message("FirstName"), "FirstName cannot be null.");
    assert_eq!(config.format_message("id", "GUID"), "id is not a valid GUID.");
    assert_eq!(config.unexpected_message("email", "lookup failed"), "lookup failed");
}

#[test]
fn presets_differ_only_in_templates() {
    let terse = MessageConfig::terse();
    assert_eq!(terse.format_message("size", "integer"), "invalid integer");
    assert_eq!(terse.unexpected_message("size", "boom"), "invalid");

    let verbose = MessageConfig::verbose();
    assert_eq!(
        verbose.unexpected_message("size", "boom"),
        "size could not be processed: boom"
    );
    assert_eq!(terse.naming, verbose.naming);
}

#[test]
fn builders_override_single_templates() {
    let config = MessageConfig::default()
        .with_required("{field} is required.")
        .with_unexpected("{field}: {detail}");

    assert_eq!(config.required_message("age"), "age is required.");
    assert_eq!(config.unexpected_message("age", "x"), "age: x");
    assert_eq!(config.format, MessageConfig::default().format);
}

#[test]
fn shared_default_is_one_instance() {
    let a = MessageConfig::shared_default();
    let b = MessageConfig::shared_default();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(*a, MessageConfig::default());
}
