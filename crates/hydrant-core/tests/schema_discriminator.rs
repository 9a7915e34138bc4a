use hydrant_core::document::{Document, Type, Value};
use hydrant_core::schema::*;
use serde_json::json;

fn schema() -> Schema {
    Schema::builder()
        .register(ClassMapping::new("User").field(FieldMapping::primitive("name", Type::String)))
        .register(ClassMapping::new("Admin").field(FieldMapping::primitive("name", Type::String)))
        .build()
        .unwrap()
}

fn raw(json: serde_json::Value) -> Value {
    Value::Document(Document::from_json(json).unwrap())
}

#[test]
fn falls_back_to_target_hint() {
    let schema = schema();
    let field = FieldMapping::reference_one("owner", Reference::new("User"));

    let class = schema
        .class_name_from_discriminator(&field, &raw(json!({ "$id": "1" })))
        .unwrap();
    assert_eq!(class, "User");
}

#[test]
fn hint_used_when_discriminator_value_absent() {
    let schema = schema();
    let field = FieldMapping::reference_one(
        "owner",
        Reference::new("User").discriminator(Discriminator::default().map("admin", "Admin")),
    );

    let class = schema
        .class_name_from_discriminator(&field, &raw(json!({ "$id": "1", "_class": null })))
        .unwrap();
    assert_eq!(class, "User");
}

#[test]
fn discriminator_map_picks_class() {
    let schema = schema();
    let field = FieldMapping::embed_one(
        "owner",
        Embedded::new("User").discriminator(Discriminator::new("type").map("admin", "Admin")),
    );

    let value = raw(json!({ "type": "admin", "name": "root" }));

    let first = schema.class_name_from_discriminator(&field, &value).unwrap();
    let second = schema.class_name_from_discriminator(&field, &value).unwrap();
    assert_eq!(first, "Admin");
    assert_eq!(first, second);
}

#[test]
fn empty_map_uses_value_as_class_name() {
    let schema = schema();
    let field = FieldMapping::reference_one("owner", Reference::polymorphic(Discriminator::default()));

    let class = schema
        .class_name_from_discriminator(&field, &raw(json!({ "$id": "1", "_class": "Admin" })))
        .unwrap();
    assert_eq!(class, "Admin");
}

#[test]
fn unknown_discriminator_value() {
    let schema = schema();
    let field = FieldMapping::reference_one(
        "owner",
        Reference::new("User").discriminator(Discriminator::default().map("admin", "Admin")),
    );

    let err = schema
        .class_name_from_discriminator(&field, &raw(json!({ "$id": "1", "_class": "robot" })))
        .unwrap_err();

    assert!(err.is_discriminator_resolution());
    assert_eq!(
        err.to_string(),
        "discriminator value `robot` for field `owner` does not map to a known class"
    );
}

#[test]
fn unregistered_class_name_value() {
    let schema = schema();
    let field = FieldMapping::reference_one("owner", Reference::polymorphic(Discriminator::default()));

    let err = schema
        .class_name_from_discriminator(&field, &raw(json!({ "_class": "Ghost" })))
        .unwrap_err();
    assert!(err.is_discriminator_resolution());
}

#[test]
fn no_value_and_no_hint() {
    let schema = schema();
    let field = FieldMapping::reference_one("owner", Reference::polymorphic(Discriminator::default()));

    let err = schema
        .class_name_from_discriminator(&field, &Value::from("42"))
        .unwrap_err();
    assert!(err.is_discriminator_resolution());
    assert_eq!(
        err.to_string(),
        "field `owner` has neither a discriminator value nor a target class"
    );
}

#[test]
fn primitive_field_is_rejected() {
    let schema = schema();
    let field = FieldMapping::primitive("name", Type::String);

    let err = schema
        .class_name_from_discriminator(&field, &Value::from("x"))
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn target_class_discriminator_is_inherited() {
    let schema = Schema::builder()
        .register(ClassMapping::new("Admin").field(FieldMapping::primitive("name", Type::String)))
        .register(
            ClassMapping::new("User")
                .discriminator(Discriminator::new("role").map("admin", "Admin"))
                .field(FieldMapping::primitive("name", Type::String)),
        )
        .build()
        .unwrap();

    let field = FieldMapping::reference_one("owner", Reference::new("User"));

    let class = schema
        .class_name_from_discriminator(&field, &raw(json!({ "role": "admin", "$id": "1" })))
        .unwrap();
    assert_eq!(class, "Admin");

    let class = schema
        .class_name_from_discriminator(&field, &raw(json!({ "$id": "1" })))
        .unwrap();
    assert_eq!(class, "User");
}

#[test]
fn class_discriminator_targets_must_be_registered() {
    let err = Schema::builder()
        .register(
            ClassMapping::new("User").discriminator(Discriminator::new("role").map("admin", "Admin")),
        )
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}
