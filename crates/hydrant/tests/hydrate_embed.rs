mod support;

use hydrant::{
    document::Type,
    schema::{ClassMapping, Embedded, FieldMapping, Schema},
    HydratorFactory, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use support::*;

#[test]
fn embedded_document_is_hydrated_and_registered() {
    let session = Session::new(factory());
    let (post, snapshot) = session
        .hydrate(
            "Post",
            json!({ "address": { "street": "Main St", "city": "Springfield" } }),
        )
        .unwrap();

    let address = post.embedded("address").unwrap();
    assert_eq!(address.class(), "Address");
    assert_eq!(address.value("street"), Some(&Value::from("Main St")));
    assert_eq!(address.value("city"), Some(&Value::from("Springfield")));
    assert!(snapshot.get("address").unwrap().as_embedded().is_some());

    let managed = session.unit_of_work.managed();
    assert_eq!(managed.len(), 1);
    assert_eq!(managed[0].object, address.id());
    assert_eq!(managed[0].class, "Address");
    assert_eq!(managed[0].id, None);
    assert_eq!(managed[0].fields, ["street", "city"]);

    assert_eq!(
        session.unit_of_work.parents(),
        [ParentEdge {
            child: address.id(),
            field: "address".to_string(),
            parent: post.id(),
            key: "address".to_string(),
        }]
    );
}

#[test]
fn embedded_document_must_be_a_document() {
    let session = Session::new(factory());
    let err = session
        .hydrate("Post", json!({ "address": "Main St" }))
        .unwrap_err();

    assert!(err.is_invalid_document());
    assert!(session.unit_of_work.managed().is_empty());
}

#[test]
fn embedded_errors_carry_the_path() {
    let session = Session::new(factory());
    let err = session
        .hydrate("Post", json!({ "address": { "street": ["not", "a", "string"] } }))
        .unwrap_err();

    assert!(err.is_type_conversion());

    let message = err.to_string();
    assert!(message.contains("Post.address"), "{message}");
    assert!(message.contains("Address.street"), "{message}");
}

#[test]
fn discriminator_picks_embedded_class() {
    let session = Session::new(factory());
    let (post, _) = session
        .hydrate(
            "Post",
            json!({ "attachment": { "type": "image", "url": "http://x/y.png" } }),
        )
        .unwrap();

    let attachment = post.embedded("attachment").unwrap();
    assert_eq!(attachment.class(), "Image");
    assert_eq!(attachment.value("url"), Some(&Value::from("http://x/y.png")));

    let (post, _) = session
        .hydrate("Post", json!({ "attachment": { "type": "file", "name": "a.txt" } }))
        .unwrap();

    assert_eq!(post.embedded("attachment").unwrap().class(), "File");
}

#[test]
fn unknown_embedded_discriminator_fails() {
    let session = Session::new(factory());
    let err = session
        .hydrate("Post", json!({ "attachment": { "type": "video" } }))
        .unwrap_err();

    assert!(err.is_discriminator_resolution());
    assert!(session.unit_of_work.parents().is_empty());
}

#[test]
fn nested_embedded_documents_link_to_their_direct_parent() {
    let schema = Schema::builder()
        .register(ClassMapping::embedded("Geo").field(FieldMapping::primitive("lat", Type::F64)))
        .register(
            ClassMapping::embedded("Place")
                .field(FieldMapping::primitive("name", Type::String))
                .field(FieldMapping::embed_one("geo", Embedded::new("Geo")).storage_name("g")),
        )
        .register(
            ClassMapping::new("Event").field(FieldMapping::embed_one("place", Embedded::new("Place"))),
        )
        .build()
        .unwrap();

    let session = Session::new(Arc::new(HydratorFactory::builder().build(schema).unwrap()));
    let (event, _) = session
        .hydrate(
            "Event",
            json!({ "place": { "name": "Hall", "g": { "lat": 1 } } }),
        )
        .unwrap();

    let place = event.embedded("place").unwrap();
    let geo = place.embedded("geo").unwrap();
    assert_eq!(geo.value("lat"), Some(&Value::F64(1.0)));

    // Children are registered before their parents.
    let managed = session.unit_of_work.managed();
    assert_eq!(managed.len(), 2);
    assert_eq!(managed[0].object, geo.id());
    assert_eq!(managed[1].object, place.id());

    let parents = session.unit_of_work.parents();
    assert_eq!(parents[0].parent, place.id());
    assert_eq!(parents[0].key, "g");
    assert_eq!(parents[1].parent, event.id());
    assert_eq!(parents[1].key, "place");
}
