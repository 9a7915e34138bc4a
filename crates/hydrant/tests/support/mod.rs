#![allow(dead_code)]

use hydrant::{
    document::Type,
    schema::{
        ClassMapping, ClassName, Discriminator, Embedded, FieldMapping, Reference, Schema,
    },
    Document, HydratorFactory, Hydrator, Object, ObjectId, ObjectRef, Owner, Resolver, Result,
    Snapshot, UnitOfWork, Value,
};

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    sync::Arc,
};

/// What the unit of work was told about one managed object.
#[derive(Debug, Clone)]
pub struct Managed {
    pub object: ObjectId,
    pub class: ClassName,
    pub id: Option<Value>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentEdge {
    pub child: ObjectId,
    pub field: String,
    pub parent: ObjectId,
    pub key: String,
}

#[derive(Debug, Default)]
pub struct RecordingUnitOfWork {
    pub managed: RefCell<Vec<Managed>>,
    pub parents: RefCell<Vec<ParentEdge>>,
}

impl RecordingUnitOfWork {
    pub fn managed(&self) -> Vec<Managed> {
        self.managed.borrow().clone()
    }

    pub fn parents(&self) -> Vec<ParentEdge> {
        self.parents.borrow().clone()
    }
}

impl UnitOfWork for RecordingUnitOfWork {
    fn register_managed(&self, object: &Object, id: Option<&Value>, data: &Snapshot) {
        self.managed.borrow_mut().push(Managed {
            object: object.id(),
            class: object.class().clone(),
            id: id.cloned(),
            fields: data.keys().map(String::from).collect(),
        });
    }

    fn set_parent_association(
        &self,
        child: &Object,
        field: &FieldMapping,
        parent: ObjectId,
        key: &str,
    ) {
        self.parents.borrow_mut().push(ParentEdge {
            child: child.id(),
            field: field.app_name().to_string(),
            parent,
            key: key.to_string(),
        });
    }
}

/// Resolver backed by in-memory tables. Counts every call it receives.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    /// Raw collection data keyed by owning field name
    pub collections: RefCell<HashMap<String, Vec<Value>>>,

    pub resolve_calls: RefCell<Vec<(ClassName, Value)>>,
    pub fetch_calls: Cell<usize>,
}

impl MemoryResolver {
    pub fn with_collection(self, field: &str, raw: Vec<Value>) -> Self {
        self.collections.borrow_mut().insert(field.to_string(), raw);
        self
    }

    pub fn resolve_count(&self) -> usize {
        self.resolve_calls.borrow().len()
    }
}

impl Resolver for MemoryResolver {
    fn resolve_reference(&self, class: &ClassName, id: &Value) -> Result<ObjectRef> {
        self.resolve_calls
            .borrow_mut()
            .push((class.clone(), id.clone()));

        let mut object = Object::new(class);
        object.set("id", id.clone());
        Ok(object.into_ref())
    }

    fn fetch_collection(&self, owner: &Owner, _field: &FieldMapping) -> Result<Vec<Value>> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);

        match self.collections.borrow().get(&owner.field) {
            Some(raw) => Ok(raw.clone()),
            None => Err(hydrant::err!("no data for collection `{owner}`")),
        }
    }
}

pub fn author() -> ClassMapping {
    ClassMapping::new("Author")
        .id_field(FieldMapping::primitive("id", Type::Id).storage_name("_id"))
        .field(FieldMapping::primitive("name", Type::String))
}

pub fn address() -> ClassMapping {
    ClassMapping::embedded("Address")
        .field(FieldMapping::primitive("street", Type::String))
        .field(FieldMapping::primitive("city", Type::String))
}

pub fn phone() -> ClassMapping {
    ClassMapping::embedded("Phone").field(FieldMapping::primitive("number", Type::String))
}

pub fn image() -> ClassMapping {
    ClassMapping::embedded("Image").field(FieldMapping::primitive("url", Type::String))
}

pub fn file() -> ClassMapping {
    ClassMapping::embedded("File").field(FieldMapping::primitive("name", Type::String))
}

pub fn post() -> ClassMapping {
    ClassMapping::new("Post")
        .id_field(FieldMapping::primitive("id", Type::Id).storage_name("_id"))
        .field(FieldMapping::primitive("title", Type::String).also_load("oldTitle"))
        .field(FieldMapping::primitive("views", Type::I32))
        .field(FieldMapping::primitive("tags", Type::list(Type::String)))
        .field(FieldMapping::reference_one("author", Reference::new("Author")))
        .field(FieldMapping::reference_one(
            "editor",
            Reference::new("Author").simple(),
        ))
        .field(FieldMapping::reference_many(
            "coauthors",
            Reference::new("Author"),
        ))
        .field(FieldMapping::embed_one("address", Embedded::new("Address")))
        .field(FieldMapping::embed_many("phones", Embedded::new("Phone")))
        .field(FieldMapping::embed_one(
            "attachment",
            Embedded::polymorphic(
                Discriminator::new("type")
                    .map("image", "Image")
                    .map("file", "File"),
            ),
        ))
}

pub fn schema() -> Schema {
    Schema::builder()
        .register(author())
        .register(address())
        .register(phone())
        .register(image())
        .register(file())
        .register(post())
        .build()
        .unwrap()
}

pub fn factory() -> Arc<HydratorFactory> {
    Arc::new(HydratorFactory::builder().build(schema()).unwrap())
}

/// A hydrator wired to fresh recording collaborators.
pub struct Session {
    pub hydrator: Hydrator,
    pub unit_of_work: Rc<RecordingUnitOfWork>,
    pub resolver: Rc<MemoryResolver>,
}

impl Session {
    pub fn new(factory: Arc<HydratorFactory>) -> Self {
        Self::with_resolver(factory, MemoryResolver::default())
    }

    pub fn with_resolver(factory: Arc<HydratorFactory>, resolver: MemoryResolver) -> Self {
        let unit_of_work = Rc::new(RecordingUnitOfWork::default());
        let resolver = Rc::new(resolver);
        let hydrator = Hydrator::new(factory, unit_of_work.clone(), resolver.clone());

        Self {
            hydrator,
            unit_of_work,
            resolver,
        }
    }

    pub fn hydrate(&self, class: &str, data: serde_json::Value) -> Result<(Object, Snapshot)> {
        let mut object = Object::new(class);
        let snapshot = self.hydrator.hydrate(&mut object, &doc(data))?;
        Ok((object, snapshot))
    }
}

pub fn doc(data: serde_json::Value) -> Document {
    Document::from_json(data).unwrap()
}
