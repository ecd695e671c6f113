use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::sync::OnceLock;
use triplemap::rdf::{rdf_type, RdfFormat, RdfParser, RdfSerializer};
use triplemap::{
    encode, encode_into, encode_struct, resolve_subjects, sub_graph, to_builtin, to_record,
    to_struct, Graph, LinkedData, MappingError, NamedNode, RdfSubject, Schema, StructRecord,
    Triple,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    id: String,
    name: String,
    #[serde(default)]
    friends: Vec<String>,
}

impl LinkedData for Person {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::builder("ex:Person")
                .field("name", "ex:name")
                .repeated_relation("friends", "ex:knows")
                .build()
                .unwrap()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Event {
    #[serde(rename = "ID")]
    id: String,
    ticket: Uuid,
    starts_at: DateTime<Utc>,
    seats: u32,
    price: f64,
    public: bool,
    note: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    poster: Vec<u8>,
}

impl LinkedData for Event {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::builder("ex:Event")
                .field("ticket", "ex:ticket")
                .literal("starts_at", "ex:startsAt", "xsd:dateTime")
                .literal("seats", "ex:seats", "xsd:integer")
                .literal("price", "ex:price", "xsd:double")
                .literal("public", "ex:public", "xsd:boolean")
                .field("note", "rdfs:comment")
                .repeated_literal("tags", "ex:tag", "xsd:string")
                .literal("poster", "ex:poster", "xsd:base64Binary")
                .build()
                .unwrap()
        })
    }
}

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not a record: {}", other),
    }
}

fn subject(iri: &str) -> RdfSubject {
    NamedNode::new(iri).unwrap().into()
}

fn alice() -> Person {
    Person {
        id: "ex:alice".to_string(),
        name: "Alice".to_string(),
        friends: vec!["ex:bob".to_string(), "ex:carol".to_string()],
    }
}

#[test]
fn test_person_example() {
    let rec = record(json!({
        "id": "ex:alice",
        "name": "Alice",
        "friends": ["ex:bob", "ex:carol"]
    }));
    let graph = encode(&rec, Some(Person::schema()), None).unwrap();
    assert_eq!(graph.len(), 4);

    let types = graph.iter().filter(|t| t.predicate == rdf_type()).count();
    let knows = graph
        .iter()
        .filter(|t| t.predicate.as_str() == "ex:knows")
        .filter(|t| t.object.is_named_node())
        .count();
    let names = graph
        .iter()
        .filter(|t| t.predicate.as_str() == "ex:name")
        .filter(|t| t.object.is_literal())
        .count();
    assert_eq!((types, knows, names), (1, 2, 1));

    let decoded = to_builtin(&graph, None, Some(Person::schema())).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(Value::Object(decoded[0].clone()), json!({
        "id": "ex:alice",
        "name": "Alice",
        "friends": ["ex:bob", "ex:carol"]
    }));
}

#[test]
fn test_round_trip_through_sub_graph() {
    let person = alice();
    let mut shared = encode_struct(&person).unwrap();
    encode_into(
        &StructRecord::linked(&Person {
            id: "ex:bob".to_string(),
            name: "Bob".to_string(),
            friends: vec![],
        })
        .unwrap(),
        None,
        &mut shared,
    )
    .unwrap();

    let sub = sub_graph(&shared, "ex:alice").unwrap();
    assert!(sub.iter().all(|t| t.subject == subject("ex:alice")));

    let decoded: Person = to_struct(&sub, "ex:alice", None).unwrap();
    assert_eq!(decoded, person);
}

#[test]
fn test_round_trip_extended_kinds() {
    let event = Event {
        id: "http://example.org/events/1".to_string(),
        ticket: Uuid::new_v4(),
        starts_at: Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap(),
        seats: 120,
        price: 0.1 + 0.2,
        public: true,
        note: None,
        tags: vec!["music".to_string(), "outdoor".to_string()],
        poster: vec![0x89, 0x50, 0x50, 0x00, 0x00, 0xff],
    };

    let graph = encode_struct(&event).unwrap();
    // type, ticket, starts_at, seats, price, public, two tags, poster; note is null
    assert_eq!(graph.len(), 9);

    let mapping = &to_builtin(&graph, Some(event.id.as_str()), Some(Event::schema())).unwrap()[0];
    assert_eq!(mapping["seats"], json!(120));
    assert_eq!(mapping["price"], json!(0.30000000000000004));
    assert_eq!(mapping["poster"], json!([0x89, 0x50, 0x50, 0x00, 0x00, 0xff]));
    assert_eq!(mapping["public"], json!(true));
    assert!(!mapping.contains_key("note"));

    // decoded mappings carry the subject under "id"; the struct reads "ID"
    let mut mapping = mapping.clone();
    let id = mapping.remove("id").unwrap();
    mapping.insert("ID".to_string(), id);
    let decoded: Event = triplemap::codec::convert_to_type(mapping).unwrap();
    assert_eq!(decoded, event);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reading {
    id: String,
    value: f64,
    samples: Vec<f64>,
    raw: Vec<u8>,
}

impl LinkedData for Reading {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::builder("ex:Reading")
                .literal("value", "ex:value", "xsd:double")
                .repeated_literal("samples", "ex:sample", "xsd:decimal")
                .literal("raw", "ex:raw", "xsd:hexBinary")
                .build()
                .unwrap()
        })
    }
}

#[test]
fn test_round_trip_full_precision_and_bytes() {
    let values = [
        12.5,
        0.1 + 0.2,
        std::f64::consts::PI,
        1.0 / 3.0,
        -6.02214076e23,
    ];
    for (i, value) in values.into_iter().enumerate() {
        let reading = Reading {
            id: format!("http://example.org/readings/{}", i),
            value,
            samples: vec![value, value / 7.0],
            raw: vec![1, 1, 2, 0, 0],
        };
        let graph = encode_struct(&reading).unwrap();
        // type, value, two samples, one raw literal
        assert_eq!(graph.len(), 5);

        let decoded: Reading = to_struct(&graph, &reading.id, None).unwrap();
        assert_eq!(decoded, reading);
    }
}

#[test]
fn test_cardinality_violation() {
    let rec = record(json!({"id": "ex:alice", "name": ["Alice", "Ally"], "friends": []}));
    let graph = encode(&rec, Some(Person::schema()), None).unwrap();
    assert_eq!(graph.len(), 3);

    let result = to_builtin(&graph, Some("ex:alice"), Some(Person::schema()));
    assert!(matches!(
        result,
        Err(MappingError::CardinalityViolation { field, .. }) if field == "name"
    ));

    let loose = to_builtin(&graph, Some("ex:alice"), None).unwrap();
    assert_eq!(loose[0]["ex:name"], json!(["Alice", "Ally"]));
}

#[test]
fn test_identifier_precedence() {
    let rec = record(json!({
        "ID": "ex:primary",
        "id": "ex:fallback",
        "name": "Alice",
        "friends": []
    }));
    let graph = encode(&rec, Some(Person::schema()), None).unwrap();
    assert!(graph.has_subject(&subject("ex:primary")));
    assert!(!graph.has_subject(&subject("ex:fallback")));

    let rec = record(json!({"name": "Nobody", "friends": []}));
    let result = encode(&rec, Some(Person::schema()), None);
    assert!(matches!(result, Err(MappingError::IdentifierMissing(_))));
}

#[test]
fn test_resolution_determinism() {
    let mut graph = encode_struct(&alice()).unwrap();
    graph.add(subject("ex:acme"), rdf_type(), NamedNode::new("ex:Company").unwrap());

    let selected = resolve_subjects(&graph, Some(&subject("ex:alice")), Some(Person::schema())).unwrap();
    assert_eq!(selected.into_iter().collect::<Vec<_>>(), vec![subject("ex:alice")]);

    let mistyped = resolve_subjects(&graph, Some(&subject("ex:acme")), Some(Person::schema()));
    assert!(matches!(mistyped, Err(MappingError::TypeMismatch { .. })));

    let missing = resolve_subjects(&graph, Some(&subject("ex:bob")), None);
    assert!(matches!(missing, Err(MappingError::SubjectNotFound(_))));

    let typed = resolve_subjects(&graph, None, None).unwrap();
    assert_eq!(typed.len(), 2);
}

#[test]
fn test_empty_result_is_not_an_error() {
    let graph = encode_struct(&alice()).unwrap();
    let mappings = to_builtin(&graph, None, Some(Event::schema())).unwrap();
    assert!(mappings.is_empty());

    let mappings = to_builtin(&Graph::new(), None, None).unwrap();
    assert!(mappings.is_empty());
}

#[test]
fn test_unmapped_predicate_in_shared_graph() {
    let mut graph = encode_struct(&alice()).unwrap();
    graph.add(
        subject("ex:alice"),
        triplemap::RdfPredicate::new("ex:shoeSize").unwrap(),
        triplemap::Literal::new_simple_literal("38"),
    );

    let result: Result<Person, _> = to_struct(&graph, "ex:alice", None);
    assert!(matches!(
        result,
        Err(MappingError::UnmappedPredicate { predicate, .. }) if predicate == "ex:shoeSize"
    ));
}

#[test]
fn test_encode_into_partial_state() {
    // Validation runs first, so a bad record leaves the graph as it was
    let mut graph = encode_struct(&alice()).unwrap();
    let before = graph.len();
    let bad = record(json!({"id": "ex:dave", "name": "Dave"}));
    let result = encode_into(&bad, Some(Person::schema()), &mut graph);
    assert!(matches!(result, Err(MappingError::MissingField(_))));
    assert_eq!(graph.len(), before);

    let no_schema = encode_into(&bad, None, &mut graph);
    assert!(matches!(no_schema, Err(MappingError::MissingSchema)));
}

#[test]
fn test_turtle_round_trip() {
    let graph = encode_struct(&alice()).unwrap();
    let turtle = RdfSerializer::serialize_graph(&graph, RdfFormat::Turtle).unwrap();
    let parsed = RdfParser::parse_graph(&turtle, RdfFormat::Turtle).unwrap();

    assert_eq!(parsed.len(), graph.len());
    let typed = Triple::new(
        subject("ex:alice"),
        rdf_type(),
        NamedNode::new("ex:Person").unwrap().into(),
    );
    assert!(parsed.contains(&typed));

    let decoded: Person = to_struct(&parsed, "ex:alice", None).unwrap();
    assert_eq!(decoded.name, "Alice");
}

#[test]
fn test_schema_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
entity_type: ex:Person
fields:
  name:
    predicate: ex:name
  friends:
    predicate: ex:knows
    relation: true
    repeatable: true
"#
    )
    .unwrap();

    let schema = Schema::from_yaml_path(file.path()).unwrap();
    assert_eq!(&schema, Person::schema());

    let graph = encode_struct(&alice()).unwrap();
    let decoded: Person = to_record(&graph, "ex:alice", &schema).unwrap();
    assert_eq!(decoded, alice());
}
