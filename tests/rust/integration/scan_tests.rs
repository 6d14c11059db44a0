use graphwire::{
    scan::shape_schema,
    wire::{Edge, NullType, Tag, Value, Vertex},
    DecodeError, FieldKind, ResultSet, Scannable, ShapeBuilder,
};

use super::fixtures::{follow, init_logger, person, response};

#[derive(Debug, Default, PartialEq)]
struct Person {
    vid: String,
    tag: String,
    name: String,
    age: i32,
}

impl Scannable for Person {
    fn describe(shape: &mut ShapeBuilder<Self>) {
        shape
            .field("vid", "_vid", |p| &mut p.vid)
            .field("tag", "_tag_name", |p| &mut p.tag)
            .field("name", "name", |p| &mut p.name)
            .field("age", "age", |p| &mut p.age);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Follow {
    src: String,
    dst: String,
    name: String,
    degree: i64,
}

impl Scannable for Follow {
    fn describe(shape: &mut ShapeBuilder<Self>) {
        shape
            .field("src", "_src", |f| &mut f.src)
            .field("dst", "_dst", |f| &mut f.dst)
            .field("name", "_name", |f| &mut f.name)
            .field("degree", "degree", |f| &mut f.degree);
    }
}

#[derive(Debug, Default)]
struct Neighborhood {
    count: i64,
    ratio: f64,
    active: bool,
    people: Vec<Person>,
    edges: Vec<Box<Follow>>,
    missing: String,
}

impl Scannable for Neighborhood {
    fn describe(shape: &mut ShapeBuilder<Self>) {
        shape
            .field("count", "count", |n| &mut n.count)
            .field("ratio", "ratio", |n| &mut n.ratio)
            .field("active", "active", |n| &mut n.active)
            .list("people", "people", |n| &mut n.people)
            .boxed_list("edges", "edges", |n| &mut n.edges)
            .field("missing", "not_a_column", |n| &mut n.missing);
    }
}

#[test]
fn test_scan_rows_with_vertex_and_edge_lists() {
    init_logger();
    let rs = ResultSet::new(response(
        &["count", "ratio", "active", "people", "edges"],
        vec![vec![
            Value::Int(2),
            Value::Float(0.5),
            Value::Bool(true),
            Value::List(vec![Value::from(person("p1", "John", 30))]),
            Value::List(vec![Value::from(follow("p1", "p2", 80))]),
        ]],
    ));

    let rows: Vec<Neighborhood> = rs.scan().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.count, 2);
    assert_eq!(row.ratio, 0.5);
    assert!(row.active);
    assert_eq!(row.missing, "");
    assert_eq!(
        row.people,
        vec![Person {
            vid: "p1".to_string(),
            tag: "Person".to_string(),
            name: "John".to_string(),
            age: 30,
        }]
    );
    assert_eq!(
        *row.edges[0],
        Follow {
            src: "p1".to_string(),
            dst: "p2".to_string(),
            name: "follow".to_string(),
            degree: 80,
        }
    );
}

#[test]
fn test_nulls_and_absent_properties_leave_defaults() {
    let tagless = Vertex::new("p9", vec![]);
    let rs = ResultSet::new(response(
        &["count", "people"],
        vec![
            vec![Value::Null(NullType::Null), Value::List(vec![Value::from(tagless)])],
            vec![Value::Int(4), Value::Null(NullType::Null)],
        ],
    ));

    let rows: Vec<Neighborhood> = rs.scan().unwrap();
    assert_eq!(rows[0].count, 0);
    assert_eq!(
        rows[0].people,
        vec![Person {
            vid: "p9".to_string(),
            ..Default::default()
        }]
    );
    assert_eq!(rows[1].count, 4);
    assert!(rows[1].people.is_empty());
}

#[test]
fn test_only_first_tag_is_read() {
    let vertex = Vertex::new(
        "p1",
        vec![
            Tag::new("Person", [("name", Value::from("John"))]),
            Tag::new("Employee", [("name", Value::from("J. Smith"))]),
        ],
    );
    let rs = ResultSet::new(response(&["people"], vec![vec![Value::List(vec![Value::from(vertex)])]]));
    let rows: Vec<Neighborhood> = rs.scan().unwrap();
    assert_eq!(rows[0].people[0].name, "John");
    assert_eq!(rows[0].people[0].tag, "Person");
}

#[test]
fn test_scan_errors() {
    let test_cases = vec![
        (
            response(&["count"], vec![vec![Value::from("two")]]),
            "count",
            "ScanTypeMismatch",
        ),
        (
            response(&["people"], vec![vec![Value::Int(1)]]),
            "people",
            "ScanTypeMismatch",
        ),
        (
            response(&["people"], vec![vec![Value::List(vec![Value::Int(1)])]]),
            "people",
            "UnsupportedListElementType",
        ),
    ];

    for (resp, column, expected) in test_cases {
        let err = ResultSet::new(resp).scan::<Neighborhood>().unwrap_err();
        let variant = match &err {
            DecodeError::ScanTypeMismatch { field, .. } => {
                assert_eq!(*field, column);
                "ScanTypeMismatch"
            }
            DecodeError::UnsupportedListElementType { column: c, actual, .. } => {
                assert_eq!(*c, column);
                assert_eq!(*actual, "int");
                "UnsupportedListElementType"
            }
            other => panic!("unexpected error for column {}: {:?}", column, other),
        };
        assert_eq!(variant, expected);
    }
}

#[derive(Debug, Default)]
struct Narrow {
    small: i8,
    unsigned: u32,
}

impl Scannable for Narrow {
    fn describe(shape: &mut ShapeBuilder<Self>) {
        shape
            .field("small", "small", |n| &mut n.small)
            .field("unsigned", "unsigned", |n| &mut n.unsigned);
    }
}

#[test]
fn test_narrow_and_unsupported_fields() {
    let fits = ResultSet::new(response(&["small", "unsigned"], vec![vec![Value::Int(-128), Value::Empty]]));
    let rows: Vec<Narrow> = fits.scan().unwrap();
    assert_eq!(rows[0].small, -128);
    assert_eq!(rows[0].unsigned, 0);

    let overflow = ResultSet::new(response(&["small"], vec![vec![Value::Int(300)]]));
    assert!(matches!(
        overflow.scan::<Narrow>().unwrap_err(),
        DecodeError::IntegerOverflow { field: "small", value: 300, .. }
    ));

    let unsigned = ResultSet::new(response(&["unsigned"], vec![vec![Value::Int(1)]]));
    assert!(matches!(
        unsigned.scan::<Narrow>().unwrap_err(),
        DecodeError::UnsupportedFieldType { field: "unsigned", kind: "unsigned", .. }
    ));
}

#[test]
fn test_schema_lists_bindings_in_declaration_order() {
    let schema = shape_schema::<Neighborhood>();
    assert!(schema.name().ends_with("Neighborhood"));
    let kinds: Vec<FieldKind> = schema.columns().into_iter().map(|(_, _, kind)| kind).collect();
    assert_eq!(
        kinds,
        vec![
            FieldKind::Int64,
            FieldKind::Float64,
            FieldKind::Bool,
            FieldKind::List,
            FieldKind::List,
            FieldKind::String,
        ]
    );
}

#[test]
fn test_edge_elements_keep_stored_endpoints() {
    let reversed = Edge::new("p2", "p1", -1, "follow", 0);
    let rs = ResultSet::new(response(&["edges"], vec![vec![Value::List(vec![Value::from(reversed)])]]));
    let rows: Vec<Neighborhood> = rs.scan().unwrap();
    assert_eq!(rows[0].edges[0].src, "p2");
    assert_eq!(rows[0].edges[0].dst, "p1");
}

/// Scanned only by the concurrent test, so its shape starts out uncached.
#[derive(Debug, Default, PartialEq)]
struct Roster {
    count: i64,
    people: Vec<Person>,
}

impl Scannable for Roster {
    fn describe(shape: &mut ShapeBuilder<Self>) {
        shape
            .field("count", "count", |r| &mut r.count)
            .list("people", "people", |r| &mut r.people);
    }
}

#[test]
fn test_concurrent_scans_share_one_shape() {
    let rs = ResultSet::new(response(
        &["count", "people"],
        vec![
            vec![Value::Int(1), Value::List(vec![Value::from(person("p1", "John", 30))])],
            vec![Value::Int(0), Value::List(vec![])],
        ],
    ));

    let results: Vec<Vec<Roster>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| rs.scan::<Roster>().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for rows in &results[1..] {
        assert_eq!(rows, &results[0]);
    }
    assert_eq!(results[0][0].people[0].name, "John");
    assert!(results[0][1].people.is_empty());

    let schema = shape_schema::<Roster>();
    assert!(std::sync::Arc::ptr_eq(&schema, &shape_schema::<Roster>()));
    assert_eq!(
        schema.columns(),
        vec![
            ("count", "count", FieldKind::Int64),
            ("people", "people", FieldKind::List),
        ]
    );
}
