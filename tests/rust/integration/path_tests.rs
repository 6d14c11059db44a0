use graphwire::{
    wire::{Edge, Path, Step, Value, Vertex},
    DecodeError, Hop, Node, PathWrapper, Relationship, TimezoneInfo, VertexId,
};

use super::fixtures::{bare, init_logger, response, zigzag_path};

fn ids(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(|n| n.id().to_string()).collect()
}

#[test]
fn test_zigzag_path_segments_follow_edge_direction() {
    init_logger();
    let wrapper = PathWrapper::new(&zigzag_path(), &TimezoneInfo::default()).unwrap();

    assert_eq!(wrapper.length(), 3);
    assert_eq!(ids(wrapper.nodes()), vec!["\"a\"", "\"b\"", "\"c\"", "\"d\""]);
    assert_eq!(wrapper.relationships().len(), wrapper.length());

    let test_cases = vec![(0, "a", "b"), (1, "c", "b"), (2, "c", "d")];
    for (index, start, end) in test_cases {
        let segment = &wrapper.segments()[index];
        assert_eq!(segment.start_node.id(), &VertexId::Str(start.to_string()));
        assert_eq!(segment.end_node.id(), &VertexId::Str(end.to_string()));
        assert_eq!(segment.relationship.src_vertex_id(), segment.start_node.id());
        assert_eq!(segment.relationship.dst_vertex_id(), segment.end_node.id());
        assert!(segment.relationship.edge_type() > 0);
    }

    assert_eq!(wrapper.segments()[1].relationship.ranking(), 2);
    assert_eq!(wrapper.start_node().unwrap().id().as_str(), Some("a"));
    assert_eq!(wrapper.end_node().unwrap().id().as_str(), Some("d"));
}

#[test]
fn test_path_display_marks_reversed_steps() {
    let path = Path {
        src: bare("a"),
        steps: vec![
            Step::new(bare("b"), 1, "e", 0),
            Step::new(bare("c"), -1, "e", 1).with_props([("w", Value::Int(2))]),
        ],
    };
    let wrapper = PathWrapper::new(&path, &TimezoneInfo::default()).unwrap();
    assert_eq!(
        wrapper.to_string(),
        "<(\"a\")-[:e@0 {}]->(\"b\")<-[:e@1 {w: 2}]-(\"c\")>"
    );
}

#[test]
fn test_path_read_from_result_set() {
    let rs = graphwire::ResultSet::new(response(&["p"], vec![vec![Value::from(zigzag_path())]]));
    let value = rs.values_by_col_name("p").unwrap()[0];
    assert!(value.is_path());

    let wrapper = value.as_path().unwrap();
    let bob = Node::new(bare("b"), TimezoneInfo::default()).unwrap();
    assert!(wrapper.contains_node(&bob));

    let reversed = Relationship::new(Edge::new("c", "b", 1, "follow", 2), TimezoneInfo::default()).unwrap();
    assert!(wrapper.contains_relationship(&reversed));

    // the same edge read against its stored direction is a different relationship
    let flipped = Relationship::new(Edge::new("b", "c", -1, "follow", 2), TimezoneInfo::default()).unwrap();
    assert!(!wrapper.contains_relationship(&flipped));
}

#[test]
fn test_disconnected_hops_are_rejected() {
    init_logger();
    let hops = vec![
        Hop::new(bare("a"), Step::new(bare("b"), 1, "e", 0)),
        Hop::new(bare("x"), Step::new(bare("y"), 1, "e", 0)),
    ];
    let err = PathWrapper::from_hops(&hops, &TimezoneInfo::default()).unwrap_err();
    assert_eq!(err, DecodeError::DisconnectedPath { step: 1 });
}

#[test]
fn test_connected_hops_build_a_path() {
    let hops = vec![
        Hop::new(bare("a"), Step::new(bare("b"), 1, "e", 0)),
        // continues from b, walked backwards
        Hop::new(bare("b"), Step::new(bare("c"), -1, "e", 0)),
    ];
    let wrapper = PathWrapper::from_hops(&hops, &TimezoneInfo::default()).unwrap();
    assert_eq!(wrapper.length(), 2);
    assert_eq!(wrapper.segments()[1].start_node.id().as_str(), Some("c"));
    assert_eq!(wrapper.segments()[1].end_node.id().as_str(), Some("b"));

    assert_eq!(
        PathWrapper::from_hops(&[], &TimezoneInfo::default()).unwrap_err(),
        DecodeError::InvalidEntity("path")
    );
}

#[test]
fn test_empty_path_has_no_endpoints() {
    let path = Path {
        src: bare("solo"),
        steps: vec![],
    };
    let wrapper = PathWrapper::new(&path, &TimezoneInfo::default()).unwrap();
    assert_eq!(wrapper.length(), 0);
    assert_eq!(wrapper.nodes().len(), 1);
    assert_eq!(wrapper.start_node().unwrap_err(), DecodeError::EmptyPath);
    assert_eq!(wrapper.end_node().unwrap_err(), DecodeError::EmptyPath);
}

#[test]
fn test_node_identity_depends_on_id_kind() {
    let tz = TimezoneInfo::default();
    let by_string = Node::new(Vertex::new("1", vec![]), tz.clone()).unwrap();
    let by_int = Node::new(Vertex::new(1i64, vec![]), tz.clone()).unwrap();
    assert_ne!(by_string, by_int);
    assert_eq!(by_string.id().to_string(), "\"1\"");
    assert_eq!(by_int.id().to_string(), "1");

    // tags do not take part in identity
    let tagged = Node::new(super::fixtures::person("1", "Ann", 1), tz).unwrap();
    assert_eq!(tagged, by_string);
}

#[test]
fn test_mixed_id_kinds_are_invalid_entities() {
    let tz = TimezoneInfo::default();
    assert_eq!(
        Relationship::new(Edge::new("a", 2i64, 1, "e", 0), tz.clone()).unwrap_err(),
        DecodeError::InvalidEntity("relationship")
    );
    assert_eq!(
        Node::new(Vertex::new(Value::Bool(true), vec![]), tz).unwrap_err(),
        DecodeError::InvalidEntity("node")
    );
}

#[test]
fn test_path_equality() {
    let tz = TimezoneInfo::default();
    let wrapper = PathWrapper::new(&zigzag_path(), &tz).unwrap();
    assert_eq!(wrapper, PathWrapper::new(&zigzag_path(), &tz).unwrap());

    let mut shorter = zigzag_path();
    shorter.steps.pop();
    assert_ne!(wrapper, PathWrapper::new(&shorter, &tz).unwrap());

    let mut reranked = zigzag_path();
    reranked.steps[1].ranking = 5;
    let reranked = PathWrapper::new(&reranked, &tz).unwrap();
    assert_eq!(ids(reranked.nodes()), ids(wrapper.nodes()));
    assert_ne!(wrapper, reranked);
}
