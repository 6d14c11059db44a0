//! Shared response builders for integration tests

use graphwire::wire::{DataSet, Edge, ExecutionResponse, Path, Row, Step, Tag, Value, Vertex};

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn response(columns: &[&str], rows: Vec<Vec<Value>>) -> ExecutionResponse {
    ExecutionResponse {
        data: Some(DataSet {
            column_names: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows.into_iter().map(Row::new).collect(),
        }),
        space_name: Some("test_space".to_string()),
        latency_in_us: 1234,
        ..Default::default()
    }
}

pub fn person(vid: &str, name: &str, age: i64) -> Vertex {
    Vertex::new(
        vid,
        vec![Tag::new(
            "Person",
            [("name", Value::from(name)), ("age", Value::Int(age))],
        )],
    )
}

pub fn bare(vid: &str) -> Vertex {
    Vertex::new(vid, vec![])
}

pub fn follow(src: &str, dst: &str, degree: i64) -> Edge {
    Edge::new(src, dst, 1, "follow", 0).with_props([("degree", Value::Int(degree))])
}

/// a -> b <- c -> d, alternating step directions
pub fn zigzag_path() -> Path {
    Path {
        src: person("a", "Alice", 30),
        steps: vec![
            Step::new(person("b", "Bob", 25), 1, "follow", 0),
            Step::new(person("c", "Carol", 41), -1, "follow", 2),
            Step::new(person("d", "Dave", 19), 1, "follow", 0).with_props([("degree", Value::Int(7))]),
        ],
    }
}
