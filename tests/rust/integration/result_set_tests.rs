use graphwire::{
    wire::{ErrorCode, ExecutionResponse, NullType, Value},
    DecodeConfig, DecodeError, ResultSet, TimezoneInfo,
};

use super::fixtures::{follow, init_logger, person, response};

#[test]
fn test_values_by_col_name_and_record_lookup() {
    init_logger();
    let rs = ResultSet::new(response(&["id", "count"], vec![vec![Value::from("a"), Value::Int(5)]]));

    assert_eq!(rs.col_size(), rs.column_names().len());
    for row in rs.rows() {
        assert_eq!(row.values.len(), rs.col_size());
    }

    let counts = rs.values_by_col_name("count").unwrap();
    assert_eq!(counts.iter().map(|v| v.as_int().unwrap()).collect::<Vec<_>>(), vec![5]);

    let record = rs.row_values_by_index(0).unwrap();
    assert_eq!(record.value_by_col_name("id").unwrap().to_string(), "\"a\"");
    assert_eq!(record.value_by_index(1).unwrap().as_int().unwrap(), 5);
    assert_eq!(record.to_string(), "\"a\", 5");
    assert_eq!(
        record.value_by_index(2).unwrap_err(),
        DecodeError::IndexOutOfRange { index: 2, len: 2 }
    );
    assert_eq!(
        record.value_by_col_name("nope").unwrap_err(),
        DecodeError::UnknownColumn("nope".to_string())
    );
}

#[test]
fn test_duplicate_columns_bind_first_occurrence() {
    let rs = ResultSet::new(response(&["x", "x"], vec![vec![Value::Int(1), Value::Int(2)]]));
    assert_eq!(rs.column_index("x"), Some(0));
    assert_eq!(rs.values_by_col_name("x").unwrap()[0].as_int().unwrap(), 1);
    assert_eq!(
        rs.row_values_by_index(0).unwrap().value_by_col_name("x").unwrap().as_int().unwrap(),
        1
    );
}

#[test]
fn test_row_index_out_of_range() {
    let rs = ResultSet::new(response(&["x"], vec![vec![Value::Int(1)], vec![Value::Int(2)]]));
    assert!(rs.row_values_by_index(1).is_ok());
    assert_eq!(
        rs.row_values_by_index(2).unwrap_err(),
        DecodeError::IndexOutOfRange { index: 2, len: 2 }
    );
}

#[test]
fn test_string_table_renders_graph_values() {
    let rs = ResultSet::new(response(
        &["v", "e", "n"],
        vec![vec![
            Value::from(person("p1", "Tom", 3)),
            Value::from(follow("p1", "p2", 90)),
            Value::Null(NullType::Null),
        ]],
    ));
    let table = rs.as_string_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0], vec!["v", "e", "n"]);
    assert_eq!(
        table[1],
        vec![
            "(\"p1\" :Person{age: 3, name: \"Tom\"})",
            "[:follow \"p1\"->\"p2\" @0 {degree: 90}]",
            "__NULL__",
        ]
    );
}

#[test]
fn test_response_metadata() {
    let mut resp = response(&["x"], vec![]);
    resp.comment = Some("deprecated syntax".to_string());
    resp.error_code = ErrorCode::PartialSucceeded;
    let rs = ResultSet::new(resp);

    assert!(rs.is_empty());
    assert!(rs.is_set_data());
    assert!(rs.is_set_comment());
    assert!(rs.is_partial_succeed());
    assert!(!rs.is_succeed());
    assert!(!rs.is_set_plan_desc());
    assert_eq!(rs.comment(), "deprecated syntax");
    assert_eq!(rs.space_name(), "test_space");
    assert_eq!(rs.latency(), 1234);
    assert_eq!(rs.latency_in_ms(), 1);
}

#[test]
fn test_response_loaded_from_json() {
    let resp: ExecutionResponse = serde_json::from_str(
        r#"{
            "error_code": 0,
            "latency_in_us": 10,
            "data": {
                "column_names": ["name", "tags"],
                "rows": [
                    {"values": [{"string": "Tim"}, {"list": [{"int": 1}, {"float": 2.0}]}]}
                ]
            }
        }"#,
    )
    .unwrap();
    let rs = ResultSet::new(resp);
    assert!(rs.is_succeed());
    let tags = rs.values_by_col_name("tags").unwrap();
    assert_eq!(tags[0].to_string(), "[1, 2.0]");
    assert_eq!(tags[0].as_list().unwrap().len(), 2);
}

#[test]
fn test_configured_timezone_reaches_values() {
    let config = DecodeConfig {
        timezone_offset: 8 * 3600,
        timezone_name: "+08:00".to_string(),
    };
    let time = Value::Time(graphwire::wire::Time {
        hour: 20,
        minute: 0,
        sec: 0,
        microsec: 0,
    });
    let rs = ResultSet::with_config(response(&["t"], vec![vec![time]]), &config);
    assert_eq!(rs.timezone_info(), &TimezoneInfo::new(28800, "+08:00"));

    let t = rs.values_by_col_name("t").unwrap()[0].as_time().unwrap();
    let local = t.local_time().unwrap();
    assert_eq!((local.hour, local.minute), (4, 0));
    assert_eq!(rs.as_string_table()[1][0], "04:00:00.000000");
}
