//! Tagged wire values
//!
//! These are the already-decoded payloads handed over by the transport layer.
//! A [`Value`] holds exactly one of the supported kinds; graph payloads
//! ([`Vertex`], [`Edge`], [`Path`]) nest further values for ids and properties.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Property bag attached to tags, edges and path steps.
pub type Props = HashMap<String, Value>;

/// Reason a value is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullType {
    Null,
    #[serde(rename = "nan")]
    NaN,
    BadData,
    BadType,
    ErrOverflow,
    UnknownProp,
    DivByZero,
    OutOfRange,
}

impl fmt::Display for NullType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NullType::Null => "__NULL__",
            NullType::NaN => "NaN",
            NullType::BadData => "BAD_DATA",
            NullType::BadType => "BAD_TYPE",
            NullType::ErrOverflow => "ERR_OVERFLOW",
            NullType::UnknownProp => "UNKNOWN_PROP",
            NullType::DivByZero => "DIV_BY_ZERO",
            NullType::OutOfRange => "OUT_OF_RANGE",
        };
        f.write_str(s)
    }
}

/// Calendar date, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Date {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

/// Wall-clock time as stored by the server (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Time {
    pub hour: i8,
    pub minute: i8,
    pub sec: i8,
    pub microsec: i32,
}

/// Date and time as stored by the server (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateTime {
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
    pub minute: i8,
    pub sec: i8,
    pub microsec: i32,
}

/// One named property group of a vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub props: Props,
}

impl Tag {
    pub fn new<K, V>(name: impl Into<String>, props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Tag {
            name: name.into(),
            props: props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Vertex payload: an id plus tags in wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub vid: Value,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Vertex {
    pub fn new(vid: impl Into<Value>, tags: Vec<Tag>) -> Self {
        Vertex {
            vid: vid.into(),
            tags,
        }
    }
}

/// Edge payload. The sign of `edge_type` records traversal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: Value,
    pub dst: Value,
    #[serde(rename = "type")]
    pub edge_type: i32,
    pub name: String,
    #[serde(default)]
    pub ranking: i64,
    #[serde(default)]
    pub props: Props,
}

impl Edge {
    pub fn new(
        src: impl Into<Value>,
        dst: impl Into<Value>,
        edge_type: i32,
        name: impl Into<String>,
        ranking: i64,
    ) -> Self {
        Edge {
            src: src.into(),
            dst: dst.into(),
            edge_type,
            name: name.into(),
            ranking,
            props: Props::new(),
        }
    }

    pub fn with_props<K, V>(mut self, props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.props = props
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

/// One hop of a wire path: destination vertex plus signed edge type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub dst: Vertex,
    #[serde(rename = "type")]
    pub edge_type: i32,
    pub name: String,
    #[serde(default)]
    pub ranking: i64,
    #[serde(default)]
    pub props: Props,
}

impl Step {
    pub fn new(dst: Vertex, edge_type: i32, name: impl Into<String>, ranking: i64) -> Self {
        Step {
            dst,
            edge_type,
            name: name.into(),
            ranking,
            props: Props::new(),
        }
    }

    pub fn with_props<K, V>(mut self, props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.props = props
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

/// Wire path: a start vertex and the ordered steps walked from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub src: Vertex,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Tagged wire value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// No field of the union is set
    #[default]
    Empty,
    Null(NullType),
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(Date),
    Time(Time),
    #[serde(rename = "datetime")]
    DateTime(DateTime),
    Vertex(Box<Vertex>),
    Edge(Box<Edge>),
    Path(Box<Path>),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Set(Vec<Value>),
}

impl Value {
    /// Short name of the kind held, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null(_) => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::Vertex(_) => "vertex",
            Value::Edge(_) => "edge",
            Value::Path(_) => "path",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vertex> for Value {
    fn from(v: Vertex) -> Self {
        Value::Vertex(Box::new(v))
    }
}

impl From<Edge> for Value {
    fn from(v: Edge) -> Self {
        Value::Edge(Box::new(v))
    }
}

impl From<Path> for Value {
    fn from(v: Path) -> Self {
        Value::Path(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}
