//! Typed read-only view over one wire value
//!
//! [`ValueWrapper`] pairs a borrowed [`Value`] with the timezone context of
//! the result it came from, and exposes kind predicates, typed getters and the
//! canonical string rendering used throughout the crate.

use std::collections::HashMap;
use std::fmt;

use crate::{
    errors::DecodeError,
    graph::{node, path, relationship, Node, PathWrapper, Relationship},
    temporal::{DateTimeWrapper, DateWrapper, TimeWrapper, TimezoneInfo},
    wire::{NullType, Value},
};

#[derive(Debug, Clone, Copy)]
pub struct ValueWrapper<'a> {
    value: &'a Value,
    timezone_info: &'a TimezoneInfo,
}

impl<'a> ValueWrapper<'a> {
    pub fn new(value: &'a Value, timezone_info: &'a TimezoneInfo) -> Self {
        ValueWrapper {
            value,
            timezone_info,
        }
    }

    /// The wrapped wire value
    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn timezone_info(&self) -> &'a TimezoneInfo {
        self.timezone_info
    }

    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.value, Value::Empty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self.value, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.value, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self.value, Value::Date(_))
    }

    pub fn is_time(&self) -> bool {
        matches!(self.value, Value::Time(_))
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self.value, Value::DateTime(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, Value::List(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self.value, Value::Set(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.value, Value::Map(_))
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self.value, Value::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.value, Value::Edge(_))
    }

    pub fn is_path(&self) -> bool {
        matches!(self.value, Value::Path(_))
    }

    fn mismatch(&self, expected: &'static str) -> DecodeError {
        DecodeError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    fn wrap(&self, value: &'a Value) -> ValueWrapper<'a> {
        ValueWrapper::new(value, self.timezone_info)
    }

    pub fn as_null(&self) -> Result<NullType, DecodeError> {
        match self.value {
            Value::Null(n) => Ok(*n),
            _ => Err(self.mismatch("null")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, DecodeError> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_int(&self) -> Result<i64, DecodeError> {
        match self.value {
            Value::Int(i) => Ok(*i),
            _ => Err(self.mismatch("int")),
        }
    }

    pub fn as_float(&self) -> Result<f64, DecodeError> {
        match self.value {
            Value::Float(f) => Ok(*f),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_string(&self) -> Result<&'a str, DecodeError> {
        match self.value {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_list(&self) -> Result<Vec<ValueWrapper<'a>>, DecodeError> {
        match self.value {
            Value::List(items) => Ok(items.iter().map(|v| self.wrap(v)).collect()),
            _ => Err(self.mismatch("list")),
        }
    }

    /// Elements of a set value
    pub fn as_dedup_list(&self) -> Result<Vec<ValueWrapper<'a>>, DecodeError> {
        match self.value {
            Value::Set(items) => Ok(items.iter().map(|v| self.wrap(v)).collect()),
            _ => Err(self.mismatch("set")),
        }
    }

    pub fn as_map(&self) -> Result<HashMap<&'a str, ValueWrapper<'a>>, DecodeError> {
        match self.value {
            Value::Map(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.as_str(), self.wrap(v)))
                .collect()),
            _ => Err(self.mismatch("map")),
        }
    }

    pub fn as_node(&self) -> Result<Node, DecodeError> {
        match self.value {
            Value::Vertex(vertex) => Node::new(vertex.as_ref().clone(), self.timezone_info.clone()),
            _ => Err(self.mismatch("vertex")),
        }
    }

    pub fn as_relationship(&self) -> Result<Relationship, DecodeError> {
        match self.value {
            Value::Edge(edge) => {
                Relationship::new(edge.as_ref().clone(), self.timezone_info.clone())
            }
            _ => Err(self.mismatch("edge")),
        }
    }

    pub fn as_path(&self) -> Result<PathWrapper, DecodeError> {
        match self.value {
            Value::Path(p) => PathWrapper::new(p, self.timezone_info),
            _ => Err(self.mismatch("path")),
        }
    }

    pub fn as_date(&self) -> Result<DateWrapper, DecodeError> {
        match self.value {
            Value::Date(d) => Ok(DateWrapper::new(*d)),
            _ => Err(self.mismatch("date")),
        }
    }

    pub fn as_time(&self) -> Result<TimeWrapper, DecodeError> {
        match self.value {
            Value::Time(t) => Ok(TimeWrapper::new(*t, self.timezone_info.clone())),
            _ => Err(self.mismatch("time")),
        }
    }

    pub fn as_datetime(&self) -> Result<DateTimeWrapper, DecodeError> {
        match self.value {
            Value::DateTime(dt) => Ok(DateTimeWrapper::new(*dt, self.timezone_info.clone())),
            _ => Err(self.mismatch("datetime")),
        }
    }
}

impl PartialEq for ValueWrapper<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Canonical rendering of a value.
///
/// Strings are quoted, floats always carry a decimal point, temporal values
/// are shown in the attached timezone and map keys are sorted.
pub(crate) fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    tz: &TimezoneInfo,
) -> fmt::Result {
    match value {
        Value::Empty => Ok(()),
        Value::Null(n) => write!(f, "{}", n),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Int(i) => write!(f, "{}", i),
        Value::Float(v) => {
            let s = v.to_string();
            if v.is_finite() && !s.contains('.') {
                write!(f, "{}.0", s)
            } else {
                f.write_str(&s)
            }
        }
        Value::String(s) => write!(f, "\"{}\"", s),
        Value::Date(d) => write!(f, "{:04}-{:02}-{:02}", d.year, d.month, d.day),
        Value::Time(t) => {
            let wrapper = TimeWrapper::new(*t, tz.clone());
            let local = wrapper.local_time().unwrap_or(*t);
            write!(
                f,
                "{:02}:{:02}:{:02}.{:06}",
                local.hour, local.minute, local.sec, local.microsec
            )
        }
        Value::DateTime(dt) => {
            let wrapper = DateTimeWrapper::new(*dt, tz.clone());
            let local = wrapper.local_datetime().unwrap_or(*dt);
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
                local.year, local.month, local.day, local.hour, local.minute, local.sec, local.microsec
            )
        }
        Value::Vertex(vertex) => node::write_vertex(f, vertex, tz),
        Value::Edge(edge) => relationship::write_edge(f, edge, tz),
        Value::Path(p) => path::write_path(f, p, tz),
        Value::List(items) | Value::Set(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, tz)?;
            }
            f.write_str("]")
        }
        Value::Map(map) => write_props(f, map, tz),
    }
}

/// `{k0: v0, k1: v1}` with keys sorted.
pub(crate) fn write_props(
    f: &mut fmt::Formatter<'_>,
    props: &HashMap<String, Value>,
    tz: &TimezoneInfo,
) -> fmt::Result {
    let mut keys: Vec<&String> = props.keys().collect();
    keys.sort();
    f.write_str("{")?;
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: ", key)?;
        write_value(f, &props[key], tz)?;
    }
    f.write_str("}")
}

impl fmt::Display for ValueWrapper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value, self.timezone_info)
    }
}
