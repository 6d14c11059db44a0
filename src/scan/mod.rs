//! Struct scanner
//!
//! Populates user types from result rows. A type describes itself once
//! through [`Scannable`]; the resulting [`ShapeSchema`] is cached
//! process-wide by shape name and shared by every later scan.
//!
//! Scalar fields read the value of their bound column. List fields read a
//! list column whose elements are vertices or edges; each element is
//! flattened into a property map before its own fields are read from it:
//!
//! - vertex: properties of the first tag, plus `_vid` and `_tag_name`
//! - edge: edge properties, plus `_src`, `_dst` and `_name`
//!
//! Bindings to columns (or properties) that are absent leave the field at its
//! default, as do null and empty values.

use dashmap::DashMap;
use lazy_static::lazy_static;
use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

pub mod shape;

pub use shape::{FieldKind, ScalarError, ScanScalar, Scannable, ShapeBuilder, ShapeSchema};

use crate::{
    errors::DecodeError,
    result_set::ResultSet,
    wire::{Row, Value},
};
use shape::Setter;

pub const VID_KEY: &str = "_vid";
pub const TAG_NAME_KEY: &str = "_tag_name";
pub const SRC_KEY: &str = "_src";
pub const DST_KEY: &str = "_dst";
pub const EDGE_NAME_KEY: &str = "_name";

lazy_static! {
    /// Shape name -> `Arc<ShapeSchema<T>>`, never evicted
    static ref SHAPE_CACHE: DashMap<&'static str, Arc<dyn Any + Send + Sync>> = DashMap::new();
}

/// Cached schema of `T`, built on first use.
///
/// Racing first uses may both build the schema; the last insert wins and
/// both results are equivalent.
pub fn shape_schema<T: Scannable>() -> Arc<ShapeSchema<T>> {
    let key = T::shape_name();
    let cached = SHAPE_CACHE.get(key).map(|entry| Arc::clone(entry.value()));
    if let Some(entry) = cached {
        match entry.downcast::<ShapeSchema<T>>() {
            Ok(schema) => return schema,
            Err(_) => log::warn!(
                "shape name '{}' is registered by another type ({}); rebuilding",
                key,
                std::any::type_name::<T>()
            ),
        }
    }

    log::debug!("building scan shape '{}'", key);
    let mut builder = ShapeBuilder::<T>::new();
    T::describe(&mut builder);
    let schema = Arc::new(builder.finish());
    SHAPE_CACHE.insert(key, schema.clone());
    schema
}

/// Scan every row of `result_set` into a `T`.
pub fn scan<T: Scannable>(result_set: &ResultSet) -> Result<Vec<T>, DecodeError> {
    let schema = shape_schema::<T>();
    let columns = result_set.column_names();
    let positions: Vec<Option<usize>> = schema
        .fields
        .iter()
        .map(|binding| columns.iter().position(|c| c == binding.column))
        .collect();

    result_set
        .rows()
        .iter()
        .map(|row| scan_row(&schema, &positions, row))
        .collect()
}

fn scan_row<T: Scannable>(
    schema: &ShapeSchema<T>,
    positions: &[Option<usize>],
    row: &Row,
) -> Result<T, DecodeError> {
    let mut target = T::default();
    for (binding, position) in schema.fields.iter().zip(positions) {
        let Some(index) = *position else {
            continue;
        };
        let value = row.values.get(index).ok_or(DecodeError::IndexOutOfRange {
            index,
            len: row.values.len(),
        })?;

        match &binding.setter {
            Setter::Scalar(_) => binding.set_scalar(&mut target, value)?,
            Setter::List(setter) => match value {
                Value::List(items) => setter(&mut target, items, binding)?,
                Value::Null(_) | Value::Empty => {}
                other => {
                    return Err(DecodeError::ScanTypeMismatch {
                        shape: binding.shape,
                        field: binding.field,
                        expected: "list",
                        actual: other.type_name(),
                    })
                }
            },
        }
    }
    Ok(target)
}

/// Decode the elements of a list column into `U`s.
pub(crate) fn decode_elements<U: Scannable>(
    items: &[Value],
    shape: &'static str,
    column: &'static str,
) -> Result<Vec<U>, DecodeError> {
    let schema = shape_schema::<U>();
    items
        .iter()
        .map(|item| {
            let props = flatten_element(item).ok_or(DecodeError::UnsupportedListElementType {
                shape,
                column,
                actual: item.type_name(),
            })?;
            decode_props(&schema, &props)
        })
        .collect()
}

type FlatProps<'a> = HashMap<&'a str, Cow<'a, Value>>;

fn flatten_element(item: &Value) -> Option<FlatProps<'_>> {
    match item {
        Value::Vertex(vertex) => {
            let mut props = FlatProps::new();
            // Only the first tag is read; further tags are ignored.
            if let Some(tag) = vertex.tags.first() {
                props.extend(tag.props.iter().map(|(k, v)| (k.as_str(), Cow::Borrowed(v))));
                props.insert(TAG_NAME_KEY, Cow::Owned(Value::String(tag.name.clone())));
            }
            props.insert(VID_KEY, Cow::Borrowed(&vertex.vid));
            Some(props)
        }
        Value::Edge(edge) => {
            let mut props: FlatProps<'_> = edge
                .props
                .iter()
                .map(|(k, v)| (k.as_str(), Cow::Borrowed(v)))
                .collect();
            props.insert(SRC_KEY, Cow::Borrowed(&edge.src));
            props.insert(DST_KEY, Cow::Borrowed(&edge.dst));
            props.insert(EDGE_NAME_KEY, Cow::Owned(Value::String(edge.name.clone())));
            Some(props)
        }
        _ => None,
    }
}

fn decode_props<U: Scannable>(schema: &ShapeSchema<U>, props: &FlatProps<'_>) -> Result<U, DecodeError> {
    let mut target = U::default();
    for binding in &schema.fields {
        if let Some(value) = props.get(binding.column) {
            binding.set_scalar(&mut target, value)?;
        }
    }
    Ok(target)
}
