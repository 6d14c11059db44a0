//! Graph entity model
//!
//! Decoded views over vertex, edge and path wire values:
//!
//! - [`Node`]: a vertex with its tag index
//! - [`Relationship`]: an edge whose type sign records traversal direction
//! - [`PathWrapper`]: a reconstructed walk (nodes, relationships, segments)
//!
//! Vertex identity is a [`VertexId`], either a string or a 64-bit integer.
//! Ids of different kinds never compare equal, even when they render alike.

use std::fmt;

use crate::{errors::DecodeError, wire::Value};

pub mod node;
pub mod path;
pub mod relationship;

pub use node::Node;
pub use path::{Hop, PathWrapper, Segment};
pub use relationship::Relationship;

/// Vertex identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexId {
    Str(String),
    Int(i64),
}

impl VertexId {
    /// True when both ids use the same representation.
    pub fn same_kind(&self, other: &VertexId) -> bool {
        matches!(
            (self, other),
            (VertexId::Str(_), VertexId::Str(_)) | (VertexId::Int(_), VertexId::Int(_))
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VertexId::Str(s) => Some(s),
            VertexId::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            VertexId::Int(i) => Some(*i),
            VertexId::Str(_) => None,
        }
    }
}

impl TryFrom<&Value> for VertexId {
    type Error = DecodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(VertexId::Str(s.clone())),
            Value::Int(i) => Ok(VertexId::Int(*i)),
            _ => Err(DecodeError::InvalidEntity("vertex id")),
        }
    }
}

impl From<VertexId> for Value {
    fn from(id: VertexId) -> Self {
        match id {
            VertexId::Str(s) => Value::String(s),
            VertexId::Int(i) => Value::Int(i),
        }
    }
}

/// Quoted for strings, bare for integers.
impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexId::Str(s) => write!(f, "\"{}\"", s),
            VertexId::Int(i) => write!(f, "{}", i),
        }
    }
}
