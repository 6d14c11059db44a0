use std::collections::HashMap;
use std::fmt;

use super::VertexId;
use crate::{
    errors::DecodeError,
    temporal::TimezoneInfo,
    value_wrapper::{write_props, write_value, ValueWrapper},
    wire::{Edge, Value},
};

/// Decoded edge.
///
/// A non-positive edge type marks the edge as traversed against its stored
/// direction; the direction-resolved accessors swap src and dst in that case.
#[derive(Debug, Clone)]
pub struct Relationship {
    edge: Edge,
    src: VertexId,
    dst: VertexId,
    timezone_info: TimezoneInfo,
}

impl Relationship {
    pub fn new(edge: Edge, timezone_info: TimezoneInfo) -> Result<Self, DecodeError> {
        let invalid = |_| DecodeError::InvalidEntity("relationship");
        let src = VertexId::try_from(&edge.src).map_err(invalid)?;
        let dst = VertexId::try_from(&edge.dst).map_err(invalid)?;
        if !src.same_kind(&dst) {
            return Err(DecodeError::InvalidEntity("relationship"));
        }
        Ok(Relationship {
            edge,
            src,
            dst,
            timezone_info,
        })
    }

    pub fn try_from_value(value: &Value, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        match value {
            Value::Edge(edge) => Relationship::new(edge.as_ref().clone(), timezone_info.clone()),
            _ => Err(DecodeError::InvalidEntity("relationship")),
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.edge.edge_type <= 0
    }

    /// Source id as traversed
    pub fn src_vertex_id(&self) -> &VertexId {
        if self.is_reversed() {
            &self.dst
        } else {
            &self.src
        }
    }

    /// Destination id as traversed
    pub fn dst_vertex_id(&self) -> &VertexId {
        if self.is_reversed() {
            &self.src
        } else {
            &self.dst
        }
    }

    pub fn edge_type(&self) -> i32 {
        self.edge.edge_type
    }

    pub fn edge_name(&self) -> &str {
        &self.edge.name
    }

    pub fn ranking(&self) -> i64 {
        self.edge.ranking
    }

    pub fn raw_edge(&self) -> &Edge {
        &self.edge
    }

    pub fn properties(&self) -> HashMap<&str, ValueWrapper<'_>> {
        self.edge
            .props
            .iter()
            .map(|(k, v)| (k.as_str(), ValueWrapper::new(v, &self.timezone_info)))
            .collect()
    }

    /// Property names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.edge.props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Property values in the order of [`Relationship::keys`]
    pub fn values(&self) -> Vec<ValueWrapper<'_>> {
        self.keys()
            .into_iter()
            .filter_map(|k| self.edge.props.get(k))
            .map(|v| ValueWrapper::new(v, &self.timezone_info))
            .collect()
    }
}

/// Compares the stored (not direction-resolved) endpoints, name and ranking.
/// Ids of different kinds never compare equal.
impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src
            && self.dst == other.dst
            && self.edge.name == other.edge.name
            && self.edge.ranking == other.edge.ranking
    }
}

/// `[:name src->dst @ranking {k: v}]`
pub(crate) fn write_edge(f: &mut fmt::Formatter<'_>, edge: &Edge, tz: &TimezoneInfo) -> fmt::Result {
    let (src, dst) = if edge.edge_type > 0 {
        (&edge.src, &edge.dst)
    } else {
        (&edge.dst, &edge.src)
    };
    write!(f, "[:{} ", edge.name)?;
    write_value(f, src, tz)?;
    f.write_str("->")?;
    write_value(f, dst, tz)?;
    write!(f, " @{} ", edge.ranking)?;
    write_props(f, &edge.props, tz)?;
    f.write_str("]")
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_edge(f, &self.edge, &self.timezone_info)
    }
}
