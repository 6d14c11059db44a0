use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::VertexId;
use crate::{
    errors::DecodeError,
    temporal::TimezoneInfo,
    value_wrapper::{write_props, write_value, ValueWrapper},
    wire::{Props, Value, Vertex},
};

/// Decoded vertex.
///
/// Tags keep wire order and are not deduplicated; when a tag name repeats,
/// lookups by name resolve to its last occurrence.
#[derive(Debug, Clone)]
pub struct Node {
    id: VertexId,
    vertex: Vertex,
    tags: Vec<String>,
    tag_name_index: HashMap<String, usize>,
    timezone_info: TimezoneInfo,
}

impl Node {
    pub fn new(vertex: Vertex, timezone_info: TimezoneInfo) -> Result<Self, DecodeError> {
        let id = VertexId::try_from(&vertex.vid).map_err(|_| DecodeError::InvalidEntity("node"))?;

        let mut tags = Vec::with_capacity(vertex.tags.len());
        let mut tag_name_index = HashMap::new();
        for (idx, tag) in vertex.tags.iter().enumerate() {
            tags.push(tag.name.clone());
            tag_name_index.insert(tag.name.clone(), idx);
        }

        Ok(Node {
            id,
            vertex,
            tags,
            tag_name_index,
            timezone_info,
        })
    }

    pub fn try_from_value(value: &Value, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        match value {
            Value::Vertex(vertex) => Node::new(vertex.as_ref().clone(), timezone_info.clone()),
            _ => Err(DecodeError::InvalidEntity("node")),
        }
    }

    pub fn id(&self) -> &VertexId {
        &self.id
    }

    /// The vid exactly as received
    pub fn raw_id(&self) -> &Value {
        &self.vertex.vid
    }

    pub fn raw_vertex(&self) -> &Vertex {
        &self.vertex
    }

    /// Tag names in wire order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag_name: &str) -> bool {
        self.tag_name_index.contains_key(tag_name)
    }

    fn tag_props(&self, tag_name: &str) -> Result<&Props, DecodeError> {
        self.tag_name_index
            .get(tag_name)
            .and_then(|&idx| self.vertex.tags.get(idx))
            .map(|tag| &tag.props)
            .ok_or_else(|| DecodeError::UnknownTag(tag_name.to_string()))
    }

    pub fn properties(&self, tag_name: &str) -> Result<HashMap<&str, ValueWrapper<'_>>, DecodeError> {
        let props = self.tag_props(tag_name)?;
        Ok(props
            .iter()
            .map(|(k, v)| (k.as_str(), ValueWrapper::new(v, &self.timezone_info)))
            .collect())
    }

    /// Property names of a tag, sorted
    pub fn keys(&self, tag_name: &str) -> Result<Vec<&str>, DecodeError> {
        let mut keys: Vec<&str> = self.tag_props(tag_name)?.keys().map(String::as_str).collect();
        keys.sort_unstable();
        Ok(keys)
    }

    /// Property values of a tag, in the order of [`Node::keys`]
    pub fn values(&self, tag_name: &str) -> Result<Vec<ValueWrapper<'_>>, DecodeError> {
        let props = self.tag_props(tag_name)?;
        let mut entries: Vec<(&String, &Value)> = props.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        Ok(entries
            .into_iter()
            .map(|(_, v)| ValueWrapper::new(v, &self.timezone_info))
            .collect())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// `("vid" :tag1{k0: v0, k1: v1} :tag2{})`, or `("vid")` without tags.
pub(crate) fn write_vertex(
    f: &mut fmt::Formatter<'_>,
    vertex: &Vertex,
    tz: &TimezoneInfo,
) -> fmt::Result {
    f.write_str("(")?;
    write_value(f, &vertex.vid, tz)?;
    for tag in &vertex.tags {
        write!(f, " :{}", tag.name)?;
        write_props(f, &tag.props, tz)?;
    }
    f.write_str(")")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vertex(f, &self.vertex, &self.timezone_info)
    }
}
