//! Path reconstruction
//!
//! A wire path is a start vertex plus steps. Each step names only its
//! destination; its source is the previous step's destination (the "chain
//! head"). The sign of the step type says whether the edge was walked along
//! its stored direction or against it, so each step is normalised into a
//! canonical relationship with a positive type before being stored.
//!
//! Adjacent segments must share an endpoint. For wire paths that always holds
//! by construction; [`PathWrapper::from_hops`] accepts explicitly sourced hops
//! and is where a broken chain is actually caught.

use std::fmt;

use super::{node::write_vertex, Node, Relationship};
use crate::{
    errors::DecodeError,
    temporal::TimezoneInfo,
    value_wrapper::write_props,
    wire::{Edge, Path, Step, Value, Vertex},
};

/// One hop with an explicit source vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub from: Vertex,
    pub step: Step,
}

impl Hop {
    pub fn new(from: Vertex, step: Step) -> Self {
        Hop { from, step }
    }
}

/// Start node, canonical relationship and end node of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_node: Node,
    pub relationship: Relationship,
    pub end_node: Node,
}

impl Segment {
    fn shares_endpoint_with(&self, start: &Node, end: &Node) -> bool {
        let prev = [self.start_node.id().to_string(), self.end_node.id().to_string()];
        let next = [start.id().to_string(), end.id().to_string()];
        prev.iter().any(|p| next.contains(p))
    }
}

#[derive(Debug, Clone)]
pub struct PathWrapper {
    path: Path,
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
    segments: Vec<Segment>,
    timezone_info: TimezoneInfo,
}

impl PathWrapper {
    /// Reconstruct a wire path.
    pub fn new(path: &Path, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        let walk = path.steps.iter().map(|step| (None::<&Vertex>, step));
        PathWrapper::build(&path.src, walk, path.clone(), timezone_info)
    }

    pub fn try_from_value(value: &Value, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        match value {
            Value::Path(path) => PathWrapper::new(path, timezone_info),
            _ => Err(DecodeError::InvalidEntity("path")),
        }
    }

    /// Assemble a path from hops that each carry their own source vertex.
    ///
    /// Fails with `DisconnectedPath` when a hop shares no endpoint with the
    /// previous one.
    pub fn from_hops(hops: &[Hop], timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        let first = hops.first().ok_or(DecodeError::InvalidEntity("path"))?;
        let path = Path {
            src: first.from.clone(),
            steps: hops.iter().map(|hop| hop.step.clone()).collect(),
        };
        let walk = hops.iter().map(|hop| (Some(&hop.from), &hop.step));
        PathWrapper::build(&first.from, walk, path, timezone_info)
    }

    fn build<'h, I>(
        start: &Vertex,
        walk: I,
        path: Path,
        timezone_info: &TimezoneInfo,
    ) -> Result<Self, DecodeError>
    where
        I: Iterator<Item = (Option<&'h Vertex>, &'h Step)>,
    {
        let mut head = Node::new(start.clone(), timezone_info.clone())?;
        let mut nodes = vec![head.clone()];
        let mut relationships = Vec::new();
        let mut segments: Vec<Segment> = Vec::new();

        for (index, (from, step)) in walk.enumerate() {
            if let Some(from) = from {
                head = Node::new(from.clone(), timezone_info.clone())?;
            }
            let dst = Node::new(step.dst.clone(), timezone_info.clone())?;
            nodes.push(dst.clone());

            let (start_node, end_node, edge_type) = if step.edge_type > 0 {
                (head, dst.clone(), step.edge_type)
            } else {
                (dst.clone(), head, step.edge_type.saturating_neg())
            };
            log::trace!(
                "path step {}: {} -[{}]-> {} (wire type {})",
                index,
                start_node.id(),
                step.name,
                end_node.id(),
                step.edge_type
            );

            let edge = Edge {
                src: start_node.raw_id().clone(),
                dst: end_node.raw_id().clone(),
                edge_type,
                name: step.name.clone(),
                ranking: step.ranking,
                props: step.props.clone(),
            };
            let relationship = Relationship::new(edge, timezone_info.clone())?;

            if let Some(prev) = segments.last() {
                if !prev.shares_endpoint_with(&start_node, &end_node) {
                    log::debug!(
                        "path step {} ({} -> {}) does not continue the previous segment",
                        index,
                        start_node.id(),
                        end_node.id()
                    );
                    return Err(DecodeError::DisconnectedPath { step: index });
                }
            }

            relationships.push(relationship.clone());
            segments.push(Segment {
                start_node,
                relationship,
                end_node,
            });
            head = dst;
        }

        Ok(PathWrapper {
            path,
            nodes,
            relationships,
            segments,
            timezone_info: timezone_info.clone(),
        })
    }

    /// Number of segments
    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn raw_path(&self) -> &Path {
        &self.path
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    pub fn contains_relationship(&self, relationship: &Relationship) -> bool {
        self.relationships.iter().any(|r| r == relationship)
    }

    pub fn start_node(&self) -> Result<&Node, DecodeError> {
        self.segments
            .first()
            .map(|seg| &seg.start_node)
            .ok_or(DecodeError::EmptyPath)
    }

    pub fn end_node(&self) -> Result<&Node, DecodeError> {
        self.segments
            .last()
            .map(|seg| &seg.end_node)
            .ok_or(DecodeError::EmptyPath)
    }
}

impl PartialEq for PathWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.relationships == other.relationships
            && self.segments == other.segments
    }
}

/// `<("a")-[:e@0 {}]->("b")<-[:e@0 {}]-("c")>`
pub(crate) fn write_path(f: &mut fmt::Formatter<'_>, path: &Path, tz: &TimezoneInfo) -> fmt::Result {
    f.write_str("<")?;
    write_vertex(f, &path.src, tz)?;
    for step in &path.steps {
        let (left, right) = if step.edge_type > 0 { ("-", "->") } else { ("<-", "-") };
        write!(f, "{}[:{}@{} ", left, step.name, step.ranking)?;
        write_props(f, &step.props, tz)?;
        write!(f, "]{}", right)?;
        write_vertex(f, &step.dst, tz)?;
    }
    f.write_str(">")
}

impl fmt::Display for PathWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_path(f, &self.path, &self.timezone_info)
    }
}
