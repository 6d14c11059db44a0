//! Graphwire - result decoding for graph database clients
//!
//! This crate turns an already-decoded query response into navigable,
//! strongly-typed results:
//! - Tabular access by row and column name ([`ResultSet`], [`Record`])
//! - Graph entities decoded from vertex / edge / path values
//!   ([`Node`], [`Relationship`], [`PathWrapper`])
//! - Scanning rows into user types ([`Scannable`])
//! - Timezone-aware time and datetime projection
//! - Execution-plan rendering (DOT, row and tck formats)
//!
//! Transport, connection pooling and query building live elsewhere; the
//! input here is an [`ExecutionResponse`] handed over by the transport.

pub mod config;
pub mod errors;
pub mod graph;
pub mod plan_render;
pub mod result_set;
pub mod scan;
pub mod temporal;
pub mod value_wrapper;
pub mod wire;

pub use config::{ConfigError, DecodeConfig};
pub use errors::DecodeError;
pub use graph::{Hop, Node, PathWrapper, Relationship, Segment, VertexId};
pub use plan_render::PlanRow;
pub use result_set::{Record, ResultSet};
pub use scan::{FieldKind, Scannable, ShapeBuilder};
pub use temporal::{DateTimeWrapper, DateWrapper, TimeWrapper, TimezoneInfo};
pub use value_wrapper::ValueWrapper;
pub use wire::{ExecutionResponse, Value};
