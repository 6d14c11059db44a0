//! Wire model
//!
//! Plain data types for an already-decoded query response. The transport
//! layer produces them; this crate only reads them.

pub mod plan;
pub mod response;
pub mod value;

pub use plan::{Pair, PlanDescription, PlanNodeBranchInfo, PlanNodeDescription, ProfilingStats};
pub use response::{DataSet, ErrorCode, ExecutionResponse, Row};
pub use value::{Date, DateTime, Edge, NullType, Path, Props, Step, Tag, Time, Value, Vertex};
