//! Execution-plan rendering
//!
//! Turns the plan description attached to EXPLAIN / PROFILE responses into
//! one of the client-side formats:
//!
//! - `dot`: graphviz digraph with conditional branches resolved
//! - `dot:struct`: graphviz digraph of the raw dependency structure
//! - `row`: one [`PlanRow`] per node with pretty profiling JSON and operator info
//! - `tck`: one [`PlanRow`] per node with compact profiling JSON

pub mod dot;
pub mod profiling;

pub use dot::{graphviz_string, make_dot_graph, make_dot_graph_by_struct};
pub use profiling::{make_operator_info, make_plan_by_row, make_plan_by_tck, make_profiling_data, PlanRow};
