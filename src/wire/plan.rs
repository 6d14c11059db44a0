//! Execution-plan description attached to EXPLAIN / PROFILE responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key/value entry of a plan node's description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Pair {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One profiling sample of a plan node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfilingStats {
    pub rows: i64,
    #[serde(default)]
    pub exec_duration_in_us: i64,
    #[serde(default)]
    pub total_duration_in_us: i64,
    #[serde(default)]
    pub other_stats: Option<HashMap<String, String>>,
}

/// Marks a plan node as the tail of a `select` / `loop` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanNodeBranchInfo {
    pub is_do_branch: bool,
    pub condition_node_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanNodeDescription {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub output_var: String,
    #[serde(default)]
    pub description: Option<Vec<Pair>>,
    #[serde(default)]
    pub profiles: Option<Vec<ProfilingStats>>,
    #[serde(default)]
    pub branch_info: Option<PlanNodeBranchInfo>,
    #[serde(default)]
    pub dependencies: Option<Vec<i64>>,
}

impl PlanNodeDescription {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        PlanNodeDescription {
            name: name.into(),
            id,
            ..Default::default()
        }
    }

    pub fn with_dependencies(mut self, deps: Vec<i64>) -> Self {
        self.dependencies = Some(deps);
        self
    }

    pub fn with_branch(mut self, condition_node_id: i64, is_do_branch: bool) -> Self {
        self.branch_info = Some(PlanNodeBranchInfo {
            is_do_branch,
            condition_node_id,
        });
        self
    }

    /// Dependencies in wire order, empty when unset
    pub fn deps(&self) -> &[i64] {
        self.dependencies.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanDescription {
    pub plan_node_descs: Vec<PlanNodeDescription>,
    /// Node id -> position in `plan_node_descs`
    #[serde(default)]
    pub node_index_map: HashMap<i64, usize>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub optimize_time_in_us: i32,
}

impl PlanDescription {
    /// Build a description and derive its id index from node order.
    pub fn from_nodes(plan_node_descs: Vec<PlanNodeDescription>) -> Self {
        let node_index_map = plan_node_descs
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
        PlanDescription {
            plan_node_descs,
            node_index_map,
            ..Default::default()
        }
    }

    /// Look a plan node up by id.
    ///
    /// The wire index is consulted first; a stale or missing index falls back
    /// to a linear scan.
    pub fn node_by_id(&self, id: i64) -> Option<&PlanNodeDescription> {
        self.node_index_map
            .get(&id)
            .and_then(|&idx| self.plan_node_descs.get(idx))
            .filter(|node| node.id == id)
            .or_else(|| self.plan_node_descs.iter().find(|node| node.id == id))
    }
}
