//! Graphviz rendering of execution plans
//!
//! Nodes are named `<name>_<id>` and laid out bottom-up (`rankdir=BT`), so
//! edges point from a dependency to its dependent. `select` and `loop` nodes
//! are drawn as diamonds and joined to their branches with dashed edges.
//!
//! Ids that do not resolve to a plan node render as `unknown_<id>`.

use crate::wire::{PlanDescription, PlanNodeDescription};

/// Id returned by branch lookups that found nothing
const NOT_FOUND: i64 = -1;

pub fn make_dot_graph(plan: &PlanDescription) -> String {
    let mut out = String::from("digraph exec_plan {\n\trankdir=BT;\n");
    for node in &plan.plan_node_descs {
        let node_name = name(node);
        match node.name.to_lowercase().as_str() {
            "select" => {
                out.push_str(&conditional_node_string(&node_name));
                let dep = first_dependency_name(plan, node);

                let then_id = find_branch_end_node(plan, node.id, true);
                out.push_str(&edge_string(&name_by_id(plan, then_id), &dep));
                let then_start = find_first_start_node_from(plan, then_id);
                out.push_str(&conditional_edge_string(&node_name, &name_by_id(plan, then_start), "Y"));

                let else_id = find_branch_end_node(plan, node.id, false);
                out.push_str(&edge_string(&name_by_id(plan, else_id), &dep));
                let else_start = find_first_start_node_from(plan, else_id);
                out.push_str(&conditional_edge_string(&node_name, &name_by_id(plan, else_start), "N"));

                out.push_str(&edge_string(&dep, &node_name));
            }
            "loop" => {
                out.push_str(&conditional_node_string(&node_name));
                let dep = first_dependency_name(plan, node);

                let do_id = find_branch_end_node(plan, node.id, true);
                out.push_str(&edge_string(&name_by_id(plan, do_id), &node_name));
                let do_start = find_first_start_node_from(plan, do_id);
                out.push_str(&conditional_edge_string(&node_name, &name_by_id(plan, do_start), "Do"));

                out.push_str(&edge_string(&dep, &node_name));
            }
            _ => {
                out.push_str(&node_string(node, &node_name));
                for &dep_id in node.deps() {
                    out.push_str(&edge_string(&name_by_id(plan, dep_id), &node_name));
                }
            }
        }
    }
    out.push('}');
    out
}

pub fn make_dot_graph_by_struct(plan: &PlanDescription) -> String {
    let mut out = String::from("digraph exec_plan {\n\trankdir=BT;\n");
    for node in &plan.plan_node_descs {
        let node_name = name(node);
        match node.name.to_lowercase().as_str() {
            "select" | "loop" => out.push_str(&conditional_node_string(&node_name)),
            _ => out.push_str(&node_string(node, &node_name)),
        }

        for &dep_id in node.deps() {
            out.push_str(&edge_string(&name_by_id(plan, dep_id), &node_name));
        }

        if let Some(branch) = &node.branch_info {
            let cond_name = name_by_id(plan, branch.condition_node_id);
            let label = plan
                .node_by_id(branch.condition_node_id)
                .map(|cond| cond_edge_label(cond, branch.is_do_branch))
                .unwrap_or("");
            out.push_str(&conditional_edge_string(&node_name, &cond_name, label));
        }
    }
    out.push('}');
    out
}

/// Escape characters graphviz treats as record syntax.
pub fn graphviz_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '{' | '}' | '"' | '[' | ']' | '(' | ')' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn name(node: &PlanNodeDescription) -> String {
    format!("{}_{}", node.name, node.id)
}

fn name_by_id(plan: &PlanDescription, id: i64) -> String {
    match plan.node_by_id(id) {
        Some(node) => name(node),
        None => {
            log::warn!("plan node {} not found, rendering as unknown_{}", id, id);
            format!("unknown_{}", id)
        }
    }
}

fn first_dependency_name(plan: &PlanDescription, node: &PlanNodeDescription) -> String {
    let dep_id = node.deps().first().copied().unwrap_or_else(|| {
        log::warn!("conditional plan node {} has no dependency", node.id);
        NOT_FOUND
    });
    name_by_id(plan, dep_id)
}

fn cond_edge_label(cond: &PlanNodeDescription, do_branch: bool) -> &'static str {
    let cond_name = cond.name.to_lowercase();
    if cond_name.starts_with("select") {
        if do_branch {
            "Y"
        } else {
            "N"
        }
    } else if cond_name.starts_with("loop") && do_branch {
        "Do"
    } else {
        ""
    }
}

fn node_string(node: &PlanNodeDescription, node_name: &str) -> String {
    let output_var = graphviz_string(&node.output_var);
    let input_var = node
        .description
        .iter()
        .flatten()
        .filter(|pair| pair.key == "inputVar")
        .last()
        .map(|pair| graphviz_string(&pair.value))
        .unwrap_or_default();
    format!(
        "\t\"{}\"[label=\"{{{}|outputVar: {}|inputVar: {}}}\", shape=Mrecord];\n",
        node_name, node_name, output_var, input_var
    )
}

fn edge_string(start: &str, end: &str) -> String {
    format!("\t\"{}\"->\"{}\";\n", start, end)
}

fn conditional_edge_string(start: &str, end: &str, label: &str) -> String {
    format!("\t\"{}\"->\"{}\"[label=\"{}\", style=dashed];\n", start, end, label)
}

fn conditional_node_string(node_name: &str) -> String {
    format!("\t\"{}\"[shape=diamond];\n", node_name)
}

/// Id of the plan node that ends the given branch of a conditional node.
fn find_branch_end_node(plan: &PlanDescription, cond_node_id: i64, is_do_branch: bool) -> i64 {
    plan.plan_node_descs
        .iter()
        .find(|node| {
            node.branch_info.is_some_and(|b| {
                b.condition_node_id == cond_node_id && b.is_do_branch == is_do_branch
            })
        })
        .map(|node| node.id)
        .unwrap_or(NOT_FOUND)
}

/// Follow first dependencies down to the branch's `Start` node.
fn find_first_start_node_from(plan: &PlanDescription, node_id: i64) -> i64 {
    let mut current = node_id;
    // a well-formed chain visits each node at most once
    for _ in 0..=plan.plan_node_descs.len() {
        let Some(node) = plan.node_by_id(current) else {
            return NOT_FOUND;
        };
        match node.deps().first() {
            Some(&next) => current = next,
            None if node.name.eq_ignore_ascii_case("start") => return node.id,
            None => return NOT_FOUND,
        }
    }
    log::warn!("dependency chain from plan node {} does not terminate", node_id);
    NOT_FOUND
}
