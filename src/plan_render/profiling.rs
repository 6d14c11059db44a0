//! Row / tck plan tables and profiling JSON
//!
//! Profiling stats arrive as loose strings. They are stitched into JSON text
//! by hand: values that look like a bare word get quoted, everything else is
//! passed through. The stitched text is checked for well-formedness and then
//! re-indented (row format) or compacted (tck format) token by token; only
//! whitespace outside strings changes, so number spellings and repeated keys
//! come out as they went in. A stat whose text is not valid JSON in that
//! position makes the whole node fail with `MalformedProfilingData`.

use regex::Regex;
use serde::{de::IgnoredAny, Deserialize, Serialize};
use std::sync::LazyLock;

use crate::{
    errors::DecodeError,
    wire::{PlanDescription, PlanNodeDescription},
};

/// A bare word: not opening an object, list or group
static BARE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^{(\[]\w+").unwrap());

/// One plan node as a table row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanRow {
    pub id: i64,
    pub name: String,
    /// Dependency ids joined with `,`
    pub dependencies: String,
    pub profiling_data: String,
    pub operator_info: String,
}

/// Profiling samples of one node as JSON text.
///
/// One object per sample, keys sorted; several samples are wrapped in a list.
/// Row format adds execution and total durations; tck format leaves them out.
pub fn make_profiling_data(node: &PlanNodeDescription, tck_format: bool) -> Result<String, DecodeError> {
    let mut samples = Vec::new();
    for (version, profile) in node.profiles.iter().flatten().enumerate() {
        let mut stats = vec![
            format!("\"version\":{}", version),
            format!("\"rows\":{}", profile.rows),
        ];
        if !tck_format {
            stats.push(format!("\"execTime\":\"{}(us)\"", profile.exec_duration_in_us));
            stats.push(format!("\"totalTime\":\"{}(us)\"", profile.total_duration_in_us));
        }
        for (key, value) in profile.other_stats.iter().flatten() {
            stats.push(format!("\"{}\": {}", key, quote_bare_word(value)));
        }
        stats.sort();
        samples.push(format!("{{{}}}", stats.join(",\n")));
    }

    let mut text = samples.join(",\n");
    if samples.len() > 1 {
        text = format!("[{}]", text);
    }

    serde_json::from_str::<IgnoredAny>(&text).map_err(|e| {
        log::debug!("profiling data of plan node {} is not JSON: {}", node.id, text);
        DecodeError::MalformedProfilingData(format!("plan node {}: {}", node.id, e))
    })?;
    Ok(indent_json(&text))
}

fn quote_bare_word(value: &str) -> String {
    if !BARE_WORD.is_match(value) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    if !value.starts_with('"') {
        quoted.push('"');
    }
    quoted.push_str(value);
    if !value.ends_with('"') {
        quoted.push('"');
    }
    quoted
}

/// Pretty-print `value` when it is JSON, otherwise return it unchanged.
fn pretty_json_or_raw(value: &str) -> String {
    match serde_json::from_str::<IgnoredAny>(value) {
        Ok(_) => indent_json(value),
        Err(_) => value.to_string(),
    }
}

/// Re-indent well-formed JSON text with two spaces per level.
fn indent_json(text: &str) -> String {
    reformat_json(text, Some("  "))
}

/// Strip insignificant whitespace from well-formed JSON text.
fn compact_json(text: &str) -> String {
    reformat_json(text, None)
}

/// Walk JSON tokens, rewriting only whitespace outside strings.
///
/// Empty objects and arrays stay on one line.
fn reformat_json(text: &str, indent: Option<&str>) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut just_opened = false;

    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }

        let Some(unit) = indent else {
            in_string = c == '"';
            out.push(c);
            continue;
        };

        if just_opened {
            just_opened = false;
            if matches!(c, '}' | ']') {
                depth = depth.saturating_sub(1);
                out.push(c);
                continue;
            }
            push_newline(&mut out, unit, depth);
        }
        match c {
            '{' | '[' => {
                out.push(c);
                depth += 1;
                just_opened = true;
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                push_newline(&mut out, unit, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, unit, depth);
            }
            ':' => out.push_str(": "),
            '"' => {
                in_string = true;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn push_newline(out: &mut String, unit: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(unit);
    }
}

/// Operator info column of the row format.
pub fn make_operator_info(node: &PlanNodeDescription) -> String {
    let mut lines = Vec::new();
    if let Some(branch) = &node.branch_info {
        lines.push(format!(
            "branch: {}, nodeId: {}\n",
            branch.is_do_branch, branch.condition_node_id
        ));
    }
    lines.push(format!("outputVar: {}", pretty_json_or_raw(&node.output_var)));
    for pair in node.description.iter().flatten() {
        lines.push(format!("{}: {}", pair.key, pretty_json_or_raw(&pair.value)));
    }
    lines.join("\n")
}

fn joined_dependencies(node: &PlanNodeDescription) -> String {
    node.deps()
        .iter()
        .map(|dep| dep.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Plan as table rows (`format="row"`)
pub fn make_plan_by_row(plan: &PlanDescription) -> Result<Vec<PlanRow>, DecodeError> {
    plan.plan_node_descs
        .iter()
        .map(|node| {
            let profiling_data = match node.profiles {
                Some(_) => make_profiling_data(node, false)?,
                None => String::new(),
            };
            Ok(PlanRow {
                id: node.id,
                name: node.name.clone(),
                dependencies: joined_dependencies(node),
                profiling_data,
                operator_info: make_operator_info(node),
            })
        })
        .collect()
}

/// Plan as compact table rows (`format="tck"`)
pub fn make_plan_by_tck(plan: &PlanDescription) -> Result<Vec<PlanRow>, DecodeError> {
    plan.plan_node_descs
        .iter()
        .map(|node| {
            let profiling_data = match node.profiles {
                Some(_) => compact_json(&make_profiling_data(node, true)?),
                None => String::new(),
            };
            Ok(PlanRow {
                id: node.id,
                name: node.name.clone(),
                dependencies: joined_dependencies(node),
                profiling_data,
                operator_info: String::new(),
            })
        })
        .collect()
}
