//! Tabular result view
//!
//! [`ResultSet`] wraps one decoded [`ExecutionResponse`] and indexes its
//! columns by name. Rows are read through borrowed [`Record`] views. Row
//! widths are not checked up front; a short row surfaces as
//! `IndexOutOfRange` when the missing cell is read.

use std::collections::HashMap;

mod record;

pub use record::Record;

use crate::{
    config::DecodeConfig,
    errors::DecodeError,
    plan_render::{self, PlanRow},
    scan::{self, Scannable},
    temporal::TimezoneInfo,
    value_wrapper::ValueWrapper,
    wire::{ErrorCode, ExecutionResponse, PlanDescription, Row},
};

#[derive(Debug, Clone)]
pub struct ResultSet {
    response: ExecutionResponse,
    column_names: Vec<String>,
    col_name_index: HashMap<String, usize>,
    timezone_info: TimezoneInfo,
}

impl ResultSet {
    /// Wrap a response using the default decoding configuration.
    pub fn new(response: ExecutionResponse) -> Self {
        ResultSet::with_config(response, &DecodeConfig::default())
    }

    pub fn with_config(response: ExecutionResponse, config: &DecodeConfig) -> Self {
        ResultSet::with_timezone(response, config.timezone_info())
    }

    pub fn with_timezone(response: ExecutionResponse, timezone_info: TimezoneInfo) -> Self {
        let column_names = response
            .data
            .as_ref()
            .map(|data| data.column_names.clone())
            .unwrap_or_default();
        // Duplicate column names resolve to their first occurrence.
        let mut col_name_index = HashMap::with_capacity(column_names.len());
        for (idx, name) in column_names.iter().enumerate() {
            col_name_index.entry(name.clone()).or_insert(idx);
        }
        log::trace!(
            "result set: {} columns, {} rows",
            column_names.len(),
            response.data.as_ref().map_or(0, |data| data.rows.len())
        );

        ResultSet {
            response,
            column_names,
            col_name_index,
            timezone_info,
        }
    }

    pub fn response(&self) -> &ExecutionResponse {
        &self.response
    }

    pub fn timezone_info(&self) -> &TimezoneInfo {
        &self.timezone_info
    }

    pub fn row_size(&self) -> usize {
        self.rows().len()
    }

    pub fn col_size(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// All rows, empty when the response carries no data
    pub fn rows(&self) -> &[Row] {
        self.response
            .data
            .as_ref()
            .map(|data| data.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn column_index(&self, col_name: &str) -> Option<usize> {
        self.col_name_index.get(col_name).copied()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.response.error_code
    }

    pub fn error_msg(&self) -> &str {
        self.response.error_msg.as_deref().unwrap_or("")
    }

    /// Server latency in microseconds
    pub fn latency(&self) -> i64 {
        self.response.latency_in_us
    }

    pub fn latency_in_ms(&self) -> i64 {
        self.response.latency_in_us / 1000
    }

    pub fn space_name(&self) -> &str {
        self.response.space_name.as_deref().unwrap_or("")
    }

    pub fn comment(&self) -> &str {
        self.response.comment.as_deref().unwrap_or("")
    }

    pub fn is_set_comment(&self) -> bool {
        self.response.comment.is_some()
    }

    pub fn is_set_data(&self) -> bool {
        self.response.data.is_some()
    }

    pub fn is_set_plan_desc(&self) -> bool {
        self.response.plan_desc.is_some()
    }

    pub fn plan_desc(&self) -> Option<&PlanDescription> {
        self.response.plan_desc.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn is_succeed(&self) -> bool {
        self.error_code() == ErrorCode::Succeeded
    }

    pub fn is_partial_succeed(&self) -> bool {
        self.error_code() == ErrorCode::PartialSucceeded
    }

    /// Every value of one column, in row order.
    pub fn values_by_col_name(&self, col_name: &str) -> Result<Vec<ValueWrapper<'_>>, DecodeError> {
        let index = self
            .column_index(col_name)
            .ok_or_else(|| DecodeError::UnknownColumn(col_name.to_string()))?;
        self.rows()
            .iter()
            .map(|row| {
                row.values
                    .get(index)
                    .map(|value| ValueWrapper::new(value, &self.timezone_info))
                    .ok_or(DecodeError::IndexOutOfRange {
                        index,
                        len: row.values.len(),
                    })
            })
            .collect()
    }

    pub fn row_values_by_index(&self, index: usize) -> Result<Record<'_>, DecodeError> {
        let rows = self.rows();
        let row = rows.get(index).ok_or(DecodeError::IndexOutOfRange {
            index,
            len: rows.len(),
        })?;
        Ok(Record::new(
            &row.values,
            &self.column_names,
            &self.col_name_index,
            &self.timezone_info,
        ))
    }

    /// Header row of column names, then one rendered row per data row.
    pub fn as_string_table(&self) -> Vec<Vec<String>> {
        let mut table = Vec::with_capacity(self.row_size() + 1);
        table.push(self.column_names.clone());
        for row in self.rows() {
            table.push(
                row.values
                    .iter()
                    .map(|value| ValueWrapper::new(value, &self.timezone_info).to_string())
                    .collect(),
            );
        }
        table
    }

    /// Scan every row into a `T`; see [`crate::scan`].
    pub fn scan<T: Scannable>(&self) -> Result<Vec<T>, DecodeError> {
        scan::scan(self)
    }

    fn require_plan(&self) -> Result<&PlanDescription, DecodeError> {
        self.plan_desc().ok_or(DecodeError::MissingPlanDescription)
    }

    /// Plan as a DOT graph (`format="dot"`)
    pub fn make_dot_graph(&self) -> Result<String, DecodeError> {
        Ok(plan_render::make_dot_graph(self.require_plan()?))
    }

    /// Plan as a DOT graph of raw dependencies (`format="dot:struct"`)
    pub fn make_dot_graph_by_struct(&self) -> Result<String, DecodeError> {
        Ok(plan_render::make_dot_graph_by_struct(self.require_plan()?))
    }

    pub fn make_plan_by_row(&self) -> Result<Vec<PlanRow>, DecodeError> {
        plan_render::make_plan_by_row(self.require_plan()?)
    }

    pub fn make_plan_by_tck(&self) -> Result<Vec<PlanRow>, DecodeError> {
        plan_render::make_plan_by_tck(self.require_plan()?)
    }
}
