use std::collections::HashMap;
use std::fmt;

use crate::{
    errors::DecodeError,
    temporal::TimezoneInfo,
    value_wrapper::ValueWrapper,
    wire::Value,
};

/// One row bound to its result set's column index.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    values: &'a [Value],
    column_names: &'a [String],
    col_name_index: &'a HashMap<String, usize>,
    timezone_info: &'a TimezoneInfo,
}

impl<'a> Record<'a> {
    pub(crate) fn new(
        values: &'a [Value],
        column_names: &'a [String],
        col_name_index: &'a HashMap<String, usize>,
        timezone_info: &'a TimezoneInfo,
    ) -> Self {
        Record {
            values,
            column_names,
            col_name_index,
            timezone_info,
        }
    }

    /// Number of values in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> &'a [String] {
        self.column_names
    }

    pub fn values(&self) -> Vec<ValueWrapper<'a>> {
        self.values
            .iter()
            .map(|value| ValueWrapper::new(value, self.timezone_info))
            .collect()
    }

    pub fn value_by_index(&self, index: usize) -> Result<ValueWrapper<'a>, DecodeError> {
        self.values
            .get(index)
            .map(|value| ValueWrapper::new(value, self.timezone_info))
            .ok_or(DecodeError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    pub fn value_by_col_name(&self, col_name: &str) -> Result<ValueWrapper<'a>, DecodeError> {
        let index = self
            .col_name_index
            .get(col_name)
            .copied()
            .ok_or_else(|| DecodeError::UnknownColumn(col_name.to_string()))?;
        self.value_by_index(index)
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
