use thiserror::Error;

/// Errors raised while turning a decoded response into typed results.
///
/// Every variant is returned synchronously; nothing in this crate retries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    #[error("Failed to generate {0}: expected a non-null wire value")]
    InvalidEntity(&'static str),

    #[error("Path received is invalid: step {step} shares no endpoint with the previous segment")]
    DisconnectedPath { step: usize },

    #[error("Column '{0}' does not exist in the result set")]
    UnknownColumn(String),

    #[error("Index {index} is out of range [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Tag '{0}' does not exist in the node")]
    UnknownTag(String),

    #[error("Value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Scan {shape}.{field}: field type '{kind}' is not supported")]
    UnsupportedFieldType {
        shape: &'static str,
        field: &'static str,
        kind: &'static str,
    },

    #[error("Scan {shape}: column '{column}' holds a {actual} element, expected vertex or edge")]
    UnsupportedListElementType {
        shape: &'static str,
        column: &'static str,
        actual: &'static str,
    },

    #[error("Scan {shape}.{field}: expected {expected} value, found {actual}")]
    ScanTypeMismatch {
        shape: &'static str,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Scan {shape}.{field}: value {value} does not fit the target integer width")]
    IntegerOverflow {
        shape: &'static str,
        field: &'static str,
        value: i64,
    },

    #[error("Unsupported value: {0}")]
    UnsupportedValueType(String),

    #[error("Path has no segments")]
    EmptyPath,

    #[error("Response carries no plan description")]
    MissingPlanDescription,

    #[error("Profiling data is not valid JSON: {0}")]
    MalformedProfilingData(String),
}
