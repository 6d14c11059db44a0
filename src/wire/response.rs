use serde::{Deserialize, Serialize};

use super::{plan::PlanDescription, value::Value};

/// Server status of one executed statement.
///
/// Serialized as the raw integer so unknown codes survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorCode {
    #[default]
    Succeeded,
    Disconnected,
    FailToConnect,
    RpcFailure,
    UserNotFound,
    BadUsernamePassword,
    SessionInvalid,
    SessionTimeout,
    SyntaxError,
    ExecutionError,
    StatementEmpty,
    BadPermission,
    SemanticError,
    PartialSucceeded,
    Other(i32),
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            0 => ErrorCode::Succeeded,
            -1 => ErrorCode::Disconnected,
            -2 => ErrorCode::FailToConnect,
            -3 => ErrorCode::RpcFailure,
            -18 => ErrorCode::UserNotFound,
            -1001 => ErrorCode::BadUsernamePassword,
            -1002 => ErrorCode::SessionInvalid,
            -1003 => ErrorCode::SessionTimeout,
            -1004 => ErrorCode::SyntaxError,
            -1005 => ErrorCode::ExecutionError,
            -1006 => ErrorCode::StatementEmpty,
            -1008 => ErrorCode::BadPermission,
            -1009 => ErrorCode::SemanticError,
            -1011 => ErrorCode::PartialSucceeded,
            other => ErrorCode::Other(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Succeeded => 0,
            ErrorCode::Disconnected => -1,
            ErrorCode::FailToConnect => -2,
            ErrorCode::RpcFailure => -3,
            ErrorCode::UserNotFound => -18,
            ErrorCode::BadUsernamePassword => -1001,
            ErrorCode::SessionInvalid => -1002,
            ErrorCode::SessionTimeout => -1003,
            ErrorCode::SyntaxError => -1004,
            ErrorCode::ExecutionError => -1005,
            ErrorCode::StatementEmpty => -1006,
            ErrorCode::BadPermission => -1008,
            ErrorCode::SemanticError => -1009,
            ErrorCode::PartialSucceeded => -1011,
            ErrorCode::Other(code) => code,
        }
    }
}

/// One row of a data set, one value per column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }
}

/// Column-oriented payload of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSet {
    pub column_names: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Decoded response of one query execution, as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub error_code: ErrorCode,
    #[serde(default)]
    pub latency_in_us: i64,
    #[serde(default)]
    pub data: Option<DataSet>,
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub plan_desc: Option<PlanDescription>,
    #[serde(default)]
    pub comment: Option<String>,
}
