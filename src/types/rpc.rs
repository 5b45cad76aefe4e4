use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use crate::rpc::RpcError;

/// Result of a node RPC call, decoded from the JSON-RPC `result` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RpcValue {
    String(String),
    Number(Number),
    /// Anything else: objects, arrays, booleans and null.
    Structured(Value),
}

impl RpcValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Structured(Value::Null) => "null",
            Self::Structured(Value::Bool(_)) => "boolean",
            Self::Structured(Value::Array(_)) => "array",
            Self::Structured(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for RpcValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n),
            other => Self::Structured(other),
        }
    }
}

impl From<RpcValue> for Value {
    fn from(value: RpcValue) -> Self {
        match value {
            RpcValue::String(s) => Value::String(s),
            RpcValue::Number(n) => Value::Number(n),
            RpcValue::Structured(v) => v,
        }
    }
}

impl From<&str> for RpcValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl fmt::Display for RpcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

/// What a call expects the node to send back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Any,
    String,
}

impl ResultShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
        }
    }

    pub fn check(self, method: &'static str, value: RpcValue) -> Result<RpcValue, RpcError> {
        match (self, &value) {
            (Self::Any, _) | (Self::String, RpcValue::String(_)) => Ok(value),
            (Self::String, other) => Err(RpcError::UnexpectedResult {
                method,
                expected: self.name(),
                found: other.kind(),
            }),
        }
    }
}
