//! Option merging and typed access.
//!
//! Callers send an untyped JSON object. Before a transform sees it, the bag is
//! merged over the descriptor's defaults and every declared option is checked
//! (and, where unambiguous, coerced) against its declared kind. Keys the
//! descriptor does not declare are handled by an [`UnknownOptionPolicy`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::descriptor::{OptionKind, OptionSpec, ToolDescriptor};
use super::error::ToolError;

/// What to do with option keys a descriptor does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownOptionPolicy {
    /// Hand them to the transform unchanged.
    #[default]
    Passthrough,
    /// Silently remove them.
    Drop,
    /// Fail the invocation with a configuration error.
    Reject,
}

impl UnknownOptionPolicy {
    /// Parse a policy name (`passthrough`, `drop`, `reject`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "passthrough" | "pass" => Some(Self::Passthrough),
            "drop" | "ignore" => Some(Self::Drop),
            "reject" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Merged, validated options handed to a transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOptions {
    values: Map<String, Value>,
}

impl ToolOptions {
    /// Merge `supplied` over the defaults declared by `descriptor`.
    pub fn merge(
        descriptor: &ToolDescriptor,
        supplied: &Map<String, Value>,
        policy: UnknownOptionPolicy,
    ) -> Result<Self, ToolError> {
        let mut values = Map::new();

        for spec in descriptor.options() {
            let value = match supplied.get(&spec.name) {
                None | Some(Value::Null) => spec.default_value.clone(),
                Some(raw) => coerce(spec, raw)?,
            };
            values.insert(spec.name.clone(), value);
        }

        for (key, value) in supplied {
            if descriptor.option(key).is_some() {
                continue;
            }
            match policy {
                UnknownOptionPolicy::Passthrough => {
                    values.insert(key.clone(), value.clone());
                }
                UnknownOptionPolicy::Drop => {}
                UnknownOptionPolicy::Reject => {
                    return Err(ToolError::configuration(
                        key.as_str(),
                        format!("not an option of {}", descriptor.id()),
                    ));
                }
            }
        }

        Ok(Self { values })
    }

    /// Raw value of an option, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn bool(&self, name: &str) -> Result<bool, ToolError> {
        self.require(name)?
            .as_bool()
            .ok_or_else(|| ToolError::configuration(name, "expected a boolean"))
    }

    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| ToolError::configuration(name, "expected a number"))
    }

    /// Number option truncated towards zero.
    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        let n = self.number(name)?;
        if !n.is_finite() {
            return Err(ToolError::configuration(name, "expected a finite number"));
        }
        Ok(n.trunc() as i64)
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| ToolError::configuration(name, "expected a string"))
    }

    /// All merged values as a JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    fn require(&self, name: &str) -> Result<&Value, ToolError> {
        self.values
            .get(name)
            .ok_or_else(|| ToolError::configuration(name, "option is missing"))
    }
}

impl From<Map<String, Value>> for ToolOptions {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

fn coerce(spec: &OptionSpec, raw: &Value) -> Result<Value, ToolError> {
    let name = spec.name.as_str();
    match (&spec.kind, raw) {
        (OptionKind::Number, Value::Number(_)) => Ok(raw.clone()),
        (OptionKind::Number, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::from)
            .ok_or_else(|| ToolError::configuration(name, format!("'{}' is not a number", s))),

        (OptionKind::Boolean, Value::Bool(_)) => Ok(raw.clone()),
        (OptionKind::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(ToolError::configuration(
                name,
                format!("'{}' is not a boolean", s),
            )),
        },

        (OptionKind::String, Value::String(_)) => Ok(raw.clone()),
        (OptionKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (OptionKind::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

        (OptionKind::Choice(choices), Value::String(s)) => {
            if choices.iter().any(|c| c == s) {
                Ok(raw.clone())
            } else {
                Err(ToolError::configuration(
                    name,
                    format!("'{}' is not one of: {}", s, choices.join(", ")),
                ))
            }
        }

        (kind, other) => Err(ToolError::configuration(
            name,
            format!("expected {}, got {}", kind.schema_type(), type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
