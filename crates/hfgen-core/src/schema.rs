//! # Input Schemas
//!
//! A tool advertises the arguments it accepts as a [`SchemaNode`]: an object
//! schema whose properties are typed as `string`, `number` or `boolean`, with
//! optional defaults and a set of required names. The same node drives
//! argument resolution: raw JSON arguments are coerced into [`ArgValue`]s,
//! defaults are filled in and required names are checked before a handler
//! ever runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{ArgumentError, SchemaError};

/// Raw JSON arguments as received from a caller.
pub type JsonObject = serde_json::Map<String, Value>;

/// Declared type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    /// Integral number. Floats are truncated toward zero on coercion.
    Number,
    Boolean,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
        }
    }

    /// Coerce a raw JSON value into this type.
    ///
    /// Returns `None` when the value cannot represent this type.
    pub fn coerce(&self, value: &Value) -> Option<ArgValue> {
        match self {
            PropertyType::String => value.as_str().map(|s| ArgValue::String(s.to_string())),
            PropertyType::Number => match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| {
                        n.as_f64()
                            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                            .map(|f| f.trunc() as i64)
                    })
                    .map(ArgValue::Number),
                Value::String(s) => s.trim().parse::<i64>().ok().map(ArgValue::Number),
                _ => None,
            },
            PropertyType::Boolean => match value {
                Value::Bool(b) => Some(ArgValue::Boolean(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Some(ArgValue::Boolean(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => {
                    Some(ArgValue::Boolean(false))
                }
                _ => None,
            },
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Boolean(bool),
    Number(i64),
    String(String),
}

impl ArgValue {
    /// The schema type this value satisfies.
    pub fn property_type(&self) -> PropertyType {
        match self {
            ArgValue::Boolean(_) => PropertyType::Boolean,
            ArgValue::Number(_) => PropertyType::Number,
            ArgValue::String(_) => PropertyType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Boolean(b) => write!(f, "{}", b),
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Boolean(value)
    }
}

/// One property of an object schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ArgValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    pub fn new(kind: PropertyType) -> Self {
        Self {
            kind,
            default: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(PropertyType::String)
    }

    pub fn number() -> Self {
        Self::new(PropertyType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(PropertyType::Boolean)
    }

    pub fn with_default(mut self, default: impl Into<ArgValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SchemaKind {
    Object,
}

/// Object schema describing the arguments a tool accepts.
///
/// Serializes to the JSON Schema subset MCP clients expect:
/// `{"type": "object", "properties": {...}, "required": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    kind: SchemaKind,
    #[serde(default)]
    properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    required: BTreeSet<String>,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self::object()
    }
}

impl SchemaNode {
    /// Create an empty object schema.
    pub fn object() -> Self {
        Self {
            kind: SchemaKind::Object,
            properties: BTreeMap::new(),
            required: BTreeSet::new(),
        }
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a declared property as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertySchema> {
        &self.properties
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Check the schema invariants: every required name is a declared
    /// property and every default matches its property type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(name) = self
            .required
            .iter()
            .find(|name| !self.properties.contains_key(*name))
        {
            return Err(SchemaError::UndeclaredRequired { name: name.clone() });
        }

        for (name, property) in &self.properties {
            if let Some(default) = &property.default {
                let found = default.property_type();
                if found != property.kind {
                    return Err(SchemaError::DefaultTypeMismatch {
                        property: name.clone(),
                        expected: property.kind,
                        found,
                    });
                }
            }
        }

        Ok(())
    }

    /// Resolve raw caller arguments against this schema.
    ///
    /// Absent and `null` values take the declared default. Present values are
    /// coerced to the declared type. Keys that are not declared are ignored.
    pub fn resolve(&self, raw: &JsonObject) -> Result<Arguments, ArgumentError> {
        let mut values = BTreeMap::new();

        for (name, property) in &self.properties {
            let resolved = match raw.get(name).filter(|value| !value.is_null()) {
                Some(value) => Some(property.kind.coerce(value).ok_or_else(|| {
                    ArgumentError::Invalid {
                        argument: name.clone(),
                        expected: property.kind,
                        found: describe_json(value),
                    }
                })?),
                None => property.default.clone(),
            };

            if let Some(value) = resolved {
                values.insert(name.clone(), value);
            }
        }

        if let Some(missing) = self.required.iter().find(|name| !values.contains_key(*name)) {
            return Err(ArgumentError::Missing {
                argument: missing.clone(),
            });
        }

        let ignored: Vec<&str> = raw
            .keys()
            .filter(|key| !self.properties.contains_key(*key))
            .map(String::as_str)
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(?ignored, "Ignoring undeclared arguments");
        }

        Ok(Arguments { values })
    }
}

/// Short description of a JSON value for error messages.
fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// Arguments after schema resolution: declared properties only, coerced to
/// their declared types, with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: BTreeMap<String, ArgValue>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fetch a string argument that the handler cannot run without.
    pub fn require_str(&self, name: &str) -> Result<&str, ArgumentError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| mismatch(name, PropertyType::String, value))
    }

    /// Fetch an integer argument that the handler cannot run without.
    pub fn require_integer(&self, name: &str) -> Result<i64, ArgumentError> {
        let value = self.require(name)?;
        value
            .as_integer()
            .ok_or_else(|| mismatch(name, PropertyType::Number, value))
    }

    fn require(&self, name: &str) -> Result<&ArgValue, ArgumentError> {
        self.values.get(name).ok_or_else(|| ArgumentError::Missing {
            argument: name.to_string(),
        })
    }
}

fn mismatch(name: &str, expected: PropertyType, value: &ArgValue) -> ArgumentError {
    ArgumentError::Invalid {
        argument: name.to_string(),
        expected,
        found: format!("{} {}", value.property_type(), value),
    }
}

impl FromIterator<(String, ArgValue)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, ArgValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
