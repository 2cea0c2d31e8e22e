/// Model-issued tool invocation
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named capability the model asked to invoke, with its structured arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as declared in the tool catalogue
    pub name: String,

    /// Arguments object; absent arguments deserialize as an empty object
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCall {
    /// Create a tool call from a name and a JSON value.
    ///
    /// Non-object argument values are discarded, matching how providers treat
    /// a malformed argument payload.
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            args,
        }
    }

    /// Create a tool call with no arguments
    pub fn without_args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Map::new(),
        }
    }

    /// Read an argument in its string form.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified, and a
    /// missing or null argument is the empty string. A whole-number float
    /// renders without its fraction, so `1.0` reads as `"1"`.
    pub fn arg_str(&self, key: &str) -> String {
        match self.args.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
                _ => n.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}
