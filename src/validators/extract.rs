//! Field Extraction
//!
//! Typed access to fields of a parsed JSON object. Each accessor reports what
//! is wrong (absent, or present with the wrong JSON type) into an [`Issues`]
//! collector and hands back `None`, so the caller can carry on with the
//! remaining checks.

use crate::document::type_name;
use crate::issue::{IssueKind, Issues};
use serde_json::{Map, Value};

/// Join a parent field path and a child key: `gridData` + `w` -> `gridData.w`.
pub fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Indexed field path: `params` + 2 -> `params[2]`.
pub fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

/// An integer-valued JSON number. `12.0` counts, `12.5` does not.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn is_whole_number(value: &Value) -> bool {
    value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// Reader over one JSON object, bound to the issue locator (`id`) and the
/// field path of the object inside its owner.
pub struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    id: &'a str,
    path: &'a str,
}

impl<'a> FieldReader<'a> {
    pub fn new(obj: &'a Map<String, Value>, id: &'a str, path: &'a str) -> Self {
        Self { obj, id, path }
    }

    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn field(&self, key: &str) -> String {
        join(self.path, key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.obj.contains_key(key)
    }

    /// Report a missing field.
    pub fn missing(&self, issues: &mut Issues, key: &str) {
        issues.push(
            self.id,
            self.field(key),
            IssueKind::MissingFieldError,
            format!("missing required field '{}'", self.field(key)),
        );
    }

    fn wrong_type(&self, issues: &mut Issues, key: &str, expected: &str, found: &Value) {
        issues.push(
            self.id,
            self.field(key),
            IssueKind::ShapeError,
            format!(
                "'{}' must be {expected}, got {}",
                self.field(key),
                type_name(found)
            ),
        );
    }

    pub fn required_str(&self, issues: &mut Issues, key: &str) -> Option<&'a str> {
        match self.obj.get(key) {
            None => {
                self.missing(issues, key);
                None
            }
            Some(value) => self.typed_str(issues, key, value),
        }
    }

    /// Like [`required_str`](Self::required_str) but an empty or blank
    /// string also counts as missing.
    pub fn required_non_empty_str(&self, issues: &mut Issues, key: &str) -> Option<&'a str> {
        let value = self.required_str(issues, key)?;
        if value.trim().is_empty() {
            issues.push(
                self.id,
                self.field(key),
                IssueKind::MissingFieldError,
                format!("'{}' must not be empty", self.field(key)),
            );
            return None;
        }
        Some(value)
    }

    pub fn optional_str(&self, issues: &mut Issues, key: &str) -> Option<&'a str> {
        let value = self.obj.get(key)?;
        self.typed_str(issues, key, value)
    }

    fn typed_str(&self, issues: &mut Issues, key: &str, value: &'a Value) -> Option<&'a str> {
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.wrong_type(issues, key, "a string", value);
                None
            }
        }
    }

    pub fn required_bool(&self, issues: &mut Issues, key: &str) -> Option<bool> {
        match self.obj.get(key) {
            None => {
                self.missing(issues, key);
                None
            }
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.wrong_type(issues, key, "a boolean", other);
                None
            }
        }
    }

    pub fn required_array(&self, issues: &mut Issues, key: &str) -> Option<&'a Vec<Value>> {
        match self.obj.get(key) {
            None => {
                self.missing(issues, key);
                None
            }
            Some(value) => self.typed_array(issues, key, value),
        }
    }

    pub fn optional_array(&self, issues: &mut Issues, key: &str) -> Option<&'a Vec<Value>> {
        let value = self.obj.get(key)?;
        self.typed_array(issues, key, value)
    }

    fn typed_array(
        &self,
        issues: &mut Issues,
        key: &str,
        value: &'a Value,
    ) -> Option<&'a Vec<Value>> {
        match value.as_array() {
            Some(items) => Some(items),
            None => {
                self.wrong_type(issues, key, "an array", value);
                None
            }
        }
    }

    pub fn optional_object(
        &self,
        issues: &mut Issues,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        let value = self.obj.get(key)?;
        match value.as_object() {
            Some(obj) => Some(obj),
            None => {
                self.wrong_type(issues, key, "an object", value);
                None
            }
        }
    }

    pub fn required_integer(&self, issues: &mut Issues, key: &str) -> Option<i64> {
        match self.obj.get(key) {
            None => {
                self.missing(issues, key);
                None
            }
            Some(value) => self.typed_integer(issues, key, value),
        }
    }

    pub fn optional_integer(&self, issues: &mut Issues, key: &str) -> Option<i64> {
        let value = self.obj.get(key)?;
        self.typed_integer(issues, key, value)
    }

    fn typed_integer(&self, issues: &mut Issues, key: &str, value: &Value) -> Option<i64> {
        if let Some(i) = as_integer(value) {
            return Some(i);
        }
        let expected = if is_whole_number(value) {
            "an integer in i64 range"
        } else {
            "an integer"
        };
        self.wrong_type(issues, key, expected, value);
        None
    }

    /// Check a string field against a value set. Absent fields are left to
    /// the caller.
    pub fn enum_member(
        &self,
        issues: &mut Issues,
        key: &str,
        allowed: &[&str],
        what: &str,
    ) -> Option<&'a str> {
        let value = self.optional_str(issues, key)?;
        if !allowed.contains(&value) {
            issues.push(
                self.id,
                self.field(key),
                IssueKind::EnumError,
                format!(
                    "invalid {what} '{value}'; valid: {}",
                    crate::rules::describe(allowed)
                ),
            );
            return None;
        }
        Some(value)
    }
}

/// Flatten widget params: entries may themselves be arrays (parameter rows).
/// Non-object entries are returned too so the caller can report them.
pub fn flatten_params(params: &[Value]) -> Vec<&Value> {
    let mut flat = Vec::with_capacity(params.len());
    for entry in params {
        match entry {
            Value::Array(row) => flat.extend(row.iter()),
            other => flat.push(other),
        }
    }
    flat
}
