//! Table-layout inference from JSON values
//!
//! The engine walks a JSON value top-down and emits one [`Table`] per object
//! node and per array-of-objects node, in creation order, so parents always
//! precede their children. Scalar properties become fields on the current
//! table; arrays of scalars become `"<kind>[]"` fields; empty arrays are
//! treated as absent.

use super::types::{Field, Table, ValueKind};
use crate::datetime::is_valid_date;
use crate::error::Result;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Table-layout inferrer with configuration options
#[derive(Debug, Clone)]
pub struct TableInferrer {
    /// Classify date-shaped strings as `date` instead of `string`
    detect_dates: bool,
    /// Name given to synthesized top-level tables and fields
    root_name: String,
}

impl Default for TableInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableInferrer {
    /// Create an inferrer with default settings (`root` name, date detection on)
    pub fn new() -> Self {
        Self {
            detect_dates: true,
            root_name: "root".to_string(),
        }
    }

    /// Enable/disable date detection for string values
    #[must_use]
    pub fn with_date_detection(mut self, enabled: bool) -> Self {
        self.detect_dates = enabled;
        self
    }

    /// Set the name used for synthesized top-level tables and fields
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Infer the table layout of a JSON value.
    ///
    /// A top-level string is attempted-parsed as JSON text first; if it is
    /// not valid JSON it is treated as an opaque string scalar. Nested
    /// strings are never re-parsed.
    pub fn infer(&self, input: &Value) -> Vec<Table> {
        if let Value::String(text) = input {
            return self.infer_text(text);
        }
        self.run(input)
    }

    /// Infer the table layout of JSON text.
    ///
    /// Text that fails to parse degrades to an opaque string scalar; this
    /// entry point never fails.
    pub fn infer_text(&self, input: &str) -> Vec<Table> {
        match serde_json::from_str::<Value>(input) {
            Ok(value) => self.run(&value),
            Err(_) => self.run(&Value::String(input.to_string())),
        }
    }

    /// Infer the table layout of JSON text, failing on malformed input.
    ///
    /// Unlike [`infer_text`](Self::infer_text), malformed text surfaces as
    /// [`Error::JsonParse`](crate::Error::JsonParse) instead of degrading to
    /// a string scalar.
    pub fn infer_text_strict(&self, input: &str) -> Result<Vec<Table>> {
        let value: Value = serde_json::from_str(input)?;
        Ok(self.run(&value))
    }

    fn run(&self, input: &Value) -> Vec<Table> {
        let mut walk = Walker {
            next_id: 1,
            tables: Vec::new(),
            detect_dates: self.detect_dates,
        };
        walk.dispatch(input, &self.root_name);
        debug!(tables = walk.tables.len(), "inferred table layout");
        walk.tables
    }
}

/// Infer the table layout of a JSON value with default settings.
///
/// See [`TableInferrer::infer`].
pub fn parse_json_to_tables(input: &Value) -> Vec<Table> {
    TableInferrer::new().infer(input)
}

/// Infer the table layout of JSON text with default settings.
///
/// See [`TableInferrer::infer_text`].
pub fn parse_json_text(input: &str) -> Vec<Table> {
    TableInferrer::new().infer_text(input)
}

/// Per-run state: the id counter and the output list
struct Walker {
    next_id: u32,
    tables: Vec<Table>,
    detect_dates: bool,
}

impl Walker {
    fn kind_of(&self, value: &Value) -> ValueKind {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) => {
                // integer means no fractional part, so 5.0 and 1e3 qualify
                // even though serde_json keeps them as floats
                if n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                    ValueKind::Integer
                } else {
                    ValueKind::Decimal
                }
            }
            Value::String(s) => {
                if self.detect_dates && is_valid_date(s) {
                    ValueKind::Date
                } else {
                    ValueKind::String
                }
            }
            Value::Array(_) | Value::Object(_) => ValueKind::Object,
        }
    }

    /// Kind of the first non-null element. An array with no non-null element
    /// classifies as `Object` and decomposes to an empty-field table.
    fn element_kind(&self, items: &[Value]) -> ValueKind {
        items
            .iter()
            .find(|v| !v.is_null())
            .map_or(ValueKind::Object, |v| self.kind_of(v))
    }

    /// True for values that decompose into their own table: plain objects
    /// and non-empty arrays of objects. Anything else stays a field of (or
    /// is absent from) the owning table.
    fn is_structural(&self, value: &Value) -> bool {
        match value {
            Value::Object(_) => true,
            Value::Array(items) => {
                !items.is_empty() && self.element_kind(items) == ValueKind::Object
            }
            _ => false,
        }
    }

    /// Create a table and return its index in the output list.
    fn add_table(&mut self, name: &str, parent_id: u32) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        trace!(id, table = name, parent_id, "table created");
        self.tables.push(Table::new(id, name, parent_id));
        self.tables.len() - 1
    }

    /// Top-level dispatch over the three input shapes.
    fn dispatch(&mut self, input: &Value, root_name: &str) {
        match input {
            Value::Array(items) => match self.element_kind(items) {
                ValueKind::Object => self.object_array(items, root_name, 0),
                kind => {
                    let idx = self.add_table(root_name, 0);
                    self.tables[idx].push_field(Field::array(root_name, kind));
                    self.tables[idx].update_layout();
                }
            },
            Value::Object(map) => {
                let has_scalar = map.values().any(|v| !self.is_structural(v));
                if has_scalar {
                    self.object_node(map, root_name, 0);
                } else {
                    // Purely structural container: no synthesized root table,
                    // every property becomes its own top-level tree.
                    self.container_node(map);
                }
            }
            scalar => {
                let kind = self.kind_of(scalar);
                let idx = self.add_table(root_name, 0);
                self.tables[idx].push_field(Field::scalar(root_name, kind));
                self.tables[idx].update_layout();
            }
        }
    }

    /// Top-level object whose every property is structural: each property
    /// becomes its own top-level tree, no synthesized root.
    fn container_node(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            match value {
                Value::Object(nested) => self.object_node(nested, key, 0),
                Value::Array(items) => self.object_array(items, key, 0),
                // ruled out by the structural check
                _ => {}
            }
        }
    }

    /// One JSON object becomes one table; nested structures recurse as
    /// children keyed by their property name.
    fn object_node(&mut self, map: &Map<String, Value>, name: &str, parent_id: u32) {
        let idx = self.add_table(name, parent_id);
        let table_id = self.tables[idx].id;

        for (key, value) in map {
            match value {
                // empty arrays are treated as absent
                Value::Array(items) if items.is_empty() => {}
                Value::Array(items) => match self.element_kind(items) {
                    ValueKind::Object => self.object_array(items, key, table_id),
                    kind => self.tables[idx].push_field(Field::array(key, kind)),
                },
                Value::Object(nested) => self.object_node(nested, key, table_id),
                scalar => {
                    let kind = self.kind_of(scalar);
                    self.tables[idx].push_field(Field::scalar(key, kind));
                }
            }
        }

        self.tables[idx].update_layout();
    }

    /// An array of objects becomes one table holding the union of the
    /// elements' scalar fields, merged in first-occurrence order; nested
    /// structures become descendant tables in a second pass, after the
    /// merged table is finalized.
    fn object_array(&mut self, items: &[Value], name: &str, parent_id: u32) {
        if items.is_empty() {
            return;
        }

        let mut merged: Vec<Field> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for item in items {
            let Value::Object(map) = item else { continue };
            for (key, value) in map {
                match value {
                    Value::Array(inner) if inner.is_empty() => {}
                    Value::Array(inner) => {
                        let kind = self.element_kind(inner);
                        if kind != ValueKind::Object && seen.insert(key) {
                            merged.push(Field::array(key, kind));
                        }
                    }
                    Value::Object(_) => {}
                    scalar => {
                        let kind = self.kind_of(scalar);
                        if seen.insert(key) {
                            merged.push(Field::scalar(key, kind));
                        }
                    }
                }
            }
        }

        let idx = self.add_table(name, parent_id);
        let table_id = self.tables[idx].id;
        self.tables[idx].fields = merged;
        self.tables[idx].update_layout();

        for item in items {
            let Value::Object(map) = item else { continue };
            for (key, value) in map {
                match value {
                    Value::Object(nested) => self.object_node(nested, key, table_id),
                    Value::Array(inner)
                        if !inner.is_empty()
                            && self.element_kind(inner) == ValueKind::Object =>
                    {
                        self.object_array(inner, key, table_id);
                    }
                    _ => {}
                }
            }
        }
    }
}
