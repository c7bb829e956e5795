//! Output model: tables, fields and their type labels

use serde::{Serialize, Serializer};
use std::fmt;

/// Semantic type of a single JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// JSON `null`
    Null,
    /// A string that validates as a date
    Date,
    /// Any other string
    String,
    /// A number with no fractional part
    Integer,
    /// A number with a fractional part
    Decimal,
    /// `true` / `false`
    Boolean,
    /// An object or an array (the engine disambiguates the two itself)
    Object,
}

impl ValueKind {
    /// Lowercase label used in field-type strings
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Date => "date",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Decimal => "decimal",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column type: a scalar kind, or a scalar-array kind rendered `"<kind>[]"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Plain scalar column
    Scalar(ValueKind),
    /// Array-of-scalars column, e.g. `integer[]`
    Array(ValueKind),
}

impl FieldType {
    /// Rendered length of the type label, in characters
    pub(crate) fn label_len(self) -> usize {
        match self {
            FieldType::Scalar(kind) => kind.as_str().len(),
            FieldType::Array(kind) => kind.as_str().len() + 2,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(kind) => write!(f, "{kind}"),
            FieldType::Array(kind) => write!(f, "{kind}[]"),
        }
    }
}

// Serializes as its rendered label so the output matches what the
// rendering layer draws.
impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One column of an inferred table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Key name from the source object, or a synthesized root name
    pub field_name: String,
    /// Inferred column type
    pub field_type: FieldType,
}

impl Field {
    /// Create a scalar field
    pub fn scalar(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field_name: name.into(),
            field_type: FieldType::Scalar(kind),
        }
    }

    /// Create an array-of-scalars field
    pub fn array(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field_name: name.into(),
            field_type: FieldType::Array(kind),
        }
    }
}

/// One inferred relational unit: a JSON object, or an array of objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique id, strictly increasing from 1 within one inference run
    pub id: u32,
    /// The JSON key (or synthesized root name) that produced this table
    pub table_name: String,
    /// Id of the owning table, 0 for top-level tables
    pub parent_id: u32,
    /// Box width layout hint for the rendering layer
    pub width: u32,
    /// X offset of the type column within the box
    pub field_type_x: u32,
    /// Columns in insertion order, names unique per table
    pub fields: Vec<Field>,
}

impl Table {
    pub(crate) fn new(id: u32, table_name: impl Into<String>, parent_id: u32) -> Self {
        Self {
            id,
            table_name: table_name.into(),
            parent_id,
            width: 0,
            field_type_x: 0,
            fields: Vec::new(),
        }
    }

    /// True for tables with no parent
    pub fn is_root(&self) -> bool {
        self.parent_id == 0
    }

    pub(crate) fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Recompute `width` and `field_type_x` from the current field list.
    ///
    /// Called once per table when its fields are finalized. A table with no
    /// fields gets `width = 30` and `field_type_x = 50`.
    pub(crate) fn update_layout(&mut self) {
        let total_len = self
            .fields
            .iter()
            .map(|f| f.field_name.chars().count() + f.field_type.label_len())
            .max()
            .unwrap_or(0) as u32;
        let max_type_len = self
            .fields
            .iter()
            .map(|f| f.field_type.label_len())
            .max()
            .unwrap_or(0) as u32;

        self.width = total_len * 10 + 30;
        // total_len >= max_type_len, so this never underflows
        self.field_type_x = self.width + 20 - max_type_len * 10;
    }
}
