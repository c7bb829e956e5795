//! Table-layout inference
//!
//! Turns an arbitrary JSON value (or JSON text) into a flat, ordered list of
//! [`Table`] descriptors linked by parent ids:
//!
//! - nested objects become child tables
//! - arrays of objects become one child table with a merged field set
//! - arrays of scalars become `"<kind>[]"` fields on the owning table
//! - each table carries `width`/`field_type_x` layout hints for rendering

mod inference;
mod types;

pub use inference::{parse_json_text, parse_json_to_tables, TableInferrer};
pub use types::{Field, FieldType, Table, ValueKind};
