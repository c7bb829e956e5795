//! # relmap
//!
//! Infer relational table layouts from arbitrary JSON payloads.
//!
//! Paste-a-payload schema discovery: given any JSON value (or JSON text),
//! `relmap` derives a flat list of table descriptors linked by parent ids.
//! Nested objects become child tables, arrays of objects become merged child
//! tables, and scalar arrays become `"<type>[]"` columns. Each table carries
//! the layout metrics a diagram renderer needs to size boxes and align the
//! type column.
//!
//! ## Quick start
//!
//! ```rust
//! use relmap::parse_json_text;
//!
//! let tables = parse_json_text(r#"{"id": 1, "user": {"name": "Ada"}}"#);
//!
//! assert_eq!(tables.len(), 2);
//! assert_eq!(tables[0].table_name, "root");
//! assert_eq!(tables[1].table_name, "user");
//! assert_eq!(tables[1].parent_id, tables[0].id);
//! ```
//!
//! ## Guarantees
//!
//! - Table ids are unique and strictly increasing from 1 within one run.
//! - Parents always precede their children in the output (pre-order).
//! - Field order is insertion order; merges across array elements keep
//!   first-occurrence order and never overwrite.
//! - Inference is a total, pure function: malformed JSON text degrades to an
//!   opaque string scalar instead of failing. The only fallible entry point
//!   is the explicitly strict one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

/// Error types for relmap
pub mod error;

/// Date-string validation
pub mod datetime;

/// Table-layout inference from JSON values
pub mod tables;

pub use error::{Error, Result};

pub use datetime::is_valid_date;
pub use tables::{
    parse_json_text, parse_json_to_tables, Field, FieldType, Table, TableInferrer, ValueKind,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
