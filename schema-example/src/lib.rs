//! # schema-example
//!
//! Generate representative example documents from JSON Schema.
//!
//! The extractor walks a schema's structural keywords and fills every leaf
//! with the author supplied `example`, the `default`, or a placeholder.
//!
//! ## Features
//!
//! - Object `properties`, with `private` and `__`-prefixed fields left out
//! - Arrays with a random length between `minItems` and `maxItems`
//! - `allOf` merging, `oneOf`/`anyOf` resolved to their first variant
//! - Hyper-Schema `rel: "self"` links, scoped by the nearest `id`
//! - Optional depth limit and seeded output through [`ExtractConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_example::extract;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "properties": {
//!         "ID": {"example": "u-1"},
//!         "name": {"default": "Ada"},
//!         "tags": {"type": "array", "items": {"example": "admin"}},
//!         "__audit": {"example": "hidden"}
//!     }
//! });
//!
//! let example = extract(Some(&schema), &schema).unwrap();
//! assert_eq!(example, json!({"id": "u-1", "name": "Ada", "tags": ["admin"]}));
//! ```
//!
//! ## Modules
//!
//! - [`extractor`] - Recursive extraction and property mapping
//! - [`schema`] - Keyword access over raw schema values
//! - [`leaf`] - Leaf value resolution
//! - [`config`] - Extraction options and config files
//! - [`document`] - Schema document loading
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// Extraction options and config file loading.
pub mod config;

/// Schema document loading (JSON and TOML).
pub mod document;

/// Error types and result definitions for extraction.
pub mod error;

/// Recursive example extraction.
pub mod extractor;

/// Leaf value resolution.
pub mod leaf;

/// Keyword access over raw schema values.
pub mod schema;

pub use config::{DepthLimitMode, ExtractConfig};
pub use error::{ExtractError, Result};
pub use extractor::{Extractor, extract, map_properties_to_examples};
pub use serde_json::Value;
