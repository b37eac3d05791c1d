//! Read-only views over raw schema values.
//!
//! Schema documents arrive as untyped [`serde_json::Value`]s. Before the
//! extractor looks at a value it is discriminated with [`SchemaKind`], and
//! keyword lookups go through [`SchemaNode`], which treats every non-mapping
//! value as a node without keywords.

use serde_json::{Map, Value};

/// Scope anchor keyword.
pub const ID: &str = "id";
/// Type keyword, compared against [`ARRAY_TYPE`].
pub const TYPE: &str = "type";
/// `type` value selecting the array branch.
pub const ARRAY_TYPE: &str = "array";
/// Item schema of an array node.
pub const ITEMS: &str = "items";
/// Lower bound of the generated array length.
pub const MIN_ITEMS: &str = "minItems";
/// Upper bound of the generated array length.
pub const MAX_ITEMS: &str = "maxItems";
/// Composition keyword merging every subschema.
pub const ALL_OF: &str = "allOf";
/// Composition keyword resolved to its first subschema.
pub const ONE_OF: &str = "oneOf";
/// Composition keyword resolved to its first subschema.
pub const ANY_OF: &str = "anyOf";
/// Nested field schemas.
pub const PROPERTIES: &str = "properties";
/// Hyper-Schema link relation keyword.
pub const REL: &str = "rel";
/// `rel` value pointing back at the current root.
pub const SELF_REL: &str = "self";
/// Author supplied example value.
pub const EXAMPLE: &str = "example";
/// Default value, used when no example is given.
pub const DEFAULT: &str = "default";
/// Flag excluding a property from the output.
pub const PRIVATE: &str = "private";

/// Property names with this prefix never appear in the output.
pub const HIDDEN_PREFIX: &str = "__";

const DEFAULT_ITEM_COUNT: u64 = 1;

/// Shape of a raw schema value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    /// Key/value mapping, the only shape that carries keywords.
    Mapping(&'a Map<String, Value>),
    /// Ordered sequence.
    Array(&'a [Value]),
    /// String, number or boolean.
    Scalar(&'a Value),
    /// JSON `null`.
    Null,
}

impl<'a> SchemaKind<'a> {
    /// Classify a raw value.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => SchemaKind::Mapping(map),
            Value::Array(items) => SchemaKind::Array(items),
            Value::Null => SchemaKind::Null,
            scalar => SchemaKind::Scalar(scalar),
        }
    }

    /// The fields of a mapping, `None` for every other shape.
    pub fn as_mapping(&self) -> Option<&'a Map<String, Value>> {
        match self {
            SchemaKind::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Loose truthiness used by every keyword check.
///
/// `null`, `false`, zero and the empty string are falsy; everything else,
/// including empty arrays and empty mappings, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Keyword accessors over a schema value.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> SchemaNode<'a> {
    /// Wrap a raw value. Non-mapping values answer `None` to every lookup.
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: SchemaKind::of(value).as_mapping(),
        }
    }

    /// Whether the wrapped value is a key/value mapping.
    pub fn is_mapping(&self) -> bool {
        self.fields.is_some()
    }

    /// Raw keyword lookup.
    pub fn get(&self, keyword: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(keyword))
    }

    fn get_truthy(&self, keyword: &str) -> Option<&'a Value> {
        self.get(keyword).filter(|v| is_truthy(v))
    }

    /// The node's `id`, when it declares a truthy one.
    pub fn id(&self) -> Option<&'a Value> {
        self.get_truthy(ID)
    }

    /// Whether the node anchors a new root scope.
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// `type` is exactly `"array"`.
    pub fn is_array_type(&self) -> bool {
        self.get(TYPE).and_then(Value::as_str) == Some(ARRAY_TYPE)
    }

    /// Item schema, if present and truthy.
    pub fn items(&self) -> Option<&'a Value> {
        self.get_truthy(ITEMS)
    }

    /// `minItems`, defaulting to 1.
    pub fn min_items(&self) -> u64 {
        self.get(MIN_ITEMS)
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_ITEM_COUNT)
    }

    /// `maxItems`, defaulting to 1.
    pub fn max_items(&self) -> u64 {
        self.get(MAX_ITEMS)
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_ITEM_COUNT)
    }

    /// Subschemas of a composition keyword (`allOf`, `oneOf`, `anyOf`).
    ///
    /// Values that are not sequences are ignored.
    pub fn composition(&self, keyword: &str) -> Option<&'a [Value]> {
        self.get(keyword)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// `rel` is `"self"`.
    pub fn is_self_rel(&self) -> bool {
        self.get(REL).and_then(Value::as_str) == Some(SELF_REL)
    }

    /// Nested property schemas.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.get(PROPERTIES).and_then(Value::as_object)
    }

    /// The `example` value, when the key is present.
    pub fn example(&self) -> Option<&'a Value> {
        self.get(EXAMPLE)
    }

    /// The `default` value, when the key is present.
    pub fn default_value(&self) -> Option<&'a Value> {
        self.get(DEFAULT)
    }

    /// `private` is truthy.
    pub fn is_private(&self) -> bool {
        self.get_truthy(PRIVATE).is_some()
    }
}
