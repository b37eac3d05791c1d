//! Recursive example extraction.
//!
//! [`Extractor::extract`] walks a schema node and builds an example value
//! bottom-up. Property lists are resolved by
//! [`Extractor::map_properties_to_examples`], which calls back into `extract`
//! for nested nodes.
//!
//! Self-references (`rel: "self"`) always resolve against the current root:
//! the nearest enclosing node with an `id`, or the document originally passed
//! in. Cyclic schemas recurse until the configured depth limit, or forever
//! when none is set.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Map, Value};

use crate::{
    config::{DepthLimitMode, ExtractConfig},
    error::{ExtractError, Result},
    leaf::resolve_leaf,
    schema::{self, ALL_OF, ANY_OF, HIDDEN_PREFIX, ITEMS, ONE_OF, PROPERTIES, REL, SchemaNode},
};

/// Extraction state: configuration, array length generator and the keyword
/// trail used in diagnostics.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractConfig,
    rng: StdRng,
    trail: Vec<String>,
    depth: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

impl Extractor {
    /// Create an extractor. A configured seed makes array lengths reproducible.
    pub fn new(config: ExtractConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            trail: Vec::new(),
            depth: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract an example for `component`, resolving self-references against
    /// `root` until a node with an `id` takes over.
    ///
    /// # Errors
    ///
    /// [`ExtractError::InvalidSchema`] when `component`, or any node reached
    /// while walking it, is absent or falsy. [`ExtractError::DepthExceeded`]
    /// when a depth limit is configured in error mode.
    pub fn extract(&mut self, component: Option<&Value>, root: &Value) -> Result<Value> {
        self.reset();
        self.extract_node(component, root)
    }

    /// Extract a whole document against itself.
    pub fn extract_document(&mut self, document: &Value) -> Result<Value> {
        self.extract(Some(document), document)
    }

    /// Resolve a `properties` mapping into a mapping of examples.
    ///
    /// `schema` is the root currently in scope; it is passed through to
    /// nested extractions unchanged.
    pub fn map_properties_to_examples(
        &mut self,
        props: &Map<String, Value>,
        schema: &Value,
    ) -> Result<Map<String, Value>> {
        self.reset();
        self.map_properties(props, schema)
    }

    fn reset(&mut self) {
        self.trail.clear();
        self.depth = 0;
    }

    fn path(&self) -> String {
        if self.trail.is_empty() {
            return "$".to_string();
        }
        format!("$.{}", self.trail.join("."))
    }

    fn descend<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.trail.push(segment.into());
        let out = f(self);
        self.trail.pop();
        out
    }

    fn extract_node(&mut self, component: Option<&Value>, root: &Value) -> Result<Value> {
        let Some(component) = component.filter(|c| schema::is_truthy(c)) else {
            return Err(ExtractError::invalid_schema(self.path()));
        };

        if let Some(limit) = self.config.max_depth
            && self.depth >= limit
        {
            return match self.config.on_depth_limit {
                DepthLimitMode::Error => Err(ExtractError::depth_exceeded(limit, self.path())),
                DepthLimitMode::Truncate => {
                    debug!("depth limit {limit} reached at `{}`, truncating", self.path());
                    Ok(Value::Null)
                }
            };
        }

        trace!("extracting `{}`", self.path());
        self.depth += 1;
        let example = self.extract_scoped(component, root);
        self.depth -= 1;
        example
    }

    fn extract_scoped(&mut self, component: &Value, root: &Value) -> Result<Value> {
        let node = SchemaNode::new(component);
        let root = match node.id() {
            Some(id) => {
                debug!("root scope switched to {id} at `{}`", self.path());
                component
            }
            None => root,
        };

        if node.is_array_type() {
            return self.extract_array(&node, root);
        }

        let mut example = self.compose(&node, root)?;
        if let Some(props) = node.properties() {
            let mapped = self.descend(PROPERTIES, |this| this.map_properties(props, root))?;
            example = merge(example, Value::Object(mapped));
        }
        Ok(example)
    }

    fn extract_array(&mut self, node: &SchemaNode<'_>, root: &Value) -> Result<Value> {
        let count = self.item_count(node);
        debug!("generating {count} item(s) at `{}`", self.path());
        let items = node.items();
        (0..count)
            .map(|idx| {
                self.descend(format!("items[{idx}]"), |this| {
                    this.extract_node(items, root)
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn item_count(&mut self, node: &SchemaNode<'_>) -> u64 {
        let (min, max) = (node.min_items(), node.max_items());
        if min > max {
            warn!(
                "minItems {min} exceeds maxItems {max} at `{}`, generating {min}",
                self.path()
            );
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Base value of a non-array node, from the first composition keyword it
    /// declares in `allOf`, `oneOf`, `anyOf`, `rel: "self"` order.
    fn compose(&mut self, node: &SchemaNode<'_>, root: &Value) -> Result<Value> {
        if let Some(subschemas) = node.composition(ALL_OF) {
            return self.fold_all_of(subschemas, Value::Object(Map::new()), root);
        }
        for keyword in [ONE_OF, ANY_OF] {
            if let Some(variants) = node.composition(keyword) {
                debug!("`{keyword}` at `{}` resolved to its first variant", self.path());
                return self.descend(format!("{keyword}[0]"), |this| {
                    this.extract_node(variants.first(), root)
                });
            }
        }
        if node.is_self_rel() {
            return self.descend(REL, |this| this.extract_node(Some(root), root));
        }
        Ok(Value::Object(Map::new()))
    }

    fn fold_all_of(&mut self, subschemas: &[Value], base: Value, root: &Value) -> Result<Value> {
        subschemas
            .iter()
            .enumerate()
            .try_fold(base, |acc, (idx, subschema)| {
                let part = self.descend(format!("{ALL_OF}[{idx}]"), |this| {
                    this.extract_node(Some(subschema), root)
                })?;
                Ok(merge(acc, part))
            })
    }

    fn map_properties(
        &mut self,
        props: &Map<String, Value>,
        schema: &Value,
    ) -> Result<Map<String, Value>> {
        let mut examples = Map::new();
        for (name, prop_config) in props {
            if name.starts_with(HIDDEN_PREFIX) || SchemaNode::new(prop_config).is_private() {
                trace!("skipping property `{name}`");
                continue;
            }

            let example =
                self.descend(name.as_str(), |this| this.property_example(prop_config, schema))?;
            let key = if name == "ID" && !self.config.preserve_id_case {
                "id".to_string()
            } else {
                name.clone()
            };
            examples.insert(key, example.unwrap_or(Value::Null));
        }
        Ok(examples)
    }

    fn property_example(&mut self, prop_config: &Value, schema: &Value) -> Result<Option<Value>> {
        let config = SchemaNode::new(prop_config);
        let mut example = resolve_leaf(prop_config, &self.config.placeholder);

        if config.is_self_rel() {
            return self.extract_node(Some(schema), schema).map(Some);
        }

        if config.is_array_type()
            && example.is_none()
            && let Some(items) = config.items()
        {
            let item = match SchemaNode::new(items).example() {
                Some(literal) => literal.clone(),
                None => self.descend(ITEMS, |this| this.extract_node(Some(items), schema))?,
            };
            return Ok(Some(Value::Array(vec![item])));
        }

        if config.has_id() && example.is_none() {
            return self.extract_node(Some(prop_config), prop_config).map(Some);
        }

        if config.composition(ONE_OF).is_some() || config.composition(ANY_OF).is_some() {
            example = Some(self.extract_node(Some(prop_config), schema)?);
        } else if let Some(subschemas) = config.composition(ALL_OF) {
            let base = example.unwrap_or_else(|| Value::Object(Map::new()));
            example = Some(self.fold_all_of(subschemas, base, schema)?);
        }

        if let Some(nested) = config.properties() {
            let mapped = self.descend(PROPERTIES, |this| this.map_properties(nested, schema))?;
            let base = example.unwrap_or_else(|| Value::Object(Map::new()));
            example = Some(merge(base, Value::Object(mapped)));
        }

        Ok(example)
    }
}

/// Overlay the keys of `overlay` onto `base`, later keys winning.
///
/// A base that is not an object is replaced by an empty one; an overlay that
/// is not an object contributes nothing.
fn merge(base: Value, overlay: Value) -> Value {
    let entries = match overlay {
        Value::Object(entries) => entries,
        other => {
            warn!("ignoring non-object value in merge: {other}");
            return base;
        }
    };
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(entries);
    Value::Object(merged)
}

/// Extract with the default configuration.
///
/// See [`Extractor::extract`].
pub fn extract(component: Option<&Value>, root: &Value) -> Result<Value> {
    Extractor::default().extract(component, root)
}

/// Map a `properties` mapping with the default configuration.
///
/// See [`Extractor::map_properties_to_examples`].
pub fn map_properties_to_examples(
    props: &Map<String, Value>,
    schema: &Value,
) -> Result<Map<String, Value>> {
    Extractor::default().map_properties_to_examples(props, schema)
}
