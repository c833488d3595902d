//! Schema type definitions.
//!
//! A [`Schema`] is a tree node describing the expected shape and constraints
//! of a value: a leaf kind (`string`, `integer`, ...), a compound kind
//! (`object`, `array`), or the name of a type registered in a
//! [`TypeRegistry`](crate::registry::TypeRegistry).
//!
//! The wire form is camelCase JSON (`elementType`, `minElements`, ...);
//! on-disk definition files deserialize directly into [`Schema`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema given either by registered name or inline.
///
/// Anywhere a child schema is expected (object fields, array element types,
/// per-index elements, the top-level construct call) a bare string naming a
/// registered or builtin type may stand in for a full definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// Lookup by name in the type registry (or a builtin leaf name).
    Name(String),
    /// Inline definition.
    Inline(Box<Schema>),
}

impl From<&str> for SchemaRef {
    fn from(name: &str) -> Self {
        SchemaRef::Name(name.to_string())
    }
}

impl From<String> for SchemaRef {
    fn from(name: String) -> Self {
        SchemaRef::Name(name)
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        SchemaRef::Inline(Box::new(schema))
    }
}

impl From<&Schema> for SchemaRef {
    fn from(schema: &Schema) -> Self {
        SchemaRef::Inline(Box::new(schema.clone()))
    }
}

/// A single type definition node.
///
/// Only `type` is required; every other field is a constraint that applies
/// to particular kinds (see the leaf validator set for exact semantics).
/// Field order in `fields` is insertion order, and drives both output field
/// order and error ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    /// Leaf kind, `object`, `array`, or a registered type name.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Absent values pass through silently instead of erroring.
    pub optional: bool,

    /// Fill-in value used only when default filling is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Declared fields of an `object` schema. Absent means any object
    /// passes through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<IndexMap<String, SchemaRef>>,

    /// Uniform element schema of an `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<SchemaRef>>,

    /// Per-index element schemas of an `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<SchemaRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_elements: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_elements: Option<usize>,

    /// Character-count bounds for string-like leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Byte-size bounds on the canonical size measure (see `builtins::any`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,

    /// Inclusive numeric bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// Fixed value for the `literal` leaf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Enumerated values for the `factor` leaf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<String>>,

    /// Human-readable label, included in path segments for named
    /// per-index array elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Schema {
    /// A bare schema of the given type, no constraints.
    pub fn of(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// A `literal` schema matching exactly the given value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self {
            type_name: "literal".to_string(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// An `object` schema with the given declared fields, in order.
    pub fn object<I, K, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<SchemaRef>,
    {
        Self {
            type_name: "object".to_string(),
            fields: Some(
                fields
                    .into_iter()
                    .map(|(k, s)| (k.into(), s.into()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// An untyped `object` schema: any object passes through unchanged.
    pub fn any_object() -> Self {
        Self::of("object")
    }

    /// A uniformly typed `array` schema.
    pub fn array_of(element: impl Into<SchemaRef>) -> Self {
        Self {
            type_name: "array".to_string(),
            element_type: Some(Box::new(element.into())),
            ..Default::default()
        }
    }

    /// A per-index typed `array` schema.
    pub fn tuple<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SchemaRef>,
    {
        Self {
            type_name: "array".to_string(),
            elements: Some(elements.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// A `factor` schema over the given enumerated values.
    pub fn factor<I, S>(factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: "factor".to_string(),
            factors: Some(factors.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Marks the value as allowed to be absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attaches a default used only under default filling.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attaches a label used in per-index path segments.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn min_elements(mut self, n: usize) -> Self {
        self.min_elements = Some(n);
        self
    }

    pub fn max_elements(mut self, n: usize) -> Self {
        self.max_elements = Some(n);
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn min_size(mut self, n: usize) -> Self {
        self.min_size = Some(n);
        self
    }

    pub fn max_size(mut self, n: usize) -> Self {
        self.max_size = Some(n);
        self
    }

    pub fn min_value(mut self, n: f64) -> Self {
        self.min_value = Some(n);
        self
    }

    pub fn max_value(mut self, n: f64) -> Self {
        self.max_value = Some(n);
        self
    }
}
