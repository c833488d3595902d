//! Schema resolution and the recursive validator.
//!
//! [`Constructor`] walks a value against a resolved schema, dispatching to
//! leaf validators for primitive types and recursing into object fields and
//! array elements for compound types. Data-shape problems never fail fast:
//! they are collected with their paths so a single call reports every defect
//! found in one pass. Schema malformation aborts the whole call immediately,
//! since no value of a broken schema can ever be constructed.

use serde_json::Value;

use crate::builtins::{value_type_name, Builtins};
use crate::errors::{ConstructError, ErrorCode, Finding};
use crate::registry::TypeRegistry;
use crate::schema::{Schema, SchemaRef};

/// Severity applied to a per-index array whose length differs from the
/// schema's declared element count. The overlapping indices are validated
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMismatchPolicy {
    /// Error under `strict`, warning otherwise.
    #[default]
    ErrorWhenStrict,
    AlwaysError,
    AlwaysWarn,
}

/// Validation options, passed unchanged through the entire recursion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Extraneous object keys and element-count mismatches become errors.
    pub strict: bool,
    /// Absent values with a schema `default` are filled in.
    pub fill_defaults: bool,
    pub length_mismatch: LengthMismatchPolicy,
}

impl Options {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }
}

/// A successful construct outcome: the sanitized value plus any warnings
/// recorded along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructed {
    pub value: Value,
    pub warnings: Vec<Finding>,
}

/// Per-invocation collection of path-tagged errors and warnings.
#[derive(Debug, Default)]
struct Collector {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl Collector {
    fn error(&mut self, code: ErrorCode, message: impl Into<String>, path: &[String]) {
        self.errors.push(Finding::new(code, message, path));
    }

    fn warning(&mut self, code: ErrorCode, message: impl Into<String>, path: &[String]) {
        self.warnings.push(Finding::new(code, message, path));
    }
}

/// Validates and normalizes values against schema trees.
///
/// Holds a shared reference to the named-type registry; the registry must
/// not be mutated while constructors borrow it, which the borrow checker
/// enforces. Validation itself is synchronous and performs no I/O.
pub struct Constructor<'a> {
    registry: &'a TypeRegistry,
    builtins: Builtins,
}

impl<'a> Constructor<'a> {
    /// Creates a constructor with the standard leaf validator set.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            builtins: Builtins::standard(),
        }
    }

    /// Creates a constructor with a custom leaf dispatch table.
    pub fn with_builtins(registry: &'a TypeRegistry, builtins: Builtins) -> Self {
        Self { registry, builtins }
    }

    /// Checks `value` against `schema` and returns the sanitized value.
    ///
    /// The returned value contains only schema-declared structure; absent
    /// optional fields are omitted rather than null-filled. On failure the
    /// error carries the first problem in dispatch order plus the complete
    /// error and warning lists.
    pub fn construct(
        &self,
        schema: impl Into<SchemaRef>,
        value: &Value,
        options: &Options,
    ) -> Result<Value, ConstructError> {
        self.try_construct(schema, value, options).map(|c| c.value)
    }

    /// Like [`construct`](Self::construct), but also surfaces the warnings
    /// recorded during a successful walk.
    pub fn try_construct(
        &self,
        schema: impl Into<SchemaRef>,
        value: &Value,
        options: &Options,
    ) -> Result<Constructed, ConstructError> {
        let schema_ref = schema.into();
        let mut collector = Collector::default();
        let mut path: Vec<String> = Vec::new();

        let outcome =
            self.construct_node(&schema_ref, Some(value), &mut path, options, &mut collector);

        match outcome {
            Err(fault) => Err(ConstructError::fault(fault)),
            Ok(_) if !collector.errors.is_empty() => Err(ConstructError::from_findings(
                collector.errors,
                collector.warnings,
            )),
            Ok(result) => Ok(Constructed {
                value: result.unwrap_or(Value::Null),
                warnings: collector.warnings,
            }),
        }
    }

    /// Resolves a schema reference to a concrete definition.
    ///
    /// Names resolve through the registry, falling back to builtin leaf
    /// names and the compound kinds. A definition whose `type` names a
    /// registered type is replaced by a deep copy of that entry, so a
    /// registered schema can be aliased without the resolved copy ever
    /// touching the shared registry state.
    fn resolve(&self, schema_ref: &SchemaRef, path: &[String]) -> Result<Schema, Finding> {
        let schema = match schema_ref {
            SchemaRef::Name(name) => match self.registry.get(name) {
                Some(entry) => entry.clone(),
                None if self.builtins.contains(name) || name == "object" || name == "array" => {
                    Schema::of(name.clone())
                }
                None => {
                    return Err(Finding::new(
                        ErrorCode::BadSchema,
                        format!("unknown type name \"{}\".", name),
                        path,
                    ));
                }
            },
            SchemaRef::Inline(inline) => (**inline).clone(),
        };

        if schema.type_name.is_empty() {
            return Err(Finding::new(
                ErrorCode::BadSchema,
                "invalid type definition: expected a string \"type\" field.",
                path,
            ));
        }

        // Named-type indirection: a schema whose `type` aliases a registry
        // entry resolves to a copy of that entry. Substitution only, no
        // merging of the two definitions.
        if let Some(referenced) = self.registry.get(&schema.type_name) {
            return Ok(referenced.clone());
        }

        Ok(schema)
    }

    /// Walks one node. Data problems are recorded in the collector and the
    /// subtree yields `Ok(None)`; schema malformation returns `Err` and
    /// aborts the entire call.
    fn construct_node(
        &self,
        schema_ref: &SchemaRef,
        value: Option<&Value>,
        path: &mut Vec<String>,
        options: &Options,
        collector: &mut Collector,
    ) -> Result<Option<Value>, Finding> {
        let schema = self.resolve(schema_ref, path)?;

        let value = match value {
            Some(v) => v,
            None => {
                if options.fill_defaults {
                    if let Some(default) = schema.default.clone() {
                        return self.construct_present(&schema, &default, path, options, collector);
                    }
                }
                if schema.optional {
                    return Ok(None);
                }
                collector.error(
                    ErrorCode::MissingValue,
                    "required value is undefined.",
                    path,
                );
                return Ok(None);
            }
        };

        self.construct_present(&schema, value, path, options, collector)
    }

    fn construct_present(
        &self,
        schema: &Schema,
        value: &Value,
        path: &mut Vec<String>,
        options: &Options,
        collector: &mut Collector,
    ) -> Result<Option<Value>, Finding> {
        if let Some(leaf) = self.builtins.get(&schema.type_name) {
            return match leaf(schema, value) {
                Ok(constructed) => Ok(Some(constructed)),
                Err(failure) => {
                    collector.error(ErrorCode::BadValue, failure.to_string(), path);
                    Ok(None)
                }
            };
        }

        match schema.type_name.as_str() {
            "object" => self.construct_object(schema, value, path, options, collector),
            "array" => self.construct_array(schema, value, path, options, collector),
            other => Err(Finding::new(
                ErrorCode::SchemaError,
                format!("unknown schema type \"{}\".", other),
                path,
            )),
        }
    }

    fn construct_object(
        &self,
        schema: &Schema,
        value: &Value,
        path: &mut Vec<String>,
        options: &Options,
        collector: &mut Collector,
    ) -> Result<Option<Value>, Finding> {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                collector.error(
                    ErrorCode::BadValue,
                    format!("expected an object, got {}.", value_type_name(value)),
                    path,
                );
                return Ok(None);
            }
        };

        // Untyped object: any object passes through unchanged.
        let fields = match &schema.fields {
            Some(fields) => fields,
            None => return Ok(Some(value.clone())),
        };

        if options.strict {
            for key in object.keys() {
                if !fields.contains_key(key) {
                    collector.error(
                        ErrorCode::UnknownField,
                        format!("key \"{}\" is not in the schema.", key),
                        path,
                    );
                }
            }
        }

        let mut constructed = serde_json::Map::new();
        for (field_name, field_schema) in fields {
            path.push(field_name.clone());
            let child =
                self.construct_node(field_schema, object.get(field_name), path, options, collector);
            path.pop();
            if let Some(field_value) = child? {
                constructed.insert(field_name.clone(), field_value);
            }
        }
        Ok(Some(Value::Object(constructed)))
    }

    fn construct_array(
        &self,
        schema: &Schema,
        value: &Value,
        path: &mut Vec<String>,
        options: &Options,
        collector: &mut Collector,
    ) -> Result<Option<Value>, Finding> {
        let array = match value.as_array() {
            Some(array) => array,
            None => {
                collector.error(
                    ErrorCode::BadValue,
                    format!("expected an array, got {}.", value_type_name(value)),
                    path,
                );
                return Ok(None);
            }
        };

        // A length bound violation stops the subtree before any element
        // validation happens.
        if let Some(min) = schema.min_elements {
            if array.len() < min {
                collector.error(
                    ErrorCode::BadValue,
                    format!(
                        "array too small: expected at least {} elements, got {}.",
                        min,
                        array.len()
                    ),
                    path,
                );
                return Ok(None);
            }
        }
        if let Some(max) = schema.max_elements {
            if array.len() > max {
                collector.error(
                    ErrorCode::BadValue,
                    format!(
                        "array too large: expected at most {} elements, got {}.",
                        max,
                        array.len()
                    ),
                    path,
                );
                return Ok(None);
            }
        }

        if let Some(element_type) = &schema.element_type {
            let mut constructed = Vec::with_capacity(array.len());
            for (index, element) in array.iter().enumerate() {
                path.push(index.to_string());
                let child =
                    self.construct_node(element_type, Some(element), path, options, collector);
                path.pop();
                if let Some(element_value) = child? {
                    constructed.push(element_value);
                }
            }
            return Ok(Some(Value::Array(constructed)));
        }

        if let Some(elements) = &schema.elements {
            if elements.len() != array.len() {
                let message = if array.len() > elements.len() {
                    format!(
                        "array has more elements than allowed: expected {}, got {}.",
                        elements.len(),
                        array.len()
                    )
                } else {
                    format!(
                        "array has fewer elements than expected: expected {}, got {}.",
                        elements.len(),
                        array.len()
                    )
                };
                let as_error = match options.length_mismatch {
                    LengthMismatchPolicy::ErrorWhenStrict => options.strict,
                    LengthMismatchPolicy::AlwaysError => true,
                    LengthMismatchPolicy::AlwaysWarn => false,
                };
                if as_error {
                    collector.error(ErrorCode::BadValue, message, path);
                } else {
                    collector.warning(ErrorCode::BadValue, message, path);
                }
            }

            // Validate the overlapping positions either way.
            let overlap = elements.len().min(array.len());
            let mut constructed = Vec::with_capacity(overlap);
            for (index, element_schema) in elements.iter().take(overlap).enumerate() {
                path.push(index_label(element_schema, index));
                let child = self.construct_node(
                    element_schema,
                    Some(&array[index]),
                    path,
                    options,
                    collector,
                );
                path.pop();
                if let Some(element_value) = child? {
                    constructed.push(element_value);
                }
            }
            return Ok(Some(Value::Array(constructed)));
        }

        // Untyped array: passes through unchanged.
        Ok(Some(value.clone()))
    }
}

/// Path label for a per-index element; named elements carry their label.
fn index_label(element_schema: &SchemaRef, index: usize) -> String {
    if let SchemaRef::Inline(inline) = element_schema {
        if let Some(name) = &inline.name {
            return format!("{} ({})", index, name);
        }
    }
    index.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            "SampleType",
            Schema::object([
                ("testField", SchemaRef::from(Schema::of("string"))),
                ("optField", SchemaRef::from(Schema::of("integer").optional())),
                ("optObject", SchemaRef::from(Schema::of("object").optional())),
            ]),
        );
        registry
    }

    #[test]
    fn test_leaf_values_pass_through_unchanged() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let opts = Options::default();

        assert_eq!(
            ctor.construct(Schema::of("integer"), &json!(123), &opts).unwrap(),
            json!(123)
        );
        assert_eq!(
            ctor.construct(Schema::of("integer"), &json!(-5), &opts).unwrap(),
            json!(-5)
        );
        assert_eq!(
            ctor.construct(Schema::of("number"), &json!(123.45), &opts).unwrap(),
            json!(123.45)
        );
        assert_eq!(
            ctor.construct(Schema::of("string"), &json!("abcd"), &opts).unwrap(),
            json!("abcd")
        );
        assert_eq!(
            ctor.construct(Schema::of("ip_address"), &json!("127.0.0.1"), &opts)
                .unwrap(),
            json!("127.0.0.1")
        );
    }

    #[test]
    fn test_leaf_failure_is_recorded_as_bad_value() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct(Schema::of("integer"), &json!("test"), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadValue);
        assert!(err.message().contains("expected a number"));
        assert!(err.path().is_empty());
    }

    #[test]
    fn test_missing_required_value() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct("SampleType", &json!({}), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingValue);
        assert_eq!(err.path(), &["testField".to_string()]);
        assert!(err.message().contains("required value is undefined"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let value = ctor
            .construct(
                "SampleType",
                &json!({ "testField": "abcd" }),
                &Options::default(),
            )
            .unwrap();
        assert_eq!(value, json!({ "testField": "abcd" }));
    }

    #[test]
    fn test_undeclared_fields_never_appear_in_output() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let value = ctor
            .construct(
                "SampleType",
                &json!({ "testField": "abcd", "extra": true }),
                &Options::default(),
            )
            .unwrap();
        assert_eq!(value, json!({ "testField": "abcd" }));
    }

    #[test]
    fn test_strict_mode_reports_each_unknown_field() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct(
                "SampleType",
                &json!({ "testField": "abcd", "extra": true, "alsoExtra": 1 }),
                &Options::strict(),
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownField);
        let unknown: Vec<&Finding> = err
            .all_errors()
            .iter()
            .filter(|f| f.code == ErrorCode::UnknownField)
            .collect();
        assert_eq!(unknown.len(), 2);
        assert!(unknown[0].message.contains("\"extra\""));
        assert!(unknown[1].message.contains("\"alsoExtra\""));
    }

    #[test]
    fn test_multi_error_completeness() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct(
                "SampleType",
                &json!({
                    "testField": 123,
                    "optField": "wrong-type",
                    "optObject": "another-wrong-type"
                }),
                &Options::strict(),
            )
            .unwrap_err();

        let codes: Vec<ErrorCode> = err.all_errors().iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![ErrorCode::BadValue, ErrorCode::BadValue, ErrorCode::BadValue]
        );
        assert_eq!(err.all_errors()[0].path, vec!["testField".to_string()]);
        assert!(err.all_errors()[0].message.contains("got number"));
        assert_eq!(err.all_errors()[1].path, vec!["optField".to_string()]);
        assert!(err.all_errors()[1].message.contains("got string"));
        assert_eq!(err.all_errors()[2].path, vec!["optObject".to_string()]);
        assert!(err.all_errors()[2].message.contains("got string"));
    }

    #[test]
    fn test_named_type_aliasing_resolves_through_registry() {
        let mut registry = sample_registry();
        registry.register("Alias", Schema::of("SampleType"));
        let ctor = Constructor::new(&registry);

        let value = json!({ "testField": "abcd" });
        assert_eq!(
            ctor.construct("Alias", &value, &Options::default()).unwrap(),
            value
        );
    }

    #[test]
    fn test_resolution_does_not_corrupt_registry() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        // Two walks over the same named type observe identical definitions.
        let value = json!({ "testField": "abcd" });
        let first = ctor.construct("SampleType", &value, &Options::default()).unwrap();
        let second = ctor.construct("SampleType", &value, &Options::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.get("SampleType").unwrap().fields.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_type_name_is_bad_schema() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct("InvalidType", &json!({}), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadSchema);
        assert!(err.message().contains("unknown type name"));
    }

    #[test]
    fn test_unknown_schema_type_aborts_the_walk() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);

        let schema = Schema::object([("badref", Schema::of("BadReference"))]);
        let err = ctor
            .construct(schema, &json!({ "badref": 123 }), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SchemaError);
        assert!(err.message().contains("unknown schema type"));
        // Aborted immediately: the single fault is the whole report.
        assert_eq!(err.all_errors().len(), 1);
    }

    #[test]
    fn test_empty_type_field_is_bad_schema() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);

        let err = ctor
            .construct(Schema::default(), &json!(1), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadSchema);
    }

    #[test]
    fn test_untyped_object_and_array_pass_through() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let opts = Options::default();

        let object = json!({ "a": 1, "b": [true] });
        assert_eq!(ctor.construct(Schema::of("object"), &object, &opts).unwrap(), object);

        let array = json!([1, "two", { "three": 3 }]);
        assert_eq!(ctor.construct(Schema::of("array"), &array, &opts).unwrap(), array);
        assert_eq!(
            ctor.construct(Schema::of("array"), &json!([]), &opts).unwrap(),
            json!([])
        );
    }

    #[test]
    fn test_array_length_bounds_stop_element_validation() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        // Elements would each fail, but the bound failure comes alone.
        let schema = Schema::array_of(Schema::of("integer"))
            .min_elements(2)
            .max_elements(3);

        let err = ctor
            .construct(schema.clone(), &json!(["x"]), &Options::default())
            .unwrap_err();
        assert_eq!(err.all_errors().len(), 1);
        assert!(err.message().contains("too small"));

        let err = ctor
            .construct(schema, &json!(["x", "x", "x", "x"]), &Options::default())
            .unwrap_err();
        assert_eq!(err.all_errors().len(), 1);
        assert!(err.message().contains("too large"));
    }

    #[test]
    fn test_uniform_array_output_length_matches_input() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::array_of(Schema::of("integer"));

        let value = json!([1, 2, 3]);
        assert_eq!(
            ctor.construct(schema, &value, &Options::default()).unwrap(),
            value
        );
    }

    #[test]
    fn test_uniform_array_tags_element_paths_with_indices() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::array_of(Schema::of("integer"));

        let err = ctor
            .construct(schema, &json!([1, "two", 3]), &Options::default())
            .unwrap_err();
        assert_eq!(err.all_errors().len(), 1);
        assert_eq!(err.path(), &["1".to_string()]);
        assert!(err.message().contains("[1]"));
    }

    #[test]
    fn test_per_index_array() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);
        let schema = Schema::tuple([
            SchemaRef::from(Schema::literal("a_literal_string")),
            SchemaRef::from("SampleType"),
        ]);
        let sample = json!({ "testField": "abcd" });

        let value = json!(["a_literal_string", sample.clone()]);
        assert_eq!(
            ctor.construct(schema.clone(), &value, &Options::default()).unwrap(),
            value
        );

        let err = ctor
            .construct(
                schema.clone(),
                &json!([sample.clone(), sample.clone()]),
                &Options::default(),
            )
            .unwrap_err();
        assert!(err.message().contains("expected literal"));

        let err = ctor
            .construct(schema, &json!(["junk"]), &Options::default())
            .unwrap_err();
        assert!(err.message().contains("expected literal"));
    }

    #[test]
    fn test_per_index_length_mismatch_policy() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);
        let schema = Schema::tuple([
            SchemaRef::from(Schema::literal("a_literal_string")),
            SchemaRef::from("SampleType"),
        ]);
        let sample = json!({ "testField": "abcd" });
        let long = json!(["a_literal_string", sample.clone(), sample.clone()]);

        // Non-strict: a warning, and the call still succeeds on the
        // overlapping positions.
        let constructed = ctor
            .try_construct(schema.clone(), &long, &Options::default())
            .unwrap();
        assert_eq!(constructed.value, json!(["a_literal_string", sample.clone()]));
        assert_eq!(constructed.warnings.len(), 1);
        assert!(constructed.warnings[0]
            .message
            .contains("more elements than allowed"));

        // Strict: the same condition is an error.
        let err = ctor.construct(schema.clone(), &long, &Options::strict()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadValue);
        assert!(err.message().contains("more elements than allowed"));

        // Policy override: always an error, even non-strict.
        let opts = Options {
            length_mismatch: LengthMismatchPolicy::AlwaysError,
            ..Default::default()
        };
        assert!(ctor.construct(schema.clone(), &long, &opts).is_err());

        // Policy override: never an error, even strict.
        let opts = Options {
            strict: true,
            length_mismatch: LengthMismatchPolicy::AlwaysWarn,
            ..Default::default()
        };
        let constructed = ctor.try_construct(schema, &long, &opts).unwrap();
        assert_eq!(constructed.warnings.len(), 1);
    }

    #[test]
    fn test_per_index_mismatch_still_validates_overlap() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::tuple([Schema::of("integer"), Schema::of("string")]);

        // Third element is extra and the first is bad; both are reported.
        let err = ctor
            .construct(schema, &json!(["x", "ok", true]), &Options::strict())
            .unwrap_err();
        let codes: Vec<ErrorCode> = err.all_errors().iter().map(|f| f.code).collect();
        assert_eq!(codes, vec![ErrorCode::BadValue, ErrorCode::BadValue]);
        assert_eq!(err.all_errors()[1].path, vec!["0".to_string()]);
    }

    #[test]
    fn test_fill_defaults() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::object([(
            "port",
            Schema::of("integer").with_default(8080),
        )]);

        // Without the flag, the default is ignored.
        let err = ctor
            .construct(schema.clone(), &json!({}), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingValue);

        let opts = Options {
            fill_defaults: true,
            ..Default::default()
        };
        let value = ctor.construct(schema, &json!({}), &opts).unwrap();
        assert_eq!(value, json!({ "port": 8080 }));
    }

    #[test]
    fn test_filled_defaults_are_validated() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::object([(
            "port",
            Schema::of("integer").with_default("not-a-port"),
        )]);

        let opts = Options {
            fill_defaults: true,
            ..Default::default()
        };
        let err = ctor.construct(schema, &json!({}), &opts).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadValue);
        assert_eq!(err.path(), &["port".to_string()]);
    }

    #[test]
    fn test_nested_error_paths() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::object([(
            "nested",
            Schema::object([("inner", Schema::array_of("integer"))]),
        )]);

        let err = ctor
            .construct(
                schema,
                &json!({ "nested": { "inner": [1, "x"] } }),
                &Options::default(),
            )
            .unwrap_err();
        assert_eq!(
            err.path(),
            &["nested".to_string(), "inner".to_string(), "1".to_string()]
        );
        assert!(err.message().contains("nested.inner[1]"));
    }

    #[test]
    fn test_null_is_a_value_not_an_absence() {
        let registry = TypeRegistry::new();
        let ctor = Constructor::new(&registry);
        let schema = Schema::object([("opt", Schema::of("integer").optional())]);

        // Absent key: fine.
        assert!(ctor.construct(schema.clone(), &json!({}), &Options::default()).is_ok());
        // Explicit null: a bad value, optional or not.
        let err = ctor
            .construct(schema, &json!({ "opt": null }), &Options::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadValue);
        assert!(err.message().contains("got null"));
    }

    #[test]
    fn test_idempotence() {
        let registry = sample_registry();
        let ctor = Constructor::new(&registry);

        let input = json!({ "testField": "abcd", "optField": 7, "extra": true });
        let once = ctor.construct("SampleType", &input, &Options::default()).unwrap();
        let twice = ctor.construct("SampleType", &once, &Options::default()).unwrap();
        assert_eq!(once, twice);
    }
}
