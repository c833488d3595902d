//! Function-wrapping adapter.
//!
//! Applies the constructor to a call's argument list before invoking a
//! wrapped function, and to its result list afterwards, so values crossing
//! the call boundary always satisfy the declared schemas. A thin consumer
//! of the constructor's contract; the validation semantics live entirely in
//! [`crate::construct`].

use serde_json::Value;
use thiserror::Error;

use crate::construct::{Constructor, Options};
use crate::errors::ConstructError;
use crate::schema::{Schema, SchemaRef};

/// Declared argument and result schemas of a wrapped function.
///
/// Both lists are validated as per-index arrays, so arity mismatches are
/// reported the same way as any other element-count mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSchema {
    pub arguments: Vec<SchemaRef>,
    pub callback_result: Vec<SchemaRef>,
}

impl FunctionSchema {
    pub fn new<A, R>(arguments: A, callback_result: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<SchemaRef>,
        R: IntoIterator,
        R::Item: Into<SchemaRef>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
            callback_result: callback_result.into_iter().map(Into::into).collect(),
        }
    }
}

/// Failure channels of an enforced call.
#[derive(Debug, Error)]
pub enum EnforceError<E> {
    #[error("called with invalid arguments: {0}")]
    InvalidArguments(ConstructError),
    #[error("returned invalid results: {0}")]
    InvalidResult(ConstructError),
    /// The wrapped function's own error, passed through unfiltered.
    #[error("{0}")]
    Function(E),
}

/// A function wrapped with argument and result type checking.
pub struct Enforced<'a, F> {
    constructor: &'a Constructor<'a>,
    schema: FunctionSchema,
    function: F,
}

impl<'a, F, E> Enforced<'a, F>
where
    F: Fn(&[Value]) -> Result<Vec<Value>, E>,
{
    pub fn new(constructor: &'a Constructor<'a>, schema: FunctionSchema, function: F) -> Self {
        Self {
            constructor,
            schema,
            function,
        }
    }

    /// Invokes the wrapped function with checked arguments, checking its
    /// results on the way out. The function sees the sanitized argument
    /// values, and callers see sanitized results.
    pub fn call(&self, args: &[Value]) -> Result<Vec<Value>, EnforceError<E>> {
        // Arity must match exactly, so check strictly.
        let options = Options::strict();

        let argument_schema = Schema::tuple(self.schema.arguments.clone());
        let checked = self
            .constructor
            .construct(argument_schema, &Value::Array(args.to_vec()), &options)
            .map_err(EnforceError::InvalidArguments)?;
        let checked_args = match checked {
            Value::Array(values) => values,
            other => vec![other],
        };

        let results = (self.function)(&checked_args).map_err(EnforceError::Function)?;

        let result_schema = Schema::tuple(self.schema.callback_result.clone());
        let checked = self
            .constructor
            .construct(result_schema, &Value::Array(results), &options)
            .map_err(EnforceError::InvalidResult)?;
        match checked {
            Value::Array(values) => Ok(values),
            other => Ok(vec![other]),
        }
    }
}
