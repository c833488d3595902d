//! Builtin leaf-type validators.
//!
//! Each leaf validator is a pure function over a schema and a present value,
//! returning the (unchanged) value on success or a local [`LeafError`] on
//! failure. Validators chain the way the constraints nest: `string` applies
//! `any`'s size bounds, `alphanumeric` applies `string`'s checks, and so on.
//! Path tagging is the recursive layer's job, not the leaf's.
//!
//! [`Builtins`] is the name → validator dispatch table; additional leaf
//! kinds can be registered on it.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::Schema;

/// Timestamps below this are treated as a seconds encoding supplied where
/// milliseconds were expected. 1990-01-01T00:00:00Z, in milliseconds.
pub const MIN_EPOCH_MS: i64 = 631_152_000_000;

/// Signature shared by every leaf validator.
pub type LeafValidator = fn(&Schema, &Value) -> Result<Value, LeafError>;

/// Dispatch table from leaf type name to validator.
#[derive(Debug, Clone)]
pub struct Builtins {
    table: IndexMap<String, LeafValidator>,
}

impl Builtins {
    /// The standard leaf validator set.
    pub fn standard() -> Self {
        let mut table: IndexMap<String, LeafValidator> = IndexMap::new();
        table.insert("any".to_string(), any as LeafValidator);
        table.insert("string".to_string(), string);
        table.insert("alphanumeric".to_string(), alphanumeric);
        table.insert("base64_buffer".to_string(), base64_buffer);
        table.insert("hex_buffer".to_string(), hex_buffer);
        table.insert("boolean".to_string(), boolean);
        table.insert("buffer".to_string(), buffer);
        table.insert("number".to_string(), number);
        table.insert("integer".to_string(), integer);
        table.insert("epoch_timestamp_ms".to_string(), epoch_timestamp_ms);
        table.insert("ip_address".to_string(), ip_address);
        table.insert("literal".to_string(), literal);
        table.insert("factor".to_string(), factor);
        Self { table }
    }

    /// Registers an additional leaf kind, replacing any existing one.
    pub fn register(&mut self, name: impl Into<String>, validator: LeafValidator) {
        self.table.insert(name.into(), validator);
    }

    pub fn get(&self, name: &str) -> Option<LeafValidator> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered leaf names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reflected type name of a JSON value, for error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interprets a value as binary buffer data.
///
/// JSON has no binary kind; a buffer is carried as an array of byte-valued
/// integers, the serde serialization of `Vec<u8>`.
pub fn as_byte_buffer(value: &Value) -> Option<Vec<u8>> {
    let arr = value.as_array()?;
    arr.iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

/// Canonical size measure: raw byte length for buffer data, else the UTF-8
/// byte length of the compact JSON serialization.
fn value_size(value: &Value) -> usize {
    if let Some(bytes) = as_byte_buffer(value) {
        return bytes.len();
    }
    serde_json::to_string(value).map(|s| s.len()).unwrap_or(0)
}

/// `any`: passes every value, subject only to optional size bounds.
pub fn any(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    if schema.min_size.is_some() || schema.max_size.is_some() {
        let measured = value_size(value);
        if let Some(limit) = schema.max_size {
            if measured > limit {
                return Err(LeafError::SizeTooLarge { measured, limit });
            }
        }
        if let Some(minimum) = schema.min_size {
            if measured < minimum {
                return Err(LeafError::SizeTooSmall { measured, minimum });
            }
        }
    }
    Ok(value.clone())
}

/// `string`: a JSON string, with optional character-count bounds.
pub fn string(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    any(schema, value)?;
    let s = value.as_str().ok_or(LeafError::TypeMismatch {
        expected: "string",
        actual: value_type_name(value),
    })?;
    let len = s.chars().count();
    if let Some(min) = schema.min_length {
        if len < min {
            return Err(LeafError::StringTooShort { min, len });
        }
    }
    if let Some(max) = schema.max_length {
        if len > max {
            return Err(LeafError::StringTooLong { max, len });
        }
    }
    Ok(value.clone())
}

/// `alphanumeric`: a string of `[a-zA-Z0-9]` only; empty passes.
pub fn alphanumeric(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    string(schema, value)?;
    let s = value.as_str().unwrap_or_default();
    if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LeafError::NotAlphanumeric);
    }
    Ok(value.clone())
}

/// `base64_buffer`: a Base64-encoded string with up to two `=` padding
/// characters; length must be a multiple of 4.
pub fn base64_buffer(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    string(schema, value)?;
    let s = value.as_str().unwrap_or_default();
    if s.len() % 4 != 0 {
        return Err(LeafError::Base64Length);
    }
    let trimmed = s.trim_end_matches('=');
    let padding = s.len() - trimmed.len();
    let body_ok = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/');
    if padding > 2 || !body_ok {
        return Err(LeafError::Base64Charset);
    }
    Ok(value.clone())
}

/// `hex_buffer`: a string of `[a-fA-F0-9]` only, with optional length bounds.
pub fn hex_buffer(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    string(schema, value)?;
    let s = value.as_str().unwrap_or_default();
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LeafError::NotHexadecimal);
    }
    Ok(value.clone())
}

/// `boolean`: a JSON boolean, exactly.
pub fn boolean(_schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    if !value.is_boolean() {
        return Err(LeafError::TypeMismatch {
            expected: "boolean",
            actual: value_type_name(value),
        });
    }
    Ok(value.clone())
}

/// `buffer`: binary buffer data, with optional size bounds.
pub fn buffer(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    if as_byte_buffer(value).is_none() {
        return Err(LeafError::TypeMismatch {
            expected: "buffer",
            actual: value_type_name(value),
        });
    }
    any(schema, value)?;
    Ok(value.clone())
}

/// `number`: a JSON number, with optional inclusive bounds.
pub fn number(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    let n = value.as_f64().ok_or(LeafError::TypeMismatch {
        expected: "number",
        actual: value_type_name(value),
    })?;
    if let Some(min) = schema.min_value {
        if n < min {
            return Err(LeafError::BelowMinimum { min, value: n });
        }
    }
    if let Some(max) = schema.max_value {
        if n > max {
            return Err(LeafError::AboveMaximum { max, value: n });
        }
    }
    Ok(value.clone())
}

/// `integer`: a whole number.
pub fn integer(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    number(schema, value)?;
    let n = value.as_f64().unwrap_or_default();
    if n.fract() != 0.0 {
        return Err(LeafError::NotAnInteger { value: n });
    }
    Ok(value.clone())
}

/// `epoch_timestamp_ms`: an integer at or after 1990-01-01T00:00:00Z in
/// milliseconds, rejecting values that look like a seconds encoding.
pub fn epoch_timestamp_ms(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    integer(schema, value)?;
    let ms = value.as_f64().unwrap_or_default() as i64;
    if ms < MIN_EPOCH_MS {
        return Err(LeafError::SecondsTimestamp(ms));
    }
    Ok(value.clone())
}

fn ipv4_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("static pattern")
    })
}

fn ipv6_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)(?:[a-f0-9]{1,4}:){7}[a-f0-9]{1,4}$").expect("static pattern")
    })
}

/// `ip_address`: an IPv4 dotted quad or an 8-group IPv6 address.
pub fn ip_address(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    string(schema, value)?;
    let s = value.as_str().unwrap_or_default();
    if !ipv4_pattern().is_match(s) && !ipv6_pattern().is_match(s) {
        return Err(LeafError::NotAnIpAddress);
    }
    Ok(value.clone())
}

/// `literal`: strictly equal, by value, to the schema's fixed `value`.
pub fn literal(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    let matched = schema.value.as_ref() == Some(value);
    if !matched {
        let expected = schema
            .value
            .as_ref()
            .and_then(|v| serde_json::to_string(v).ok())
            .unwrap_or_else(|| "undefined".to_string());
        let actual = serde_json::to_string(value).unwrap_or_default();
        return Err(LeafError::LiteralMismatch { expected, actual });
    }
    Ok(value.clone())
}

/// `factor`: a string drawn from the schema's enumerated `factors` list.
pub fn factor(schema: &Schema, value: &Value) -> Result<Value, LeafError> {
    string(schema, value)?;
    let s = value.as_str().unwrap_or_default();
    let listed = schema
        .factors
        .as_ref()
        .map(|factors| factors.iter().any(|f| f == s))
        .unwrap_or(false);
    if !listed {
        return Err(LeafError::InvalidFactor);
    }
    Ok(value.clone())
}
