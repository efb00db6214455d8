//! Response decoding: status check, JSON parse, shape validation, typed records
//!
//! Each record kind describes its fields in a static [`Shape`]. A body is checked
//! against the shape before serde sees it, so a bad payload is reported by field
//! name and never produces a half-filled record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SwcError};

#[cfg(test)]
mod tests;

const BODY_SNIPPET_CHARS: usize = 200;
const ROOT: &str = "<root>";

/// Type a field's JSON value must have.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Non-negative integer (wide ids, counts)
    Unsigned,
    /// Non-negative integer that fits in 32 bits
    Unsigned32,
    /// Any JSON number
    Float,
    Text,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS[.fff]`
    Timestamp,
    /// A string drawn from a closed set
    OneOf(&'static [&'static str]),
    /// Array of nested records
    Records(&'static Shape),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// May be absent or `null`; when present it must still have the right type.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

#[derive(Debug)]
pub struct Shape {
    pub record: &'static str,
    pub fields: &'static [Field],
}

/// A record the API returns. Fields outside the shape are ignored.
pub trait Record: DeserializeOwned {
    fn shape() -> &'static Shape;
}

/// Parse the timestamp formats the API emits. Date-only values mean midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// First [`BODY_SNIPPET_CHARS`] characters of a body, for error messages.
pub fn body_snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_SNIPPET_CHARS)
        .collect()
}

/// Fail with `ApiStatus` unless `status` is 2xx.
pub fn check_status(status: u16, body: &[u8]) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SwcError::ApiStatus {
            status,
            body_snippet: body_snippet(body),
        })
    }
}

pub fn parse_json(body: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single-record response.
pub fn decode_one<T: Record>(status: u16, body: &[u8]) -> Result<T> {
    check_status(status, body)?;
    let value = parse_json(body)?;
    validate(T::shape(), &value, "")?;
    into_record(T::shape(), value)
}

/// Decode a list response, keeping the order the API delivered.
pub fn decode_many<T: Record>(status: u16, body: &[u8]) -> Result<Vec<T>> {
    check_status(status, body)?;
    let value = parse_json(body)?;
    let shape = T::shape();

    let items = value.as_array().ok_or_else(|| SwcError::SchemaMismatch {
        record: shape.record,
        field: ROOT.to_string(),
        reason: format!("expected an array of records, found {}", describe(&value)),
    })?;
    for (i, item) in items.iter().enumerate() {
        validate(shape, item, &format!("[{i}]"))?;
    }

    into_record(shape, value)
}

fn into_record<T: DeserializeOwned>(shape: &Shape, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| SwcError::SchemaMismatch {
        record: shape.record,
        field: ROOT.to_string(),
        reason: e.to_string(),
    })
}

/// Check `value` against `shape`, reporting the first offending field by path.
pub fn validate(shape: &'static Shape, value: &Value, path: &str) -> Result<()> {
    let object = value.as_object().ok_or_else(|| SwcError::SchemaMismatch {
        record: shape.record,
        field: if path.is_empty() {
            ROOT.to_string()
        } else {
            path.to_string()
        },
        reason: format!("expected an object, found {}", describe(value)),
    })?;

    for field in shape.fields {
        let field_path = join(path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(SwcError::SchemaMismatch {
                    record: shape.record,
                    field: field_path,
                    reason: "missing required field".to_string(),
                });
            }
            None | Some(Value::Null) => {}
            Some(v) => check_kind(shape, field.kind, v, &field_path)?,
        }
    }

    Ok(())
}

fn check_kind(shape: &'static Shape, kind: FieldKind, value: &Value, path: &str) -> Result<()> {
    let mismatch = |reason: String| SwcError::SchemaMismatch {
        record: shape.record,
        field: path.to_string(),
        reason,
    };

    match kind {
        FieldKind::Unsigned if value.is_u64() => Ok(()),
        FieldKind::Unsigned => Err(mismatch(format!(
            "expected a non-negative integer, found {}",
            describe(value)
        ))),
        FieldKind::Unsigned32 if value.as_u64().is_some_and(|n| n <= u64::from(u32::MAX)) => {
            Ok(())
        }
        FieldKind::Unsigned32 if value.is_u64() => Err(mismatch(format!(
            "{value} does not fit in 32 bits"
        ))),
        FieldKind::Unsigned32 => Err(mismatch(format!(
            "expected a non-negative integer, found {}",
            describe(value)
        ))),
        FieldKind::Float if value.is_number() => Ok(()),
        FieldKind::Float => Err(mismatch(format!(
            "expected a number, found {}",
            describe(value)
        ))),
        FieldKind::Text if value.is_string() => Ok(()),
        FieldKind::Text => Err(mismatch(format!(
            "expected a string, found {}",
            describe(value)
        ))),
        FieldKind::Timestamp => match value.as_str() {
            Some(s) if parse_timestamp(s).is_some() => Ok(()),
            Some(s) => Err(mismatch(format!("unrecognized timestamp {s:?}"))),
            None => Err(mismatch(format!(
                "expected a timestamp string, found {}",
                describe(value)
            ))),
        },
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(()),
            Some(s) => Err(mismatch(format!(
                "{s:?} is not one of {}",
                allowed.join(", ")
            ))),
            None => Err(mismatch(format!(
                "expected one of {}, found {}",
                allowed.join(", "),
                describe(value)
            ))),
        },
        FieldKind::Records(nested) => {
            let items = value.as_array().ok_or_else(|| {
                mismatch(format!("expected an array, found {}", describe(value)))
            })?;
            for (i, item) in items.iter().enumerate() {
                validate(nested, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
