//! Conversion between concrete field types and the dynamic field value.

use serde_json::{Number, Value};

use crate::error::{DictError, Result};

/// Returns a string representation of a JSON value's type.
pub fn value_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Code representation of a raw field value.
///
/// Returns `None` for `Null`, which the engine treats as an absent value.
pub fn code_string(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Mismatch between a stored value and the receiving field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMismatch {
    /// Type the field accepts
    pub expected: &'static str,
    /// Type that was offered
    pub got: &'static str,
}

impl ValueMismatch {
    fn new(expected: &'static str, got: &Value) -> Self {
        Self {
            expected,
            got: value_type(got),
        }
    }
}

/// A field type that can be read and written through `serde_json::Value`.
pub trait FieldValue: Sized {
    /// Current value, or `None` when the field holds nothing.
    fn to_value(&self) -> Option<Value>;

    /// Converts a value for storage into this field type.
    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch>;
}

/// Stores `value` into `slot`, reporting mismatches against `field`.
pub fn store_value<T: FieldValue>(slot: &mut T, field: &str, value: Value) -> Result<()> {
    match T::from_value(value) {
        Ok(converted) => {
            *slot = converted;
            Ok(())
        }
        Err(mismatch) => Err(DictError::TypeMismatch {
            field: field.to_string(),
            expected: mismatch.expected.to_string(),
            got: mismatch.got.to_string(),
        }),
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }

    // Any scalar can land in a string field in its code representation.
    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(ValueMismatch::new("string", &other)),
        }
    }
}

impl FieldValue for char {
    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.to_string()))
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        if let Value::String(s) = &value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(c);
            }
        }
        Err(ValueMismatch::new("char", &value))
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueMismatch::new("boolean", &other)),
        }
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl FieldValue for $t {
            fn to_value(&self) -> Option<Value> {
                Some(Value::from(*self))
            }

            fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
                value
                    .as_i64()
                    .and_then(|v| <$t>::try_from(v).ok())
                    .ok_or_else(|| ValueMismatch::new(stringify!($t), &value))
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl FieldValue for $t {
            fn to_value(&self) -> Option<Value> {
                Some(Value::from(*self))
            }

            fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
                value
                    .as_u64()
                    .and_then(|v| <$t>::try_from(v).ok())
                    .ok_or_else(|| ValueMismatch::new(stringify!($t), &value))
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    fn to_value(&self) -> Option<Value> {
        Number::from_f64(*self).map(Value::Number)
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        value
            .as_f64()
            .ok_or_else(|| ValueMismatch::new("f64", &value))
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Option<Value> {
        Number::from_f64(f64::from(*self)).map(Value::Number)
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| ValueMismatch::new("f32", &value))
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Option<Value> {
        match self {
            Value::Null => None,
            other => Some(other.clone()),
        }
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        Ok(value)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> std::result::Result<Self, ValueMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
