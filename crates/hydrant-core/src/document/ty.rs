use super::Value;
use crate::{Error, Result};

use std::{borrow::Cow, fmt, sync::Arc};

/// Converts one raw value into its typed form.
///
/// Every field type supplies one. The built-in [`Type`] variants carry their
/// own conversions; anything else can be plugged in with [`Type::custom`].
pub trait FieldCoercer: Send + Sync {
    /// Name used in diagnostics and in procedure fingerprints.
    fn name(&self) -> &str;

    fn coerce(&self, value: Value) -> Result<Value>;
}

/// A caller-supplied coercer.
#[derive(Clone)]
pub struct CustomType(Arc<dyn FieldCoercer>);

/// The declared type of a scalar field.
#[derive(Debug, Clone)]
pub enum Type {
    /// Passed through untouched
    Any,
    Bool,
    I32,
    I64,
    F64,
    String,

    /// A document identifier: a string (object id) or an integer
    Id,

    /// An untyped nested document
    Hash,

    /// A list whose items are all coerced to the given type
    List(Box<Type>),

    Custom(CustomType),
}

impl Type {
    pub fn custom(coercer: impl FieldCoercer + 'static) -> Self {
        Self::Custom(CustomType(Arc::new(coercer)))
    }

    pub fn list(item: Type) -> Self {
        Self::List(Box::new(item))
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Any => "any".into(),
            Self::Bool => "bool".into(),
            Self::I32 => "i32".into(),
            Self::I64 => "i64".into(),
            Self::F64 => "f64".into(),
            Self::String => "string".into(),
            Self::Id => "id".into(),
            Self::Hash => "hash".into(),
            Self::List(item) => format!("list<{}>", item.name()).into(),
            Self::Custom(custom) => custom.0.name().into(),
        }
    }

    /// Converts a raw value to this type.
    ///
    /// `Null` passes through for every type.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        match self {
            Self::Any => Ok(value),
            Self::Bool => coerce_bool(value),
            Self::I32 => coerce_i32(value),
            Self::I64 => coerce_i64(value),
            Self::F64 => coerce_f64(value),
            Self::String => coerce_string(value),
            Self::Id => match value {
                Value::String(_) | Value::I64(_) => Ok(value),
                Value::I32(v) => Ok(Value::I64(v as i64)),
                value => Err(Error::type_conversion(value, "Id")),
            },
            Self::Hash => match value {
                Value::Document(_) => Ok(value),
                value => Err(Error::type_conversion(value, "Hash")),
            },
            Self::List(item) => match value {
                Value::List(items) => Ok(Value::List(
                    items
                        .into_iter()
                        .map(|value| item.coerce(value))
                        .collect::<Result<_>>()?,
                )),
                value => Err(Error::type_conversion(value, self.name())),
            },
            Self::Custom(custom) => custom.0.coerce(value),
        }
    }
}

fn coerce_bool(value: Value) -> Result<Value> {
    let converted = match &value {
        Value::Bool(v) => Some(*v),
        Value::I32(v) => Some(*v != 0),
        Value::I64(v) => Some(*v != 0),
        Value::String(v) => match v.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    };

    converted
        .map(Value::Bool)
        .ok_or_else(|| Error::type_conversion(value, "Bool"))
}

fn coerce_i64(value: Value) -> Result<Value> {
    let converted = match &value {
        Value::I64(v) => Some(*v),
        Value::I32(v) => Some(*v as i64),
        Value::Bool(v) => Some(*v as i64),
        Value::F64(v) if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 => {
            Some(*v as i64)
        }
        Value::String(v) => v.trim().parse().ok(),
        _ => None,
    };

    converted
        .map(Value::I64)
        .ok_or_else(|| Error::type_conversion(value, "I64"))
}

fn coerce_i32(value: Value) -> Result<Value> {
    let converted = match coerce_i64(value.clone()) {
        Ok(Value::I64(v)) => i32::try_from(v).ok(),
        _ => None,
    };

    converted
        .map(Value::I32)
        .ok_or_else(|| Error::type_conversion(value, "I32"))
}

fn coerce_f64(value: Value) -> Result<Value> {
    let converted = match &value {
        Value::F64(v) => Some(*v),
        Value::I32(v) => Some(*v as f64),
        Value::I64(v) => Some(*v as f64),
        Value::String(v) => v.trim().parse().ok(),
        _ => None,
    };

    converted
        .map(Value::F64)
        .ok_or_else(|| Error::type_conversion(value, "F64"))
}

fn coerce_string(value: Value) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value),
        Value::Bool(_) | Value::I32(_) | Value::I64(_) | Value::F64(_) => {
            Ok(Value::String(value.to_display_string()))
        }
        value => Err(Error::type_conversion(value, "String")),
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "CustomType({})", self.0.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_passes_through() {
        assert_eq!(Type::I64.coerce(Value::Null).unwrap(), Value::Null);
        assert_eq!(Type::Hash.coerce(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn i32_rejects_out_of_range() {
        let err = Type::I32.coerce(Value::I64(i64::MAX)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert I64 to I32");
    }

    #[test]
    fn list_name_nests() {
        assert_eq!(Type::list(Type::list(Type::I32)).name(), "list<list<i32>>");
    }
}
