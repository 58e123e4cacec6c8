//! Property values
//!
//! Typed accessors are erased to [`Value`] so that properties of any type
//! can be stored side by side and written to an archive.

use std::fmt;

/// Type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    /// A reflected enum, by registered name.
    Enum(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Int => write!(f, "signed integer"),
            ValueKind::UInt => write!(f, "unsigned integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Str => write!(f, "string"),
            ValueKind::Enum(name) => write!(f, "enum {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Enum { name: &'static str, value: i64 },
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Enum { name, .. } => ValueKind::Enum(name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Enum { name, value } => write!(f, "{}({})", name, value),
        }
    }
}

/// A Rust type that can back a reflected property.
pub trait PropertyValue: Sized + 'static {
    fn kind() -> ValueKind;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! int_property {
    ($variant:ident, $kind:ident, $wide:ty, $($ty:ty),+) => {
        $(
            impl PropertyValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::$kind
                }

                fn into_value(self) -> Value {
                    Value::$variant(<$wide>::from(self))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

int_property!(Int, Int, i64, i8, i16, i32, i64);
int_property!(UInt, UInt, u64, u8, u16, u32, u64);

impl PropertyValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl PropertyValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl PropertyValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v as f32),
            _ => None,
        }
    }
}

impl PropertyValue for String {
    fn kind() -> ValueKind {
        ValueKind::Str
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// Implement [`PropertyValue`] for a fieldless enum registered under `$name`.
///
/// The enum must convert to `i64` with `From` and back with `TryFrom<i64>`.
#[macro_export]
macro_rules! enum_property {
    ($ty:ty, $name:expr) => {
        impl $crate::PropertyValue for $ty {
            fn kind() -> $crate::ValueKind {
                $crate::ValueKind::Enum($name)
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Enum {
                    name: $name,
                    value: i64::from(self),
                }
            }

            fn from_value(value: $crate::Value) -> Option<Self> {
                match value {
                    $crate::Value::Enum { value, .. } => <$ty>::try_from(value).ok(),
                    _ => None,
                }
            }
        }
    };
}
