//! Registry errors

use crate::value::ValueKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("unknown enum '{0}'")]
    UnknownEnum(String),

    #[error("type '{ty}' has no property '{property}'")]
    UnknownProperty { ty: String, property: String },

    #[error("'{child}' cannot inherit from '{parent}': '{parent}' already derives from '{child}'")]
    InheritanceCycle { child: String, parent: String },

    #[error("property '{property}' holds {expected}, not {found}")]
    PropertyTypeMismatch {
        property: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("expected an object of type '{expected}', found '{found}'")]
    ObjectTypeMismatch { expected: String, found: String },

    #[error("property '{0}' is read-only")]
    ReadOnlyProperty(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
