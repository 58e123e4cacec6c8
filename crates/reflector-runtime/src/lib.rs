//! Runtime type registry for reflected types.
//!
//! Types, enums, inheritance edges and properties are registered by name,
//! usually in the four passes of [`Registration`], and queried at runtime
//! for construction, property access and serialization.

pub mod archive;
pub mod decorator;
pub mod enums;
pub mod error;
pub mod object;
pub mod property;
pub mod registration;
pub mod registry;
pub mod ty;
pub mod value;

pub use archive::{own_properties_serializer, Archive, ArchiveEvent, RecordingArchive, Serializer};
pub use decorator::{Decorated, Decorator, DONT_SERIALIZE};
pub use enums::{Enum, UNKNOWN_VALUE_NAME};
pub use error::{RegistryError, Result};
pub use object::{Object, ObjectBase};
pub use property::{Accessor, Property};
pub use registration::Registration;
pub use registry::{Registry, OBJECT_BASE};
pub use ty::Type;
pub use value::{PropertyValue, Value, ValueKind};

pub use bumpalo::Bump;
