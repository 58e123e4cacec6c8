//! Serialization sink
//!
//! Serializers write a map per registered type: parents first, then the
//! type's own properties.

use crate::decorator::{Decorated, DONT_SERIALIZE};
use crate::error::{RegistryError, Result};
use crate::object::Object;
use crate::registry::Registry;
use crate::ty::Type;
use crate::value::Value;
use std::sync::Arc;

pub trait Archive {
    fn begin_map(&mut self);

    fn end_map(&mut self);

    fn key(&mut self, key: &str);

    fn value(&mut self, value: &Value);
}

/// Writes `object` as an instance of `ty` into `archive`.
pub type Serializer =
    Arc<dyn Fn(&Registry, &Type, &dyn Object, &mut dyn Archive) -> Result<()> + Send + Sync>;

/// The standard serializer: one map holding every own property of the type
/// not decorated `DontSerialize`. Enum values are written as `Enum::Name`.
pub fn own_properties_serializer() -> Serializer {
    Arc::new(
        |registry: &Registry, ty: &Type, object: &dyn Object, archive: &mut dyn Archive| -> Result<()> {
            archive.begin_map();
            for property in ty.properties() {
                if property.has_decorator(DONT_SERIALIZE) {
                    continue;
                }
                let value = match property.get_value(object)? {
                    Value::Enum { name, value } => {
                        let decl = registry
                            .find_enum(name)
                            .ok_or_else(|| RegistryError::UnknownEnum(name.to_string()))?;
                        Value::Str(format!("{}::{}", name, decl.value_to_string(value)))
                    }
                    other => other,
                };
                archive.key(property.name());
                archive.value(&value);
            }
            archive.end_map();
            Ok(())
        },
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEvent {
    BeginMap,
    EndMap,
    Key(String),
    Value(Value),
}

/// Archive that records what was written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingArchive {
    pub events: Vec<ArchiveEvent>,
}

impl RecordingArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in write order.
    pub fn keys(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ArchiveEvent::Key(k) => Some(k.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value written right after `key`, first occurrence.
    pub fn value_of(&self, key: &str) -> Option<&Value> {
        self.events.windows(2).find_map(|pair| match pair {
            [ArchiveEvent::Key(k), ArchiveEvent::Value(v)] if k == key => Some(v),
            _ => None,
        })
    }
}

impl Archive for RecordingArchive {
    fn begin_map(&mut self) {
        self.events.push(ArchiveEvent::BeginMap);
    }

    fn end_map(&mut self) {
        self.events.push(ArchiveEvent::EndMap);
    }

    fn key(&mut self, key: &str) {
        self.events.push(ArchiveEvent::Key(key.to_string()));
    }

    fn value(&mut self, value: &Value) {
        self.events.push(ArchiveEvent::Value(value.clone()));
    }
}
