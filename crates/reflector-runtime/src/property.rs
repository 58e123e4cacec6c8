//! Reflected properties
//!
//! A property is registered with a typed getter/setter pair over its owner.
//! The pair is erased to closures over `dyn Object` and [`Value`], and typed
//! access is checked against the recorded [`ValueKind`] at the call site.

use crate::decorator::{Decorated, Decorator};
use crate::error::{RegistryError, Result};
use crate::object::Object;
use crate::value::{PropertyValue, Value, ValueKind};
use std::fmt;

type Getter<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;
type Setter<T, V> = Box<dyn Fn(&mut T, V) + Send + Sync>;

type ErasedGetter = Box<dyn Fn(&dyn Object) -> Result<Value> + Send + Sync>;
type ErasedSetter = Box<dyn Fn(&mut dyn Object, Value) -> Result<()> + Send + Sync>;

/// Typed access to one field of `T`.
pub struct Accessor<T, V> {
    get: Getter<T, V>,
    set: Option<Setter<T, V>>,
}

impl<T: Object, V: PropertyValue> Accessor<T, V> {
    pub fn read_only(get: impl Fn(&T) -> V + Send + Sync + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: None,
        }
    }

    pub fn read_write(
        get: impl Fn(&T) -> V + Send + Sync + 'static,
        set: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Box::new(get),
            set: Some(Box::new(set)),
        }
    }
}

/// Build an [`Accessor`] for a field: `field!(Player, health)` or
/// `field!(Player, id, read_only)`.
#[macro_export]
macro_rules! field {
    ($owner:ty, $field:ident) => {
        $crate::Accessor::<$owner, _>::read_write(
            |object: &$owner| object.$field.clone(),
            |object: &mut $owner, value| object.$field = value,
        )
    };
    ($owner:ty, $field:ident, read_only) => {
        $crate::Accessor::<$owner, _>::read_only(|object: &$owner| object.$field.clone())
    };
}

fn object_mismatch<T>(found: &dyn Object) -> RegistryError {
    RegistryError::ObjectTypeMismatch {
        expected: std::any::type_name::<T>().to_string(),
        found: found.type_name().to_string(),
    }
}

pub struct Property {
    name: String,
    type_name: String,
    kind: ValueKind,
    getter: ErasedGetter,
    setter: Option<ErasedSetter>,
    decorators: Vec<Decorator>,
}

impl Property {
    /// `type_name` is the declared type as written in the source.
    pub fn new<T: Object, V: PropertyValue>(
        name: impl Into<String>,
        type_name: impl Into<String>,
        accessor: Accessor<T, V>,
        decorators: Vec<Decorator>,
    ) -> Self {
        let Accessor { get, set } = accessor;

        let getter: ErasedGetter = Box::new(move |object: &dyn Object| {
            let target = object.part::<T>().ok_or_else(|| object_mismatch::<T>(object))?;
            Ok(get(target).into_value())
        });

        let property = name.into();
        let setter = set.map(|set| -> ErasedSetter {
            let property = property.clone();
            Box::new(move |object: &mut dyn Object, value: Value| {
                let found = value.kind();
                let value = V::from_value(value).ok_or_else(|| RegistryError::PropertyTypeMismatch {
                    property: property.clone(),
                    expected: V::kind(),
                    found,
                })?;
                let found = object.type_name();
                let target = object
                    .part_mut::<T>()
                    .ok_or_else(|| RegistryError::ObjectTypeMismatch {
                        expected: std::any::type_name::<T>().to_string(),
                        found: found.to_string(),
                    })?;
                set(target, value);
                Ok(())
            })
        });

        Self {
            name: property,
            type_name: type_name.into(),
            kind: V::kind(),
            getter,
            setter,
            decorators,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type as written in the source.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    fn check_kind<V: PropertyValue>(&self) -> Result<()> {
        if V::kind() == self.kind {
            Ok(())
        } else {
            Err(RegistryError::PropertyTypeMismatch {
                property: self.name.clone(),
                expected: self.kind,
                found: V::kind(),
            })
        }
    }

    pub fn get<V: PropertyValue>(&self, object: &dyn Object) -> Result<V> {
        self.check_kind::<V>()?;
        let value = self.get_value(object)?;
        let found = value.kind();
        V::from_value(value).ok_or_else(|| RegistryError::PropertyTypeMismatch {
            property: self.name.clone(),
            expected: self.kind,
            found,
        })
    }

    pub fn set<V: PropertyValue>(&self, object: &mut dyn Object, value: V) -> Result<()> {
        self.check_kind::<V>()?;
        self.set_value(object, value.into_value())
    }

    pub fn get_value(&self, object: &dyn Object) -> Result<Value> {
        (self.getter)(object)
    }

    pub fn set_value(&self, object: &mut dyn Object, value: Value) -> Result<()> {
        match &self.setter {
            Some(setter) => setter(object, value),
            None => Err(RegistryError::ReadOnlyProperty(self.name.clone())),
        }
    }
}

impl Decorated for Property {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("read_only", &self.is_read_only())
            .field("decorators", &self.decorators)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object;

    #[derive(Default)]
    struct Stats {
        health: i32,
        name: String,
        id: u64,
    }
    object!(Stats, "Stats");

    #[derive(Default)]
    struct Other;
    object!(Other, "Other");

    #[test]
    fn test_typed_get_and_set() {
        let health = Property::new("Health", "int32", field!(Stats, health), vec![]);
        let mut stats = Stats::default();

        health.set(&mut stats, 25i32).unwrap();
        assert_eq!(stats.health, 25);
        assert_eq!(health.get::<i32>(&stats).unwrap(), 25);
        assert_eq!(health.get_value(&stats).unwrap(), Value::Int(25));
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let name = Property::new("Name", "std::string", field!(Stats, name), vec![]);
        let mut stats = Stats::default();

        assert!(matches!(
            name.get::<i32>(&stats),
            Err(RegistryError::PropertyTypeMismatch { expected: ValueKind::Str, found: ValueKind::Int, .. })
        ));
        assert!(name.set(&mut stats, 3i64).is_err());
        assert!(name.set_value(&mut stats, Value::Bool(true)).is_err());
        assert!(name.set(&mut stats, "Ada".to_string()).is_ok());
        assert_eq!(stats.name, "Ada");
    }

    #[test]
    fn test_wrong_object_is_rejected() {
        let health = Property::new("Health", "int32", field!(Stats, health), vec![]);
        let mut other = Other;

        assert!(matches!(
            health.get::<i32>(&other),
            Err(RegistryError::ObjectTypeMismatch { .. })
        ));
        assert!(health.set(&mut other, 1i32).is_err());
    }

    #[test]
    fn test_read_only() {
        let id = Property::new("Id", "const uint64", field!(Stats, id, read_only), vec![]);
        let mut stats = Stats { id: 9, ..Stats::default() };

        assert!(id.is_read_only());
        assert_eq!(id.get::<u64>(&stats).unwrap(), 9);
        assert_eq!(id.set(&mut stats, 1u64), Err(RegistryError::ReadOnlyProperty("Id".into())));
    }
}
