//! Registered types

use crate::archive::Serializer;
use crate::decorator::{Decorated, Decorator};
use crate::object::Object;
use crate::property::Property;
use bumpalo::Bump;
use rustc_hash::FxHashSet;
use std::any::TypeId;
use std::fmt;

type Factory = fn() -> Box<dyn Object>;
type ArenaFactory = for<'a> fn(&'a Bump) -> &'a mut dyn Object;

fn construct_boxed<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

fn construct_in_arena<T: Object + Default>(arena: &Bump) -> &mut dyn Object {
    arena.alloc(T::default())
}

/// Runtime description of a reflected type.
pub struct Type {
    pub(crate) name: String,
    pub(crate) id: u32,
    pub(crate) native: TypeId,
    factory: Factory,
    arena_factory: ArenaFactory,

    pub(crate) parents: Vec<u32>,
    pub(crate) children: Vec<u32>,
    /// Transitive closure of `parents`
    pub(crate) ancestors: FxHashSet<u32>,
    /// Transitive closure of `children`
    pub(crate) descendants: FxHashSet<u32>,

    pub(crate) properties: Vec<Property>,
    decorators: Vec<Decorator>,
    pub(crate) serializer: Option<Serializer>,
}

impl Type {
    pub(crate) fn new<T: Object + Default>(
        name: String,
        id: u32,
        serializer: Option<Serializer>,
        decorators: Vec<Decorator>,
    ) -> Self {
        Self {
            name,
            id,
            native: TypeId::of::<T>(),
            factory: construct_boxed::<T>,
            arena_factory: construct_in_arena::<T>,
            parents: Vec::new(),
            children: Vec::new(),
            ancestors: FxHashSet::default(),
            descendants: FxHashSet::default(),
            properties: Vec::new(),
            decorators,
            serializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric id, unique per registration.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Whether instances of `T` are instances of this type.
    pub fn is<T: Object>(&self) -> bool {
        self.native == TypeId::of::<T>()
    }

    /// Default-construct an owned instance.
    pub fn construct(&self) -> Box<dyn Object> {
        (self.factory)()
    }

    /// Default-construct an instance in `arena`. The instance is never
    /// dropped individually; its memory is released with the arena.
    pub fn construct_in<'a>(&self, arena: &'a Bump) -> &'a mut dyn Object {
        (self.arena_factory)(arena)
    }

    /// Direct or transitive parent.
    pub fn has_parent(&self, parent: &Type) -> bool {
        self.ancestors.contains(&parent.id)
    }

    /// Direct or transitive child.
    pub fn has_child(&self, child: &Type) -> bool {
        self.descendants.contains(&child.id)
    }

    /// Own properties, in registration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Own property by name. See [`crate::Registry::find_property`] for
    /// lookups that include parents.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn has_serializer(&self) -> bool {
        self.serializer.is_some()
    }
}

impl Decorated for Type {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("parents", &self.parents)
            .field("children", &self.children)
            .field("properties", &self.properties)
            .field("decorators", &self.decorators)
            .field("has_serializer", &self.serializer.is_some())
            .finish()
    }
}
