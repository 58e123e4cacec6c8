//! Type registry
//!
//! Maps registered names to [`Type`] and [`Enum`] descriptions. Inheritance
//! is a DAG: edges that would close a cycle are rejected, and each type keeps
//! memoized ancestor and descendant sets so that `has_parent`/`has_child`
//! are set lookups.

use crate::archive::{Archive, Serializer};
use crate::decorator::Decorator;
use crate::enums::Enum;
use crate::error::{RegistryError, Result};
use crate::object::{Object, ObjectBase};
use crate::property::{Accessor, Property};
use crate::ty::Type;
use crate::value::PropertyValue;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::LazyLock;

static GLOBAL: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

/// Name under which [`ObjectBase`] is registered.
pub const OBJECT_BASE: &str = "ObjectBase";

pub struct Registry {
    types: FxHashMap<u32, Type>,
    by_name: FxHashMap<String, u32>,
    enums: Vec<Enum>,
    next_id: u32,
}

impl Registry {
    /// An empty registry holding only [`ObjectBase`].
    pub fn new() -> Self {
        let mut registry = Self {
            types: FxHashMap::default(),
            by_name: FxHashMap::default(),
            enums: Vec::new(),
            next_id: 1,
        };
        registry.add_type::<ObjectBase>(OBJECT_BASE, None, Vec::new());
        registry
    }

    /// The process-wide registry.
    pub fn global() -> &'static RwLock<Registry> {
        &GLOBAL
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Register `T` under `name`. A type already registered under the same
    /// name is replaced, together with its edges and properties.
    pub fn add_type<T: Object + Default>(
        &mut self,
        name: impl Into<String>,
        serializer: Option<Serializer>,
        decorators: Vec<Decorator>,
    ) -> &mut Type {
        let name = name.into();
        if let Some(old) = self.by_name.get(&name).copied() {
            tracing::debug!("replacing type '{}' (id {})", name, old);
            self.remove_type(old);
        }

        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!("registered type '{}' (id {})", name, id);

        self.by_name.insert(name.clone(), id);
        self.types
            .entry(id)
            .or_insert(Type::new::<T>(name, id, serializer, decorators))
    }

    fn remove_type(&mut self, id: u32) {
        self.types.remove(&id);
        for ty in self.types.values_mut() {
            ty.parents.retain(|p| *p != id);
            ty.children.retain(|c| *c != id);
        }
        self.rebuild_closures();
    }

    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.by_name.get(name).and_then(|id| self.types.get(id))
    }

    fn require_type(&self, name: &str) -> Result<&Type> {
        self.find_type(name)
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    fn require_type_mut(&mut self, name: &str) -> Result<&mut Type> {
        let id = self
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))?;
        self.types
            .get_mut(&id)
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    /// Every registered type, ordered by id.
    pub fn all_types(&self) -> Vec<&Type> {
        let mut types: Vec<&Type> = self.types.values().collect();
        types.sort_by_key(|t| t.id);
        types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Default-construct an instance of the named type.
    pub fn construct(&self, name: &str) -> Result<Box<dyn Object>> {
        Ok(self.require_type(name)?.construct())
    }

    // ========================================================================
    // Enums
    // ========================================================================

    /// Register an empty enum under `name`, replacing any previous one.
    pub fn add_enum(&mut self, name: impl Into<String>) -> &mut Enum {
        let decl = Enum::new(name);
        let index = match self.enums.iter().position(|e| e.name() == decl.name()) {
            Some(index) => {
                tracing::debug!("replacing enum '{}'", decl.name());
                self.enums[index] = decl;
                index
            }
            None => {
                self.enums.push(decl);
                self.enums.len() - 1
            }
        };
        &mut self.enums[index]
    }

    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name() == name)
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    // ========================================================================
    // Inheritance
    // ========================================================================

    /// Record that `child` derives from `parent`.
    pub fn add_parent(&mut self, child: &str, parent: &str) -> Result<()> {
        let child_id = self.require_type(child)?.id;
        let parent_id = self.require_type(parent)?.id;

        if child_id == parent_id || self.reachable(parent_id, |t| &t.parents).contains(&child_id) {
            return Err(RegistryError::InheritanceCycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        if let Some(ty) = self.types.get(&child_id) {
            if ty.parents.contains(&parent_id) {
                tracing::debug!("'{}' already derives from '{}'", child, parent);
                return Ok(());
            }
        }

        if let Some(ty) = self.types.get_mut(&child_id) {
            ty.parents.push(parent_id);
        }
        if let Some(ty) = self.types.get_mut(&parent_id) {
            ty.children.push(child_id);
        }

        let mut upward = self.reachable(parent_id, |t| &t.parents);
        upward.insert(parent_id);
        let mut downward = self.reachable(child_id, |t| &t.children);
        downward.insert(child_id);

        for id in &downward {
            if let Some(ty) = self.types.get_mut(id) {
                ty.ancestors.extend(upward.iter().copied());
            }
        }
        for id in &upward {
            if let Some(ty) = self.types.get_mut(id) {
                ty.descendants.extend(downward.iter().copied());
            }
        }

        tracing::debug!("'{}' derives from '{}'", child, parent);
        Ok(())
    }

    /// Every type reachable from `start` along `next`, excluding `start`.
    fn reachable(&self, start: u32, next: impl Fn(&Type) -> &Vec<u32>) -> FxHashSet<u32> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if let Some(ty) = self.types.get(&id) {
                for &other in next(ty) {
                    if visited.insert(other) {
                        stack.push(other);
                    }
                }
            }
        }
        visited.remove(&start);
        visited
    }

    fn rebuild_closures(&mut self) {
        let ids: Vec<u32> = self.types.keys().copied().collect();
        for id in ids {
            let ancestors = self.reachable(id, |t| &t.parents);
            let descendants = self.reachable(id, |t| &t.children);
            if let Some(ty) = self.types.get_mut(&id) {
                ty.ancestors = ancestors;
                ty.descendants = descendants;
            }
        }
    }

    pub fn has_parent_named(&self, child: &str, parent: &str) -> bool {
        match (self.find_type(child), self.find_type(parent)) {
            (Some(child), Some(parent)) => child.has_parent(parent),
            _ => false,
        }
    }

    pub fn has_child_named(&self, parent: &str, child: &str) -> bool {
        match (self.find_type(parent), self.find_type(child)) {
            (Some(parent), Some(child)) => parent.has_child(child),
            _ => false,
        }
    }

    /// Direct parents of `ty`, in registration order.
    pub fn parents_of<'a>(&'a self, ty: &'a Type) -> impl Iterator<Item = &'a Type> + 'a {
        ty.parents.iter().filter_map(move |id| self.types.get(id))
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Register a property on the type named `owner`, whose Rust type must
    /// be `T`.
    pub fn add_property<T: Object, V: PropertyValue>(
        &mut self,
        owner: &str,
        name: impl Into<String>,
        type_name: impl Into<String>,
        accessor: Accessor<T, V>,
        decorators: Vec<Decorator>,
    ) -> Result<()> {
        let ty = self.require_type_mut(owner)?;
        if !ty.is::<T>() {
            return Err(RegistryError::ObjectTypeMismatch {
                expected: owner.to_string(),
                found: std::any::type_name::<T>().to_string(),
            });
        }

        let property = Property::new(name, type_name, accessor, decorators);
        tracing::debug!("registered property '{}::{}'", owner, property.name());
        ty.properties.push(property);
        Ok(())
    }

    /// Find a property on `ty` or, failing that, on its parents depth-first.
    pub fn find_property<'a>(&'a self, ty: &'a Type, name: &str) -> Option<&'a Property> {
        if let Some(property) = ty.property(name) {
            return Some(property);
        }
        self.parents_of(ty)
            .find_map(|parent| self.find_property(parent, name))
    }

    pub fn find_property_named(&self, ty: &str, name: &str) -> Result<&Property> {
        let owner = self.require_type(ty)?;
        self.find_property(owner, name)
            .ok_or_else(|| RegistryError::UnknownProperty {
                ty: ty.to_string(),
                property: name.to_string(),
            })
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize `object` as the named type: every parent first, then the
    /// type's own serializer.
    pub fn serialize(&self, ty: &str, object: &dyn Object, archive: &mut dyn Archive) -> Result<()> {
        let ty = self.require_type(ty)?;
        self.serialize_as(ty, object, archive)
    }

    pub fn serialize_as(&self, ty: &Type, object: &dyn Object, archive: &mut dyn Archive) -> Result<()> {
        for parent in self.parents_of(ty) {
            self.serialize_as(parent, object, archive)?;
        }
        if let Some(serializer) = &ty.serializer {
            serializer(self, ty, object, archive)?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.all_types())
            .field("enums", &self.enums)
            .finish()
    }
}
