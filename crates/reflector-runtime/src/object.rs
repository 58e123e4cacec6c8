//! Reflected object trait

use std::any::Any;

/// An instance of a reflected type.
///
/// Inheritance is modelled by embedding: a type whose registered parent
/// owns properties exposes the embedded parent through [`Object::base`] so
/// that the parent's accessors can reach it.
pub trait Object: Any + 'static {
    /// Registered name of the concrete type.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Embedded parent instance, if any.
    fn base(&self) -> Option<&dyn Object> {
        None
    }

    fn base_mut(&mut self) -> Option<&mut dyn Object> {
        None
    }
}

impl dyn Object {
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// The object itself or the first embedded base of type `T`.
    pub fn part<T: Object>(&self) -> Option<&T> {
        match self.downcast_ref::<T>() {
            Some(found) => Some(found),
            None => self.base()?.part::<T>(),
        }
    }

    pub fn part_mut<T: Object>(&mut self) -> Option<&mut T> {
        if self.is::<T>() {
            return self.downcast_mut::<T>();
        }
        self.base_mut()?.part_mut::<T>()
    }
}

/// Implement [`Object`] for a type.
///
/// ```ignore
/// object!(Pawn, "Pawn");
/// object!(Player, "Player", base: pawn);
/// ```
#[macro_export]
macro_rules! object {
    ($ty:ty, $name:expr) => {
        impl $crate::Object for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
    ($ty:ty, $name:expr, base: $field:ident) => {
        impl $crate::Object for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn base(&self) -> Option<&dyn $crate::Object> {
                Some(&self.$field)
            }

            fn base_mut(&mut self) -> Option<&mut dyn $crate::Object> {
                Some(&mut self.$field)
            }
        }
    };
}

/// Root of every reflected hierarchy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ObjectBase;

object!(ObjectBase, "ObjectBase");

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pawn {
        health: i32,
    }
    object!(Pawn, "Pawn");

    #[derive(Default)]
    struct Player {
        pawn: Pawn,
    }
    object!(Player, "Player", base: pawn);

    #[test]
    fn test_downcast() {
        let object: Box<dyn Object> = Box::new(Pawn { health: 3 });
        assert_eq!(object.type_name(), "Pawn");
        assert!(object.is::<Pawn>());
        assert_eq!(object.downcast_ref::<Pawn>().unwrap().health, 3);
        assert!(object.downcast_ref::<Player>().is_none());
    }

    #[test]
    fn test_part_walks_embedded_bases() {
        let mut object: Box<dyn Object> = Box::new(Player::default());
        object.part_mut::<Pawn>().unwrap().health = 7;
        assert_eq!(object.part::<Pawn>().unwrap().health, 7);
        assert!(object.part::<Player>().is_some());
        assert!(object.part::<ObjectBase>().is_none());
    }
}
