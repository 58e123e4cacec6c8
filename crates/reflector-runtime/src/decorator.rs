//! Decorators attached to types and properties.

/// Excludes a property from [`crate::own_properties_serializer`].
pub const DONT_SERIALIZE: &str = "DontSerialize";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    pub name: String,
    pub values: Vec<String>,
}

impl Decorator {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A decorator with no values.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// Decorator queries. Names may repeat; the first match wins.
pub trait Decorated {
    fn decorators(&self) -> &[Decorator];

    fn has_decorator(&self, name: &str) -> bool {
        self.decorators().iter().any(|d| d.name == name)
    }

    fn decorator_values(&self, name: &str) -> Option<&[String]> {
        self.decorators()
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.values.as_slice())
    }
}
