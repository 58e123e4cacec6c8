//! Reflected enums

/// Name reported for values with no enumerator.
pub const UNKNOWN_VALUE_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    name: String,
    values: Vec<(i64, String)>,
    last: Option<i64>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            last: None,
        }
    }

    /// Add an enumerator. Without an explicit value it takes the previously
    /// added value plus one, or zero for the first. A value that is already
    /// present is renamed.
    pub fn add_value(&mut self, name: impl Into<String>, value: Option<i64>) -> &mut Self {
        let name = name.into();
        let value = value.unwrap_or_else(|| self.last.map_or(0, |last| last.saturating_add(1)));

        match self.values.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = name,
            None => self.values.push((value, name)),
        }
        self.last = Some(value);
        self
    }

    pub fn value_to_string(&self, value: i64) -> &str {
        self.values
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(UNKNOWN_VALUE_NAME, |(_, name)| name.as_str())
    }

    pub fn string_to_value(&self, name: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(_, n)| n == name)
            .map(|(v, _)| *v)
    }

    pub fn has_value(&self, value: i64) -> bool {
        self.values.iter().any(|(v, _)| *v == value)
    }

    pub fn has_value_named(&self, name: &str) -> bool {
        self.values.iter().any(|(_, n)| n == name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enumerators in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (i64, &str)> {
        self.values.iter().map(|(v, n)| (*v, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
