//! Declaration model produced by the parser.

use std::path::{Path, PathBuf};

/// A name with an ordered list of values attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    pub name: String,
    pub values: Vec<String>,
}

impl Decorator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decorators in declaration order.
///
/// Names are not unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoratorList(Vec<Decorator>);

impl DecoratorList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, decorator: Decorator) {
        self.0.push(decorator);
    }

    pub fn get(&self, name: &str) -> Option<&Decorator> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Values of the first decorator named `name`, empty if absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name).map(|d| d.values.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decorator> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Decorator> for DecoratorList {
    fn from_iter<I: IntoIterator<Item = Decorator>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DecoratorList {
    type Item = &'a Decorator;
    type IntoIter = std::slice::Iter<'a, Decorator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A reflected data member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Declared type, captured as written (`const std::string`, `TArray<int32>`).
    pub ty: String,
    pub name: String,
    pub decorators: DecoratorList,
    pub line: u32,
}

impl PropertyDecl {
    /// Whether the declared type cannot be assigned through a setter:
    /// references, arrays, and types whose outermost level is `const`.
    ///
    /// Only a `const` after the last top-level `*` qualifies the member
    /// itself, so `const char*` is writable and `Mesh* const` is not.
    /// Template arguments are ignored.
    pub fn is_read_only(&self) -> bool {
        if self.ty.ends_with('&') || self.ty.ends_with(']') {
            return true;
        }

        let mut depth = 0usize;
        let mut word = String::new();
        let mut outer_const = false;
        for ch in self.ty.chars().chain(std::iter::once(' ')) {
            if ch.is_alphanumeric() || ch == '_' {
                if depth == 0 {
                    word.push(ch);
                }
                continue;
            }
            if word == "const" {
                outer_const = true;
            }
            word.clear();
            match ch {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                '*' if depth == 0 => outer_const = false,
                _ => {}
            }
        }
        outer_const
    }
}

/// A reflected member function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub return_ty: String,
    pub name: String,
    /// Parameter list. Never populated; parameters are only logged.
    pub arguments: Vec<String>,
    pub decorators: DecoratorList,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Class,
    Struct,
}

impl RecordKind {
    pub fn keyword(self) -> &'static str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Struct => "struct",
        }
    }
}

/// A reflected class or struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub kind: RecordKind,
    pub name: String,
    pub path: PathBuf,
    pub properties: Vec<PropertyDecl>,
    pub methods: Vec<MethodDecl>,
    pub decorators: DecoratorList,
    /// Base classes with access specifiers removed. Always empty for structs.
    pub parents: Vec<String>,
    /// Line of the `GENERATED_BODY()` anchor, if the body has one.
    pub body_line: Option<u32>,
}

impl RecordDecl {
    pub fn new(kind: RecordKind, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: path.into(),
            properties: Vec::new(),
            methods: Vec::new(),
            decorators: DecoratorList::new(),
            parents: Vec::new(),
            body_line: None,
        }
    }

    pub fn is_struct(&self) -> bool {
        self.kind == RecordKind::Struct
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// A reflected enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub path: PathBuf,
    pub values: Vec<EnumValue>,
    /// `enum class` / `enum struct`.
    pub scoped: bool,
}

impl EnumDecl {
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

/// Every reflected declaration found in one file, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDecls {
    pub path: PathBuf,
    pub records: Vec<RecordDecl>,
    pub enums: Vec<EnumDecl>,
}

impl FileDecls {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.enums.is_empty()
    }

    pub fn find_record(&self, name: &str) -> Option<&RecordDecl> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|e| e.name == name)
    }
}
