//! Serializer field selection
//!
//! Only a fixed set of primitive and math types can be written to an
//! archive directly. Enums declared in the same file are written by name.

use reflector_parser::{EnumDecl, PropertyDecl, RecordDecl};

/// Decorator that excludes a property from its type's serializer.
pub const DONT_SERIALIZE: &str = "DontSerialize";

/// Property types the archive knows how to write.
pub const SERIALIZABLE_TYPES: &[&str] = &[
    "int8",
    "uint8",
    "int16",
    "uint16",
    "int32",
    "uint32",
    "int64",
    "uint64",
    "bool",
    "float",
    "double",
    "char*",
    "const char*",
    "std::string",
    "std::string_view",
    "const std::string",
    "const std::string_view",
    "std::string&",
    "std::string_view&",
    "const std::string&",
    "const std::string_view&",
    "int",
    "long",
    "unsigned",
    "unsigned long",
    "long int",
    "unsigned long int",
    "unsigned int",
    "unsigned long long",
    "long long",
    "Vector2",
    "Vector3",
    "Vector4",
    "Color",
    "Quaternion",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Written with the archive's own `operator<<`.
    Value,
    /// Written as `"Enum::Value"` through the registry's enum table.
    Enum(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedField {
    pub property: String,
    pub kind: FieldKind,
}

/// Classify a property type, or `None` if it cannot be serialized.
pub fn classify(ty: &str, enums: &[EnumDecl]) -> Option<FieldKind> {
    if SERIALIZABLE_TYPES.contains(&ty) {
        return Some(FieldKind::Value);
    }
    enums
        .iter()
        .find(|e| e.name == ty)
        .map(|e| FieldKind::Enum(e.name.clone()))
}

fn field(property: &PropertyDecl, enums: &[EnumDecl]) -> Option<SerializedField> {
    if property.decorators.has(DONT_SERIALIZE) {
        return None;
    }
    match classify(&property.ty, enums) {
        Some(kind) => Some(SerializedField {
            property: property.name.clone(),
            kind,
        }),
        None => {
            tracing::trace!(
                "'{}' of type '{}' is not serializable",
                property.name,
                property.ty
            );
            None
        }
    }
}

/// The record's own serializable properties, in declaration order.
pub fn serialized_fields(record: &RecordDecl, enums: &[EnumDecl]) -> Vec<SerializedField> {
    record
        .properties
        .iter()
        .filter_map(|p| field(p, enums))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_parser::{Decorator, DecoratorList, EnumValue, RecordKind};

    fn team() -> EnumDecl {
        EnumDecl {
            name: "Team".into(),
            path: "Team.h".into(),
            values: vec![EnumValue {
                name: "Red".into(),
                value: 0,
            }],
            scoped: true,
        }
    }

    fn prop(ty: &str, name: &str, decorators: DecoratorList) -> PropertyDecl {
        PropertyDecl {
            ty: ty.into(),
            name: name.into(),
            decorators,
            line: 1,
        }
    }

    #[test]
    fn test_classify_primitives() {
        assert_eq!(classify("float", &[]), Some(FieldKind::Value));
        assert_eq!(classify("unsigned long long", &[]), Some(FieldKind::Value));
        assert_eq!(classify("const std::string&", &[]), Some(FieldKind::Value));
        assert_eq!(classify("Quaternion", &[]), Some(FieldKind::Value));
    }

    #[test]
    fn test_classify_rejects_unknown_types() {
        assert_eq!(classify("std::vector<int>", &[]), None);
        assert_eq!(classify("Team", &[]), None);
        assert_eq!(classify("int32*", &[]), None);
    }

    #[test]
    fn test_classify_same_file_enum() {
        assert_eq!(classify("Team", &[team()]), Some(FieldKind::Enum("Team".into())));
    }

    #[test]
    fn test_dont_serialize_and_unknown_are_skipped() {
        let mut record = RecordDecl::new(RecordKind::Class, "Player", "Player.h");
        record.properties = vec![
            prop("int32", "Health", DecoratorList::new()),
            prop("float", "Cooldown", [Decorator::new(DONT_SERIALIZE)].into_iter().collect()),
            prop("Mesh*", "Body", DecoratorList::new()),
            prop("Team", "Side", DecoratorList::new()),
        ];

        let fields = serialized_fields(&record, &[team()]);
        assert_eq!(
            fields,
            [
                SerializedField {
                    property: "Health".into(),
                    kind: FieldKind::Value
                },
                SerializedField {
                    property: "Side".into(),
                    kind: FieldKind::Enum("Team".into())
                },
            ]
        );
    }
}
