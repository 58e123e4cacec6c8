//! Registration plan
//!
//! The intermediate model between parsed declarations and emitted C++.
//! Registration happens in four passes that run across every file of a
//! project, so that a type's parents and enums exist before anything
//! refers to them.

use crate::serialize::{serialized_fields, SerializedField};
use reflector_parser::{DecoratorList, FileDecls, RecordKind};

/// One of the four project-wide registration passes, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationPass {
    Enums,
    Types,
    Inheritance,
    Properties,
}

impl RegistrationPass {
    pub const ALL: [RegistrationPass; 4] = [
        RegistrationPass::Enums,
        RegistrationPass::Types,
        RegistrationPass::Inheritance,
        RegistrationPass::Properties,
    ];

    /// Name of the per-file registration function for this pass.
    pub fn function_name(self, id: &crate::FileId) -> String {
        let suffix = match self {
            RegistrationPass::Enums => "RegisterEnums",
            RegistrationPass::Types => "RegisterTypes",
            RegistrationPass::Inheritance => "RegisterInheritance",
            RegistrationPass::Properties => "RegisterProperties",
        };
        format!("Z_{}_{}", id, suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRegistration {
    pub name: String,
    pub values: Vec<(String, i64)>,
    pub scoped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistration {
    pub name: String,
    pub kind: RecordKind,
    pub decorators: DecoratorList,
    pub body_line: Option<u32>,
    /// Own serializable fields; `None` when the type has no properties.
    pub serializer: Option<Vec<SerializedField>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceEdge {
    pub child: String,
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRegistration {
    pub owner: String,
    pub name: String,
    pub ty: String,
    pub read_only: bool,
    pub decorators: DecoratorList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationPlan {
    pub enums: Vec<EnumRegistration>,
    pub types: Vec<TypeRegistration>,
    pub inheritance: Vec<InheritanceEdge>,
    pub properties: Vec<PropertyRegistration>,
}

impl RegistrationPlan {
    /// Build the plan for one file. Declarations keep source order.
    pub fn from_decls(decls: &FileDecls) -> Self {
        let mut plan = RegistrationPlan::default();

        for decl in &decls.enums {
            plan.enums.push(EnumRegistration {
                name: decl.name.clone(),
                values: decl
                    .values
                    .iter()
                    .map(|v| (v.name.clone(), v.value))
                    .collect(),
                scoped: decl.scoped,
            });
        }

        for record in &decls.records {
            let serializer = if record.properties.is_empty() {
                None
            } else {
                Some(serialized_fields(record, &decls.enums))
            };

            plan.types.push(TypeRegistration {
                name: record.name.clone(),
                kind: record.kind,
                decorators: record.decorators.clone(),
                body_line: record.body_line,
                serializer,
            });

            for parent in &record.parents {
                plan.inheritance.push(InheritanceEdge {
                    child: record.name.clone(),
                    parent: parent.clone(),
                });
            }

            for property in &record.properties {
                plan.properties.push(PropertyRegistration {
                    owner: record.name.clone(),
                    name: property.name.clone(),
                    ty: property.ty.clone(),
                    read_only: property.is_read_only(),
                    decorators: property.decorators.clone(),
                });
            }
        }

        tracing::debug!(
            "plan for {}: {} enums, {} types, {} parents, {} properties",
            decls.path.display(),
            plan.enums.len(),
            plan.types.len(),
            plan.inheritance.len(),
            plan.properties.len()
        );
        plan
    }

    /// Properties registered on `owner`, in declaration order.
    pub fn properties_of<'a>(
        &'a self,
        owner: &'a str,
    ) -> impl Iterator<Item = &'a PropertyRegistration> + 'a {
        self.properties.iter().filter(move |p| p.owner == owner)
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::FieldKind;
    use crate::FileId;
    use reflector_parser::parse_source;

    fn plan(source: &str) -> RegistrationPlan {
        let parsed = parse_source(source, "Test.h");
        assert!(!parsed.has_errors(), "{:?}", parsed.diagnostics.errors());
        RegistrationPlan::from_decls(&parsed.decls)
    }

    #[test]
    fn test_sections_follow_source_order() {
        let plan = plan(
            "GENUM() enum E { A, B };\n\
             GCLASS() class Foo : public Bar, public Baz { GENERATED_BODY(); GPROPERTY() int32 X; GPROPERTY() const int32 Y; };\n\
             GSTRUCT() struct S { GENERATED_BODY(); };",
        );

        assert_eq!(plan.enums.len(), 1);
        assert_eq!(plan.enums[0].values, [("A".to_string(), 0), ("B".to_string(), 1)]);

        let names: Vec<_> = plan.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Foo", "S"]);

        let parents: Vec<_> = plan.inheritance.iter().map(|e| e.parent.as_str()).collect();
        assert_eq!(parents, ["Bar", "Baz"]);
        assert!(plan.inheritance.iter().all(|e| e.child == "Foo"));

        assert_eq!(plan.properties.len(), 2);
        assert!(!plan.properties[0].read_only);
        assert!(plan.properties[1].read_only);
    }

    #[test]
    fn test_serializer_only_with_properties() {
        let plan = plan(
            "GCLASS() class Empty { GENERATED_BODY(); };\n\
             GCLASS() class Opaque { GENERATED_BODY(); GPROPERTY() Mesh* Body; };",
        );
        assert_eq!(plan.types[0].serializer, None);
        assert_eq!(plan.types[1].serializer, Some(vec![]));
    }

    #[test]
    fn test_enum_property_serializes_by_name() {
        let plan = plan(
            "GENUM() enum class Team { Red };\n\
             GCLASS() class P { GENERATED_BODY(); GPROPERTY() Team Side; };",
        );
        let fields = plan.types[0].serializer.as_ref().unwrap();
        assert_eq!(fields[0].kind, FieldKind::Enum("Team".into()));
    }

    #[test]
    fn test_pass_function_names() {
        let id = FileId::parse("0123456a_0123_0123_0123_0123456789ab").unwrap();
        assert_eq!(
            RegistrationPass::Inheritance.function_name(&id),
            "Z_0123456a_0123_0123_0123_0123456789ab_RegisterInheritance"
        );
    }
}
