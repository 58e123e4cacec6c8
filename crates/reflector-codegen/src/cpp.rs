//! C++ emission for one reflected header.
//!
//! Output layout:
//! 1. header comment
//! 2. duplicate-inclusion guard
//! 3. `CURRENT_FILE_ID` definition
//! 4. one `_<id>_<line>_GENERATED_BODY` macro per record
//! 5. the `_<id>_IMPLEMENTATION` macro, expanded once by the project file
//!
//! Output depends only on the declarations, the file id and the include
//! path, so regenerating an unchanged header is byte-identical.

use crate::file_id::{FileId, CURRENT_FILE_ID_DEFINE};
use crate::plan::{
    EnumRegistration, PropertyRegistration, RegistrationPass, RegistrationPlan, TypeRegistration,
};
use crate::serialize::FieldKind;
use reflector_parser::{DecoratorList, FileDecls, RecordKind};

/// A generated header ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub id: FileId,
    pub include_path: String,
    pub contents: String,
}

/// A `#define` whose body spans several continued lines.
struct MacroBuilder {
    name: String,
    lines: Vec<String>,
}

impl MacroBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn finish(self) -> String {
        let mut output = format!("#define {}", self.name);
        for line in &self.lines {
            output.push_str(" \\\n");
            output.push_str(line);
        }
        output.push('\n');
        output
    }
}

/// Quote `text` as a C++ string literal.
pub fn cpp_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Turn a path into an identifier fragment.
fn guard_fragment(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn decorator_list(decorators: &DecoratorList) -> String {
    if decorators.is_empty() {
        return "{}".to_string();
    }
    let items: Vec<String> = decorators
        .iter()
        .map(|d| {
            let values: Vec<String> = d.values.iter().map(|v| cpp_string(v)).collect();
            if values.is_empty() {
                format!("Meta::Decorator{{ {}, {{}} }}", cpp_string(&d.name))
            } else {
                format!(
                    "Meta::Decorator{{ {}, {{ {} }} }}",
                    cpp_string(&d.name),
                    values.join(", ")
                )
            }
        })
        .collect();
    format!("{{ {} }}", items.join(", "))
}

pub struct CppEmitter<'a> {
    plan: RegistrationPlan,
    id: &'a FileId,
    include_path: &'a str,
    output: String,
}

impl<'a> CppEmitter<'a> {
    /// Generate the header for one parsed source file.
    pub fn emit(decls: &FileDecls, id: &'a FileId, include_path: &'a str) -> GeneratedFile {
        let mut emitter = CppEmitter {
            plan: RegistrationPlan::from_decls(decls),
            id,
            include_path,
            output: String::new(),
        };
        emitter.emit_preamble();
        emitter.emit_bodies();
        emitter.emit_implementation();

        tracing::debug!(
            "generated {} bytes for {} ({})",
            emitter.output.len(),
            include_path,
            id
        );
        GeneratedFile {
            id: id.clone(),
            include_path: include_path.to_string(),
            contents: emitter.output,
        }
    }

    // ========================================================================
    // Names
    // ========================================================================

    fn type_getter(&self, ty: &str) -> String {
        format!("Z_{}_{}_GetType", ty, self.id)
    }

    fn property_getter(&self, owner: &str, property: &str) -> String {
        format!("Z_{}_{}_Get_{}", owner, self.id, property)
    }

    fn property_setter(&self, owner: &str, property: &str) -> String {
        format!("Z_{}_{}_Set_{}", owner, self.id, property)
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn emit_preamble(&mut self) {
        let guard = format!("_META_{}_{}_", guard_fragment(self.include_path), self.id);

        self.output.push_str(&format!(
            "// Generated by reflector from {}. Do not edit.\n\n",
            self.include_path
        ));
        self.output.push_str(&format!("#ifdef {}\n", guard));
        self.output.push_str(&format!(
            "#error \"{0} already included, missing '#pragma once' in {0}\"\n",
            self.include_path
        ));
        self.output.push_str("#endif\n");
        self.output.push_str(&format!("#define {}\n\n", guard));

        self.output.push_str("#undef CURRENT_FILE_ID\n");
        self.output.push_str(&format!("{}{}\n\n", CURRENT_FILE_ID_DEFINE, self.id));

        if !self.plan.types.is_empty() {
            for ty in &self.plan.types {
                self.output
                    .push_str(&format!("const Meta::Type* {}();\n", self.type_getter(&ty.name)));
            }
            self.output.push('\n');
        }
    }

    fn emit_bodies(&mut self) {
        let mut bodies = Vec::new();
        for ty in &self.plan.types {
            match ty.body_line {
                Some(line) => bodies.push(self.body_macro(ty, line)),
                None => tracing::warn!(
                    "'{}' in {} has no GENERATED_BODY(), its properties will not be accessible",
                    ty.name,
                    self.include_path
                ),
            }
        }
        for body in bodies {
            self.output.push_str(&body);
            self.output.push('\n');
        }
    }

    fn body_macro(&self, ty: &TypeRegistration, line: u32) -> String {
        let mut body = MacroBuilder::new(format!("_{}_{}_GENERATED_BODY", self.id, line));

        body.line("private:");
        body.line("\tfriend class Meta::Registry;");
        for prop in self.plan.properties_of(&ty.name) {
            body.line(format!(
                "\tfriend const auto& {}(const void* object);",
                self.property_getter(&ty.name, &prop.name)
            ));
            if !prop.read_only {
                body.line(format!(
                    "\tfriend void {}(void* object, {} const& value);",
                    self.property_setter(&ty.name, &prop.name),
                    prop.ty
                ));
            }
        }

        body.line("public:");
        match ty.kind {
            RecordKind::Class => {
                body.line(
                    "\tvirtual const Meta::Type* GetType() const override { return GetStaticType(); }",
                );
                body.line(format!("\tvirtual ~{}() = default;", ty.name));
            }
            RecordKind::Struct => {
                body.line("\tconst Meta::Type* GetType() const { return GetStaticType(); }")
            }
        }
        body.line(format!(
            "\tstatic const Meta::Type* GetStaticType() {{ return {}(); }}",
            self.type_getter(&ty.name)
        ));

        // Restore the default access of the record kind
        body.line(match ty.kind {
            RecordKind::Class => "private:",
            RecordKind::Struct => "public:",
        });
        body.finish()
    }

    fn emit_implementation(&mut self) {
        let mut imp = MacroBuilder::new(format!("_{}_IMPLEMENTATION", self.id));

        for ty in &self.plan.types {
            imp.line(format!(
                "const Meta::Type* {}() {{ static const Meta::Type* type = Meta::Registry::Get().FindType({}); return type; }}",
                self.type_getter(&ty.name),
                cpp_string(&ty.name)
            ));
        }

        for prop in &self.plan.properties {
            self.accessors(&mut imp, prop);
        }

        for decl in self.plan.enums.iter().filter(|e| e.scoped) {
            imp.line(format!(
                "FORCEINLINE {0} operator|({0} a, {0} b) {{ return static_cast<{0}>(static_cast<int64>(a) | static_cast<int64>(b)); }}",
                decl.name
            ));
        }

        for pass in RegistrationPass::ALL {
            let lines = match pass {
                RegistrationPass::Enums => self.enum_pass(),
                RegistrationPass::Types => self.type_pass(),
                RegistrationPass::Inheritance => self.inheritance_pass(),
                RegistrationPass::Properties => self.property_pass(),
            };
            imp.line(format!(
                "void {}(Meta::Registry& registry)",
                pass.function_name(self.id)
            ));
            if lines.is_empty() {
                imp.line("{ (void)registry; }");
            } else {
                imp.line("{");
                for line in lines {
                    imp.line(line);
                }
                imp.line("}");
            }
        }

        self.output.push_str(&imp.finish());
    }

    fn accessors(&self, imp: &mut MacroBuilder, prop: &PropertyRegistration) {
        imp.line(format!(
            "const auto& {}(const void* object) {{ return static_cast<const {}*>(object)->{}; }}",
            self.property_getter(&prop.owner, &prop.name),
            prop.owner,
            prop.name
        ));
        if !prop.read_only {
            imp.line(format!(
                "void {}(void* object, {} const& value) {{ static_cast<{}*>(object)->{} = value; }}",
                self.property_setter(&prop.owner, &prop.name),
                prop.ty,
                prop.owner,
                prop.name
            ));
        }
    }

    // ========================================================================
    // Registration passes
    // ========================================================================

    fn enum_pass(&self) -> Vec<String> {
        self.plan.enums.iter().flat_map(enum_registration).collect()
    }

    fn type_pass(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for ty in &self.plan.types {
            let decorators = decorator_list(&ty.decorators);
            match &ty.serializer {
                None => lines.push(format!(
                    "\tregistry.AddType<{0}>({1}, nullptr, {2});",
                    ty.name,
                    cpp_string(&ty.name),
                    decorators
                )),
                Some(fields) => {
                    lines.push(format!(
                        "\tregistry.AddType<{}>({}, [&registry](Archive& archive, const void* object)",
                        ty.name,
                        cpp_string(&ty.name)
                    ));
                    lines.push("\t{".to_string());
                    lines.push("\t\t(void)registry;".to_string());
                    lines.push("\t\tarchive << ArchiveManipulator::BeginMap;".to_string());
                    for field in fields {
                        let getter = format!(
                            "{}(object)",
                            self.property_getter(&ty.name, &field.property)
                        );
                        let value = match &field.kind {
                            FieldKind::Value => getter,
                            FieldKind::Enum(name) => format!(
                                "std::string({}).append(registry.FindEnum({})->ValueToString((int64){}))",
                                cpp_string(&format!("{}::", name)),
                                cpp_string(name),
                                getter
                            ),
                        };
                        lines.push(format!(
                            "\t\tarchive << ArchiveManipulator::Key << {} << ArchiveManipulator::Value << {};",
                            cpp_string(&field.property),
                            value
                        ));
                    }
                    lines.push("\t\tarchive << ArchiveManipulator::EndMap;".to_string());
                    lines.push(format!("\t}}, {});", decorators));
                }
            }
        }
        lines
    }

    fn inheritance_pass(&self) -> Vec<String> {
        self.plan
            .inheritance
            .iter()
            .map(|edge| {
                format!(
                    "\tregistry.AddParent({}, {});",
                    cpp_string(&edge.child),
                    cpp_string(&edge.parent)
                )
            })
            .collect()
    }

    fn property_pass(&self) -> Vec<String> {
        self.plan
            .properties
            .iter()
            .map(|prop| {
                let setter = if prop.read_only {
                    "nullptr".to_string()
                } else {
                    format!("&{}", self.property_setter(&prop.owner, &prop.name))
                };
                format!(
                    "\tregistry.FindType({})->AddProperty({}, {}, &{}, {}, {});",
                    cpp_string(&prop.owner),
                    cpp_string(&prop.name),
                    cpp_string(&prop.ty),
                    self.property_getter(&prop.owner, &prop.name),
                    setter,
                    decorator_list(&prop.decorators)
                )
            })
            .collect()
    }
}

fn enum_registration(decl: &EnumRegistration) -> Vec<String> {
    if decl.values.is_empty() {
        return vec![format!("\tregistry.AddEnum({});", cpp_string(&decl.name))];
    }

    let mut lines = vec![format!("\tregistry.AddEnum({})", cpp_string(&decl.name))];
    let last = decl.values.len() - 1;
    for (i, (name, value)) in decl.values.iter().enumerate() {
        let end = if i == last { ";" } else { "" };
        lines.push(format!(
            "\t\t.AddValue({}, {}){}",
            cpp_string(name),
            value,
            end
        ));
    }
    lines
}
