//! The project-wide aggregate header.

use crate::file_id::FileId;
use crate::plan::RegistrationPass;

/// Include used when no prelude is configured.
pub const DEFAULT_PRELUDE: &str = "Core/Minimal.h";

/// A reflected source as seen by the aggregate header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Include path of the source header, with forward slashes.
    pub include_path: String,
    pub id: FileId,
}

impl ProjectEntry {
    pub fn new(include_path: impl Into<String>, id: FileId) -> Self {
        Self {
            include_path: include_path.into(),
            id,
        }
    }
}

/// File name of the aggregate header for `project`.
pub fn project_file_name(project: &str) -> String {
    format!("{}Reflection.h", project)
}

/// Render `<Project>Reflection.h`.
///
/// `Register()` runs each pass over every entry before starting the next,
/// so cross-file parents and enums are registered before use.
pub fn generate_project_header(project: &str, prelude: &str, entries: &[ProjectEntry]) -> String {
    let mut output = String::from("// Generated by reflector. Do not edit.\n\n#pragma once\n\n");

    output.push_str(&format!("#include \"{}\"\n", prelude));
    for entry in entries {
        output.push_str(&format!("#include \"{}\"\n", entry.include_path));
    }
    output.push('\n');

    for entry in entries {
        output.push_str(&format!("_{}_IMPLEMENTATION\n", entry.id));
    }
    if !entries.is_empty() {
        output.push('\n');
    }

    output.push_str(&format!("namespace {}Reflection\n{{\n\n", project));
    output.push_str("\tvoid Register()\n\t{\n");
    output.push_str("\t\tMeta::Registry& registry = Meta::Registry::Get();\n");
    for pass in RegistrationPass::ALL {
        if entries.is_empty() {
            break;
        }
        output.push('\n');
        for entry in entries {
            output.push_str(&format!("\t\t{}(registry);\n", pass.function_name(&entry.id)));
        }
    }
    output.push_str("\t}\n\n}\n");

    tracing::debug!("project header for {} with {} files", project, entries.len());
    output
}
