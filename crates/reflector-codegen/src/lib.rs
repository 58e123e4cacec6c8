//! Registration code generator.
//!
//! Turns the declarations of one header into a `<stem>.generated.h` holding
//! the macros and registration functions for its reflected types, and
//! aggregates every file of a project into a single `Register()` entry
//! point.

pub mod cpp;
pub mod file_id;
pub mod plan;
pub mod project;
pub mod serialize;

pub use cpp::{cpp_string, CppEmitter, GeneratedFile};
pub use file_id::{FileId, FileIdError, CURRENT_FILE_ID_DEFINE};
pub use plan::{
    EnumRegistration, InheritanceEdge, PropertyRegistration, RegistrationPass, RegistrationPlan,
    TypeRegistration,
};
pub use project::{generate_project_header, project_file_name, ProjectEntry, DEFAULT_PRELUDE};
pub use serialize::{classify, FieldKind, SerializedField, DONT_SERIALIZE, SERIALIZABLE_TYPES};

use reflector_parser::GENERATED_HEADER_SUFFIX;

/// File name of the generated header for a source with the given stem.
pub fn generated_file_name(stem: &str) -> String {
    format!("{}{}", stem, GENERATED_HEADER_SUFFIX)
}
