//! Driver runs over temporary source trees.

use reflector_cli::{run, DriverConfig, DriverError};
use reflector_codegen::FileId;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const PLAYER: &str = r#"#pragma once
#include "Core/Minimal.h"
#include "Player.generated.h"

GENUM()
enum class Team { Red, Blue };

GCLASS()
class Player : public Pawn
{
    GENERATED_BODY();

    GPROPERTY()
    int32 Health = 100;

    GPROPERTY()
    Team Side;
};
"#;

const PLAIN: &str = "#pragma once\nstruct Plain { int x; };\n";

const NOT_SELF_INCLUDED: &str = "#pragma once\nGCLASS() class Orphan { GENERATED_BODY(); };\n";

struct Project {
    _dir: TempDir,
    source: PathBuf,
    output: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Source");
        let output = dir.path().join("Generated");
        fs::create_dir_all(source.join("Game")).unwrap();
        fs::write(source.join("Game/Player.h"), PLAYER).unwrap();
        fs::write(source.join("Plain.h"), PLAIN).unwrap();
        fs::write(source.join("Orphan.hpp"), NOT_SELF_INCLUDED).unwrap();
        fs::write(source.join("Player.cpp"), "#include \"Game/Player.h\"\n").unwrap();
        Self {
            _dir: dir,
            source,
            output,
        }
    }

    fn config(&self) -> DriverConfig {
        DriverConfig::new("Game", &self.output, vec![self.source.clone()])
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.output.join(name)).unwrap()
    }
}

fn set_mtime(path: &Path, time: SystemTime) {
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(time).unwrap();
}

#[test]
fn test_first_run_generates_reflected_headers_only() {
    let project = Project::new();
    let summary = run(&project.config()).unwrap();

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.reused, 0);
    assert_eq!(summary.skipped, 2);
    assert!(project.output.join("Player.generated.h").exists());
    assert!(!project.output.join("Orphan.generated.h").exists());
    assert_eq!(summary.project_file.file_name().unwrap(), "GameReflection.h");

    let generated = project.read("Player.generated.h");
    let id = FileId::from_generated(&generated).unwrap();
    let aggregate = project.read("GameReflection.h");
    assert!(aggregate.contains("#include \"Core/Minimal.h\"\n#include \"Game/Player.h\"\n"));
    assert!(aggregate.contains(&format!("_{}_IMPLEMENTATION", id)));
    assert!(aggregate.contains(&format!("Z_{}_RegisterInheritance(registry);", id)));
    assert!(generated.contains("#define _META_Game_Player_h_"));
}

#[test]
fn test_second_run_is_byte_identical() {
    let project = Project::new();
    run(&project.config()).unwrap();
    let generated = project.read("Player.generated.h");
    let aggregate = project.read("GameReflection.h");

    let summary = run(&project.config()).unwrap();
    assert_eq!(summary.generated, 0);
    assert_eq!(summary.reused, 1);
    assert_eq!(project.read("Player.generated.h"), generated);
    assert_eq!(project.read("GameReflection.h"), aggregate);
}

#[test]
fn test_force_regenerates_with_fresh_id() {
    let project = Project::new();
    run(&project.config()).unwrap();
    let before = FileId::from_generated(&project.read("Player.generated.h")).unwrap();

    let mut config = project.config();
    config.force = true;
    let summary = run(&config).unwrap();

    let after = FileId::from_generated(&project.read("Player.generated.h")).unwrap();
    assert_eq!(summary.generated, 1);
    assert_ne!(before, after);
}

#[test]
fn test_stale_generated_file_is_regenerated() {
    let project = Project::new();
    run(&project.config()).unwrap();

    set_mtime(
        &project.output.join("Player.generated.h"),
        SystemTime::UNIX_EPOCH + Duration::from_secs(1),
    );
    let summary = run(&project.config()).unwrap();
    assert_eq!(summary.generated, 1);
    assert_eq!(summary.reused, 0);
}

#[test]
fn test_generated_file_without_id_is_regenerated() {
    let project = Project::new();
    run(&project.config()).unwrap();
    fs::write(project.output.join("Player.generated.h"), "// truncated\n").unwrap();

    let summary = run(&project.config()).unwrap();
    assert_eq!(summary.generated, 1);
    assert!(FileId::from_generated(&project.read("Player.generated.h")).is_ok());
}

#[test]
fn test_parse_error_aborts_without_aggregate() {
    let project = Project::new();
    fs::write(
        project.source.join("Broken.h"),
        "#include \"Broken.generated.h\"\nGCLASS() class Broken { GENERATED_BODY(); GPROPERTY() GPROPERTY() int32 X; };\n",
    )
    .unwrap();

    let err = run(&project.config()).unwrap_err();
    match &err {
        DriverError::Parse { path, errors } => {
            assert!(path.ends_with("Broken.h"));
            assert!(!errors.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("File: "));
    assert!(!project.output.join("GameReflection.h").exists());
}

#[test]
fn test_missing_scan_paths_are_skipped() {
    let project = Project::new();
    let mut config = project.config();
    config.scan.insert(0, project.source.join("DoesNotExist"));

    let summary = run(&config).unwrap();
    assert_eq!(summary.generated, 1);
}

#[test]
fn test_output_inside_scan_root_is_not_scanned() {
    let project = Project::new();
    let output = project.source.join("Intermediate");
    let config = DriverConfig::new("Game", &output, vec![project.source.clone()]);

    run(&config).unwrap();
    let summary = run(&config).unwrap();
    assert_eq!(summary.reused, 1);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_custom_prelude() {
    let project = Project::new();
    let mut config = project.config();
    config.prelude = "Engine/Prelude.h".to_string();

    run(&config).unwrap();
    assert!(project.read("GameReflection.h").contains("#include \"Engine/Prelude.h\""));
}
