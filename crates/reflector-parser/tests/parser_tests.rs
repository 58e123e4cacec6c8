//! Whole-file parsing tests.

use reflector_parser::{parse_source, ParseErrorKind, RecordKind, TokenKind};

const PLAYER_HEADER: &str = r#"#pragma once

#include "Core/Minimal.h"
#include "Player.generated.h"

GENUM()
enum class Team : uint8
{
    Red,
    Blue = 5,
    Spectator,
};

GSTRUCT()
struct Loadout
{
    GENERATED_BODY();

    GPROPERTY()
    int32 Ammo = 30;
};

GCLASS(Category(Gameplay))
class GAME_API Player : public Pawn, public IDamageable
{
    GENERATED_BODY();

public:
    Player() = default;

    GPROPERTY(SourceFileFormats(png, jpg))
    std::string Avatar;

    GPROPERTY(DontSerialize)
    float Cooldown = 1.5f;

    GPROPERTY()
    Vector3 Scale = Vector3(1, 1, 1);

    GPROPERTY()
    Team Side;

    GMETHOD()
    void Respawn(const Vector3& at);

private:
    int Hidden = 0;
};
"#;

#[test]
fn test_full_header() {
    let parsed = parse_source(PLAYER_HEADER, "Source/Player.h");
    assert!(!parsed.has_errors(), "{:?}", parsed.diagnostics.errors());

    let decls = parsed.decls;
    assert_eq!(decls.enums.len(), 1);
    assert_eq!(decls.records.len(), 2);

    let team = decls.find_enum("Team").unwrap();
    assert!(team.scoped);
    assert_eq!(team.value_of("Spectator"), Some(6));

    let loadout = decls.find_record("Loadout").unwrap();
    assert_eq!(loadout.kind, RecordKind::Struct);
    assert_eq!(loadout.body_line, Some(17));
    assert_eq!(loadout.properties[0].ty, "int32");

    let player = decls.find_record("Player").unwrap();
    assert_eq!(player.kind, RecordKind::Class);
    assert_eq!(player.parents, ["Pawn", "IDamageable"]);
    assert_eq!(player.body_line, Some(26));
    assert_eq!(player.decorators.values("Category"), ["Gameplay"]);

    let names: Vec<_> = player.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Avatar", "Cooldown", "Scale", "Side"]);
    assert_eq!(player.find_property("Avatar").unwrap().ty, "std::string");
    assert_eq!(player.find_property("Scale").unwrap().ty, "Vector3");
    assert!(player.find_property("Cooldown").unwrap().decorators.has("DontSerialize"));

    let avatar = player.find_property("Avatar").unwrap();
    assert!(avatar.decorators.has("SourceFileFormats"));
    assert_eq!(avatar.decorators.values("SourceFileFormats"), ["png", "jpg"]);

    assert_eq!(player.methods.len(), 1);
    assert_eq!(player.methods[0].name, "Respawn");
    assert_eq!(player.methods[0].return_ty, "void");
}

#[test]
fn test_minimal_class_with_parent() {
    let source = "GCLASS() class Foo : public Bar { GENERATED_BODY(); GPROPERTY(); int32 X; };";
    let parsed = parse_source(source, "Foo.h");
    assert!(!parsed.has_errors());

    let foo = &parsed.decls.records[0];
    assert_eq!(foo.name, "Foo");
    assert_eq!(foo.parents, ["Bar"]);
    assert_eq!(foo.properties.len(), 1);
    assert_eq!(foo.properties[0].ty, "int32");
    assert_eq!(foo.properties[0].name, "X");
}

#[test]
fn test_adjacent_property_markers_are_fatal() {
    let source = "GCLASS() class Foo { GENERATED_BODY(); GPROPERTY() GPROPERTY() int32 X; };";
    let parsed = parse_source(source, "Foo.h");

    assert!(parsed.has_errors());
    let err = &parsed.diagnostics.errors()[0];
    assert!(matches!(
        err.kind,
        ParseErrorKind::MarkerInDeclaration { marker: TokenKind::PropertyMarker }
    ));
    assert!(err.to_string().contains("File: Foo.h"));

    // The second marker still yields its property
    let foo = &parsed.decls.records[0];
    assert_eq!(foo.properties.len(), 1);
    assert_eq!(foo.properties[0].name, "X");
}

#[test]
fn test_missing_terminator_at_end_of_class() {
    let source = "GCLASS() class Foo { GPROPERTY() int X };";
    let parsed = parse_source(source, "Foo.h");
    assert!(parsed.has_errors());
}

#[test]
fn test_errors_from_several_declarations_accumulate() {
    let source = "GENUM() enum E { A = x };\nGCLASS() class { };\nGCLASS() class Ok { };";
    let parsed = parse_source(source, "Mixed.h");
    assert_eq!(parsed.diagnostics.errors().len(), 2);
    assert_eq!(parsed.decls.records.len(), 1);
    assert_eq!(parsed.decls.records[0].name, "Ok");
}

#[test]
fn test_declarations_carry_their_path() {
    let parsed = parse_source("GENUM() enum E { A };", "Source/E.h");
    assert_eq!(parsed.decls.enums[0].path, std::path::Path::new("Source/E.h"));
    assert_eq!(parsed.decls.path, std::path::Path::new("Source/E.h"));
}

#[test]
fn test_marker_free_file_parses_empty() {
    let parsed = parse_source("namespace a { class B { int c; }; }", "B.h");
    assert!(parsed.decls.is_empty());
    assert!(parsed.diagnostics.is_empty());
}
