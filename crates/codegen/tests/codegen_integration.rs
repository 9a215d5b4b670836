//! Integration tests for the generation pipeline.
//!
//! These tests load a spec tree from disk, emit every declaration and check
//! the rendered registration unit.

use std::fs;
use std::path::Path;

use bindspec_codegen::{generate, CodegenError};
use bindspec_core::{FileSystemProvider, Loader};

const WINDOW_SPEC: &str = r#"
imports: [colors.yaml]
functions:
  - name: InitWindow
    map_to: InitWindow
    args: [int, int, string]
    description: Initialize window and OpenGL context
  - name: WindowShouldClose
    map_to: WindowShouldClose
    ret: bool
  - name: GetMousePosition
    map_to: GetMousePosition
    ret: Vector2
  - name: LoadTextureId
    args: [string]
    ret: int
    custom_body: |
      int id = rlreg::resources().textures.insert(LoadTexture(args[0].as_string().c_str()));
      return Value::from_int(id);
"#;

const COLORS_SPEC: &str = r#"
constants:
  - name: RED
    value: "230,41,55,255"
  - name: BLEND_MODE
    value: BLEND_ALPHA
"#;

fn write_tree(dir: &Path) {
    fs::write(dir.join("window.yaml"), WINDOW_SPEC).expect("write window spec");
    fs::write(dir.join("colors.yaml"), COLORS_SPEC).expect("write colors spec");
}

fn render(dir: &Path) -> Result<String, CodegenError> {
    let mut loader = Loader::new(&FileSystemProvider, dir);
    let set = loader.load(&dir.join("window.yaml"))?;
    Ok(generate(&set.declarations)?.render())
}

#[test]
fn test_generate_registration_unit() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tree(dir.path());

    let text = render(dir.path()).expect("generation failed");

    assert!(
        text.contains("class Resources {"),
        "preamble should declare the resource service"
    );
    assert!(
        text.contains("R.add_with_policy(\"InitWindow\", Fn{\"InitWindow\", 3,"),
        "InitWindow should register with arity 3"
    );
    assert!(
        text.contains(
            "InitWindow(static_cast<int>(args[0].as_int()), static_cast<int>(args[1].as_int()), args[2].as_string().c_str());"
        ),
        "InitWindow should marshal its arguments in order"
    );
    assert!(
        text.contains("    // Initialize window and OpenGL context\n"),
        "description should be emitted as a comment"
    );
    assert!(
        text.contains("return Value::from_bool(WindowShouldClose());"),
        "bool return should be wrapped"
    );
    assert!(
        text.contains("return Value::from_vector2(GetMousePosition());"),
        "aggregate return should use its encoder"
    );
    assert!(
        text.contains("        return Value::from_int(id);"),
        "custom body should be spliced verbatim"
    );
    assert!(
        text.contains("return Value::from_string(\"230,41,55,255\");"),
        "color constant should be returned unchanged"
    );
    assert!(
        text.contains("return Value::from_string(\"BLEND_ALPHA\");"),
        "text constant should be returned unchanged"
    );
}

#[test]
fn test_imported_constants_precede_importer_functions() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tree(dir.path());

    let text = render(dir.path()).expect("generation failed");
    let red = text.find("\"RED\"").unwrap();
    let init = text.find("\"InitWindow\"").unwrap();
    let load = text.find("\"LoadTextureId\"").unwrap();
    assert!(red < init && init < load);
}

#[test]
fn test_generation_is_deterministic() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tree(dir.path());

    let first = render(dir.path()).expect("generation failed");
    let second = render(dir.path()).expect("generation failed");
    assert_eq!(first, second);
}

#[test]
fn test_unknown_tag_aborts_generation() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tree(dir.path());
    fs::write(
        dir.path().join("colors.yaml"),
        "functions:\n  - {name: LoadFont, map_to: LoadFont, args: [string], ret: Font}\n",
    )
    .unwrap();

    let err = render(dir.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'LoadFont' uses unknown type tag 'Font'"
    );
}
