//! Module output tests: files on disk, check mode, manifest, config

use emugen::{BitWidth, CommentStyle, EmuError, EmuModule, GenConfig, WaveSize};
use pretty_assertions::assert_eq;

fn build(bits: BitWidth, wave: u32) -> EmuModule {
    EmuModule::build(bits, WaveSize::new(wave).unwrap(), CommentStyle::Khr).expect("build failed")
}

#[test]
fn test_write_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("patch").join("generate");

    let path = build(BitWidth::W32, 64)
        .write_to(&out, &GenConfig::default())
        .unwrap();

    assert_eq!(path, out.join("g_glslGroupOpEmuD32W64.ll"));
    assert!(path.is_file());
}

#[test]
fn test_write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g_glslGroupOpEmuD16W32.ll");
    std::fs::write(&path, "stale contents").unwrap();

    let module = build(BitWidth::W16, 32);
    module.write_to(dir.path(), &GenConfig::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, module.render(&GenConfig::default()));
}

#[test]
fn test_successive_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenConfig::default();

    let path = build(BitWidth::W64, 64).write_to(dir.path(), &config).unwrap();
    let first = std::fs::read(&path).unwrap();
    build(BitWidth::W64, 64).write_to(dir.path(), &config).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_check_accepts_fresh_module() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenConfig::default();
    let module = build(BitWidth::W32, 32);
    module.write_to(dir.path(), &config).unwrap();

    assert!(module.check_in(dir.path(), &config).is_ok());
}

#[test]
fn test_check_rejects_stale_module() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenConfig::default();
    let module = build(BitWidth::W32, 64);
    let path = module.write_to(dir.path(), &config).unwrap();

    let mut text = std::fs::read_to_string(&path).unwrap();
    text.push_str("; hand edit\n");
    std::fs::write(&path, text).unwrap();

    let err = module.check_in(dir.path(), &config).unwrap_err();
    assert!(matches!(err, EmuError::Stale { .. }));
}

#[test]
fn test_check_reports_missing_module() {
    let dir = tempfile::tempdir().unwrap();
    let err = build(BitWidth::W16, 64)
        .check_in(dir.path(), &GenConfig::default())
        .unwrap_err();
    assert!(matches!(err, EmuError::Read { .. }));
}

#[test]
fn test_write_fails_when_directory_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("out");
    std::fs::write(&blocker, "").unwrap();

    let err = build(BitWidth::W16, 64)
        .write_to(&blocker, &GenConfig::default())
        .unwrap_err();
    assert!(matches!(err, EmuError::CreateDir { .. }));
}

#[test]
fn test_manifest_lists_every_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let module = build(BitWidth::W64, 64);
    let path = module.write_manifest(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "g_glslGroupOpEmuD64W64.json");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), module.len());

    let first = &entries[0];
    assert_eq!(first["symbol"], "@_Z38sub_group_reduce_add_nonuniform_wave64l");
    assert_eq!(first["group"], "reduce");
    assert_eq!(first["operator"], "add");
    assert_eq!(first["type"], "int64");
    assert_eq!(first["components"], 1);
    assert!(first.get("text").is_none());
}

#[test]
fn test_config_file_drives_output() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("emugen.toml");
    std::fs::write(
        &config_path,
        r#"
comment_style = "amd"
target_triple = "spirv64-unknown-unknown"
tool_name = "emugen-test"
"#,
    )
    .unwrap();

    let config = GenConfig::load(&config_path).unwrap();
    let text = emugen::generate(BitWidth::W16, WaveSize::new(64).unwrap(), &config).unwrap();

    assert!(text.contains("target triple = \"spirv64-unknown-unknown\"\n"));
    assert!(text.contains("generated automatically by emugen-test."));
    assert!(text.contains("; GLSL: int16_t/uint16_t addInvocationsNonUniform(int16_t/uint16_t)\n"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GenConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, EmuError::Read { .. }));
}
