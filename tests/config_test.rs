//! Integration tests for Settings layered loading.
//!
//! Layers: defaults < global file < explicit file < TSTREE_* env vars.
//! Env vars are supplied as a map so tests never touch the process environment.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use tstree::config::{Settings, SettingsError, SettingsLoader};
use tstree::domain::PatternSyntax;

fn no_env() -> HashMap<String, String> {
    HashMap::new()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_sources_when_load_then_defaults() {
    let settings = SettingsLoader::new().env(no_env()).load().expect("load settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.pattern_syntax, PatternSyntax::Regex);
    assert!(settings.banner);
}

#[test]
fn given_missing_global_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let settings = SettingsLoader::new()
        .global(Some(dir.path().join("absent.toml")))
        .env(no_env())
        .load()
        .expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "tstree.toml", "pattern_syntax = \"glob\"\nbanner = false\n");

    let settings = SettingsLoader::new()
        .global(Some(global))
        .env(no_env())
        .load()
        .expect("load settings");

    assert_eq!(settings.pattern_syntax, PatternSyntax::Glob);
    assert!(!settings.banner);
    assert!(settings.color, "unspecified keys keep defaults");
}

#[test]
fn given_explicit_file_when_load_then_overrides_global() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "tstree.toml", "pattern_syntax = \"glob\"\ncolor = false\n");
    let local = write(&dir, "session.conf", "pattern_syntax = \"regex\"\n");

    let settings = SettingsLoader::new()
        .global(Some(global))
        .file(Some(local))
        .env(no_env())
        .load()
        .expect("load settings");

    assert_eq!(settings.pattern_syntax, PatternSyntax::Regex);
    assert!(!settings.color, "global value survives where file is silent");
}

#[test]
fn given_missing_explicit_file_when_load_then_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = SettingsLoader::new()
        .file(Some(missing.clone()))
        .env(no_env())
        .load()
        .unwrap_err();

    assert!(matches!(err, SettingsError::NotFound(p) if p == missing));
}

#[test]
fn given_env_vars_when_load_then_override_files() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "tstree.toml", "pattern_syntax = \"regex\"\nbanner = true\n");
    let env = HashMap::from([
        ("TSTREE_PATTERN_SYNTAX".to_string(), "glob".to_string()),
        ("TSTREE_BANNER".to_string(), "false".to_string()),
    ]);

    let settings = SettingsLoader::new()
        .global(Some(global))
        .env(env)
        .load()
        .expect("load settings");

    assert_eq!(settings.pattern_syntax, PatternSyntax::Glob);
    assert!(!settings.banner);
}

#[test]
fn given_unknown_pattern_syntax_when_load_then_error() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "tstree.toml", "pattern_syntax = \"sql\"\n");

    let result = SettingsLoader::new().global(Some(global)).env(no_env()).load();
    assert!(matches!(result, Err(SettingsError::Load(_))));
}

#[test]
fn given_template_when_parsed_then_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let template = Settings::template().unwrap();
    let path = write(&dir, "tstree.toml", &template);

    let settings = SettingsLoader::new()
        .file(Some(path))
        .env(no_env())
        .load()
        .expect("load settings");
    assert_eq!(settings, Settings::default());
}
