//! Manifest plugins found on disk

use crate::common::offline_options;
use docbridge_babel::{discover_plugins, BabelError, ConvertOptions, PluginRegistry};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SHOUT: &str = r#"
name = "shout"

[[languages]]
name = "shout"
extension = ".shout"

[[converters]]
source = "markdown"
target = "shout"
command = ["tr", "a-z", "A-Z"]
"#;

fn plugin_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shout.toml"), SHOUT).unwrap();
    dir
}

#[test]
fn test_discovered_plugin_is_found() {
    let dir = plugin_dir();
    let mut registry = PluginRegistry::with_builtins();
    assert_eq!(discover_plugins(&[dir.path()], &mut registry).unwrap(), 1);
    assert_eq!(registry.find(".shout").unwrap().name(), "shout");
    assert_eq!(registry.find("SHO").unwrap().name(), "shout");
}

#[test]
fn test_discovery_is_idempotent() {
    let dir = plugin_dir();
    let mut registry = PluginRegistry::with_builtins();
    discover_plugins(&[dir.path(), dir.path()], &mut registry).unwrap();
    discover_plugins(&[dir.path()], &mut registry).unwrap();
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_malformed_manifest_fails_loudly() {
    let dir = plugin_dir();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[[languages]\nname = ").unwrap();
    let err = discover_plugins(&[dir.path()], &mut PluginRegistry::new()).unwrap_err();
    assert!(matches!(err, BabelError::PluginManifest { path, .. } if path == broken));
}

#[test]
fn test_skipped_entries() {
    let dir = TempDir::new().unwrap();
    for sub in ["test", "tests", "_drafts"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("x.toml"), "not = [valid").unwrap();
    }
    fs::write(dir.path().join("_x.toml"), "not = [valid").unwrap();
    let mut registry = PluginRegistry::new();
    assert_eq!(discover_plugins(&[dir.path()], &mut registry).unwrap(), 0);
    assert!(registry.is_empty());
}

#[test]
fn test_unknown_plugin() {
    let registry = PluginRegistry::with_builtins();
    assert!(matches!(
        registry.find("shout"),
        Err(BabelError::PluginNotFound(query)) if query == "shout"
    ));
}

#[cfg(unix)]
#[test]
fn test_manifest_converter_runs_in_a_chain() {
    let dir = plugin_dir();
    let mut registry = PluginRegistry::with_builtins();
    discover_plugins(&[dir.path()], &mut registry).unwrap();
    let graph = registry.build_graph(&offline_options()).unwrap();

    assert_eq!(graph.lang_for_path(Path::new("a.shout")).unwrap(), "shout");
    let out = graph
        .convert(
            "hello *world*\n",
            ConvertOptions::new().with_source("markdown").with_target("shout"),
        )
        .unwrap();
    assert_eq!(out.into_text().unwrap(), "HELLO *WORLD*\n");
}
