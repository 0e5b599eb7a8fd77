//! Language lookups and path finding

use crate::common::offline_graph;
use docbridge_babel::graph::{connected_component, find_path, Content, Context};
use docbridge_babel::{BabelError, GraphBuilder, Language, Result};
use std::path::Path;

fn identity(content: Content, _context: &Context) -> Result<Content> {
    Ok(content)
}

#[test]
fn test_bfs_finds_shortest_path() {
    let edges = [(1, 2), (2, 3), (3, 4), (1, 5), (5, 4), (4, 6)];
    assert_eq!(find_path(&edges, &1, &4), Some(vec![1, 5, 4]));
    assert_eq!(find_path(&edges, &1, &6).map(|path| path.len()), Some(4));
    assert_eq!(find_path(&edges, &6, &1), None);
    assert_eq!(connected_component(&edges, &3), vec![4, 6]);
}

#[test]
fn test_builtin_lookups() {
    let graph = offline_graph();
    assert_eq!(graph.file_extensions(), vec![".json", ".md", ".tree"]);
    assert_eq!(graph.lang_for_file_ext("md").unwrap(), "markdown");
    assert_eq!(graph.lang_for_file_ext(".json").unwrap(), "ast");
    assert_eq!(graph.lang_for_path(Path::new("notes/a.md")).unwrap(), "markdown");
    assert_eq!(graph.file_ext("json"), Some(".json"));
    assert!(matches!(
        graph.lang_for_file_ext("docx"),
        Err(BabelError::UnknownExtension(ext)) if ext == ".docx"
    ));
    assert_eq!(
        graph.conversion_pairs(),
        vec![("ast", "markdown"), ("ast", "tree"), ("markdown", "ast")]
    );
}

#[test]
fn test_paths_through_the_hub() {
    let graph = offline_graph();
    assert_eq!(
        graph.find_path("markdown", "tree").unwrap(),
        vec!["markdown", "ast", "tree"]
    );
    assert_eq!(graph.find_path("json", "markdown").unwrap(), vec!["ast", "markdown"]);
    assert_eq!(graph.find_path("tree", "markdown"), None);
    assert_eq!(graph.target_languages("markdown"), vec!["ast", "tree"]);
    assert!(graph.target_languages("tree").is_empty());
}

#[test]
fn test_registration_is_idempotent() {
    let mut builder = GraphBuilder::new();
    builder.register_lang(Language::new("a").with_file_ext(".a")).unwrap();
    builder.register_lang(Language::new("a").with_file_ext(".other")).unwrap();
    builder.add_edge("a", "b", identity).unwrap();
    builder.add_edge("a", "b", identity).unwrap();
    assert_eq!(builder.language_count(), 1);
    assert_eq!(builder.edge_count(), 1);

    let graph = builder.build();
    assert_eq!(graph.file_ext("a"), Some(".a"));
}

#[test]
fn test_extensions_need_a_dot() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .register_lang(Language::new("x").with_file_ext("x"))
        .unwrap_err();
    assert!(matches!(err, BabelError::InvalidExtension(_)));
}

#[test]
fn test_unknown_language() {
    let graph = offline_graph();
    assert!(matches!(
        graph.language("rst"),
        Err(BabelError::UnknownLanguage(name)) if name == "rst"
    ));
}
