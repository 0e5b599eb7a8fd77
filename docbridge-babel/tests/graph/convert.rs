//! End-to-end conversions through the graph

use crate::common::{offline_graph, sample_tree};
use docbridge_babel::ast;
use docbridge_babel::graph::{Content, Context, Filters};
use docbridge_babel::{BabelError, ConvertOptions, GraphBuilder, Language, Result};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_markdown_file_to_pandoc_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.json");
    fs::write(&input, "# Hi\n\nhello *world*\n").unwrap();

    let graph = offline_graph();
    let result = graph
        .convert(input.as_path(), ConvertOptions::new().with_output(&output))
        .unwrap();

    let tree = result.into_ast().unwrap();
    assert_eq!(tree.children().len(), 2);
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"pandoc-api-version\""));
    assert!(written.ends_with('\n'));
    assert_eq!(graph.load(&output, None).unwrap(), Content::Ast(tree));
}

#[test]
fn test_json_is_an_alias_of_ast() {
    let graph = offline_graph();
    let out = graph
        .convert(
            sample_tree(),
            ConvertOptions::new().with_source("json").with_target("markdown"),
        )
        .unwrap();
    assert!(out.into_text().unwrap().starts_with("## Chapter\n"));
}

#[test]
fn test_missing_input_fails_before_converting() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.md");
    let err = offline_graph()
        .convert(
            dir.path().join("missing.md").as_path(),
            ConvertOptions::new().with_output(&output),
        )
        .unwrap_err();
    assert!(matches!(err, BabelError::MissingInput(_)));
    assert!(!output.exists());
}

#[test]
fn test_no_path() {
    let err = offline_graph()
        .convert(
            "text",
            ConvertOptions::new().with_source("tree").with_target("markdown"),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BabelError::NoPath { from, to } if from == "tree" && to == "markdown"
    ));
}

#[test]
fn test_unknown_source_language() {
    let err = offline_graph()
        .convert(
            "x",
            ConvertOptions::new().with_source("nope").with_target("markdown"),
        )
        .unwrap_err();
    assert!(matches!(err, BabelError::UnknownLanguage(name) if name == "nope"));
}

#[test]
fn test_unknown_target_language() {
    let err = offline_graph()
        .convert(
            "x",
            ConvertOptions::new().with_source("markdown").with_target("nope"),
        )
        .unwrap_err();
    assert!(matches!(err, BabelError::UnknownLanguage(name) if name == "nope"));
}

#[test]
fn test_same_unknown_language_on_both_ends() {
    let err = offline_graph()
        .convert("x", ConvertOptions::new().with_source("nope").with_target("nope"))
        .unwrap_err();
    assert!(matches!(err, BabelError::UnknownLanguage(_)));

    let err = offline_graph()
        .convert("x", ConvertOptions::new().with_chain(["nope"]))
        .unwrap_err();
    assert!(matches!(err, BabelError::UnknownLanguage(_)));
}

#[test]
fn test_explicit_chain_with_missing_converter() {
    let err = offline_graph()
        .convert(
            "x",
            ConvertOptions::new().with_chain(["markdown", "tree"]),
        )
        .unwrap_err();
    assert!(matches!(err, BabelError::MissingConverter { .. }));
}

#[test]
fn test_target_is_inferred_from_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("doc.tree");
    offline_graph()
        .convert(
            "hello",
            ConvertOptions::new().with_source("markdown").with_output(&output),
        )
        .unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "root\n└─ Para\n   └─ hello\n"
    );
}

#[test]
fn test_failed_chain_writes_nothing() {
    fn fail(_content: Content, context: &Context) -> Result<Content> {
        Err(BabelError::ExternalTool {
            tool: "fail".to_string(),
            reason: format!("cannot reach {}", context.target),
        })
    }
    let mut builder = GraphBuilder::new();
    builder.register_lang(Language::new("a").with_file_ext(".a")).unwrap();
    builder.register_lang(Language::new("b").with_file_ext(".b")).unwrap();
    builder.add_edge("a", "b", fail).unwrap();
    let graph = builder.build();

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.b");
    let err = graph
        .convert("x", ConvertOptions::new().with_source("a").with_output(&output))
        .unwrap_err();
    assert!(matches!(err, BabelError::ExternalTool { .. }));
    assert!(!output.exists());
}

#[test]
fn test_filters_and_context() {
    let mut builder = GraphBuilder::new();
    builder.register_lang(Language::new("a")).unwrap();
    builder.register_lang(Language::new("b")).unwrap();
    builder.register_lang(Language::new("c")).unwrap();
    let upper = |content: Content, _context: &Context| -> Result<Content> {
        Ok(Content::Text(content.into_text()?.to_uppercase()))
    };
    let describe = |content: Content, context: &Context| -> Result<Content> {
        Ok(Content::Text(format!(
            "{} [{}]",
            content.into_text()?,
            context.lang_chain.join(" > ")
        )))
    };
    builder
        .register_func(
            Some("a"),
            Some("b"),
            upper,
            Filters::none().post(|content: Content, _context: &Context| {
                Ok(Content::Text(format!("<{}>", content.into_text()?)))
            }),
        )
        .unwrap();
    builder.add_edge("b", "c", describe).unwrap();

    let out = builder
        .build()
        .convert("hi", ConvertOptions::new().with_source("a").with_target("c"))
        .unwrap();
    assert_eq!(out.into_text().unwrap(), "<HI> [a > b > c]");
}

#[test]
fn test_files_in_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.md"), "b").unwrap();
    fs::write(dir.path().join("a.md"), "a").unwrap();
    fs::write(dir.path().join("c.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("sub.md")).unwrap();

    let graph = offline_graph();
    let markdown = graph.files_in_dir(dir.path(), Some("markdown")).unwrap();
    assert_eq!(markdown, vec![dir.path().join("a.md"), dir.path().join("b.md")]);
    assert_eq!(graph.files_in_dir(dir.path(), None).unwrap().len(), 3);
}

#[test]
fn test_assert_equal_per_language() {
    let graph = offline_graph();
    let tree = ast::root([ast::para(["x"])]);
    let json = docbridge_babel::pandoc::ast_to_pandoc(&tree).unwrap();
    assert!(graph
        .assert_equal(&Content::Ast(tree), &Content::Json(json), "ast")
        .unwrap());
    assert!(!graph
        .assert_equal(&Content::from("a"), &Content::from("b"), "markdown")
        .unwrap());
}
