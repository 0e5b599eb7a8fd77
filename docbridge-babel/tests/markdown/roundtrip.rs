//! Markdown → AST → Markdown

use crate::common::{markdown_tree, offline_graph, KITCHENSINK_MD};
use docbridge_babel::formats::{parse_from_markdown, serialize_to_markdown};
use docbridge_babel::ConvertOptions;

fn roundtrip(source: &str) -> String {
    serialize_to_markdown(&parse_from_markdown(source).unwrap()).unwrap()
}

#[test]
fn test_kitchensink_is_stable() {
    assert_eq!(roundtrip(KITCHENSINK_MD), KITCHENSINK_MD);
}

#[test]
fn test_through_the_graph() {
    let graph = offline_graph();
    let out = graph
        .convert(
            KITCHENSINK_MD,
            ConvertOptions::new().with_chain(["markdown", "ast", "markdown"]),
        )
        .unwrap();
    assert_eq!(out.into_text().unwrap(), KITCHENSINK_MD);
}

#[test]
fn test_ast_survives_a_second_pass() {
    let graph = offline_graph();
    let first = markdown_tree(&graph, KITCHENSINK_MD);
    let rendered = serialize_to_markdown(&first).unwrap();
    assert_eq!(markdown_tree(&graph, &rendered), first);
}

#[test]
fn test_small_documents() {
    for source in [
        "hello *world*\n",
        "[a](b)\n",
        "1. a\n2. b\n",
        "7) x\n8) y\n",
        "- a\n\n- b\n",
        "# One\n\n## Two\n\ntext\n",
        "> a\n>\n> b\n",
    ] {
        assert_eq!(roundtrip(source), source, "round trip of {source:?}");
    }
}
