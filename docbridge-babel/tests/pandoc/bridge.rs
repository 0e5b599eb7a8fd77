//! AST ⇄ pandoc JSON

use crate::common::{markdown_tree, offline_graph, sample_tree, KITCHENSINK_MD};
use docbridge_babel::ast::*;
use docbridge_babel::pandoc::{ast_to_pandoc, pandoc_to_ast, PandocToAst, PANDOC_API_VERSION};
use docbridge_babel::{BabelError, Child, Node};
use serde_json::{json, Map, Value};

fn roundtrip(tree: &Node) -> Node {
    pandoc_to_ast(&ast_to_pandoc(tree).unwrap()).unwrap()
}

#[test]
fn test_native_trees_round_trip() {
    let tree = sample_tree();
    // pandoc does not record bullets, the reader gives back the configured one
    assert_eq!(roundtrip(&tree), tree);
    let kitchensink = markdown_tree(&offline_graph(), KITCHENSINK_MD);
    assert_eq!(roundtrip(&kitchensink), kitchensink);
}

/// A pandoc document in the shape pandoc itself writes.
fn pandoc_fixture() -> Value {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {"docbridge": {"t": "MetaMap", "c": {
            "title": {"t": "MetaString", "c": "Fixture"},
            "draft": {"t": "MetaBool", "c": false},
        }}},
        "blocks": [
            {"t": "Header", "c": [2, ["", [], []], [
                {"t": "Str", "c": "Title"}, {"t": "Space"}, {"t": "Str", "c": "here"},
            ]]},
            {"t": "Para", "c": [
                {"t": "Str", "c": "Hello"},
                {"t": "Space"},
                {"t": "Emph", "c": [{"t": "Str", "c": "world"}]},
                {"t": "Str", "c": ","},
                {"t": "SoftBreak"},
                {"t": "Str", "c": "next"},
                {"t": "Space"},
                {"t": "Code", "c": [["", [], []], "x = 1"]},
                {"t": "Space"},
                {"t": "Link", "c": [["", [], []], [{"t": "Str", "c": "docs"}], ["http://example.com", ""]]},
                {"t": "Space"},
                {"t": "Math", "c": [{"t": "InlineMath"}, "a+b"]},
                {"t": "Str", "c": "."},
            ]},
            {"t": "CodeBlock", "c": [["", ["python"], []], "print(1)\nprint(2)"]},
            {"t": "BulletList", "c": [
                [{"t": "Plain", "c": [{"t": "Str", "c": "one"}]}],
                [
                    {"t": "Plain", "c": [{"t": "Str", "c": "two"}]},
                    {"t": "BulletList", "c": [[{"t": "Plain", "c": [{"t": "Str", "c": "nested"}]}]]},
                ],
            ]},
            {"t": "OrderedList", "c": [
                [3, {"t": "Decimal"}, {"t": "Period"}],
                [
                    [{"t": "Para", "c": [{"t": "Str", "c": "three"}]}],
                    [{"t": "Para", "c": [{"t": "Str", "c": "four"}]}],
                ],
            ]},
            {"t": "Para", "c": [{"t": "Math", "c": [{"t": "DisplayMath"}, "E=mc^2"]}]},
            {"t": "BlockQuote", "c": [{"t": "Para", "c": [
                {"t": "Str", "c": "quoted"}, {"t": "LineBreak"}, {"t": "Str", "c": "text"},
            ]}]},
            {"t": "HorizontalRule"},
        ],
    })
}

#[test]
fn test_pandoc_documents_round_trip() {
    let fixture = pandoc_fixture();
    let tree = pandoc_to_ast(&fixture).unwrap();
    validate(&tree).unwrap();
    assert_eq!(ast_to_pandoc(&tree).unwrap(), fixture);
}

#[test]
fn test_pandoc_fixture_reads_as_expected() {
    let tree = pandoc_to_ast(&pandoc_fixture()).unwrap();
    let names: Vec<&str> = tree.children().iter().filter_map(Child::name).collect();
    assert_eq!(
        names,
        vec![
            "Header",
            "Para",
            "CodeBlock",
            "BulletList",
            "OrderedList",
            "MathBlock",
            "BlockQuote",
            "HorizontalRule",
        ]
    );
    let para = tree.children()[1].as_node().unwrap();
    assert_eq!(para.children()[0], Child::from("Hello "));
    assert_eq!(para.children()[2], Child::from(",\nnext "));
    assert_eq!(metadata(&tree).unwrap()["title"], json!("Fixture"));
}

#[test]
fn test_envelope() {
    let doc = ast_to_pandoc(&root([para(["hello world"])])).unwrap();
    assert_eq!(doc["pandoc-api-version"], json!(PANDOC_API_VERSION));
    assert_eq!(doc["meta"], json!({}));
    assert_eq!(
        doc["blocks"],
        json!([{"t": "Para", "c": [
            {"t": "Str", "c": "hello"},
            {"t": "Space"},
            {"t": "Str", "c": "world"},
        ]}])
    );
}

#[test]
fn test_header_and_ordered_list_payloads() {
    let tree = root([
        header(3, ["T"]),
        ordered_list([[plain(["x"])]], 4, ')'),
    ]);
    let doc = ast_to_pandoc(&tree).unwrap();
    assert_eq!(doc["blocks"][0]["c"][0], json!(3));
    assert_eq!(doc["blocks"][0]["c"][1], json!(["", [], []]));
    assert_eq!(
        doc["blocks"][1]["c"][0],
        json!([4, {"t": "Decimal"}, {"t": "OneParen"}])
    );
}

#[test]
fn test_foreign_nodes_are_elided() {
    let section = Node::new("Section")
        .unwrap()
        .with_children([para(["a"])]);
    let mark = Node::new("Mark").unwrap().with_children(["x"]);
    let tree = root([
        Child::from(section),
        Child::from(para([Child::from(mark), Child::from(" y")])),
    ]);
    validate(&tree).unwrap();

    let back = roundtrip(&tree);
    assert_ne!(back, tree);
    assert_eq!(back, root([para(["a"]), para(["x y"])]));
}

#[test]
fn test_unknown_pandoc_elements_keep_their_content() {
    let doc = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [{"t": "Para", "c": [
            {"t": "SmallCaps", "c": [{"t": "Str", "c": "abc"}]},
        ]}],
    });
    let tree = pandoc_to_ast(&doc).unwrap();
    let para = tree.children()[0].as_node().unwrap();
    let small_caps = para.children()[0].as_node().unwrap();
    assert_eq!(small_caps.name(), "SmallCaps");
    assert_eq!(small_caps.text_content(), "abc");
}

#[test]
fn test_metadata_is_namespaced() {
    let mut tree = root([para(["x"])]);
    let mut entries = Map::new();
    entries.insert("title".to_string(), json!("Doc"));
    entries.insert("tags".to_string(), json!(["a", "b"]));
    entries.insert("draft".to_string(), json!(true));
    entries.insert("version".to_string(), json!(3));
    entries.insert("resources".to_string(), json!({"img": "data"}));
    set_metadata(&mut tree, entries);

    let doc = ast_to_pandoc(&tree).unwrap();
    assert_eq!(doc["meta"]["docbridge"]["t"], json!("MetaMap"));
    assert!(doc["meta"]["docbridge"]["c"].get("resources").is_none());

    let back = pandoc_to_ast(&doc).unwrap();
    let read = metadata(&back).unwrap();
    assert_eq!(read["title"], json!("Doc"));
    assert_eq!(read["tags"], json!(["a", "b"]));
    assert_eq!(read["draft"], json!(true));
    assert_eq!(read["version"], json!("3"));
    assert!(read.get("resources").is_none());
}

#[test]
fn test_pandoc_title_is_imported() {
    let doc = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {"title": {"t": "MetaInlines", "c": [
            {"t": "Str", "c": "My"}, {"t": "Space"}, {"t": "Str", "c": "Title"},
        ]}},
        "blocks": [],
    });
    let tree = pandoc_to_ast(&doc).unwrap();
    assert_eq!(metadata(&tree).unwrap()["title"], json!("My Title"));
}

#[test]
fn test_legacy_envelope_is_rejected() {
    let legacy = json!([{"unMeta": {}}, []]);
    assert!(matches!(
        pandoc_to_ast(&legacy),
        Err(BabelError::UnsupportedEnvelope(_))
    ));
}

#[test]
fn test_reader_bullet_char() {
    let tree = root([bullet_list([[plain(["a"])]], '-')]);
    let doc = ast_to_pandoc(&tree).unwrap();
    assert_eq!(PandocToAst::new().with_bullet_char('-').read(&doc).unwrap(), tree);
    let default = pandoc_to_ast(&doc).unwrap();
    assert_eq!(bullet_char(default.children()[0].as_node().unwrap()), '*');
}

#[test]
fn test_display_math_paragraph() {
    let tree = root([math_block("x^2")]);
    let doc = ast_to_pandoc(&tree).unwrap();
    assert_eq!(
        doc["blocks"][0],
        json!({"t": "Para", "c": [{"t": "Math", "c": [{"t": "DisplayMath"}, "x^2"]}]})
    );
    assert_eq!(pandoc_to_ast(&doc).unwrap(), tree);
}

#[test]
fn test_only_roots_are_written() {
    let err = ast_to_pandoc(&para(["x"])).unwrap_err();
    assert!(matches!(err, BabelError::InvalidAst(_)));
    let _: Value = ast_to_pandoc(&root([para(["x"])])).unwrap();
}
