//! AST → Markdown

use crate::common::sample_tree;
use docbridge_babel::ast::*;
use docbridge_babel::formats::{serialize_to_markdown, MarkdownRenderer};
use docbridge_babel::{Child, Node};

#[test]
fn test_sample_document() {
    let out = serialize_to_markdown(&sample_tree()).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r###"
    ## Chapter

    hello **bold** world

    * one
    * two

    5) a
    6) b

    ```python
    print(1)
    ```
    "###);
}

#[test]
fn test_ordered_list_is_renumbered_from_start() {
    let tree = root([ordered_list([[plain(["a"])], [plain(["b"])]], 1, '.')]);
    assert_eq!(serialize_to_markdown(&tree).unwrap(), "1. a\n2. b\n");
}

#[test]
fn test_code_with_backticks_gets_longer_fence() {
    let tree = root([para([Child::from(code("a`b"))])]);
    assert_eq!(serialize_to_markdown(&tree).unwrap(), "``a`b``\n");
}

#[test]
fn test_titled_image() {
    let mut image = image("pic.png", ["alt"]);
    image.set_attr(attr::TITLE, "A \"pic\"");
    let tree = root([para([image])]);
    assert_eq!(
        serialize_to_markdown(&tree).unwrap(),
        "![alt](pic.png \"A \\\"pic\\\"\")\n"
    );
}

#[test]
fn test_configured_bullet_for_unrecorded_lists() {
    let list = Node::new("BulletList")
        .unwrap()
        .with_children([list_item([plain(["x"])])]);
    let tree = root([list]);
    let out = MarkdownRenderer::new()
        .with_bullet_char('+')
        .render(&tree)
        .unwrap();
    assert_eq!(out, "+ x\n");
}

#[test]
fn test_empty_document() {
    assert_eq!(serialize_to_markdown(&root(Vec::<Node>::new())).unwrap(), "");
}

#[test]
fn test_non_root_is_rejected() {
    assert!(serialize_to_markdown(&para(["x"])).is_err());
}
