//! Markdown → AST

use docbridge_babel::ast::*;
use docbridge_babel::formats::parse_from_markdown;
use docbridge_babel::Child;

#[test]
fn test_emphasis_inside_paragraph() {
    let tree = parse_from_markdown("hello *world*").unwrap();
    assert_eq!(
        tree,
        root([para([Child::from("hello "), Child::from(emph(["world"]))])])
    );
}

#[test]
fn test_link_keeps_its_url() {
    let tree = parse_from_markdown("[a](b)").unwrap();
    let link = tree.children()[0].as_node().unwrap().children()[0]
        .as_node()
        .unwrap();
    assert_eq!(link.name(), "Link");
    assert_eq!(url(link), "b");
    assert_eq!(link.children(), &[Child::from("a")]);
}

#[test]
fn test_ordered_list() {
    let tree = parse_from_markdown("1. a\n2. b").unwrap();
    assert_eq!(
        tree,
        root([ordered_list([[plain(["a"])], [plain(["b"])]], 1, '.')])
    );
}

#[test]
fn test_soft_breaks_stay_in_text() {
    let tree = parse_from_markdown("first line\nsecond line\n").unwrap();
    assert_eq!(tree, root([para(["first line\nsecond line"])]));
}

#[test]
fn test_loose_list_items_are_paragraphs() {
    let tree = parse_from_markdown("- a\n\n- b\n").unwrap();
    assert_eq!(tree, root([bullet_list([[para(["a"])], [para(["b"])]], '-')]));
}

#[test]
fn test_html_block_is_raw() {
    let tree = parse_from_markdown("<div>\nhi\n</div>\n").unwrap();
    let raw = tree.children()[0].as_node().unwrap();
    assert_eq!(raw.name(), "RawBlock");
    assert_eq!(raw.str_attr("format"), Some("html"));
    assert_eq!(raw.text_content(), "<div>\nhi\n</div>");
}

#[test]
fn test_inline_math_and_strikeout() {
    let tree = parse_from_markdown("~~gone~~ $x$").unwrap();
    assert_eq!(
        tree,
        root([para([
            Child::from(strikeout(["gone"])),
            Child::from(" "),
            Child::from(math("x")),
        ])])
    );
}

#[test]
fn test_parsed_trees_respect_the_block_inline_split() {
    let tree = parse_from_markdown("> *a*\n>\n> * b\n").unwrap();
    validate(&tree).unwrap();
}
