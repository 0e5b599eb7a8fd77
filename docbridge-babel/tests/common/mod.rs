//! Fixtures shared by the integration tests.

use docbridge_babel::ast::*;
use docbridge_babel::{Child, ConversionGraph, ConvertOptions, Node, PluginOptions, PluginRegistry};

/// Markdown exercising every construct the renderer writes back verbatim.
pub const KITCHENSINK_MD: &str = "\
# Title

Some *emphasis*, **strong** and `code`.

* first
* second
  * nested

3. three
4. four

> quoted text

```rust
fn main() {}
```

See [the site](http://example.com) and ~~old~~ text.

---

$$E=mc^2$$
";

/// Graph with the built-in plugins and no external tool.
pub fn offline_graph() -> ConversionGraph {
    PluginRegistry::with_builtins()
        .build_graph(&offline_options())
        .expect("built-in plugins attach")
}

pub fn offline_options() -> PluginOptions {
    PluginOptions {
        with_external_tools: false,
        ..PluginOptions::default()
    }
}

/// A small document covering headers, inline markup and lists.
pub fn sample_tree() -> Node {
    root([
        header(2, ["Chapter"]),
        para([
            Child::from("hello "),
            Child::from(strong(["bold"])),
            Child::from(" world"),
        ]),
        bullet_list([[plain(["one"])], [plain(["two"])]], '*'),
        ordered_list([[plain(["a"])], [plain(["b"])]], 5, ')'),
        code_block("python", "print(1)"),
    ])
}

/// Parse Markdown through the graph.
pub fn markdown_tree(graph: &ConversionGraph, source: &str) -> Node {
    graph
        .convert(source, ConvertOptions::new().with_source("markdown").with_target("ast"))
        .and_then(|content| content.into_ast())
        .expect("markdown parses")
}

#[test]
fn test_fixtures_are_valid() {
    validate(&sample_tree()).unwrap();
    validate(&markdown_tree(&offline_graph(), KITCHENSINK_MD)).unwrap();
}
