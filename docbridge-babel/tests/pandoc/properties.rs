//! Text tokenization properties

use docbridge_babel::pandoc::{merge_strings, split_spaces};
use docbridge_babel::Child;
use proptest::prelude::*;

#[test]
fn test_split_examples() {
    assert_eq!(split_spaces("a  b"), vec!["a", "", "b"]);
    assert_eq!(
        split_spaces("a b  \tc,d "),
        vec!["a", "", "b", "", "c,d", ""]
    );
}

#[test]
fn test_merge_example() {
    let merged = merge_strings(vec![
        Child::from("a"),
        Child::from(""),
        Child::from(" "),
        Child::from("b"),
    ]);
    assert_eq!(merged, vec![Child::from("a b")]);
}

proptest! {
    #[test]
    fn split_never_yields_adjacent_spaces(text in "[a-z \t\n]{0,40}") {
        let tokens = split_spaces(&text);
        for pair in tokens.windows(2) {
            prop_assert!(!(pair[0].is_empty() && pair[1].is_empty()));
        }
    }

    #[test]
    fn split_keeps_every_word(text in "[a-z \t]{0,40}") {
        let words: Vec<String> = split_spaces(&text)
            .into_iter()
            .filter(|token| !token.is_empty())
            .collect();
        let expected: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        prop_assert_eq!(words, expected);
    }

    #[test]
    fn merge_leaves_no_adjacent_or_empty_strings(
        parts in proptest::collection::vec("[a-z ]{0,4}", 0..12)
    ) {
        let children: Vec<Child> = parts.iter().map(|part| Child::from(part.as_str())).collect();
        let merged = merge_strings(children);
        let joined: String = parts.concat();
        if joined.is_empty() {
            prop_assert!(merged.is_empty());
        } else {
            prop_assert_eq!(merged, vec![Child::from(joined.as_str())]);
        }
    }
}
