//! Sparse element lists.
//!
//! Tuples, destructuring declarations and `var` identifier lists allow
//! omitted elements: `(a,,b)` has three slots, the middle one empty.

use crate::syntax::Cst;

/// Splits `children` into element slots around `separator`.
///
/// A separator where an element is expected yields an empty slot, and a
/// trailing separator yields a final empty slot. An empty input has no slots.
/// When two elements are not separated, the offending child is returned.
pub fn sparse_elements<'t, 'src>(
    children: &'t [Cst<'src>],
    separator: &str,
) -> Result<Vec<Option<&'t Cst<'src>>>, &'t Cst<'src>> {
    let mut slots = Vec::new();
    if children.is_empty() {
        return Ok(slots);
    }

    let mut expecting_element = true;
    for child in children {
        if expecting_element {
            if child.text() == separator {
                slots.push(None);
            } else {
                slots.push(Some(child));
                expecting_element = false;
            }
        } else if child.text() == separator {
            expecting_element = true;
        } else {
            return Err(child);
        }
    }

    if expecting_element {
        slots.push(None);
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Span, Token};
    use rstest::rstest;

    fn tokens(texts: &[&'static str]) -> Vec<Cst<'static>> {
        texts
            .iter()
            .map(|text| {
                Cst::Token(Token {
                    text,
                    span: Span::default(),
                })
            })
            .collect()
    }

    fn shape(slots: &[Option<&Cst<'_>>]) -> Vec<Option<String>> {
        slots
            .iter()
            .map(|slot| slot.map(|child| child.text().to_string()))
            .collect()
    }

    #[rstest]
    #[case(&["a", ",", ",", "b"], &[Some("a"), None, Some("b")])]
    #[case(&["a"], &[Some("a")])]
    #[case(&[","], &[None, None])]
    #[case(&["a", ","], &[Some("a"), None])]
    #[case(&[",", "a"], &[None, Some("a")])]
    #[case(&[",", ",", ","], &[None, None, None, None])]
    fn slots_follow_separators(#[case] input: &[&'static str], #[case] expected: &[Option<&str>]) {
        let children = tokens(input);
        let slots = sparse_elements(&children, ",").expect("well formed");
        let expected: Vec<_> = expected.iter().map(|e| e.map(String::from)).collect();
        assert_eq!(shape(&slots), expected);
    }

    #[test]
    fn slot_count_is_one_more_than_separators() {
        let children = tokens(&["x", ",", ",", "y", ",", ","]);
        let separators = children.iter().filter(|c| c.text() == ",").count();
        let slots = sparse_elements(&children, ",").expect("well formed");
        assert_eq!(slots.len(), separators + 1);
    }

    #[test]
    fn empty_input_has_no_slots() {
        let slots = sparse_elements(&[], ",").expect("well formed");
        assert!(slots.is_empty());
    }

    #[test]
    fn adjacent_elements_are_rejected() {
        let children = tokens(&["a", "b"]);
        let found = sparse_elements(&children, ",").expect_err("missing separator");
        assert_eq!(found.text(), "b");
    }
}
