//! Order resolution - display order from a title, falling back to the id

use tracing::trace;

use crate::marks::MarkSet;

/// Resolve the display order of a node.
///
/// A marked title contributes only the text before its first `marker`;
/// an unmarked title is parsed whole. When no leading integer can be read
/// the node's `id` is used instead, so this never fails.
pub fn resolve_order(title: &str, id: i64, marks: &MarkSet<'_>, marker: char) -> i64 {
    let candidate = if marks.contains(title) {
        title.split_once(marker).map_or(title, |(head, _)| head)
    } else {
        title
    };

    match parse_leading_int(candidate) {
        Some(order) => order,
        None => {
            trace!(id, title, "title has no leading integer, ordering by id");
            id
        }
    }
}

/// Read a base-10 integer from the start of `text`.
///
/// Leading whitespace and a single `+`/`-` sign are accepted; parsing
/// stops at the first non-digit. Returns `None` when there are no digits
/// or the value does not fit in an `i64`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::marked_titles;
    use crate::testing::raw;
    use rstest::rstest;

    // ── Leading integer parse ──────────────────────────

    #[rstest]
    #[case("2", Some(2))]
    #[case("2extra", Some(2))]
    #[case("  17 apples", Some(17))]
    #[case("\t\n4", Some(4))]
    #[case("-3", Some(-3))]
    #[case("+8x", Some(8))]
    #[case("007", Some(7))]
    #[case("", None)]
    #[case("test", None)]
    #[case("-", None)]
    #[case("- 3", None)]
    #[case("x2", None)]
    #[case("99999999999999999999", None)]
    fn test_parse_leading_int(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_leading_int(text), expected);
    }

    // ── Resolution against a level's marks ─────────────

    #[rstest]
    #[case("2#3", 1, 2)]
    #[case("2", 1, 2)]
    #[case("test#3", 1, 1)]
    #[case("#3", 42, 42)]
    #[case("Title 5", 5, 5)]
    #[case("12#", 0, 12)]
    fn test_resolve_order(#[case] title: &str, #[case] id: i64, #[case] expected: i64) {
        let siblings = vec![raw(id, title)];
        let marks = marked_titles(&siblings, '#');
        assert_eq!(resolve_order(title, id, &marks, '#'), expected);
    }

    #[test]
    fn test_unmarked_title_is_parsed_whole() {
        // "3#4" is absent from the mark set, so it is parsed as-is and
        // still yields its leading integer.
        let marks = MarkSet::default();
        assert_eq!(resolve_order("3#4", 9, &marks, '#'), 3);
    }

    #[test]
    fn test_only_first_marker_splits() {
        let siblings = vec![raw(1, "5#6#7")];
        let marks = marked_titles(&siblings, '#');
        assert_eq!(resolve_order("5#6#7", 1, &marks, '#'), 5);
    }
}
