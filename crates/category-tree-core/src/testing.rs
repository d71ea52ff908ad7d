//! Test fixtures shared by the unit tests

use crate::RawCategoryNode;

/// Leaf node with the given id and title
pub fn raw(id: i64, title: &str) -> RawCategoryNode {
    RawCategoryNode {
        id,
        name: format!("Category {}", id),
        title: title.to_string(),
        description: format!("MetaTagDescription {}", id),
        children: Some(vec![]),
        has_children: false,
        url: format!("url {}", id),
    }
}

/// Node with the given children
pub fn parent(id: i64, title: &str, children: Vec<RawCategoryNode>) -> RawCategoryNode {
    RawCategoryNode {
        has_children: !children.is_empty(),
        children: Some(children),
        ..raw(id, title)
    }
}

/// `len` leaves with ids `0..len` and titles `"Title {id}"`
pub fn plain_roots(len: usize) -> Vec<RawCategoryNode> {
    (0..len as i64)
        .map(|i| raw(i, &format!("Title {}", i)))
        .collect()
}

/// Leaves with ids `0..` and the given titles
pub fn titled_roots(titles: &[&str]) -> Vec<RawCategoryNode> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| raw(i as i64, title))
        .collect()
}
