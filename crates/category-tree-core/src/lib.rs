//! Category Tree Core - normalizes raw category trees for display
//!
//! A raw category tree arrives from an external data provider. The
//! normalizer turns it into a display-ready tree where every node carries
//! a resolved display order and a home-page promotion flag.
//!
//! # Architecture
//!
//! ```text
//! CategorySource → CategoryResponse → Normalizer → Vec<NormalizedCategoryNode>
//!                                        │
//!                        marks → order → visibility   (per sibling level)
//!                                        ↓
//!                                    Verifier / fingerprint
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same raw tree always produces the same normalized tree
//! - **Total**: malformed titles and missing lists degrade, never fail
//! - **Shape preserving**: no node is dropped, merged, or moved to another parent
//! - **Children sorted**: every `children` list is ascending by `order`;
//!   the root list keeps its input order

pub mod error;
pub mod marks;
pub mod normalizer;
pub mod order;
pub mod policy;
pub mod source;
pub mod verifier;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
pub use normalizer::{assemble, category_tree, category_tree_from, fingerprint, Normalizer};
pub use policy::HomePolicy;
pub use source::{CategorySource, JsonFileSource, StaticSource};

use serde::{Deserialize, Deserializer, Serialize};

/// A category node as supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategoryNode {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// May carry an order prefix, e.g. `"2#Featured"`
    #[serde(rename = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Becomes `image` in the normalized node
    #[serde(
        rename = "MetaTagDescription",
        default,
        deserialize_with = "null_as_default"
    )]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawCategoryNode>>,
    #[serde(rename = "hasChildren", default, deserialize_with = "null_as_default")]
    pub has_children: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl RawCategoryNode {
    pub fn children(&self) -> Option<&[RawCategoryNode]> {
        self.children.as_deref()
    }
}

/// A display-ready category node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCategoryNode {
    pub name: String,
    pub id: i64,
    pub image: String,
    pub order: i64,
    pub children: Vec<NormalizedCategoryNode>,
    pub show_on_home: bool,
}

/// Payload returned by a data provider. A missing or `null` `data`
/// field is an empty tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    #[serde(default)]
    pub data: Option<Vec<RawCategoryNode>>,
}

impl CategoryResponse {
    pub fn roots(&self) -> Option<&[RawCategoryNode]> {
        self.data.as_deref()
    }
}

impl From<Vec<RawCategoryNode>> for CategoryResponse {
    fn from(data: Vec<RawCategoryNode>) -> Self {
        Self { data: Some(data) }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_NODE: &str = r#"{
        "id": 7,
        "name": "Garden",
        "Title": "3#Garden",
        "MetaTagDescription": "garden.png",
        "children": [],
        "hasChildren": false,
        "url": "/garden"
    }"#;

    #[test]
    fn test_raw_node_wire_names() {
        let node: RawCategoryNode = serde_json::from_str(RAW_NODE).unwrap();
        assert_eq!(node.id, 7);
        assert_eq!(node.title, "3#Garden");
        assert_eq!(node.description, "garden.png");
        assert_eq!(node.url, "/garden");
        assert_eq!(node.children(), Some(&[][..]));
    }

    #[test]
    fn test_raw_node_missing_and_null_fields() {
        let node: RawCategoryNode =
            serde_json::from_str(r#"{"id": 1, "Title": null, "children": null}"#).unwrap();
        assert_eq!(node.title, "");
        assert_eq!(node.name, "");
        assert!(!node.has_children);
        assert!(node.children().is_none());
    }

    #[test]
    fn test_normalized_node_serializes_camel_case() {
        let node = NormalizedCategoryNode {
            name: "Garden".into(),
            id: 7,
            image: "garden.png".into(),
            order: 3,
            children: vec![],
            show_on_home: true,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Garden",
                "id": 7,
                "image": "garden.png",
                "order": 3,
                "children": [],
                "showOnHome": true
            })
        );
    }

    #[test]
    fn test_response_without_data() {
        let response: CategoryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.roots().is_none());
        let response: CategoryResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(response.roots().is_none());
    }

    #[test]
    fn test_determinism_100_iterations() {
        let text = format!(r#"{{"data": [{}, {}]}}"#, RAW_NODE, RAW_NODE);
        let response: CategoryResponse = serde_json::from_str(&text).unwrap();
        let first = assemble(response.roots(), 0);
        for i in 0..100 {
            let result = assemble(response.roots(), 0);
            assert_eq!(first, result, "Non-determinism at iteration {}", i);
        }
    }
}
