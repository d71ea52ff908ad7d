//! Data provider seam
//!
//! The normalizer does no I/O of its own. A [`CategorySource`] hands it a
//! [`CategoryResponse`]; whatever error the source produces is passed
//! back to the caller untouched.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{CategoryResponse, Error, RawCategoryNode, Result};

/// Supplier of the raw category tree
#[async_trait]
pub trait CategorySource: Send + Sync {
    type Error: Send;

    async fn fetch(&self) -> std::result::Result<CategoryResponse, Self::Error>;
}

// ── In-memory source ───────────────────────────────────────

/// A fixed payload, handed out on every fetch
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    response: CategoryResponse,
}

impl StaticSource {
    pub fn new(response: CategoryResponse) -> Self {
        Self { response }
    }
}

impl From<Vec<RawCategoryNode>> for StaticSource {
    fn from(data: Vec<RawCategoryNode>) -> Self {
        Self::new(data.into())
    }
}

#[async_trait]
impl CategorySource for StaticSource {
    type Error = Infallible;

    async fn fetch(&self) -> std::result::Result<CategoryResponse, Infallible> {
        Ok(self.response.clone())
    }
}

// ── JSON snapshot file ─────────────────────────────────────

/// Reads a JSON snapshot from disk on every fetch.
///
/// The file may hold either a provider payload (`{"data": [...]}`) or a
/// bare array of raw nodes.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CategorySource for JsonFileSource {
    type Error = Error;

    async fn fetch(&self) -> Result<CategoryResponse> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = text.len(), "read category snapshot");
        parse_snapshot(&text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Bare(Vec<RawCategoryNode>),
    Wrapped(CategoryResponse),
}

/// Decode snapshot text in either accepted shape
pub fn parse_snapshot(text: &str) -> Result<CategoryResponse> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    Ok(match snapshot {
        Snapshot::Bare(data) => data.into(),
        Snapshot::Wrapped(response) => response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{category_tree_from, Normalizer};
    use crate::policy::HomePolicy;
    use crate::testing::plain_roots;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {"id": 1, "name": "A", "Title": "2#A", "MetaTagDescription": "a.png", "children": [], "hasChildren": false, "url": "/a"},
        {"id": 2, "name": "B", "Title": "B", "MetaTagDescription": "b.png", "hasChildren": false, "url": "/b"}
    ]"#;

    #[test]
    fn test_parse_bare_array() {
        let response = parse_snapshot(SNAPSHOT).unwrap();
        assert_eq!(response.roots().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_parse_wrapped_payload() {
        let response = parse_snapshot(&format!(r#"{{"data": {}}}"#, SNAPSHOT)).unwrap();
        assert_eq!(response.roots().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_parse_wrapped_without_data() {
        let response = parse_snapshot("{}").unwrap();
        assert!(response.roots().is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_snapshot("[{\"id\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parse_node_without_id_rejected() {
        assert!(parse_snapshot(r#"[{"name": "no id"}]"#).is_err());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::from(plain_roots(10));
        let result = category_tree_from(&source).await.unwrap();
        assert_eq!(result.len(), 10);
        assert_eq!(result.iter().filter(|r| r.show_on_home).count(), 3);
    }

    #[tokio::test]
    async fn test_static_source_as_trait_object() {
        let source: Box<dyn CategorySource<Error = Infallible>> =
            Box::new(StaticSource::default());
        let result = Normalizer::default().load(source.as_ref()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let result = category_tree_from(&source).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].order, 2);
        assert_eq!(result[1].order, 2);
        assert_eq!(result[0].image, "a.png");
    }

    #[tokio::test]
    async fn test_json_file_source_with_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let normalizer = Normalizer::new(HomePolicy {
            promote_all_max: 0,
            ..HomePolicy::default()
        });
        let result = normalizer.load(&JsonFileSource::new(file.path())).await.unwrap();
        let promoted: Vec<i64> = result.iter().filter(|r| r.show_on_home).map(|r| r.id).collect();
        assert_eq!(promoted, vec![1]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("no/such/categories.json");
        let err = category_tree_from(&source).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
