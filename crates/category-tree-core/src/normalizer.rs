//! Category tree normalizer - raw provider tree to display-ready tree
//!
//! The normalizer walks the raw tree depth-first. For each sibling level
//! it computes the level's mark set once, then resolves every node's
//! order and home visibility and recurses into its children.
//!
//! # Pipeline
//!
//! `CategorySource → CategoryResponse → assemble(roots, 0) → fingerprint`
//!
//! # Sorting
//!
//! A node's children are sorted ascending by order by the *parent's* call,
//! after they come back from recursion. The list returned to the outside
//! caller is never sorted, so the root level keeps the provider's order.
//! Home visibility uses each node's input position, taken before sorting.
//!
//! # Guarantees
//!
//! - **Deterministic**: same input always produces same output (the sort is stable)
//! - **Total**: no input makes normalization fail
//! - **Shape preserving**: ids, sibling sets, and parent links are untouched

use std::future::Future;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::marks::marked_titles;
use crate::order::resolve_order;
use crate::policy::HomePolicy;
use crate::source::CategorySource;
use crate::visibility::{show_on_home, HomeContext};
use crate::{CategoryResponse, NormalizedCategoryNode, RawCategoryNode, Result};

// ── Public API ─────────────────────────────────────────────

/// Normalize one sibling level and everything below it under the default policy.
///
/// `None` and an empty slice both produce an empty list.
pub fn assemble(nodes: Option<&[RawCategoryNode]>, level: usize) -> Vec<NormalizedCategoryNode> {
    Normalizer::default().assemble(nodes, level)
}

/// Fetch the raw tree from `get_data` and normalize it.
///
/// A provider failure is returned exactly as the provider produced it.
pub async fn category_tree<F, Fut, E>(
    get_data: F,
) -> std::result::Result<Vec<NormalizedCategoryNode>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<CategoryResponse, E>>,
{
    Normalizer::default().category_tree(get_data).await
}

/// Fetch from a [`CategorySource`] and normalize under the default policy.
pub async fn category_tree_from<S>(
    source: &S,
) -> std::result::Result<Vec<NormalizedCategoryNode>, S::Error>
where
    S: CategorySource + ?Sized,
{
    Normalizer::default().load(source).await
}

/// Hex SHA-256 of the compact JSON form of a normalized tree.
///
/// Two trees have the same fingerprint exactly when they serialize
/// identically, which makes it a cheap snapshot comparison.
pub fn fingerprint(tree: &[NormalizedCategoryNode]) -> Result<String> {
    let canonical = serde_json::to_vec(tree)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}

// ── Normalizer ─────────────────────────────────────────────

/// Runs the assembler under a [`HomePolicy`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: HomePolicy,
}

impl Normalizer {
    pub fn new(policy: HomePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &HomePolicy {
        &self.policy
    }

    /// Normalize a provider payload from the root level
    pub fn normalize(&self, response: &CategoryResponse) -> Vec<NormalizedCategoryNode> {
        self.assemble(response.roots(), 0)
    }

    pub async fn category_tree<F, Fut, E>(
        &self,
        get_data: F,
    ) -> std::result::Result<Vec<NormalizedCategoryNode>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<CategoryResponse, E>>,
    {
        let response = get_data().await?;
        debug!(
            roots = response.roots().map_or(0, <[_]>::len),
            "category data received"
        );
        Ok(self.normalize(&response))
    }

    pub async fn load<S>(
        &self,
        source: &S,
    ) -> std::result::Result<Vec<NormalizedCategoryNode>, S::Error>
    where
        S: CategorySource + ?Sized,
    {
        self.category_tree(|| source.fetch()).await
    }

    /// Normalize `nodes` as the sibling level at depth `level`.
    ///
    /// Children of every returned node are sorted by order; the returned
    /// list itself stays in input order.
    pub fn assemble(
        &self,
        nodes: Option<&[RawCategoryNode]>,
        level: usize,
    ) -> Vec<NormalizedCategoryNode> {
        let nodes = match nodes {
            Some(nodes) if !nodes.is_empty() => nodes,
            _ => return Vec::new(),
        };

        let marker = self.policy.marker;
        let marks = marked_titles(nodes, marker);
        debug!(level, siblings = nodes.len(), marked = marks.len(), "assembling level");

        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let mut children = self.assemble(node.children(), level + 1);
                children.sort_by_key(|child| child.order);

                let home = HomeContext {
                    level,
                    level_len: nodes.len(),
                    marks: &marks,
                    index,
                    title: &node.title,
                };

                NormalizedCategoryNode {
                    name: node.name.clone(),
                    id: node.id,
                    image: node.description.clone(),
                    order: resolve_order(&node.title, node.id, &marks, marker),
                    children,
                    show_on_home: show_on_home(&home, &self.policy),
                }
            })
            .collect()
    }
}
