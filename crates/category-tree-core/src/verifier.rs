//! Tree verifier - checks a normalized tree against the display invariants
//!
//! Used on stored snapshots, where the tree was produced elsewhere and
//! may have been edited by hand. Accumulates every diagnostic instead of
//! stopping at the first, so one run reports the whole picture.
//!
//! # Checks
//!
//! 1. **Ordering** - every `children` list ascends by `order`
//! 2. **Visibility** - nothing below the root is promoted
//! 3. **Promotion** - the root promotion count is reachable under the policy
//!
//! Two siblings sharing an order value is reported as a warning: it is
//! legal, but their relative position then depends only on input order.

use crate::policy::HomePolicy;
use crate::NormalizedCategoryNode;

// ── Verification Result Types ─────────────────────────────

/// Result of tree verification - accumulates all diagnostics
#[derive(Debug, Clone, Default)]
pub struct VerificationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl VerificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no errors were found (warnings are OK)
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    fn add(&mut self, severity: Severity, kind: DiagnosticKind, path: &[i64], message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            kind,
            message,
            path: path.to_vec(),
        });
    }
}

/// A single verification diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Ids from the root down to the parent of the offending level;
    /// empty for the root level itself
    pub path: Vec<i64>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.path.is_empty() {
            write!(f, "{} [{}] at root: {}", prefix, self.kind, self.message)
        } else {
            let path: Vec<String> = self.path.iter().map(i64::to_string).collect();
            write!(
                f,
                "{} [{}] under {}: {}",
                prefix,
                self.kind,
                path.join("/"),
                self.message
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Ordering,
    Visibility,
    Promotion,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DiagnosticKind::Ordering => write!(f, "ordering"),
            DiagnosticKind::Visibility => write!(f, "visibility"),
            DiagnosticKind::Promotion => write!(f, "promotion"),
        }
    }
}

// ── Public API ────────────────────────────────────────────

/// Verify a normalized tree under `policy`.
pub fn verify(tree: &[NormalizedCategoryNode], policy: &HomePolicy) -> VerificationResult {
    let mut result = VerificationResult::new();
    verify_root_promotion(tree, policy, &mut result);
    let mut path = Vec::new();
    verify_level(tree, 0, &mut path, &mut result);
    result
}

// ── Checks ────────────────────────────────────────────────

fn verify_root_promotion(
    roots: &[NormalizedCategoryNode],
    policy: &HomePolicy,
    result: &mut VerificationResult,
) {
    if roots.is_empty() {
        return;
    }
    let promoted = roots.iter().filter(|n| n.show_on_home).count();

    if roots.len() <= policy.promote_all_max {
        for node in roots.iter().filter(|n| !n.show_on_home) {
            result.add(
                Severity::Error,
                DiagnosticKind::Promotion,
                &[],
                format!(
                    "category {} is not promoted, but all {} roots should be",
                    node.id,
                    roots.len()
                ),
            );
        }
    } else if promoted == 0 && policy.promote_first > 0 {
        result.add(
            Severity::Error,
            DiagnosticKind::Promotion,
            &[],
            format!("none of {} root categories is promoted", roots.len()),
        );
    }
}

fn verify_level(
    nodes: &[NormalizedCategoryNode],
    level: usize,
    path: &mut Vec<i64>,
    result: &mut VerificationResult,
) {
    // The root list keeps provider order, so only nested levels must ascend.
    for pair in nodes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if level > 0 && a.order > b.order {
            result.add(
                Severity::Error,
                DiagnosticKind::Ordering,
                path,
                format!(
                    "category {} (order {}) precedes category {} (order {})",
                    a.id, a.order, b.id, b.order
                ),
            );
        }
    }

    let mut seen = std::collections::BTreeMap::new();
    for node in nodes {
        if let Some(first) = seen.insert(node.order, node.id) {
            result.add(
                Severity::Warning,
                DiagnosticKind::Ordering,
                path,
                format!(
                    "categories {} and {} share order {}",
                    first, node.id, node.order
                ),
            );
        }
    }

    for node in nodes {
        if level > 0 && node.show_on_home {
            result.add(
                Severity::Error,
                DiagnosticKind::Visibility,
                path,
                format!("category {} is promoted at level {}", node.id, level),
            );
        }
        path.push(node.id);
        verify_level(&node.children, level + 1, path, result);
        path.pop();
    }
}
