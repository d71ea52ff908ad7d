//! Home visibility - which categories are promoted to the home page
//!
//! Only root categories are ever promoted. Small root sets are promoted
//! in full. Larger ones promote their marked titles when any exist, and
//! otherwise the first few nodes in input order.

use crate::marks::MarkSet;
use crate::policy::HomePolicy;

/// Everything the policy needs to know about one node's position.
#[derive(Debug, Clone, Copy)]
pub struct HomeContext<'a> {
    /// Depth of the node, 0 for roots
    pub level: usize,
    /// Number of siblings at this level, the node included
    pub level_len: usize,
    /// Marked titles of this level
    pub marks: &'a MarkSet<'a>,
    /// Position in the input order, before children are sorted
    pub index: usize,
    pub title: &'a str,
}

/// Decide whether a node is shown on the home page. First matching rule wins.
pub fn show_on_home(ctx: &HomeContext<'_>, policy: &HomePolicy) -> bool {
    if ctx.level != 0 {
        return false;
    }
    if ctx.level_len <= policy.promote_all_max {
        return true;
    }
    if !ctx.marks.is_empty() {
        return ctx.marks.contains(ctx.title);
    }
    ctx.index < policy.promote_first
}
