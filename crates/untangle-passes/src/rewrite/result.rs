//! Rewrite result types.

/// Result of offering a node to a statement pattern.
#[derive(Debug)]
pub enum RewriteResult<T> {
    /// The pattern did not match; the node must be left as it was.
    Unchanged,

    /// Replace the node with a single new node.
    Replace(T),

    /// Replace the node with several nodes. In a statement list they are
    /// spliced in place; in a single-statement slot they are wrapped in a
    /// block.
    Expand(Vec<T>),

    /// Remove the node. In a single-statement slot it becomes `;`.
    Erase,
}

impl<T> RewriteResult<T> {
    pub fn is_changed(&self) -> bool {
        !matches!(self, RewriteResult::Unchanged)
    }
}
