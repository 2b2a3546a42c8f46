//! Lowering context for CST to AST conversion.

use tree_sitter::Node;

/// Context for lowering CST to AST.
pub struct LoweringCtx<'src> {
    source: &'src str,
}

impl<'src> LoweringCtx<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    /// Get the text content of a node.
    pub fn node_text(&self, node: &Node) -> &'src str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    /// Text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        self.source.get(start..end).unwrap_or("")
    }
}
