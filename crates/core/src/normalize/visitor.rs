//! Depth-first traversal driver with enter/exit hooks.

use crate::error::Result;
use tree_sitter::Node;

/// Per-node hooks invoked by [`walk_tree`]. Implementations dispatch on the
/// node kind and treat unrecognized kinds as a no-op, so a front end never
/// fails on grammar shapes it does not understand.
pub trait TreeVisitor {
    fn enter_node(&mut self, node: &Node) -> Result<()>;
    fn exit_node(&mut self, node: &Node) -> Result<()>;
}

/// Walks the subtree under `root` depth-first, top-down, in a single pass.
/// Every node is entered before its children and exited after them.
pub fn walk_tree<V: TreeVisitor>(root: Node, visitor: &mut V) -> Result<()> {
    let mut cursor = root.walk();
    'descend: loop {
        visitor.enter_node(&cursor.node())?;
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            visitor.exit_node(&cursor.node())?;
            if cursor.goto_next_sibling() {
                continue 'descend;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
        }
    }
}
