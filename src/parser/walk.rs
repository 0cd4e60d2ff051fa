//! Iterative depth-first traversal producing enter/leave events.

use super::SyntaxNode;

/// One step of a traversal.
#[derive(Debug, Clone, Copy)]
pub enum WalkEvent<'t> {
    /// The node is reached on the way down, before any of its children.
    Enter(SyntaxNode<'t>),
    /// All of the node's children have been visited.
    Leave(SyntaxNode<'t>),
}

/// Pre-order walk over a subtree that also reports when each node is left.
///
/// Driven by a tree-sitter cursor, so nesting depth never grows the call
/// stack. The cursor is rooted at the starting node and never escapes it.
pub struct Walk<'t> {
    cursor: tree_sitter::TreeCursor<'t>,
    source: &'t [u8],
    descending: bool,
    finished: bool,
}

impl<'t> Walk<'t> {
    pub fn new(root: SyntaxNode<'t>) -> Self {
        Self {
            cursor: root.inner().walk(),
            source: root.source,
            descending: true,
            finished: false,
        }
    }
}

impl<'t> Iterator for Walk<'t> {
    type Item = WalkEvent<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let node = SyntaxNode::new(self.cursor.node(), self.source);

        if self.descending {
            if !self.cursor.goto_first_child() {
                self.descending = false;
            }
            return Some(WalkEvent::Enter(node));
        }

        if self.cursor.goto_next_sibling() {
            self.descending = true;
        } else if !self.cursor.goto_parent() {
            self.finished = true;
        }
        Some(WalkEvent::Leave(node))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{NodeKind, SyntaxTree, WalkEvent};

    #[test]
    fn test_events_are_balanced() {
        let tree = SyntaxTree::parse("def f(x):\n    if x:\n        return 1\n").unwrap();
        let mut depth = 0i32;
        let mut max_depth = 0;
        for event in tree.root().walk() {
            match event {
                WalkEvent::Enter(_) => {
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
            assert!(depth >= 0);
        }
        assert_eq!(depth, 0);
        assert!(max_depth > 3);
    }

    #[test]
    fn test_first_and_last_events_are_root() {
        let tree = SyntaxTree::parse("x = 1\n").unwrap();
        let events: Vec<_> = tree.root().walk().collect();

        assert!(matches!(events.first(), Some(WalkEvent::Enter(n)) if n.kind() == NodeKind::Module));
        assert!(matches!(events.last(), Some(WalkEvent::Leave(n)) if n.kind() == NodeKind::Module));
    }

    #[test]
    fn test_subtree_walk_stays_inside_subtree() {
        let source = "for a in b:\n    pass\nwhile c:\n    pass\n";
        let tree = SyntaxTree::parse(source).unwrap();
        let first_loop = tree.root().named_children()[0];

        let kinds: Vec<NodeKind> = first_loop
            .walk()
            .filter_map(|event| match event {
                WalkEvent::Enter(node) => Some(node.kind()),
                WalkEvent::Leave(_) => None,
            })
            .collect();

        assert_eq!(kinds[0], NodeKind::For);
        assert!(!kinds.contains(&NodeKind::While));
    }

    #[test]
    fn test_leaf_root_yields_enter_and_leave() {
        let tree = SyntaxTree::parse("").unwrap();
        let events: Vec<_> = tree.root().walk().collect();
        assert_eq!(events.len(), 2);
    }
}
