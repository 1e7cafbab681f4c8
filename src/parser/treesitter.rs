//! Tree-sitter helpers shared by extraction and rendering.

use tree_sitter::{Language, Node, Parser as TsParser, Tree, TreeCursor};

use crate::error::SyntaxError;

/// Parse source code with the given grammar and return the tree.
///
/// Tree-sitter recovers from errors instead of failing, so a tree that
/// contains `ERROR` or `MISSING` nodes is reported as a [`SyntaxError`]
/// pointing at the first offending node.
pub fn parse(language: &Language, source: &str) -> Result<Tree, SyntaxError> {
    let mut parser = TsParser::new();
    parser.set_language(language).map_err(|e| SyntaxError {
        message: format!("grammar unavailable: {}", e),
        line: 1,
        column: 1,
    })?;

    let tree = parser.parse(source, None).ok_or_else(|| SyntaxError {
        message: "source could not be parsed".to_string(),
        line: 1,
        column: 1,
    })?;

    match first_syntax_error(tree.root_node()) {
        Some(err) => Err(err),
        None => Ok(tree),
    }
}

/// Locate the first `ERROR` or `MISSING` node in pre-order.
pub fn first_syntax_error(root: Node) -> Option<SyntaxError> {
    if !root.has_error() {
        return None;
    }

    let node = Preorder::new(root).find(|n| n.is_error() || n.is_missing())?;
    let message = if node.is_missing() {
        format!("missing \"{}\"", node.kind())
    } else {
        "invalid syntax".to_string()
    };
    let pos = node.start_position();

    Some(SyntaxError {
        message,
        line: pos.row + 1,
        column: pos.column + 1,
    })
}

/// Pre-order iterator over a node and all of its descendants.
///
/// Parents are yielded before their children and siblings in document
/// order. The walk never leaves the subtree it was started on.
pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Preorder<'tree> {
    pub fn new(root: Node<'tree>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }

        Some(node)
    }
}
