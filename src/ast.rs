use serde::Serialize;
use std::fmt;

use crate::error::EngineError;

/// Byte range of a node in the original source, supplied by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Unique identifier for a node in a [`SyntaxArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The expression shapes the engine understands.
///
/// Child references point into the same arena. A control flow graph lists
/// nodes in left-to-right evaluation order (operands before the node that
/// consumes them), except that the target of a declaration or assignment is
/// never listed: the left-hand side is resolved, not evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A numeric literal, kept as its textual form (e.g. `"0"`).
    NumberLiteral { text: String },
    /// An identifier reference in value position.
    Identifier { name: String },
    /// `let v = <expr>` or `let v;`. `name` is an [`NodeKind::Identifier`]
    /// node used only for resolution.
    VarDecl {
        name: NodeId,
        initializer: Option<NodeId>,
    },
    /// `v = <expr>`. `target` is an identifier node used only for resolution.
    Assignment { target: NodeId, value: NodeId },
    /// Strict equality comparison (`a === b`).
    Equality { left: NodeId, right: NodeId },
    /// Property access (`obj.prop`).
    MemberAccess { object: NodeId, property: String },
    /// A call expression.
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// Statement wrapper: discards the value its expression left on the
    /// evaluation stack, so the stack is balanced at statement boundaries.
    ExprStmt { expr: NodeId },
}

impl NodeKind {
    /// Child node references, in evaluation order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::NumberLiteral { .. } | NodeKind::Identifier { .. } => vec![],
            NodeKind::VarDecl { name, initializer } => {
                let mut out = vec![*name];
                out.extend(initializer.iter().copied());
                out
            }
            NodeKind::Assignment { target, value } => vec![*target, *value],
            NodeKind::Equality { left, right } => vec![*left, *right],
            NodeKind::MemberAccess { object, .. } => vec![*object],
            NodeKind::Call { callee, arguments } => {
                let mut out = vec![*callee];
                out.extend(arguments.iter().copied());
                out
            }
            NodeKind::ExprStmt { expr } => vec![*expr],
        }
    }
}

/// A single node: shape plus source span.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
}

/// Owns every node of one function body, indexed by [`NodeId`].
///
/// The arena is input: an external front end builds it alongside the CFG.
#[derive(Debug, Clone, Default)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, kind, span });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Preorder traversal of a subtree, including the node itself.
    pub fn subtree(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        let mut pending = vec![id];
        std::iter::from_fn(move || {
            let next = pending.pop()?;
            let node = self.get(next)?;
            pending.extend(node.kind.children());
            Some(node)
        })
    }

    /// Check that every child reference points into the arena.
    pub fn validate(&self) -> Result<(), EngineError> {
        for node in &self.nodes {
            for child in node.kind.children() {
                if child.0 as usize >= self.nodes.len() {
                    return Err(EngineError::MalformedArena(format!(
                        "{} references {} which is out of range",
                        node.id, child
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_includes_all_descendants() {
        let mut arena = SyntaxArena::new();
        let obj = arena.push(
            NodeKind::Identifier { name: "obj".to_string() },
            Span::new(0, 3),
        );
        let access = arena.push(
            NodeKind::MemberAccess { object: obj, property: "prop".to_string() },
            Span::new(0, 8),
        );
        let zero = arena.push(
            NodeKind::NumberLiteral { text: "0".to_string() },
            Span::new(13, 14),
        );
        let eq = arena.push(
            NodeKind::Equality { left: access, right: zero },
            Span::new(0, 14),
        );

        let ids: Vec<NodeId> = arena.subtree(eq).map(|n| n.id).collect();
        assert!(ids.contains(&eq));
        assert!(ids.contains(&access));
        assert!(ids.contains(&obj));
        assert!(ids.contains(&zero));
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_validate_rejects_dangling_child() {
        let mut arena = SyntaxArena::new();
        arena.push(
            NodeKind::ExprStmt { expr: NodeId(7) },
            Span::new(0, 1),
        );
        assert!(arena.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_arena() {
        let mut arena = SyntaxArena::new();
        let lit = arena.push(
            NodeKind::NumberLiteral { text: "1".to_string() },
            Span::new(0, 1),
        );
        arena.push(NodeKind::ExprStmt { expr: lit }, Span::new(0, 2));
        assert!(arena.validate().is_ok());
    }
}
