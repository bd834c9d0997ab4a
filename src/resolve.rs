use rustc_hash::FxHashMap;
use std::fmt;

use crate::ast::NodeId;

/// Stable identity of a variable binding.
///
/// Two references to the same binding resolve to the same id; two bindings
/// that happen to share a name do not. Identity is assigned by the external
/// semantic model, not derived from the name text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub u32);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Resolves identifier references to the binding they denote.
///
/// Returning `None` means "no information": the engine degrades gracefully
/// instead of failing the analysis.
pub trait Resolver: Sync {
    fn resolve(&self, ident: NodeId) -> Option<VariableId>;
}

/// Map-backed resolver; the front end records one entry per identifier
/// reference (declaration targets included).
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    bindings: FxHashMap<NodeId, VariableId>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ident: NodeId, var: VariableId) {
        self.bindings.insert(ident, var);
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, ident: NodeId) -> Option<VariableId> {
        self.bindings.get(&ident).copied()
    }
}
