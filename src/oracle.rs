use rustc_hash::FxHashMap;

use crate::ast::NodeId;

/// Static type facts for one expression, as reported by the external
/// type-checking service.
///
/// This is the full answer surface the analysis needs: whether the type is
/// `any`, whether it can ever be falsy, whether it is restricted to
/// `undefined`/`null`/`void`, its textual form when it is a literal type,
/// and its member types when it is a union or intersection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeFacts {
    pub is_any: bool,
    pub possibly_falsy: bool,
    pub is_nullish: bool,
    pub literal: Option<String>,
    /// Union/intersection member types; empty for plain types.
    pub members: Vec<TypeFacts>,
}

impl TypeFacts {
    /// A non-nullable object/array type: never falsy.
    pub fn object() -> Self {
        Self::default()
    }

    pub fn any() -> Self {
        Self { is_any: true, possibly_falsy: true, ..Self::default() }
    }

    /// A type restricted to `undefined`/`null`/`void`.
    pub fn nullish() -> Self {
        Self {
            possibly_falsy: true,
            is_nullish: true,
            ..Self::default()
        }
    }

    /// A literal type with the given textual form (e.g. `"true"`, `"0"`).
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            possibly_falsy: true,
            literal: Some(text.into()),
            ..Self::default()
        }
    }

    /// `boolean`: possibly falsy, nothing else known.
    pub fn boolean() -> Self {
        Self { possibly_falsy: true, ..Self::default() }
    }

    pub fn union(members: Vec<TypeFacts>) -> Self {
        Self {
            possibly_falsy: members.iter().any(|m| m.possibly_falsy),
            members,
            ..Self::default()
        }
    }
}

/// The type-checking service, consumed as a read-only, side-effect-free
/// oracle. `None` means no type information is available; the analysis
/// degrades to "undetermined" instead of failing.
pub trait TypeOracle: Sync {
    fn type_of(&self, node: NodeId) -> Option<TypeFacts>;
}

/// Fixed-answer oracle backed by a map. Doubles as the test oracle and as a
/// ready-made implementation for embedders that precompute type facts.
#[derive(Debug, Clone, Default)]
pub struct MapOracle {
    types: FxHashMap<NodeId, TypeFacts>,
}

impl MapOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, facts: TypeFacts) {
        self.types.insert(node, facts);
    }
}

impl TypeOracle for MapOracle {
    fn type_of(&self, node: NodeId) -> Option<TypeFacts> {
        self.types.get(&node).cloned()
    }
}
