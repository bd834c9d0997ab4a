use std::fmt;

use crate::ast::NodeId;
use crate::resolve::VariableId;

/// Where an [`SymbolicValue::Unknown`] came from.
///
/// Unknowns carry their origin so that a value copied between variables
/// compares equal to itself while the results of two independent calls stay
/// distinct. Origins are deterministic, so states containing unknowns
/// deduplicate structurally and loops reach a fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Produced by evaluating this expression node.
    Expression(NodeId),
    /// Produced by widening a literal binding of this variable.
    Widened(VariableId),
}

/// Abstract description of a runtime value.
///
/// The lattice is deliberately small: a value is a known literal, known to
/// exist with unknown content, or explicitly undefined. There is no numeric
/// reasoning and no join of differing values; diversity at join points is
/// kept as distinct program states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicValue {
    /// Statically known to equal this literal (textual form, e.g. `"0"`).
    Literal(String),
    /// Exists, content undetermined (e.g. the result of a call).
    Unknown(Provenance),
    /// Explicitly bound to the absence of a value.
    Undefined,
}

impl SymbolicValue {
    pub fn literal(text: impl Into<String>) -> Self {
        SymbolicValue::Literal(text.into())
    }

    /// A fresh unknown originating at `origin`.
    pub fn unknown(origin: NodeId) -> Self {
        SymbolicValue::Unknown(Provenance::Expression(origin))
    }

    pub fn undefined() -> Self {
        SymbolicValue::Undefined
    }

    /// Widened form of this value when bound to `var`: literals collapse to
    /// an unknown keyed by the variable, everything else is unchanged. Used
    /// by the engine to bound per-block state diversity on loops.
    pub fn widened(&self, var: VariableId) -> SymbolicValue {
        match self {
            SymbolicValue::Literal(_) => SymbolicValue::Unknown(Provenance::Widened(var)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for SymbolicValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolicValue::Literal(text) => write!(f, "literal({text})"),
            SymbolicValue::Unknown(Provenance::Expression(node)) => write!(f, "unknown({node})"),
            SymbolicValue::Unknown(Provenance::Widened(var)) => write!(f, "unknown(widened {var})"),
            SymbolicValue::Undefined => write!(f, "undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_with_same_text_are_equal() {
        assert_eq!(SymbolicValue::literal("0"), SymbolicValue::literal("0"));
        assert_ne!(SymbolicValue::literal("0"), SymbolicValue::literal("1"));
    }

    #[test]
    fn test_unknowns_compare_by_origin() {
        let a = SymbolicValue::unknown(NodeId(1));
        let b = SymbolicValue::unknown(NodeId(1));
        let c = SymbolicValue::unknown(NodeId(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_widening_collapses_literals_only() {
        let var = VariableId(0);
        assert_eq!(
            SymbolicValue::literal("7").widened(var),
            SymbolicValue::Unknown(Provenance::Widened(var))
        );
        assert_eq!(
            SymbolicValue::unknown(NodeId(3)).widened(var),
            SymbolicValue::unknown(NodeId(3))
        );
        assert_eq!(SymbolicValue::undefined().widened(var), SymbolicValue::undefined());
    }
}
