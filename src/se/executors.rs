use crate::ast::{Node, NodeId, NodeKind};
use crate::error::EngineError;
use crate::resolve::Resolver;

use super::state::ProgramState;
use super::value::SymbolicValue;

/// Apply the transfer function for one CFG element.
///
/// Each arm is a pure, local transition: no executor observes traversal
/// order or the CFG. The exhaustive match enforces at compile time that
/// exactly one transition applies per node shape.
pub(crate) fn execute_element(
    resolver: &dyn Resolver,
    node: &Node,
    state: ProgramState,
) -> Result<ProgramState, EngineError> {
    match &node.kind {
        NodeKind::NumberLiteral { text } => {
            Ok(state.push_value(SymbolicValue::literal(text.clone())))
        }
        NodeKind::Identifier { .. } => Ok(identifier_read(resolver, node, state)),
        NodeKind::VarDecl { name, initializer } => {
            binding_write(resolver, *name, initializer.is_some(), state)
        }
        NodeKind::Assignment { target, .. } => binding_write(resolver, *target, true, state),
        NodeKind::Equality { .. } => fold_operands(node, 2, state),
        NodeKind::MemberAccess { .. } => fold_operands(node, 1, state),
        NodeKind::Call { arguments, .. } => fold_operands(node, arguments.len() + 1, state),
        NodeKind::ExprStmt { .. } => {
            let (_, next) = state.pop_value()?;
            Ok(next)
        }
    }
}

/// An identifier in value position pushes its current binding, or a fresh
/// unknown when the binding is unresolved or carries no information.
fn identifier_read(resolver: &dyn Resolver, node: &Node, state: ProgramState) -> ProgramState {
    let value = resolver
        .resolve(node.id)
        .and_then(|var| state.get(var).cloned())
        .unwrap_or_else(|| SymbolicValue::unknown(node.id));
    state.push_value(value)
}

/// Declarations and assignments share one shape: consume the evaluated
/// right-hand value (or `Undefined` for `let v;`), rebind the target, and
/// re-push the value so the construct composes as an expression. The target
/// identifier is resolved, never evaluated.
fn binding_write(
    resolver: &dyn Resolver,
    target: NodeId,
    has_value: bool,
    state: ProgramState,
) -> Result<ProgramState, EngineError> {
    let (value, next) = if has_value {
        state.pop_value()?
    } else {
        (SymbolicValue::undefined(), state)
    };
    let next = match resolver.resolve(target) {
        Some(var) => next.with_binding(var, value.clone()),
        // unresolved target: keep going with no information
        None => next,
    };
    Ok(next.push_value(value))
}

/// Consume `count` operand values and push a fresh unknown for the result.
/// The lattice does not track call results, comparisons, or member reads.
fn fold_operands(
    node: &Node,
    count: usize,
    state: ProgramState,
) -> Result<ProgramState, EngineError> {
    let mut next = state;
    for _ in 0..count {
        let (_, rest) = next.pop_value()?;
        next = rest;
    }
    Ok(next.push_value(SymbolicValue::unknown(node.id)))
}
