use crate::ast::{NodeId, NodeKind, SyntaxArena};
use crate::cfg::ControlFlowGraph;
use crate::diagnostic::{Diagnostic, Severity};
use crate::oracle::{TypeFacts, TypeOracle};
use crate::resolve::Resolver;
use crate::se::{ExecutionResult, SymbolicExecution, SymbolicValue};
use crate::settings::Settings;

/// ## What it does
///
/// Detects conditional expressions that always evaluate to the same truth
/// value regardless of runtime input, which makes one of the guarded
/// branches dead.
///
/// ## Why is this bad?
///
/// A condition that is always `true` or always `false` means some code can
/// never execute. That is either a logic error or leftover code that should
/// be removed.
///
/// ## Example
///
/// ```text
/// let x = 0;
/// if (x === 0) {   // always evaluates to "true"
///   ...
/// }
/// ```
pub const RULE_NAME: &str = "dead_condition";

/// Literal type forms that are always falsy.
const FALSY_LITERALS: [&str; 3] = ["\"\"", "false", "0"];

/// Outcome of classifying one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    AlwaysTrue,
    AlwaysFalse,
    Undetermined,
}

/// Analyze one function body: run the symbolic execution engine over its
/// CFG, then classify every marked condition. `Undetermined` conditions
/// produce no diagnostic; insufficient evidence must never turn into a
/// finding.
pub fn dead_condition(
    arena: &SyntaxArena,
    cfg: &ControlFlowGraph,
    conditions: &[NodeId],
    oracle: &dyn TypeOracle,
    resolver: &dyn Resolver,
    settings: &Settings,
) -> anyhow::Result<Vec<Diagnostic>> {
    let execution = SymbolicExecution::new(arena, cfg, resolver, settings).execute()?;

    let mut diagnostics = Vec::new();
    for &condition in conditions {
        let Some(node) = arena.get(condition) else {
            continue;
        };
        let value = match classify(arena, condition, oracle, resolver, &execution) {
            Verdict::AlwaysTrue => "true",
            Verdict::AlwaysFalse => "false",
            Verdict::Undetermined => continue,
        };
        diagnostics.push(Diagnostic::new(
            RULE_NAME,
            format!(r#"This condition always evaluates to "{value}"."#),
            node.span,
            Severity::Warning,
        ));
    }
    Ok(diagnostics)
}

/// Classify a single condition expression.
///
/// Type facts are consulted first; they decide without looking at symbolic
/// state. The state-based check only handles strict equality between
/// identifier/literal operands.
pub fn classify(
    arena: &SyntaxArena,
    condition: NodeId,
    oracle: &dyn TypeOracle,
    resolver: &dyn Resolver,
    execution: &ExecutionResult,
) -> Verdict {
    // we know nothing about property accesses, anywhere in the subtree
    if contains_member_access(arena, condition) {
        return Verdict::Undetermined;
    }

    if let Some(facts) = oracle.type_of(condition) {
        if always_truthy(&facts) {
            return Verdict::AlwaysTrue;
        }
        if always_falsy(&facts) {
            return Verdict::AlwaysFalse;
        }
    }

    identity_comparison(arena, condition, resolver, execution)
}

fn contains_member_access(arena: &SyntaxArena, condition: NodeId) -> bool {
    arena
        .subtree(condition)
        .any(|node| matches!(node.kind, NodeKind::MemberAccess { .. }))
}

fn always_truthy(facts: &TypeFacts) -> bool {
    if facts.is_any {
        return false;
    }
    if !facts.members.is_empty() {
        return facts.members.iter().all(always_truthy);
    }
    if let Some(text) = &facts.literal {
        return text == "true";
    }
    !facts.possibly_falsy
}

fn always_falsy(facts: &TypeFacts) -> bool {
    if facts.is_any {
        return false;
    }
    if !facts.members.is_empty() {
        return facts.members.iter().all(always_falsy);
    }
    if let Some(text) = &facts.literal {
        return FALSY_LITERALS.contains(&text.as_str());
    }
    facts.is_nullish
}

/// `a === b` where each operand is an identifier or a numeric literal:
/// always true when every state that reaches the comparison gives both
/// operands equal symbolic values. There is no "always false" through this
/// path: unequal symbolic values say nothing about runtime inequality.
fn identity_comparison(
    arena: &SyntaxArena,
    condition: NodeId,
    resolver: &dyn Resolver,
    execution: &ExecutionResult,
) -> Verdict {
    let Some(node) = arena.get(condition) else {
        return Verdict::Undetermined;
    };
    let NodeKind::Equality { left, right } = &node.kind else {
        return Verdict::Undetermined;
    };

    // an unreachable comparison has an empty state set; reporting it via
    // vacuous truth would be a false positive
    let mut states = execution.states_at(condition).peekable();
    if states.peek().is_none() {
        return Verdict::Undetermined;
    }

    let equal_everywhere = states.all(|state| {
        let left = operand_value(arena, *left, resolver, state);
        let right = operand_value(arena, *right, resolver, state);
        matches!((left, right), (Some(a), Some(b)) if a == b)
    });
    if equal_everywhere {
        Verdict::AlwaysTrue
    } else {
        Verdict::Undetermined
    }
}

/// Symbolic value of a comparison operand in one state: an identifier
/// contributes its binding, a numeric literal its literal value. Anything
/// else, or an unbound identifier, yields no information.
fn operand_value(
    arena: &SyntaxArena,
    operand: NodeId,
    resolver: &dyn Resolver,
    state: &crate::se::ProgramState,
) -> Option<SymbolicValue> {
    match &arena.get(operand)?.kind {
        NodeKind::Identifier { .. } => {
            let var = resolver.resolve(operand)?;
            state.get(var).cloned()
        }
        NodeKind::NumberLiteral { text } => Some(SymbolicValue::literal(text.clone())),
        _ => None,
    }
}
