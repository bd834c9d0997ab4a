use crate::error::EngineError;
use crate::resolve::VariableId;

use super::value::SymbolicValue;

/// Immutable snapshot of variable bindings plus the expression-evaluation
/// stack at one point in execution.
///
/// Every transition returns a new state; prior states stay valid as keys in
/// the per-node state sets. Bindings are an association list sorted by
/// variable id, which makes the derived `Eq`/`Hash` structural and
/// insensitive to construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProgramState {
    bindings: Vec<(VariableId, SymbolicValue)>,
    stack: Vec<SymbolicValue>,
}

impl ProgramState {
    /// No bindings, empty stack.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Current binding of `var`, if any. Unset variables carry no
    /// information.
    pub fn get(&self, var: VariableId) -> Option<&SymbolicValue> {
        self.bindings
            .binary_search_by_key(&var, |(v, _)| *v)
            .ok()
            .map(|i| &self.bindings[i].1)
    }

    /// A new state identical to this one except `var` is bound to `value`.
    pub fn with_binding(&self, var: VariableId, value: SymbolicValue) -> ProgramState {
        let mut next = self.clone();
        match next.bindings.binary_search_by_key(&var, |(v, _)| *v) {
            Ok(i) => next.bindings[i].1 = value,
            Err(i) => next.bindings.insert(i, (var, value)),
        }
        next
    }

    /// A new state with `value` appended to the evaluation stack.
    pub fn push_value(&self, value: SymbolicValue) -> ProgramState {
        let mut next = self.clone();
        next.stack.push(value);
        next
    }

    /// Pop the top of the evaluation stack. An empty stack is an internal
    /// invariant violation: well-formed input can never reach it.
    pub fn pop_value(&self) -> Result<(SymbolicValue, ProgramState), EngineError> {
        let mut next = self.clone();
        match next.stack.pop() {
            Some(value) => Ok((value, next)),
            None => Err(EngineError::EmptyStack),
        }
    }

    /// A new state with the evaluation stack dropped. The stack only models
    /// intra-statement evaluation, so it is cleared when a block's final
    /// state is handed to its successors.
    pub fn with_empty_stack(&self) -> ProgramState {
        if self.stack.is_empty() {
            self.clone()
        } else {
            ProgramState { bindings: self.bindings.clone(), stack: Vec::new() }
        }
    }

    /// Widened copy: every literal binding collapses to an unknown keyed by
    /// its variable. Applied by the engine to block-incoming states (whose
    /// stacks are empty) once a block has been revisited often enough.
    pub fn widened(&self) -> ProgramState {
        ProgramState {
            bindings: self
                .bindings
                .iter()
                .map(|(var, value)| (*var, value.widened(*var)))
                .collect(),
            stack: self.stack.clone(),
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (VariableId, &SymbolicValue)> {
        self.bindings.iter().map(|(var, value)| (*var, value))
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}
