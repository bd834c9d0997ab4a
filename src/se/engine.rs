use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::ast::{NodeId, SyntaxArena};
use crate::cfg::{BlockId, ControlFlowGraph};
use crate::error::EngineError;
use crate::resolve::Resolver;
use crate::settings::Settings;

use super::executors::execute_element;
use super::state::ProgramState;

/// Per-node accumulation of every distinct program state that reached the
/// node across all explored paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    states: FxHashMap<NodeId, FxHashSet<ProgramState>>,
}

impl ExecutionResult {
    /// States recorded at `node`. Nodes in blocks never reached from the
    /// start block yield an empty iterator, not an error.
    pub fn states_at(&self, node: NodeId) -> impl Iterator<Item = &ProgramState> {
        self.states.get(&node).into_iter().flatten()
    }

    pub fn is_reached(&self, node: NodeId) -> bool {
        self.states.get(&node).is_some_and(|set| !set.is_empty())
    }

    /// Visit each node once with its full accumulated state set.
    pub fn for_each(&self, mut callback: impl FnMut(NodeId, &FxHashSet<ProgramState>)) {
        for (node, states) in &self.states {
            callback(*node, states);
        }
    }

    fn record(&mut self, node: NodeId, state: ProgramState) {
        self.states.entry(node).or_default().insert(state);
    }
}

/// Walks a control flow graph from its start block, applies the transfer
/// functions to every element of every visited block, and accumulates the
/// per-node state sets.
///
/// Traversal is a worklist fixpoint: a block is reprocessed only for
/// incoming states it has not seen yet (structural equality), which keeps
/// the walk terminating on cyclic graphs. Once a block has processed
/// [`Settings::widen_after`] distinct states, further incoming states are
/// widened before the seen-check, trading literal precision for a bounded
/// state space.
pub struct SymbolicExecution<'a> {
    arena: &'a SyntaxArena,
    cfg: &'a ControlFlowGraph,
    resolver: &'a dyn Resolver,
    settings: &'a Settings,
}

impl<'a> SymbolicExecution<'a> {
    pub fn new(
        arena: &'a SyntaxArena,
        cfg: &'a ControlFlowGraph,
        resolver: &'a dyn Resolver,
        settings: &'a Settings,
    ) -> Self {
        Self { arena, cfg, resolver, settings }
    }

    pub fn execute(&self) -> Result<ExecutionResult, EngineError> {
        self.arena.validate()?;
        self.cfg.validate(self.arena)?;

        let mut result = ExecutionResult::default();
        let mut seen: FxHashMap<BlockId, FxHashSet<ProgramState>> = FxHashMap::default();
        let mut visits: FxHashMap<BlockId, usize> = FxHashMap::default();
        let mut worklist: VecDeque<(BlockId, ProgramState)> = VecDeque::new();
        worklist.push_back((self.cfg.start, ProgramState::empty()));

        debug!(
            start = %self.cfg.start,
            blocks = self.cfg.blocks.len(),
            "starting symbolic execution"
        );

        while let Some((block_id, incoming)) = worklist.pop_front() {
            let processed = visits.get(&block_id).copied().unwrap_or(0);
            let incoming = if processed >= self.settings.widen_after {
                debug!(block = %block_id, processed, "widening incoming state");
                incoming.widened()
            } else {
                incoming
            };

            if !seen.entry(block_id).or_default().insert(incoming.clone()) {
                trace!(block = %block_id, "incoming state already processed");
                continue;
            }
            visits.insert(block_id, processed + 1);
            if processed + 1 > self.settings.max_block_visits {
                return Err(EngineError::FixpointOverflow(block_id, processed + 1));
            }

            let block = self.cfg.block(block_id).ok_or_else(|| {
                EngineError::MalformedCfg(format!("block {block_id} is out of range"))
            })?;
            trace!(block = %block_id, elements = block.elements.len(), "processing block");

            let mut running = incoming;
            for &element in &block.elements {
                let node = self.arena.get(element).ok_or_else(|| {
                    EngineError::MalformedArena(format!("{element} is out of range"))
                })?;
                running = execute_element(self.resolver, node, running)?;
                result.record(element, running.clone());
            }

            // the stack only models intra-statement evaluation
            let outgoing = running.with_empty_stack();
            for &successor in &block.successors {
                worklist.push_back((successor, outgoing.clone()));
            }
        }

        debug!(nodes = result.states.len(), "symbolic execution finished");
        Ok(result)
    }
}
