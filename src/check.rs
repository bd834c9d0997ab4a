use rayon::prelude::*;
use tracing::debug;

use crate::ast::{NodeId, SyntaxArena};
use crate::cfg::ControlFlowGraph;
use crate::diagnostic::Diagnostic;
use crate::lints::dead_condition::dead_condition::dead_condition;
use crate::oracle::TypeOracle;
use crate::resolve::Resolver;
use crate::settings::Settings;

/// One function body ready for analysis: the arena and CFG built by the
/// front end, the conditions it marked, and the semantic capabilities that
/// answer questions about this body's nodes.
pub struct FunctionBody<'a> {
    pub name: String,
    pub arena: SyntaxArena,
    pub cfg: ControlFlowGraph,
    /// Expressions that guard a conditional branch.
    pub conditions: Vec<NodeId>,
    pub oracle: &'a dyn TypeOracle,
    pub resolver: &'a dyn Resolver,
}

/// Analyze a batch of function bodies.
///
/// Bodies are independent, so the batch is embarrassingly parallel; each
/// worker owns its engine run. An internal error in one body (malformed
/// CFG, invariant violation) yields an `Err` for that body only — the rest
/// of the batch still reports.
pub fn check(bodies: &[FunctionBody], settings: &Settings) -> Vec<(String, anyhow::Result<Vec<Diagnostic>>)> {
    debug!(bodies = bodies.len(), "checking function bodies");
    bodies
        .par_iter()
        .map(|body| {
            let result = dead_condition(
                &body.arena,
                &body.cfg,
                &body.conditions,
                body.oracle,
                body.resolver,
                settings,
            );
            (body.name.clone(), result)
        })
        .collect()
}
