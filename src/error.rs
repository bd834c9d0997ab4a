use thiserror::Error;

use crate::cfg::BlockId;

/// Internal analysis failures.
///
/// These are never lint findings: they abort the analysis of the current
/// function body and are reported separately, so the rest of a batch keeps
/// running. `EmptyStack` in particular can only be produced by a bug in an
/// executor or by a CFG whose elements are not in evaluation order.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("internal invariant violated: popped from an empty evaluation stack")]
    EmptyStack,

    #[error("malformed control flow graph: {0}")]
    MalformedCfg(String),

    #[error("malformed syntax arena: {0}")]
    MalformedArena(String),

    #[error("fixpoint did not settle for {0} after {1} incoming states")]
    FixpointOverflow(BlockId, usize),
}
