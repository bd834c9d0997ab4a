pub mod engine;
pub(crate) mod executors;
pub mod state;
pub mod value;

pub use engine::{ExecutionResult, SymbolicExecution};
pub use state::ProgramState;
pub use value::{Provenance, SymbolicValue};
