//! Dead conditional branch detection via symbolic execution
//!
//! This crate decides, for a single function body, whether a conditional
//! branch is statically unreachable: its guarding expression always
//! evaluates to the same truth value regardless of runtime input.
//!
//! The core is a symbolic execution engine that walks a control flow graph,
//! propagates an abstract program state (variable bindings over a small
//! value lattice plus an expression-evaluation stack) along every path, and
//! records, per syntactic evaluation point, the set of all states that can
//! reach it. The `dead_condition` rule combines those state sets with
//! static type facts from an external oracle to classify each condition as
//! always-true, always-false, or undetermined.
//!
//! Parsing, CFG construction, type checking, and diagnostic rendering all
//! live outside the crate: the AST arena and CFG are consumed as inputs,
//! and the type checker and variable resolver are capabilities behind
//! traits.

pub mod ast;
pub mod cfg;
pub mod check;
pub mod diagnostic;
pub mod error;
pub mod lints;
pub mod oracle;
pub mod resolve;
pub mod se;
pub mod settings;

#[cfg(test)]
pub mod utils_test;

// Re-export commonly used types for convenience
pub use check::{FunctionBody, check};
pub use diagnostic::{Diagnostic, Severity};
pub use error::EngineError;
pub use lints::dead_condition::dead_condition::{RULE_NAME, Verdict, classify, dead_condition};
pub use se::{ExecutionResult, ProgramState, SymbolicExecution, SymbolicValue};
pub use settings::Settings;
