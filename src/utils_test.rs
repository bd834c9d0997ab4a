use rustc_hash::FxHashMap;

use crate::ast::{NodeId, NodeKind, Span, SyntaxArena};
use crate::cfg::{BlockId, ControlFlowGraph};
use crate::diagnostic::Diagnostic;
use crate::error::EngineError;
use crate::lints::dead_condition::dead_condition::dead_condition;
use crate::oracle::{MapOracle, TypeFacts};
use crate::resolve::{MapResolver, VariableId};
use crate::se::{ExecutionResult, SymbolicExecution};
use crate::settings::Settings;

/// Assembles the arena/CFG/resolver/oracle quadruple a front end would
/// normally produce, one statement helper at a time. Elements land in the
/// current block in evaluation order, the way a real builder emits them.
pub struct FunctionBuilder {
    pub arena: SyntaxArena,
    pub cfg: ControlFlowGraph,
    pub resolver: MapResolver,
    pub oracle: MapOracle,
    pub settings: Settings,
    pub conditions: Vec<NodeId>,
    current: BlockId,
    vars: FxHashMap<String, VariableId>,
}

impl FunctionBuilder {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let cfg = ControlFlowGraph::new();
        let current = cfg.start;
        Self {
            arena: SyntaxArena::new(),
            cfg,
            resolver: MapResolver::new(),
            oracle: MapOracle::new(),
            settings,
            conditions: Vec::new(),
            current,
            vars: FxHashMap::default(),
        }
    }

    pub fn current(&self) -> BlockId {
        self.current
    }

    pub fn set_current(&mut self, block: BlockId) {
        self.current = block;
    }

    pub fn edge(&mut self, from: BlockId, to: BlockId) {
        self.cfg.add_edge(from, to);
    }

    /// Intern a variable by name.
    pub fn var(&mut self, name: &str) -> VariableId {
        let next = VariableId(self.vars.len() as u32);
        *self.vars.entry(name.to_string()).or_insert(next)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let offset = self.arena.len() as u32 * 4;
        self.arena.push(kind, Span::new(offset, offset + 3))
    }

    fn emit(&mut self, node: NodeId) {
        self.cfg.add_element(self.current, node);
    }

    /// An identifier node wired to its binding but not emitted (declaration
    /// and assignment targets are resolved, never evaluated).
    fn ident_node(&mut self, name: &str) -> NodeId {
        let var = self.var(name);
        let id = self.push(NodeKind::Identifier { name: name.to_string() });
        self.resolver.insert(id, var);
        id
    }

    /// An emitted identifier read.
    pub fn read_ident(&mut self, name: &str) -> NodeId {
        let id = self.ident_node(name);
        self.emit(id);
        id
    }

    pub fn number(&mut self, text: &str) -> NodeId {
        let id = self.push(NodeKind::NumberLiteral { text: text.to_string() });
        self.emit(id);
        id
    }

    fn finish_stmt(&mut self, expr: NodeId) {
        let stmt = self.push(NodeKind::ExprStmt { expr });
        self.emit(stmt);
    }

    fn decl(&mut self, name: &str, initializer: Option<NodeId>) {
        let target = self.ident_node(name);
        let decl = self.push(NodeKind::VarDecl { name: target, initializer });
        self.emit(decl);
        self.finish_stmt(decl);
    }

    /// `let name = <number>;`
    pub fn decl_number(&mut self, name: &str, text: &str) {
        let lit = self.number(text);
        self.decl(name, Some(lit));
    }

    /// `let name = <source>;`
    pub fn decl_ident(&mut self, name: &str, source: &str) {
        let src = self.read_ident(source);
        self.decl(name, Some(src));
    }

    /// `let name = callee();`
    pub fn decl_call(&mut self, name: &str, callee: &str) {
        let call = self.call(callee);
        self.decl(name, Some(call));
    }

    /// `let name;`
    pub fn decl_uninit(&mut self, name: &str) {
        self.decl(name, None);
    }

    /// `target = source;`
    pub fn assign_ident(&mut self, target: &str, source: &str) {
        let src = self.read_ident(source);
        let target_node = self.ident_node(target);
        let assign = self.push(NodeKind::Assignment { target: target_node, value: src });
        self.emit(assign);
        self.finish_stmt(assign);
    }

    /// An emitted zero-argument call.
    pub fn call(&mut self, callee: &str) -> NodeId {
        let callee_node = self.ident_node(callee);
        self.emit(callee_node);
        let call = self.push(NodeKind::Call { callee: callee_node, arguments: vec![] });
        self.emit(call);
        call
    }

    /// `a === b` used as a branch condition.
    pub fn condition_eq_idents(&mut self, a: &str, b: &str) -> NodeId {
        let left = self.read_ident(a);
        let right = self.read_ident(b);
        self.condition_eq(left, right)
    }

    /// `name === <number>` used as a branch condition.
    pub fn condition_eq_ident_number(&mut self, name: &str, text: &str) -> NodeId {
        let left = self.read_ident(name);
        let right = self.number(text);
        self.condition_eq(left, right)
    }

    fn condition_eq(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let eq = self.push(NodeKind::Equality { left, right });
        self.emit(eq);
        self.conditions.push(eq);
        eq
    }

    /// A bare identifier used as a branch condition (`if (x)`).
    pub fn condition_ident(&mut self, name: &str) -> NodeId {
        let id = self.read_ident(name);
        self.conditions.push(id);
        id
    }

    /// `obj.prop` used as a branch condition.
    pub fn condition_member(&mut self, object: &str, property: &str) -> NodeId {
        let obj = self.read_ident(object);
        let access = self.push(NodeKind::MemberAccess {
            object: obj,
            property: property.to_string(),
        });
        self.emit(access);
        self.conditions.push(access);
        access
    }

    pub fn set_type(&mut self, node: NodeId, facts: TypeFacts) {
        self.oracle.insert(node, facts);
    }

    pub fn execute(&self) -> Result<ExecutionResult, EngineError> {
        SymbolicExecution::new(&self.arena, &self.cfg, &self.resolver, &self.settings).execute()
    }

    pub fn run_rule(&self) -> anyhow::Result<Vec<Diagnostic>> {
        dead_condition(
            &self.arena,
            &self.cfg,
            &self.conditions,
            &self.oracle,
            &self.resolver,
            &self.settings,
        )
    }
}

/// Format diagnostics as snapshot tests consume them.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "All checks passed!".to_string();
    }
    let mut output = String::new();
    for diagnostic in diagnostics {
        output.push_str(&format!(
            "{}: {} {}\n",
            diagnostic.severity, diagnostic.rule, diagnostic.message
        ));
    }
    output.push_str(&format!(
        "Found {} error{}.",
        diagnostics.len(),
        if diagnostics.len() == 1 { "" } else { "s" }
    ));
    output
}

/// Assert that the builder's snippet produces no finding.
pub fn expect_no_lint(builder: &FunctionBuilder) {
    let diagnostics = builder.run_rule().unwrap();
    assert!(diagnostics.is_empty(), "expected no lint, got: {diagnostics:?}");
}
