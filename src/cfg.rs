use std::fmt;

use crate::ast::{NodeId, SyntaxArena};
use crate::error::EngineError;

/// Unique identifier for a basic block in the control flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// A basic block: an ordered sequence of nodes with no internal branching.
///
/// Elements are listed in evaluation order; operands appear before the node
/// that consumes them.
#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub id: BlockId,
    /// Nodes executed in this block (in evaluation order)
    pub elements: Vec<NodeId>,
    /// Blocks that can execute after this one
    pub successors: Vec<BlockId>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            elements: Vec::new(),
            successors: Vec::new(),
        }
    }
}

/// Control flow graph for a function body.
///
/// The graph is input, produced by an external builder. It may contain
/// cycles and blocks unreachable from `start`; the engine handles both.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    /// All basic blocks in the graph
    pub blocks: Vec<BasicBlock>,
    /// Entry block (where execution starts)
    pub start: BlockId,
}

impl ControlFlowGraph {
    pub fn new() -> Self {
        let start = BasicBlock::new(BlockId(0));
        Self { blocks: vec![start], start: BlockId(0) }
    }

    /// Get a block by its ID
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0)
    }

    /// Get a mutable block by its ID
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(id.0)
    }

    /// Create a new basic block and add it to the graph
    pub fn new_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(BasicBlock::new(id));
        id
    }

    /// Add an edge from one block to another
    pub fn add_edge(&mut self, from: BlockId, to: BlockId) {
        if let Some(from_block) = self.block_mut(from)
            && !from_block.successors.contains(&to)
        {
            from_block.successors.push(to);
        }
    }

    /// Append a node to a block's element list
    pub fn add_element(&mut self, block: BlockId, node: NodeId) {
        if let Some(block) = self.block_mut(block) {
            block.elements.push(node);
        }
    }

    /// Check the graph against the arena it references: the start block must
    /// exist, every successor edge must point at a block, and every element
    /// must point at a node. Violations are precondition failures of the
    /// external builder and fail fast.
    pub fn validate(&self, arena: &SyntaxArena) -> Result<(), EngineError> {
        if self.block(self.start).is_none() {
            return Err(EngineError::MalformedCfg(format!(
                "start block {} is out of range",
                self.start
            )));
        }
        for block in &self.blocks {
            for successor in &block.successors {
                if self.block(*successor).is_none() {
                    return Err(EngineError::MalformedCfg(format!(
                        "{} has dangling successor {}",
                        block.id, successor
                    )));
                }
            }
            for element in &block.elements {
                if element.0 as usize >= arena.len() {
                    return Err(EngineError::MalformedCfg(format!(
                        "{} lists element {} which is not in the arena",
                        block.id, element
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for ControlFlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "CFG:")?;
        writeln!(f, "  Start: {}", self.start)?;
        writeln!(f, "  Blocks:")?;
        for block in &self.blocks {
            writeln!(f, "    {}: {} elements", block.id, block.elements.len())?;
            if !block.successors.is_empty() {
                write!(f, "      -> ")?;
                for (i, succ) in block.successors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", succ)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
