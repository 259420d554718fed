//! Phase 2: backward closure over exclusive verifier use.
//!
//! Drains the seeded worklist FIFO. For each marked operation, every
//! operand that is itself a non-call operation and not yet marked is
//! tested with the exclusive-consumer check; on success it is upgraded
//! and enqueued. Calls are never upgraded here: their classification is
//! authoritative from phase 1, by target identity alone.

use crate::users::only_verifier_users;
use std::collections::VecDeque;
use verimark_ir::{MarkTable, Module, Node, ValueId};

/// Drain the worklist to the fixed point. Terminates because marks are
/// monotonic, each operation enters the worklist at most twice (seeded,
/// then possibly upgraded), and the graph is finite.
pub fn propagate(module: &Module, marks: &mut MarkTable, mut worklist: VecDeque<ValueId>) {
    while let Some(current) = worklist.pop_front() {
        for &operand in module.node(current).operands() {
            let operation = match module.node(operand) {
                Node::Op(operation) => operation,
                _ => continue,
            };
            if marks.is_marked(operand) || operation.opcode.is_call() {
                continue;
            }
            if only_verifier_users(module, marks, operand) {
                marks.upgrade(operand);
                worklist.push_back(operand);
            }
        }
    }
}
