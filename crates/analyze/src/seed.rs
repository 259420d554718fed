//! Phase 1: seed classification from verification-API call sites.
//!
//! Visits every operation of every function exactly once. Calls whose
//! resolved callee matches the policy are marked true and enqueued;
//! every other operation (non-matching calls included) is marked false.
//! Each operation leaves this pass with a definite mark, which is the
//! precondition for any consumer being queried in phase 2.

use crate::policy::VerifierApiPolicy;
use std::collections::VecDeque;
use verimark_ir::{MarkTable, Module, Node, Opcode, ValueId};

/// Mark every operation and collect the seeded worklist, FIFO in
/// visitation order. Visitation order does not affect the marks: each
/// assignment depends only on the operation's own kind and callee.
pub fn seed(module: &Module, policy: &dyn VerifierApiPolicy) -> (MarkTable, VecDeque<ValueId>) {
    let mut marks = MarkTable::for_module(module);
    let mut worklist = VecDeque::new();

    for op in module.ops() {
        let seeded = match module.node(op) {
            Node::Op(operation) => match &operation.opcode {
                Opcode::Call { callee } => policy.is_verifier_api(callee),
                Opcode::Plain(_) => false,
            },
            _ => false,
        };
        marks.assign(op, seeded);
        if seeded {
            worklist.push_back(op);
        }
    }

    (marks, worklist)
}
