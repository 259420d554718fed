//! Exclusive-consumer reachability test.
//!
//! Decides whether every operation reachable forward from a candidate
//! along consumer edges -- skipping through non-operation values to
//! their own consumers -- is already marked as verifier code. BFS with a
//! per-invocation visited set: the set bounds revisits to one, so the
//! test terminates even when the graph has merge points or cycles among
//! composite values.

use std::collections::{BTreeSet, VecDeque};
use verimark_ir::{MarkTable, Module, ValueId};

/// True when every operation consuming `candidate`, transitively through
/// non-operation intermediaries, is marked. The single failure path is
/// an unmarked operation; a candidate with no consumers passes
/// vacuously. Marks of all reachable operations must already be
/// assigned.
pub fn only_verifier_users(module: &Module, marks: &MarkTable, candidate: ValueId) -> bool {
    let mut queue: VecDeque<ValueId> = VecDeque::new();
    let mut visited: BTreeSet<ValueId> = BTreeSet::new();

    for &user in module.users(candidate) {
        if visited.insert(user) {
            queue.push_back(user);
        }
    }

    while let Some(user) = queue.pop_front() {
        if module.node(user).is_op() {
            if !marks.is_marked(user) {
                return false;
            }
        } else {
            for &next in module.users(user) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PrefixPolicy;
    use crate::seed::seed;
    use verimark_ir::Module;

    #[test]
    fn test_single_marked_consumer_passes() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        m.add_call(f, "__VERIFIER_assert", &[a]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_one_unmarked_consumer_fails() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        m.add_call(f, "__VERIFIER_assert", &[a]);
        m.add_op(f, "mul", &[a]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(!only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_no_consumers_passes_vacuously() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_skips_through_composite_to_its_consumers() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let comp = m.add_composite(&[a]);
        m.add_call(f, "__VERIFIER_assert", &[comp]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_unmarked_consumer_behind_composite_fails() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let comp = m.add_composite(&[a]);
        m.add_call(f, "__VERIFIER_assert", &[comp]);
        m.add_op(f, "mul", &[comp]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(!only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_diamond_fan_out_visited_once() {
        // a feeds two composites that both feed the same call.
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let left = m.add_composite(&[a]);
        let right = m.add_composite(&[a]);
        m.add_call(f, "__VERIFIER_assert", &[left, right]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_terminates_on_composite_cycle() {
        // m1 and m2 consume each other; the only operation consumer is
        // a marked call. The visited set must cut the cycle.
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let m1 = m.add_composite(&[]);
        let m2 = m.add_composite(&[m1]);
        m.set_operands(m1, vec![a, m2]);
        m.add_call(f, "__VERIFIER_assert", &[m2]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }

    #[test]
    fn test_self_referential_composite_terminates() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let knot = m.add_composite(&[]);
        m.set_operands(knot, vec![a, knot]);
        m.add_call(f, "__VERIFIER_assert", &[knot]);

        let (marks, _) = seed(&m, &PrefixPolicy::default());
        assert!(only_verifier_users(&m, &marks, a));
    }
}
