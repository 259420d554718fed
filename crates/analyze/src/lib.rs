//! verimark-analyze: the verifier-code classification engine.
//!
//! Classifies every operation in a module as instrumentation (verifier)
//! code or genuine program code, in two strictly ordered phases:
//!
//! 1. **Seed** ([`seed::seed`]) -- every operation is marked once; calls
//!    whose callee matches the [`VerifierApiPolicy`] are marked true and
//!    enqueued.
//! 2. **Closure** ([`closure::propagate`]) -- the worklist is drained to
//!    a fixed point, upgrading non-call operations whose every consumer
//!    is already marked.
//!
//! [`classify()`] composes the phases so callers cannot interleave them;
//! phase 2 assumes every operation's mark is determinate, which only
//! holds after phase 1 has run to completion.

pub mod closure;
pub mod policy;
pub mod report;
pub mod seed;
pub mod users;

pub use policy::{PrefixPolicy, VerifierApiPolicy, DEFAULT_PREFIXES};
pub use report::{ClassificationReport, Finding, FindingSeverity, FunctionSummary};

use verimark_ir::{MarkTable, Module};

/// Result of a classification run: the completed mark table plus the
/// aggregated report.
#[derive(Debug, Clone)]
pub struct Classification {
    pub marks: MarkTable,
    pub report: ClassificationReport,
}

/// Run the full two-phase classification on a module.
pub fn classify(module: &Module, policy: &dyn VerifierApiPolicy) -> Classification {
    let (mut marks, worklist) = seed::seed(module, policy);
    closure::propagate(module, &mut marks, worklist);
    let report = report::build_report(module, &marks);
    Classification { marks, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verimark_ir::Module;

    // End-to-end coverage of the classification scenarios; the phase
    // internals are tested in their own modules.

    #[test]
    fn test_lone_verifier_call() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let call = m.add_call(f, "__VERIFIER_assert", &[]);
        let other = m.add_op(f, "add", &[]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(result.marks.is_marked(call));
        assert!(!result.marks.is_marked(other));
    }

    #[test]
    fn test_exclusive_producer_upgraded() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let b = m.add_call(f, "__VERIFIER_assert", &[a]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(result.marks.is_marked(a));
        assert!(result.marks.is_marked(b));
    }

    #[test]
    fn test_shared_producer_stays_program_code() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        m.add_call(f, "__VERIFIER_assert", &[a]);
        m.add_op(f, "store", &[a]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(!result.marks.is_marked(a));
    }

    #[test]
    fn test_chain_closed_over_two_hops() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let b = m.add_op(f, "mul", &[a]);
        let c = m.add_call(f, "__VERIFIER_assert", &[b]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(result.marks.is_marked(a));
        assert!(result.marks.is_marked(b));
        assert!(result.marks.is_marked(c));
    }

    #[test]
    fn test_unconsumed_operation_stays_false() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let dead = m.add_op(f, "add", &[]);
        m.add_call(f, "__VERIFIER_assert", &[]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(!result.marks.is_marked(dead));
    }

    #[test]
    fn test_cycle_through_merge_values() {
        // Merge values consuming each other cycle; the operation feeding
        // them is still upgraded because its operation consumers are all
        // marked, and the reachability test terminates on the cycle.
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let m1 = m.add_composite(&[]);
        let m2 = m.add_composite(&[m1]);
        m.set_operands(m1, vec![a, m2]);
        m.add_call(f, "__VERIFIER_assert", &[a]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(result.marks.is_marked(a));
    }

    #[test]
    fn test_idempotent_over_rerun() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let a = m.add_op(f, "add", &[]);
        let b = m.add_op(f, "mul", &[a]);
        m.add_call(f, "__VERIFIER_assert", &[b]);
        m.add_op(f, "store", &[]);

        let policy = PrefixPolicy::default();
        let first = classify(&m, &policy);
        let second = classify(&m, &policy);
        assert_eq!(first.marks, second.marks);
    }

    #[test]
    fn test_multi_function_module() {
        let mut m = Module::new("m");
        let f = m.add_function("checked");
        let a = m.add_op(f, "add", &[]);
        m.add_call(f, "__VERIFIER_assert", &[a]);
        let g = m.add_function("plain");
        let b = m.add_op(g, "add", &[]);
        m.add_op(g, "store", &[b]);

        let result = classify(&m, &PrefixPolicy::default());
        assert!(result.marks.is_marked(a));
        assert!(!result.marks.is_marked(b));
        assert_eq!(result.report.functions["checked"].verifier_count, 2);
        assert_eq!(result.report.functions["plain"].verifier_count, 0);
    }

    #[test]
    fn test_empty_module() {
        let m = Module::new("empty");
        let result = classify(&m, &PrefixPolicy::default());
        assert_eq!(result.report.total_operations, 0);
        assert!(result.report.findings.is_empty());
    }

    #[test]
    fn test_custom_policy_changes_seeds() {
        let mut m = Module::new("m");
        let f = m.add_function("main");
        let call = m.add_call(f, "__SPEC_assume", &[]);

        let default_run = classify(&m, &PrefixPolicy::default());
        assert!(!default_run.marks.is_marked(call));

        let custom = PrefixPolicy::new(["__SPEC_"]);
        let custom_run = classify(&m, &custom);
        assert!(custom_run.marks.is_marked(call));
    }
}
