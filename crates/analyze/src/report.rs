//! ClassificationReport -- aggregated output of a classification run.
//!
//! Summarizes the completed mark table per function and module-wide, and
//! extracts notable findings for display. Seeded calls and closure
//! upgrades are distinguished by operation kind: phase 1 marks only
//! calls true, phase 2 upgrades only non-calls.

use serde::Serialize;
use std::collections::BTreeMap;
use verimark_ir::{MarkTable, Module, Node};

/// Severity level for a classification finding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable finding from classification.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    pub message: String,
    pub function_id: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Classification counts for one function.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSummary {
    pub function_id: String,
    pub operation_count: usize,
    pub verifier_count: usize,
    pub seeded_calls: usize,
    pub closure_upgrades: usize,
}

/// Aggregated classification report for a module.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub module_id: String,
    /// Keyed by function id for deterministic output ordering.
    pub functions: BTreeMap<String, FunctionSummary>,
    pub total_operations: usize,
    pub total_verifier_operations: usize,
    pub total_seeded_calls: usize,
    pub total_closure_upgrades: usize,
    pub findings: Vec<Finding>,
}

/// Build the report from a completed mark table.
pub fn build_report(module: &Module, marks: &MarkTable) -> ClassificationReport {
    let mut functions = BTreeMap::new();
    let mut module_has_calls = false;

    for function in module.functions() {
        let mut summary = FunctionSummary {
            function_id: function.id.clone(),
            operation_count: function.body.len(),
            verifier_count: 0,
            seeded_calls: 0,
            closure_upgrades: 0,
        };

        for &op in &function.body {
            let is_call = match module.node(op) {
                Node::Op(operation) => operation.opcode.is_call(),
                _ => false,
            };
            module_has_calls |= is_call;
            if marks.is_marked(op) {
                summary.verifier_count += 1;
                if is_call {
                    summary.seeded_calls += 1;
                } else {
                    summary.closure_upgrades += 1;
                }
            }
        }

        functions.insert(function.id.clone(), summary);
    }

    let total_operations = functions.values().map(|f| f.operation_count).sum();
    let total_verifier_operations = functions.values().map(|f| f.verifier_count).sum();
    let total_seeded_calls = functions.values().map(|f| f.seeded_calls).sum();
    let total_closure_upgrades = functions.values().map(|f| f.closure_upgrades).sum();

    let mut report = ClassificationReport {
        module_id: module.id.clone(),
        functions,
        total_operations,
        total_verifier_operations,
        total_seeded_calls,
        total_closure_upgrades,
        findings: Vec::new(),
    };
    extract_findings(&mut report, module_has_calls);
    report
}

fn extract_findings(report: &mut ClassificationReport, module_has_calls: bool) {
    // Per-function instrumentation share.
    for (function_id, summary) in &report.functions {
        if summary.verifier_count > 0 {
            report.findings.push(Finding {
                severity: FindingSeverity::Info,
                message: format!(
                    "Function '{}': {} of {} operation(s) classified as verifier code",
                    function_id, summary.verifier_count, summary.operation_count
                ),
                function_id: Some(function_id.clone()),
                details: Some(serde_json::json!({
                    "seeded_calls": summary.seeded_calls,
                    "closure_upgrades": summary.closure_upgrades,
                })),
            });
        }
    }

    // Degenerate-but-valid outcome: calls exist, nothing seeded. Usually
    // a misconfigured prefix set.
    if module_has_calls && report.total_seeded_calls == 0 {
        report.findings.push(Finding {
            severity: FindingSeverity::Warning,
            message: "No call matched the verifier-API policy; every operation is classified as program code".to_string(),
            function_id: None,
            details: None,
        });
    }

    // Sort findings for deterministic output.
    report.findings.sort_by(|a, b| {
        format!("{:?}", a.severity)
            .cmp(&format!("{:?}", b.severity))
            .then_with(|| a.message.cmp(&b.message))
    });
}
