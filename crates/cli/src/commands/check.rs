use std::path::Path;
use std::process;

use verimark_analyze::FindingSeverity;

use crate::commands::load_and_classify;
use crate::OutputFormat;

pub(crate) fn cmd_check(module_path: &Path, prefixes: &[String], output: OutputFormat, quiet: bool) {
    let (_, classification) = load_and_classify(module_path, prefixes, output, quiet);
    let report = &classification.report;

    if !quiet {
        match output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!("Classification Report");
                println!("=====================");
                println!();
                println!("  Module: {}", report.module_id);
                println!(
                    "  Operations: {} total, {} verifier ({} seeded call(s), {} closure upgrade(s))",
                    report.total_operations,
                    report.total_verifier_operations,
                    report.total_seeded_calls,
                    report.total_closure_upgrades
                );

                for (function_id, summary) in &report.functions {
                    println!(
                        "    {}: {} of {} operation(s) verifier",
                        function_id, summary.verifier_count, summary.operation_count
                    );
                }

                println!();
                println!("Findings:");

                if report.findings.is_empty() {
                    println!("  No findings.");
                } else {
                    for finding in &report.findings {
                        let severity = match finding.severity {
                            FindingSeverity::Warning => "WARNING",
                            FindingSeverity::Info => "INFO",
                        };
                        let context = finding
                            .function_id
                            .as_ref()
                            .map(|id| format!(" [{}]", id))
                            .unwrap_or_default();
                        println!("  [{}]{}: {}", severity, context, finding.message);
                    }
                }
            }
        }
    }

    let has_warnings = report
        .findings
        .iter()
        .any(|f| f.severity == FindingSeverity::Warning);

    if has_warnings {
        process::exit(1);
    }
}
