use std::path::Path;
use std::process;

use verimark_ir::to_marked_interchange;

use crate::commands::load_and_classify;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_mark(
    module_path: &Path,
    out: Option<&Path>,
    prefixes: &[String],
    output: OutputFormat,
    quiet: bool,
) {
    let (module, classification) = load_and_classify(module_path, prefixes, output, quiet);

    let marked = to_marked_interchange(&module, &classification.marks);
    let text = serde_json::to_string_pretty(&marked)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));

    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, text + "\n") {
                report_error(
                    &format!("cannot write '{}': {}", path.display(), e),
                    output,
                    quiet,
                );
                process::exit(1);
            }
            if !quiet {
                match output {
                    OutputFormat::Text => println!(
                        "Marked {} operation(s) ({} verifier) -> {}",
                        classification.report.total_operations,
                        classification.report.total_verifier_operations,
                        path.display()
                    ),
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({
                            "out": path.display().to_string(),
                            "total_operations": classification.report.total_operations,
                            "total_verifier_operations": classification.report.total_verifier_operations,
                        })
                    ),
                }
            }
        }
        None => {
            println!("{}", text);
        }
    }
}
