pub(crate) mod check;
pub(crate) mod mark;

use std::path::Path;
use std::process;

use verimark_analyze::{classify, Classification, PrefixPolicy};
use verimark_ir::{load_module, Module};

use crate::{report_error, OutputFormat};

/// Load an interchange module from disk and run the classifier over it.
/// Reports and exits on any load failure; classification itself cannot
/// fail.
pub(crate) fn load_and_classify(
    path: &Path,
    prefixes: &[String],
    output: OutputFormat,
    quiet: bool,
) -> (Module, Classification) {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            report_error(&format!("cannot read '{}': {}", path.display(), e), output, quiet);
            process::exit(1);
        }
    };

    let json: serde_json::Value = match serde_json::from_str(&text) {
        Ok(j) => j,
        Err(e) => {
            report_error(&format!("invalid JSON in '{}': {}", path.display(), e), output, quiet);
            process::exit(1);
        }
    };

    let module = match load_module(&json) {
        Ok(m) => m,
        Err(e) => {
            report_error(&format!("{}", e), output, quiet);
            process::exit(1);
        }
    };

    let policy = if prefixes.is_empty() {
        PrefixPolicy::default()
    } else {
        PrefixPolicy::new(prefixes.iter().cloned())
    };
    let classification = classify(&module, &policy);

    (module, classification)
}
