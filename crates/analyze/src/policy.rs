//! Verifier-API policy -- the single point where "which calls are
//! instrumentation" lives. Everything else (seeding, closure, reporting)
//! is mechanics: the engine only asks whether a resolved callee name
//! belongs to the verification API.

/// Decides whether a call target is a verification-API function.
pub trait VerifierApiPolicy {
    fn is_verifier_api(&self, callee: &str) -> bool;
}

/// Name prefixes recognized by default: the reserved namespaces for
/// assertion/assumption helpers and contract annotation helpers.
pub const DEFAULT_PREFIXES: [&str; 2] = ["__VERIFIER_", "__CONTRACT_"];

/// The conventional policy: a callee is verification API when its name
/// starts with any recognized prefix.
///
/// An empty prefix list is valid; it seeds nothing and yields the
/// degenerate all-false classification.
#[derive(Debug, Clone)]
pub struct PrefixPolicy {
    prefixes: Vec<String>,
}

impl PrefixPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrefixPolicy {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for PrefixPolicy {
    fn default() -> Self {
        PrefixPolicy::new(DEFAULT_PREFIXES)
    }
}

impl VerifierApiPolicy for PrefixPolicy {
    fn is_verifier_api(&self, callee: &str) -> bool {
        self.prefixes.iter().any(|p| callee.starts_with(p.as_str()))
    }
}
