use crate::constants::{
    DEFAULT_TRUSTED_DOMAINS, TRUSTED_SOURCE_SCORE, UNKNOWN_SOURCE_SCORE, UNTRUSTED_SOURCE_SCORE,
};

/// Read-only set of trusted domain substrings.
///
/// Entries are stored lower-cased; matching is a case-insensitive substring test, so
/// `"https://www.BBC.com/news/x"` matches `bbc.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustTable {
    domains: Vec<String>,
}

impl Default for TrustTable {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_DOMAINS.iter().copied())
    }
}

impl TrustTable {
    /// Builds a table, lower-casing entries and dropping blanks and duplicates.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if !domain.is_empty() && !normalized.contains(&domain) {
                normalized.push(domain);
            }
        }
        Self {
            domains: normalized,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// `true` if `source` contains any trusted entry (case-insensitive).
    pub fn is_trusted(&self, source: &str) -> bool {
        let source = source.to_lowercase();
        self.domains.iter().any(|d| source.contains(d.as_str()))
    }
}

/// Credibility contribution of a source: `0.5` when absent or empty, `0.1` when it
/// matches a trusted domain, `0.8` otherwise.
pub fn source_score(table: &TrustTable, source: Option<&str>) -> f64 {
    match source {
        None | Some("") => UNKNOWN_SOURCE_SCORE,
        Some(s) if table.is_trusted(s) => TRUSTED_SOURCE_SCORE,
        Some(_) => UNTRUSTED_SOURCE_SCORE,
    }
}
