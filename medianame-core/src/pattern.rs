use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Return the patterns that fail to compile, in input order.
///
/// An empty list is valid. Callers that need at least one pattern must check
/// that themselves.
pub fn validate_patterns<S: AsRef<str>>(patterns: &[S]) -> std::result::Result<(), Vec<String>> {
    let invalid: Vec<String> = patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|pattern| Regex::new(pattern).is_err())
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(invalid)
    }
}

/// Ordered, validated, case-insensitive patterns.
///
/// The planner only accepts a `PatternSet`, so a pattern cannot be used for
/// substitution without having been compiled here first.
#[derive(Debug, Clone)]
pub struct PatternSet {
    sources: Vec<String>,
    regexes: Vec<Regex>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        validate_patterns(patterns).map_err(Error::InvalidPatterns)?;

        let mut regexes = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = RegexBuilder::new(pattern.as_ref())
                .case_insensitive(true)
                .build()
                .map_err(|_| Error::InvalidPatterns(vec![pattern.as_ref().to_string()]))?;
            regexes.push(regex);
        }

        Ok(Self {
            sources: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            regexes,
        })
    }

    /// The patterns as the user wrote them
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    /// Apply every pattern in order, each one to the output of the previous.
    ///
    /// `replacement` uses regex replacement syntax (`$1`, `${name}`).
    pub fn substitute(&self, input: &str, replacement: &str) -> String {
        self.regexes
            .iter()
            .fold(input.to_string(), |current, regex| {
                regex.replace_all(&current, replacement).into_owned()
            })
    }
}
