//! Compiled field patterns.

use crate::error::{Result, WrapperError};
use crate::fields::{Field, Registry};
use regex::Regex;

/// Field patterns compiled for full-string matching.
///
/// Each pattern is wrapped as `^(?:<pattern>)$`, so alternations in a
/// pattern cannot escape the anchors.
pub struct CompiledPatterns<'a> {
    patterns: Vec<(&'a Field, Regex)>,
}

impl std::fmt::Debug for CompiledPatterns<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPatterns")
            .field(
                "patterns",
                &self
                    .patterns
                    .iter()
                    .map(|(field, _)| (field.flag, field.pattern))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a> CompiledPatterns<'a> {
    /// Compile every field pattern in registry order.
    ///
    /// # Returns
    ///
    /// * `Ok(CompiledPatterns)` - All patterns compiled
    /// * `Err(WrapperError::InvalidPattern)` - The first pattern that failed to compile
    pub fn from_registry(registry: &'a Registry) -> Result<Self> {
        let mut patterns = Vec::with_capacity(registry.len());

        for field in registry.iter() {
            let regex = anchored(field.pattern).map_err(|source| WrapperError::InvalidPattern {
                flag: field.flag.to_string(),
                pattern: field.pattern.to_string(),
                source,
            })?;
            patterns.push((field, regex));
        }

        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Field, &Regex)> {
        self.patterns.iter().map(|(field, regex)| (*field, regex))
    }
}

fn anchored(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}
