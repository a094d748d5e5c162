//! Value validation for nginx-3scale.
//!
//! Every value must match its field pattern in full. Fields are checked in
//! registry order and the first mismatch stops the run; later fields are
//! not examined.

mod patterns;

pub use patterns::CompiledPatterns;

use crate::error::{Result, WrapperError};
use crate::fields::{Registry, Values};

/// Validate all values against the registry.
///
/// All patterns are compiled before any value is checked, so a broken
/// pattern surfaces as [`WrapperError::InvalidPattern`] regardless of the
/// values supplied.
///
/// # Returns
///
/// * `Ok(())` - Every value matched its pattern
/// * `Err(WrapperError::Validation)` - The first field whose value did not match
/// * `Err(WrapperError::InvalidPattern)` - A registry pattern does not compile
pub fn validate(registry: &Registry, values: &Values) -> Result<()> {
    let compiled = CompiledPatterns::from_registry(registry)?;

    for (field, regex) in compiled.iter() {
        let value = values.get(field.flag);
        if !regex.is_match(value) {
            return Err(WrapperError::Validation {
                flag: field.flag.to_string(),
                value: value.to_string(),
                pattern: field.pattern.to_string(),
            });
        }
        log::debug!("--{} accepted: {}", field.flag, values.display(field));
    }

    Ok(())
}
