//! Exit code constants for nginx-3scale.
//!
//! Every failure happens before the handoff; once nginx replaces this
//! process its own exit status is what the caller observes.
//! - 1: Command-line parse error
//! - 2: Validation failure (a value does not match its field pattern)
//! - 3: Template read or output write failure
//! - 4: Process replacement failure
//! - 5: Broken field registry (pattern does not compile)

/// Unknown flag, missing flag value, or stray positional argument.
pub const PARSE_FAILURE: i32 = 1;

/// A supplied value does not fully match its field pattern.
pub const VALIDATION_FAILURE: i32 = 2;

/// Template could not be read or the rendered file could not be written.
pub const IO_FAILURE: i32 = 3;

/// nginx could not be executed.
pub const EXEC_FAILURE: i32 = 4;

/// A registry pattern failed to compile.
pub const REGISTRY_DEFECT: i32 = 5;
