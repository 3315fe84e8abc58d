//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain     | Description                                   |
//! |------|------------|-----------------------------------------------|
//! | 0    | Universal  | Success (validation status PASS)              |
//! | 1    | Universal  | General error (unspecified)                   |
//! | 2    | Universal  | CLI usage error (bad args)                    |
//! | 3    | Universal  | I/O error (unreadable input, unwritable file) |
//! | 4    | validate   | Request JSON could not be parsed              |
//! | 5    | config     | Config file failed to parse or validate       |
//! | 6    | validate   | Validation status FAIL                        |
//! | 7    | validate   | Validation status WARNING under `--strict`    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use scopecheck_recon::ValidatorError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, out-of-range options.
pub const EXIT_USAGE: u8 = 2;

/// Cannot read input or write output.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Validate / config (4-7)
// =============================================================================

/// Request JSON is malformed or has the wrong shape.
pub const EXIT_INVALID_REQUEST: u8 = 4;

/// Config TOML is malformed or fails validation.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Validation finished with status FAIL (critical issues found).
pub const EXIT_VALIDATION_FAIL: u8 = 6;

/// Validation finished with status WARNING and `--strict` was given.
pub const EXIT_VALIDATION_WARNING: u8 = 7;

// =============================================================================
// Engine Error Types
// =============================================================================

/// Map an engine error to its exit code.
pub fn validator_exit_code(err: &ValidatorError) -> u8 {
    match err {
        ValidatorError::ConfigParse(_) | ValidatorError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ValidatorError::InputParse(_) => EXIT_INVALID_REQUEST,
        ValidatorError::Serialize(_) => EXIT_ERROR,
    }
}
