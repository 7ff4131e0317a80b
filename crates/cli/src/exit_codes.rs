//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success (discrepancies do not fail a run)|
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | check            | Missing inputs, bad data, bad config     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `check_exit_code`

use crtcheck_recon::CheckError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - the check ran to completion, with or without discrepancies.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments (clap uses the same code for parse failures).
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Check (3-9)
// =============================================================================

/// Scored response table not found.
pub const EXIT_RESPONSES_MISSING: u8 = 3;

/// Answer key not found.
pub const EXIT_KEY_MISSING: u8 = 4;

/// Input present but unreadable: bad JSON, bad CSV, missing column, bad count.
pub const EXIT_PARSE: u8 = 5;

/// Config file unreadable or invalid.
pub const EXIT_INVALID_CONFIG: u8 = 6;

/// Map a CheckError to its exit code.
pub fn check_exit_code(err: &CheckError) -> u8 {
    match err {
        CheckError::ResponsesMissing { .. } => EXIT_RESPONSES_MISSING,
        CheckError::KeyMissing { .. } => EXIT_KEY_MISSING,
        CheckError::KeyParse(_)
        | CheckError::CsvParse(_)
        | CheckError::MissingColumn { .. }
        | CheckError::InvalidCount { .. } => EXIT_PARSE,
        CheckError::ConfigParse(_) | CheckError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        CheckError::Io(_) => EXIT_ERROR,
    }
}
