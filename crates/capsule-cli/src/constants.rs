//! Shared CLI constants.

/// Process exit codes.
///
/// Clap reports usage errors with its own code 2; everything unmapped
/// falls back to [`exit_codes::GENERIC`].
pub mod exit_codes {
    /// Unclassified failure
    pub const GENERIC: i32 = 1;

    /// Resource not found (config, journal, entry)
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed or required
    pub const AUTH_FAILED: i32 = 5;
}
