//! Crate-wide constants.
//!
//! Reserved option names, usage layout values and the message templates used
//! when reporting parse errors.

// === Application Metadata ===

/// Crate name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current crate version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Reserved Options ===

/// Short name of the built-in help flag.
pub const HELP_FLAG_SHORT: &str = "h";
/// Long name of the built-in help flag.
pub const HELP_FLAG_LONG: &str = "help";
/// Description shown for the built-in help flag.
pub const HELP_FLAG_DESCRIPTION: &str = "print this help";

// === Program Name ===

/// Environment variable read by [`crate::Cli::program_name_from_env`].
pub const PROGRAM_NAME_ENV: &str = "CLIWE_PROGRAM_NAME";

// === Usage Layout ===

/// Placeholder used when an option expects a value but none was named.
pub const DEFAULT_PLACEHOLDER: &str = "ARG";
/// Total width of the rendered usage block.
pub const HELP_WIDTH: usize = 74;
/// Spaces before each option row.
pub const LEFT_PAD: usize = 2;
/// Spaces between the option column and its description.
pub const DESC_PAD: usize = 2;
/// Prefix of the synopsis line.
pub const USAGE_PREFIX: &str = "usage: ";

// === Messages ===

/// Prefix of the line announcing a parse error.
pub const ERR_PREFIX: &str = "ERROR: ";
/// Suffix appended to the description of options with a default.
pub const MSG_DEFAULT_VALUE: &str = "(default value: {})";
