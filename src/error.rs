//! Error types.
//!
//! [`ConfigError`] means the option declarations themselves are broken and is
//! returned while the CLI is being set up. [`ParseError`] means the user typed
//! something the declarations do not accept; [`crate::Cli::execute`] reports
//! it on the error sink and hands it back in [`crate::Outcome::Rejected`].

use thiserror::Error;

/// A mistake in the option declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("argument name {0} already added")]
    DuplicateShortName(String),

    #[error("long name argument {0} already added")]
    DuplicateLongName(String),

    #[error("short name '{0}' must be a single character other than '-'")]
    InvalidShortName(String),

    #[error("long name '{0}' must be non-empty and must not start with '-'")]
    InvalidLongName(String),
}

/// Rejected command line input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),

    #[error("{}", missing_required(.0))]
    MissingRequiredOptions(Vec<String>),

    #[error("Missing argument for option: {0}")]
    MissingArgument(String),

    #[error("{0}")]
    Other(String),
}

fn missing_required(names: &[String]) -> String {
    let plural = if names.len() > 1 { "s" } else { "" };
    format!("Missing required option{plural}: {}", names.join(", "))
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message() {
        let one = ParseError::MissingRequiredOptions(vec!["r".into()]);
        assert_eq!(one.to_string(), "Missing required option: r");

        let two = ParseError::MissingRequiredOptions(vec!["r".into(), "s".into()]);
        assert_eq!(two.to_string(), "Missing required options: r, s");
    }

    #[test]
    fn test_config_error_names_the_option() {
        let err = ConfigError::DuplicateLongName("flag".into());
        assert_eq!(err.to_string(), "long name argument flag already added");
    }
}
