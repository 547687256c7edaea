//! Read access to parsed arguments.

use super::parse::CommandLine;
use crate::registry::Registry;

/// Parsed arguments handed to the [`crate::Cli::execute`] callback.
///
/// Names may be given as short or long option names. Empty strings count as
/// missing everywhere: an empty value falls back to the default, an empty
/// default falls back to the caller's fallback.
#[derive(Debug)]
pub struct Arguments<'a> {
    registry: &'a Registry,
    line: CommandLine,
    program_name: &'a str,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(registry: &'a Registry, line: CommandLine, program_name: &'a str) -> Self {
        Self {
            registry,
            line,
            program_name,
        }
    }

    /// True if the option appeared on the command line.
    pub fn has_argument(&self, name: &str) -> bool {
        self.registry
            .find(name)
            .is_some_and(|spec| self.line.is_present(spec.short_name()))
    }

    /// Effective value of an option: the typed value, else its declared
    /// default.
    pub fn get_argument(&self, name: &str) -> Option<&str> {
        let spec = self.registry.find(name)?;
        self.line
            .value(spec.short_name())
            .filter(|value| !value.is_empty())
            .or_else(|| spec.default_value())
    }

    /// Like [`Self::get_argument`], with `fallback` as the last resort.
    pub fn get_argument_or<'s>(&'s self, name: &str, fallback: &'s str) -> &'s str {
        self.get_argument(name).unwrap_or(fallback)
    }

    /// Tokens that were not consumed by any option, in order.
    pub fn remaining(&self) -> &[String] {
        self.line.remaining()
    }

    /// Name shown in usage output.
    pub fn program_name(&self) -> &str {
        self.program_name
    }
}
