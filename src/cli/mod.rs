//! Command-line interface module.
//!
//! [`Cli`] collects option declarations, parses an argument vector with clap,
//! prints usage on `-h`/`--help` or on bad input, and runs the caller's block
//! with the parsed [`Arguments`].

pub mod args;
pub mod parse;
pub mod usage;

use std::ffi::OsString;
use std::io::{self, Write};

use log::{debug, warn};

use crate::constants;
use crate::error::{ConfigError, ParseError};
use crate::registry::{OptionSpec, Registry};

pub use args::Arguments;
pub use parse::CommandLine;
pub use usage::UsagePrinter;

/// Result of one [`Cli::execute`] call.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The block ran and returned this value.
    Completed(R),
    /// Help was printed and the block was skipped
    /// (only with [`Cli::set_help_stops_execution`]).
    HelpShown,
    /// The arguments were rejected; the error and usage went to the error sink.
    Rejected(ParseError),
}

impl<R> Outcome<R> {
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The block's return value, if it ran.
    pub fn completed(self) -> Option<R> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Command line wrapper.
///
/// Every instance starts with the reserved `-h`/`--help` flag.
///
/// ```no_run
/// use cliwe::Cli;
///
/// # fn main() -> Result<(), cliwe::ConfigError> {
/// let mut cli = Cli::with_program_name("my_program_name");
/// cli.add_flag("f", "flag", "this is a flag!")?
///     .add_mandatory_option("r", "required-option", "ARG", "a required option.")?
///     .add_option("o", "other-option", "ARG", "an optional one", Some("VALUE"))?;
///
/// let _ = cli.execute(std::env::args().skip(1), |args| {
///     if args.has_argument("f") {
///         println!("yeah the 'f' flag is on!");
///     }
/// });
/// # Ok(())
/// # }
/// ```
pub struct Cli {
    registry: Registry,
    default_program_name: String,
    program_name_override: Option<String>,
    header: String,
    footer: String,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    help_stops_execution: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    pub fn new() -> Self {
        let mut registry = Registry::new();
        let help = registry.insert(OptionSpec::flag(
            constants::HELP_FLAG_SHORT,
            constants::HELP_FLAG_LONG,
            constants::HELP_FLAG_DESCRIPTION,
        ));
        debug_assert!(help.is_ok(), "help flag must register on an empty registry");

        Self {
            registry,
            default_program_name: String::new(),
            program_name_override: None,
            header: String::new(),
            footer: String::new(),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            help_stops_execution: false,
        }
    }

    /// Creates a wrapper whose usage output shows `name`.
    pub fn with_program_name(name: &str) -> Self {
        let mut cli = Self::new();
        cli.set_default_program_name(name);
        cli
    }

    // === Configuration ===

    pub fn set_default_program_name(&mut self, name: &str) -> &mut Self {
        self.default_program_name = name.to_string();
        self
    }

    /// Name shown instead of the default one. `None` or an empty string
    /// clears the override.
    pub fn set_program_name_override(&mut self, name: Option<&str>) -> &mut Self {
        self.program_name_override = name.map(str::to_string);
        self
    }

    /// Takes the program name override from `CLIWE_PROGRAM_NAME`, if set.
    pub fn program_name_from_env(&mut self) -> &mut Self {
        if let Ok(name) = std::env::var(constants::PROGRAM_NAME_ENV) {
            debug!("program name override from {}: {name}", constants::PROGRAM_NAME_ENV);
            self.program_name_override = Some(name);
        }
        self
    }

    pub fn set_header(&mut self, text: &str) -> &mut Self {
        self.header = text.to_string();
        self
    }

    pub fn set_footer(&mut self, text: &str) -> &mut Self {
        self.footer = text.to_string();
        self
    }

    /// Sink for help output. Defaults to standard output.
    pub fn set_stdout(&mut self, sink: impl Write + 'static) -> &mut Self {
        self.stdout = Box::new(sink);
        self
    }

    /// Sink for error reports. Defaults to standard error.
    pub fn set_stderr(&mut self, sink: impl Write + 'static) -> &mut Self {
        self.stderr = Box::new(sink);
        self
    }

    /// When set, `-h` prints usage and skips the block. Off by default: the
    /// block still runs after help and can check `has_argument("h")` itself.
    pub fn set_help_stops_execution(&mut self, stop: bool) -> &mut Self {
        self.help_stops_execution = stop;
        self
    }

    // === Declarations ===

    /// Declares an argument-less flag.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either name is malformed or taken.
    pub fn add_flag(
        &mut self,
        short_name: &str,
        long_name: &str,
        description: &str,
    ) -> Result<&mut Self, ConfigError> {
        self.registry
            .insert(OptionSpec::flag(short_name, long_name, description))?;
        Ok(self)
    }

    /// Declares an option taking one value, with an optional default.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either name is malformed or taken.
    pub fn add_option(
        &mut self,
        short_name: &str,
        long_name: &str,
        placeholder: &str,
        description: &str,
        default_value: Option<&str>,
    ) -> Result<&mut Self, ConfigError> {
        self.registry.insert(OptionSpec::with_argument(
            short_name,
            long_name,
            placeholder,
            description,
            default_value,
        ))?;
        Ok(self)
    }

    /// Declares an option taking one value that must be given.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either name is malformed or taken.
    pub fn add_mandatory_option(
        &mut self,
        short_name: &str,
        long_name: &str,
        placeholder: &str,
        description: &str,
    ) -> Result<&mut Self, ConfigError> {
        self.registry.insert(
            OptionSpec::with_argument(short_name, long_name, placeholder, description, None)
                .required(),
        )?;
        Ok(self)
    }

    // === Accessors ===

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Name shown in usage output: the override if set, else the default.
    pub fn program_name(&self) -> &str {
        usage::program_name(
            &self.default_program_name,
            self.program_name_override.as_deref(),
        )
    }

    pub fn usage(&self) -> UsagePrinter<'_> {
        UsagePrinter::new(&self.registry, self.program_name())
    }

    /// Writes the help block to the output sink.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the sink.
    pub fn print_usage(&mut self) -> io::Result<()> {
        let name = usage::program_name(
            &self.default_program_name,
            self.program_name_override.as_deref(),
        );
        UsagePrinter::new(&self.registry, name).print(
            self.stdout.as_mut(),
            &self.header,
            &self.footer,
        )
    }

    // === Execution ===

    /// Parses `args` (program name excluded) and runs `block` with the result.
    ///
    /// On bad input the error and the usage block go to the error sink and
    /// `block` is not called. With `-h` the usage block goes to the output
    /// sink first.
    pub fn execute<I, T, F, R>(&mut self, args: I, block: F) -> Outcome<R>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&Arguments<'_>) -> R,
    {
        let name = usage::program_name(
            &self.default_program_name,
            self.program_name_override.as_deref(),
        );
        let printer = UsagePrinter::new(&self.registry, name);

        let line = match parse::parse(&self.registry, args) {
            Ok(line) => line,
            Err(err) => {
                debug!("rejected command line: {err}");
                report(printer.print_error(self.stderr.as_mut(), &err.to_string(), &self.footer));
                return Outcome::Rejected(err);
            }
        };

        if line.is_present(constants::HELP_FLAG_SHORT) {
            report(printer.print(self.stdout.as_mut(), &self.header, &self.footer));
            if self.help_stops_execution {
                return Outcome::HelpShown;
            }
        }

        let arguments = Arguments::new(&self.registry, line, name);
        Outcome::Completed(block(&arguments))
    }
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        warn!("failed to write usage output: {err}");
    }
}
