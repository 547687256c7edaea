//! Small command line wrapper on top of clap.
//!
//! Declare flags and options on a [`Cli`], hand it the process arguments and a
//! block of code; the block receives an [`Arguments`] view that knows which
//! options were given and what value each one resolves to (typed value, then
//! declared default, then a call-site fallback). `-h`/`--help` is always
//! available and prints a usage block built from the declarations. Bad input
//! prints the error with the usage block on standard error and the block is
//! not run.

pub mod cli;
pub mod constants;
pub mod error;
pub mod registry;

pub use cli::{Arguments, Cli, CommandLine, Outcome, UsagePrinter};
pub use error::{ConfigError, ParseError};
pub use registry::{OptionSpec, Registry};
