//! Translation of the option registry into a clap [`Command`] and of clap's
//! matches back into an owned [`CommandLine`].

use std::collections::HashMap;
use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;

use crate::constants;
use crate::error::ParseError;
use crate::registry::{OptionSpec, Registry};

/// Hidden positional collecting the tokens that are not options. Registered
/// ids are single characters, so this one cannot collide.
const REMAINING_ID: &str = "remaining-args";

/// What the user actually typed, interpreted against a [`Registry`].
///
/// Keys are the options' short names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    present: Vec<String>,
    values: HashMap<String, String>,
    remaining: Vec<String>,
}

impl CommandLine {
    /// True if the option with short name `short_name` appeared.
    pub fn is_present(&self, short_name: &str) -> bool {
        self.present.iter().any(|p| p == short_name)
    }

    /// Literal value typed after the option, possibly empty.
    pub fn value(&self, short_name: &str) -> Option<&str> {
        self.values.get(short_name).map(String::as_str)
    }

    /// Tokens that were not consumed by any option, in order.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    fn from_matches(registry: &Registry, matches: &ArgMatches) -> Self {
        let mut line = Self::default();

        for spec in registry {
            let id = spec.short_name();
            if matches.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }
            line.present.push(id.to_string());
            if spec.wants_argument() {
                if let Some(value) = matches.try_get_one::<String>(id).ok().flatten() {
                    line.values.insert(id.to_string(), value.clone());
                }
            }
        }

        if let Some(rest) = matches.try_get_many::<String>(REMAINING_ID).ok().flatten() {
            line.remaining = rest.cloned().collect();
        }

        line
    }
}

/// Builds the clap command for the declared options.
///
/// clap's own help and version flags are disabled: help is an ordinary flag
/// in the registry and rendering is done by [`super::usage`]. Long options
/// may be abbreviated to any unambiguous prefix.
pub fn build_command(registry: &Registry) -> Command {
    let mut command = Command::new(constants::APP_NAME)
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .infer_long_args(true)
        .arg(
            Arg::new(REMAINING_ID)
                .num_args(1..)
                .action(ArgAction::Append)
                .hide(true),
        );

    for spec in registry {
        if let Some(arg) = to_arg(spec) {
            command = command.arg(arg);
        }
    }

    command
}

fn to_arg(spec: &OptionSpec) -> Option<Arg> {
    let mut arg = Arg::new(spec.short_name().to_string())
        .short(spec.short_char()?)
        .long(spec.long_name().to_string());

    arg = match spec.placeholder() {
        Some(placeholder) => arg
            .value_name(placeholder.to_string())
            .num_args(1)
            .action(ArgAction::Set),
        None => arg.action(ArgAction::SetTrue),
    };

    if let Some(description) = spec.description() {
        arg = arg.help(description.to_string());
    }

    Some(arg)
}

/// Parses `args` (program name excluded) against `registry`.
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown options, options missing their value
/// and required options that were not given.
pub fn parse<I, T>(registry: &Registry, args: I) -> Result<CommandLine, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let matches = build_command(registry)
        .try_get_matches_from(raw.iter())
        .map_err(|err| translate(registry, &raw, &err))?;

    let line = CommandLine::from_matches(registry, &matches);

    let missing: Vec<String> = registry
        .iter()
        .filter(|spec| spec.is_required() && !line.is_present(spec.short_name()))
        .map(|spec| spec.short_name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingRequiredOptions(missing));
    }

    debug!(
        "parsed command line: {} option(s), {} leftover argument(s)",
        line.present.len(),
        line.remaining.len()
    );
    Ok(line)
}

fn translate(registry: &Registry, raw: &[OsString], err: &clap::Error) -> ParseError {
    let invalid_arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        Some(ContextValue::Strings(v)) => Some(v.join(", ")),
        _ => None,
    };
    let empty_value = matches!(
        err.get(ContextKind::InvalidValue),
        Some(ContextValue::String(v)) if v.is_empty()
    );

    match (err.kind(), invalid_arg) {
        (ErrorKind::UnknownArgument, Some(arg)) if arg == "-=" => {
            ParseError::UnrecognizedOption(flag_with_value(registry, raw).unwrap_or(arg))
        }
        (ErrorKind::UnknownArgument, Some(arg)) => ParseError::UnrecognizedOption(arg),
        (ErrorKind::InvalidValue, Some(arg)) if empty_value => {
            ParseError::MissingArgument(short_name_for(registry, &arg))
        }
        _ => ParseError::Other(first_line(err)),
    }
}

/// Finds the token behind clap's `-=` complaint: short flags given a value
/// with `=` (`-f=1`), which clap reads as a cluster ending in an unknown `=`.
fn flag_with_value(registry: &Registry, raw: &[OsString]) -> Option<String> {
    raw.iter()
        .map(|token| token.to_string_lossy())
        .find(|token| {
            let Some(rest) = token.strip_prefix('-') else {
                return false;
            };
            let Some((flags, _)) = rest.split_once('=') else {
                return false;
            };
            !flags.is_empty()
                && !flags.starts_with('-')
                && flags.chars().all(|c| {
                    registry
                        .find(c.encode_utf8(&mut [0; 4]))
                        .is_some_and(|spec| !spec.wants_argument())
                })
        })
        .map(std::borrow::Cow::into_owned)
}

/// Maps clap's display form of an option (`--long <ARG>`, `-s <ARG>`) back to
/// the declared short name.
fn short_name_for(registry: &Registry, display: &str) -> String {
    let token = display
        .split_whitespace()
        .next()
        .unwrap_or(display)
        .trim_start_matches('-');
    registry
        .find(token)
        .map_or_else(|| token.to_string(), |spec| spec.short_name().to_string())
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry
            .insert(OptionSpec::flag("f", "flag", "this is a flag!"))
            .unwrap();
        registry
            .insert(OptionSpec::with_argument("r", "required-option", "ARG", "a required option.", None).required())
            .unwrap();
        registry
            .insert(OptionSpec::with_argument("o", "other-option", "ARG", "other", Some("VALUE")))
            .unwrap();
        registry
    }

    #[test]
    fn test_short_options() {
        let line = parse(&sample(), ["-f", "-r", "value"]).unwrap();
        assert!(line.is_present("f"));
        assert!(line.is_present("r"));
        assert!(!line.is_present("o"));
        assert_eq!(line.value("r"), Some("value"));
        assert_eq!(line.value("o"), None);
        assert!(line.remaining().is_empty());
    }

    #[test]
    fn test_long_options_and_equals_form() {
        let line = parse(&sample(), ["--required-option=x", "--other-option", "y"]).unwrap();
        assert!(!line.is_present("f"));
        assert_eq!(line.value("r"), Some("x"));
        assert_eq!(line.value("o"), Some("y"));
    }

    #[test]
    fn test_attached_short_value() {
        let line = parse(&sample(), ["-rvalue"]).unwrap();
        assert_eq!(line.value("r"), Some("value"));
    }

    #[test]
    fn test_leftover_tokens_kept_in_order() {
        let line = parse(&sample(), ["one", "-r", "v", "two", "--", "-f"]).unwrap();
        assert!(!line.is_present("f"));
        assert_eq!(line.remaining(), ["one", "two", "-f"]);
    }

    #[test]
    fn test_missing_required() {
        let err = parse(&sample(), ["-f"]).unwrap_err();
        assert_eq!(err, ParseError::MissingRequiredOptions(vec!["r".into()]));
    }

    #[test]
    fn test_unknown_option() {
        let err = parse(&sample(), ["-r", "v", "--bogus"]).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedOption("--bogus".into()));
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&sample(), ["-f", "-r"]).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("r".into()));
    }

    #[test]
    fn test_unambiguous_long_prefix_accepted() {
        let line = parse(&sample(), ["--required", "v", "--fl", "--other=x"]).unwrap();
        assert_eq!(line.value("r"), Some("v"));
        assert!(line.is_present("f"));
        assert_eq!(line.value("o"), Some("x"));
    }

    #[test]
    fn test_ambiguous_long_prefix_rejected() {
        let mut registry = Registry::new();
        registry.insert(OptionSpec::flag("b", "verbose", "")).unwrap();
        registry.insert(OptionSpec::flag("V", "version", "")).unwrap();

        let err = parse(&registry, ["--ver"]).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedOption("--ver".into()));

        let line = parse(&registry, ["--verb"]).unwrap();
        assert!(line.is_present("b"));
    }

    #[test]
    fn test_flag_given_value_names_the_flag() {
        let err = parse(&sample(), ["-r", "v", "-f=1"]).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedOption("-f=1".into()));
        assert!(err.to_string().contains("-f"));
    }

    #[test]
    fn test_repeated_option_last_wins() {
        let line = parse(&sample(), ["-r", "a", "-r", "b", "-f", "-f"]).unwrap();
        assert_eq!(line.value("r"), Some("b"));
        assert!(line.is_present("f"));
    }

    #[test]
    fn test_empty_value_is_kept_literally() {
        let line = parse(&sample(), ["-r", ""]).unwrap();
        assert!(line.is_present("r"));
        assert_eq!(line.value("r"), Some(""));
    }
}
