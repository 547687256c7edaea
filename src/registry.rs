//! Declared options and the ordered registry holding them.

use log::debug;

use crate::constants;
use crate::error::{ConfigError, Result};

/// A single declared flag or option.
///
/// Built through [`crate::Cli::add_flag`], [`crate::Cli::add_option`] and
/// [`crate::Cli::add_mandatory_option`]; read back through [`Registry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    short_name: String,
    long_name: String,
    /// `Some` iff the option expects exactly one value.
    placeholder: Option<String>,
    description: Option<String>,
    default_value: Option<String>,
    required: bool,
}

impl OptionSpec {
    /// An argument-less boolean option.
    pub fn flag(short_name: &str, long_name: &str, description: &str) -> Self {
        Self {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
            placeholder: None,
            description: non_empty(description),
            default_value: None,
            required: false,
        }
    }

    /// An option followed by exactly one value.
    ///
    /// An empty `placeholder` falls back to [`constants::DEFAULT_PLACEHOLDER`],
    /// an empty `default_value` is stored as no default at all.
    pub fn with_argument(
        short_name: &str,
        long_name: &str,
        placeholder: &str,
        description: &str,
        default_value: Option<&str>,
    ) -> Self {
        let placeholder = non_empty(placeholder)
            .unwrap_or_else(|| constants::DEFAULT_PLACEHOLDER.to_string());
        Self {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
            placeholder: Some(placeholder),
            description: non_empty(description),
            default_value: default_value.and_then(non_empty),
            required: false,
        }
    }

    /// Marks the option as one that must appear on the command line.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn wants_argument(&self) -> bool {
        self.placeholder.is_some()
    }

    /// The short name as clap wants it. Validated on insertion, so every
    /// option held by a [`Registry`] has one.
    pub fn short_char(&self) -> Option<char> {
        let mut chars = self.short_name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' && !c.is_whitespace() => Some(c),
            _ => None,
        }
    }

    /// True if `name` is either the short or the long name of this option.
    pub fn answers_to(&self, name: &str) -> bool {
        self.short_name == name || self.long_name == name
    }

    /// Description as shown in the usage table, with the default appended.
    ///
    /// Options declared without a description get no default annotation
    /// either.
    pub fn help_text(&self) -> Option<String> {
        let description = self.description.as_deref()?;
        match &self.default_value {
            Some(value) => Some(format!(
                "{description} {}",
                constants::MSG_DEFAULT_VALUE.replace("{}", value)
            )),
            None => Some(description.to_string()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.short_char().is_none() {
            return Err(ConfigError::InvalidShortName(self.short_name.clone()));
        }
        let long = &self.long_name;
        if long.is_empty()
            || long.starts_with('-')
            || long.contains('=')
            || long.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidLongName(long.clone()));
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Ordered set of declared options.
///
/// Short and long names share one namespace: no name may be registered twice,
/// whether as a short or as a long name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    options: Vec<OptionSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `spec` at the end of the registry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a name is malformed or already taken. The
    /// registry is left untouched in that case.
    pub fn insert(&mut self, spec: OptionSpec) -> Result<()> {
        spec.validate()?;

        if self.find(spec.long_name()).is_some() {
            return Err(ConfigError::DuplicateLongName(spec.long_name));
        }
        if self.find(spec.short_name()).is_some() {
            return Err(ConfigError::DuplicateShortName(spec.short_name));
        }

        debug!(
            "registered option -{}/--{} (argument: {}, required: {})",
            spec.short_name,
            spec.long_name,
            spec.wants_argument(),
            spec.required
        );
        self.options.push(spec);
        Ok(())
    }

    /// Looks an option up by short or long name.
    pub fn find(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.answers_to(name))
    }

    /// Declared default for `name`, if any.
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(OptionSpec::default_value)
    }

    /// Options in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionSpec> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a OptionSpec;
    type IntoIter = std::slice::Iter<'a, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
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
            .insert(OptionSpec::with_argument("o", "other-option", "ARG", "other", Some("VALUE")))
            .unwrap();
        registry
    }

    #[test]
    fn test_insertion_order_preserved() {
        let registry = sample();
        let names: Vec<_> = registry.iter().map(OptionSpec::short_name).collect();
        assert_eq!(names, vec!["f", "o"]);
    }

    #[test]
    fn test_duplicate_short_name_rejected() {
        let mut registry = sample();
        let err = registry
            .insert(OptionSpec::flag("f", "fresh", "dup"))
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateShortName("f".into()));
        assert_eq!(registry.len(), 2);
        assert!(registry.find("fresh").is_none());
    }

    #[test]
    fn test_duplicate_long_name_rejected() {
        let mut registry = sample();
        let err = registry
            .insert(OptionSpec::flag("x", "other-option", "dup"))
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLongName("other-option".into()));
        assert_eq!(registry.len(), 2);
        assert!(registry.find("x").is_none());
    }

    #[test]
    fn test_short_and_long_names_share_namespace() {
        let mut registry = Registry::new();
        registry.insert(OptionSpec::flag("v", "verbose", "")).unwrap();
        let err = registry.insert(OptionSpec::flag("q", "v", "")).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLongName("v".into()));
    }

    #[test]
    fn test_malformed_names_rejected() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.insert(OptionSpec::flag("ab", "ab", "")),
            Err(ConfigError::InvalidShortName("ab".into()))
        );
        assert_eq!(
            registry.insert(OptionSpec::flag("", "empty", "")),
            Err(ConfigError::InvalidShortName(String::new()))
        );
        assert_eq!(
            registry.insert(OptionSpec::flag("a", "--a", "")),
            Err(ConfigError::InvalidLongName("--a".into()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_by_either_name() {
        let registry = sample();
        assert_eq!(registry.find("o"), registry.find("other-option"));
        assert_eq!(registry.default_value("other-option"), Some("VALUE"));
        assert_eq!(registry.default_value("f"), None);
        assert_eq!(registry.default_value("nope"), None);
    }

    #[test]
    fn test_help_text_carries_default() {
        let spec = OptionSpec::with_argument("o", "out", "FILE", "output file", Some("a.out"));
        assert_eq!(
            spec.help_text().as_deref(),
            Some("output file (default value: a.out)")
        );

        let bare = OptionSpec::with_argument("o", "out", "", "", Some("a.out"));
        assert_eq!(bare.help_text(), None);
        assert_eq!(bare.placeholder(), Some("ARG"));
    }

    #[test]
    fn test_empty_default_is_no_default() {
        let spec = OptionSpec::with_argument("o", "out", "FILE", "output", Some(""));
        assert_eq!(spec.default_value(), None);
    }
}
