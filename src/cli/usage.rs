//! Usage block rendering.
//!
//! Layout:
//!
//! ```text
//!
//! usage: prog [-h] [-f] -r <ARG> [-o <ARG>]
//! header text
//!
//!   -h,--help                   print this help
//!   -f,--flag                   this is a flag!
//!   -r,--required-option <ARG>  a required option.
//!   -o,--other-option <ARG>     other (default value: VALUE)
//!
//! footer text
//! ```

use std::fmt::Write as _;
use std::io;

use crate::constants;
use crate::registry::{OptionSpec, Registry};

/// Narrowest description column before wrapping gives up on alignment.
const MIN_DESC_WIDTH: usize = 20;

/// Picks the name shown after `usage:`. A non-empty override wins.
pub fn program_name<'a>(default_name: &'a str, name_override: Option<&'a str>) -> &'a str {
    name_override
        .filter(|name| !name.is_empty())
        .unwrap_or(default_name)
}

/// Renders usage blocks for one registry.
#[derive(Debug, Clone, Copy)]
pub struct UsagePrinter<'a> {
    registry: &'a Registry,
    program_name: &'a str,
}

impl<'a> UsagePrinter<'a> {
    pub fn new(registry: &'a Registry, program_name: &'a str) -> Self {
        Self {
            registry,
            program_name,
        }
    }

    /// Full help block: synopsis, header, option table, footer.
    pub fn render(&self, header: &str, footer: &str) -> String {
        let mut out = String::from("\n");
        out.push_str(&self.synopsis());
        if !header.is_empty() {
            let _ = writeln!(out, "{header}");
        }
        out.push('\n');
        out.push_str(&self.option_table());
        if !footer.is_empty() {
            let _ = writeln!(out, "\n{footer}");
        }
        out
    }

    /// Error block: a leading `ERROR:` line, then the usage block with the
    /// same error line in place of the header.
    pub fn render_error(&self, message: &str, footer: &str) -> String {
        let error_line = format!("{}{message}", constants::ERR_PREFIX);
        let mut out = format!("\n{error_line}\n");
        out.push_str(&self.render(&error_line, footer));
        out
    }

    /// Writes [`Self::render`] to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn print(&self, out: &mut dyn io::Write, header: &str, footer: &str) -> io::Result<()> {
        out.write_all(self.render(header, footer).as_bytes())?;
        out.flush()
    }

    /// Writes [`Self::render_error`] to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn print_error(&self, out: &mut dyn io::Write, message: &str, footer: &str) -> io::Result<()> {
        out.write_all(self.render_error(message, footer).as_bytes())?;
        out.flush()
    }

    fn synopsis(&self) -> String {
        let mut line = constants::USAGE_PREFIX.to_string();
        if !self.program_name.is_empty() {
            line.push_str(self.program_name);
            line.push(' ');
        }
        let indent = line.chars().count();

        let items: Vec<String> = self.registry.iter().map(synopsis_item).collect();
        let width = constants::HELP_WIDTH.saturating_sub(indent).max(MIN_DESC_WIDTH);
        let lines = wrap(&items, width);

        let mut out = String::new();
        for (i, chunk) in lines.iter().enumerate() {
            if i == 0 {
                let _ = writeln!(out, "{line}{chunk}");
            } else {
                let _ = writeln!(out, "{:indent$}{chunk}", "");
            }
        }
        if lines.is_empty() {
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }

    fn option_table(&self) -> String {
        let rows: Vec<(String, Option<String>)> = self
            .registry
            .iter()
            .map(|spec| (option_label(spec), spec.help_text()))
            .collect();

        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let desc_column = constants::LEFT_PAD + label_width + constants::DESC_PAD;
        let desc_width = constants::HELP_WIDTH
            .saturating_sub(desc_column)
            .max(MIN_DESC_WIDTH);

        let mut out = String::new();
        for (label, help) in rows {
            let Some(help) = help else {
                let _ = writeln!(out, "{:pad$}{label}", "", pad = constants::LEFT_PAD);
                continue;
            };
            let words: Vec<String> = help.split_whitespace().map(str::to_string).collect();
            for (i, chunk) in wrap(&words, desc_width).iter().enumerate() {
                if i == 0 {
                    let _ = writeln!(
                        out,
                        "{:pad$}{label:<label_width$}{:gap$}{chunk}",
                        "",
                        "",
                        pad = constants::LEFT_PAD,
                        gap = constants::DESC_PAD
                    );
                } else {
                    let _ = writeln!(out, "{:desc_column$}{chunk}", "");
                }
            }
        }
        out
    }
}

fn value_suffix(spec: &OptionSpec) -> String {
    spec.placeholder()
        .map(|p| format!(" <{p}>"))
        .unwrap_or_default()
}

fn synopsis_item(spec: &OptionSpec) -> String {
    let item = format!("-{}{}", spec.short_name(), value_suffix(spec));
    if spec.is_required() {
        item
    } else {
        format!("[{item}]")
    }
}

fn option_label(spec: &OptionSpec) -> String {
    format!("-{},--{}{}", spec.short_name(), spec.long_name(), value_suffix(spec))
}

/// Greedy word wrap. A single item wider than `width` gets a line of its own.
fn wrap(items: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for item in items {
        if !current.is_empty() && current.chars().count() + 1 + item.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(item);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
