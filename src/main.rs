//! `cliwe-demo`: a flag, a mandatory option and an option with a default.

use cliwe::constants::{APP_NAME, APP_VERSION};
use cliwe::{Cli, Outcome};
use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut cli = Cli::with_program_name("cliwe-demo");
    cli.program_name_from_env()
        .set_header("Shows how declared options resolve.")
        .set_footer(&format!("{APP_NAME} v{APP_VERSION}"));
    cli.add_flag("f", "flag", "this is a flag!")?
        .add_mandatory_option("r", "required-option", "ARG", "a required option.")?
        .add_option(
            "o",
            "other-option",
            "ARG",
            "option not mandatory with a default value set",
            Some("VALUE"),
        )?;

    let outcome = cli.execute(std::env::args_os().skip(1), |args| {
        if args.has_argument("f") {
            println!("yeah the 'f' flag is on!");
        }
        println!("required-option: {}", args.get_argument_or("r", ""));
        println!("other-option: {}", args.get_argument_or("o", ""));
        for extra in args.remaining() {
            println!("extra argument: {extra}");
        }
    });

    if let Outcome::Rejected(_) = outcome {
        std::process::exit(2);
    }
    Ok(())
}
