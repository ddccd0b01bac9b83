//! Unwrap CLI command: print the payload of a pickled document.

use clap::{ArgMatches, Command};
use serde_json::Value;

use crate::archive::{self, ArchiveOptions};
use crate::cli::output_options;
use crate::commands::{file_arg, read_input};
use crate::config::PicklingConfig;
use crate::errors::Result;
use crate::json;

/// Build the `unwrap` clap command.
pub fn unwrap_command() -> Command {
    Command::new("unwrap")
        .aliases(["u"])
        .about("Print the payload stored in a pickling envelope")
        .arg(file_arg())
}

/// Handle the `unwrap` command.
pub fn handle_unwrap(matches: &ArgMatches, config: &PicklingConfig) -> Result<String> {
    unwrap_text(&read_input(matches)?, &output_options(matches, config))
}

pub fn unwrap_text(input: &str, options: &ArchiveOptions) -> Result<String> {
    let payload: Value = json::deserialize(input)?;
    archive::to_string_with(&payload, options)
}
