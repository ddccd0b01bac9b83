//! Check CLI command: validate that a document is a pickling envelope.

use clap::{ArgMatches, Command};
use serde_json::Value;

use crate::archive::JsonInputArchive;
use crate::commands::{file_arg, read_input};
use crate::errors::Result;
use crate::json::LABEL;
use crate::logger;

/// Build the `check` clap command.
pub fn check_command() -> Command {
    Command::new("check")
        .aliases(["c", "chk"])
        .about("Check that a document is a valid pickling envelope")
        .arg(file_arg())
}

/// Handle the `check` command.
pub fn handle_check(matches: &ArgMatches) -> Result<String> {
    check_text(&read_input(matches)?, logger::is_verbose())
}

/// Returns `ok` for a valid envelope. In verbose mode the top-level keys
/// are listed as well.
pub fn check_text(input: &str, verbose: bool) -> Result<String> {
    let archive = JsonInputArchive::parse(input)?;
    archive.read::<Value>(LABEL)?;
    if verbose {
        let names: Vec<&str> = archive.names().collect();
        Ok(format!("ok (keys: {})", names.join(", ")))
    } else {
        Ok("ok".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PicklingError;

    #[test]
    fn test_check_command_aliases() {
        let cmd = check_command();
        assert!(cmd.get_all_aliases().any(|a| a == "chk"));
    }

    #[test]
    fn test_check_valid() {
        assert_eq!(check_text(r#"{"cereal":{"x":3}}"#, false).unwrap(), "ok");
    }

    #[test]
    fn test_check_verbose_lists_keys() {
        let out = check_text(r#"{"cereal":1,"meta":2}"#, true).unwrap();
        assert_eq!(out, "ok (keys: cereal, meta)");
    }

    #[test]
    fn test_check_missing_label() {
        let err = check_text(r#"{"other":{}}"#, false).unwrap_err();
        assert!(matches!(err, PicklingError::MissingField(name) if name == "cereal"));
    }

    #[test]
    fn test_check_not_json() {
        let err = check_text("cereal", false).unwrap_err();
        assert!(err.is_input_error());
    }
}
