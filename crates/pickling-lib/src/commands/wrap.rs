//! Wrap CLI command: put an arbitrary JSON document under the pickling label.

use clap::{ArgMatches, Command};
use serde_json::Value;

use crate::archive::ArchiveOptions;
use crate::cli::output_options;
use crate::commands::{file_arg, read_input};
use crate::config::PicklingConfig;
use crate::errors::Result;
use crate::json;

/// Build the `wrap` clap command.
pub fn wrap_command() -> Command {
    Command::new("wrap")
        .aliases(["w"])
        .about("Wrap a JSON document in the pickling envelope")
        .arg(file_arg())
}

/// Handle the `wrap` command.
pub fn handle_wrap(matches: &ArgMatches, config: &PicklingConfig) -> Result<String> {
    wrap_text(&read_input(matches)?, &output_options(matches, config))
}

pub fn wrap_text(input: &str, options: &ArchiveOptions) -> Result<String> {
    let document: Value = serde_json::from_str(input)?;
    json::serialize_with(&document, *options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PicklingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_wrap_command_parses() {
        let matches = wrap_command()
            .try_get_matches_from(["wrap", "doc.json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<std::path::PathBuf>("file").unwrap(),
            &std::path::PathBuf::from("doc.json")
        );
    }

    #[test]
    fn test_wrap_keeps_document_order() {
        let out = wrap_text(r#"{"y":"hi","x":3}"#, &ArchiveOptions::no_indent()).unwrap();
        assert_eq!(out, r#"{"cereal":{"y":"hi","x":3}}"#);
    }

    #[test]
    fn test_wrap_scalar() {
        let out = wrap_text("  42 \n", &ArchiveOptions::no_indent()).unwrap();
        assert_eq!(out, r#"{"cereal":42}"#);
    }

    #[test]
    fn test_wrap_keeps_numbers_verbatim() {
        let out = wrap_text(
            r#"{"n":18446744073709551616,"neg":-170141183460469231731687303715884105728,"f":1.10}"#,
            &ArchiveOptions::no_indent(),
        )
        .unwrap();
        assert_eq!(
            out,
            r#"{"cereal":{"n":18446744073709551616,"neg":-170141183460469231731687303715884105728,"f":1.10}}"#
        );
    }

    #[test]
    fn test_wrap_malformed_input() {
        let err = wrap_text("{", &ArchiveOptions::no_indent()).unwrap_err();
        assert!(matches!(err, PicklingError::Json(_)));
    }

    #[test]
    fn test_handle_wrap_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[1,2]"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let matches = crate::cli::create_root_command()
            .try_get_matches_from(["pickling", "wrap", "--pretty", &path])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let out = handle_wrap(sub, &PicklingConfig::default()).unwrap();
        assert_eq!(out, "{\n    \"cereal\": [\n        1,\n        2\n    ]\n}");
    }
}
