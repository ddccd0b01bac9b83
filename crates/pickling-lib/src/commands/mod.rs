pub mod check;
pub mod unwrap;
pub mod wrap;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches};

use crate::config::PicklingConfig;
use crate::errors::{PicklingError, Result};

/// Dispatch a parsed subcommand and return the text to print on stdout.
pub fn dispatch_command(
    name: &str,
    matches: &ArgMatches,
    config: &PicklingConfig,
) -> Result<String> {
    match name {
        "wrap" => wrap::handle_wrap(matches, config),
        "unwrap" => unwrap::handle_unwrap(matches, config),
        "check" => check::handle_check(matches),
        other => Err(PicklingError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unknown command: {other}"),
        ))),
    }
}

/// The optional positional `FILE` argument shared by every subcommand.
pub(crate) fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Input file (reads stdin when omitted or `-`)")
}

/// Read the whole input named by the `file` argument.
pub(crate) fn read_input(matches: &ArgMatches) -> Result<String> {
    read_input_from(matches.get_one::<PathBuf>("file").map(PathBuf::as_path))
}

fn read_input_from(path: Option<&Path>) -> Result<String> {
    let mut input = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading input file");
            input = std::fs::read_to_string(path)?;
        }
        _ => {
            std::io::stdin().read_to_string(&mut input)?;
        }
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"a":1}}"#).unwrap();
        let input = read_input_from(Some(file.path())).unwrap();
        assert_eq!(input, r#"{"a":1}"#);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input_from(Some(Path::new("/nonexistent/pickling/input.json"))).unwrap_err();
        assert!(matches!(err, PicklingError::Io(_)));
    }

    #[test]
    fn test_dispatch_unknown_command() {
        let matches = clap::Command::new("x").get_matches_from(["x"]);
        let err = dispatch_command("explode", &matches, &PicklingConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown command: explode"));
    }
}
