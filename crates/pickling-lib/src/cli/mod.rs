use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::archive::ArchiveOptions;
use crate::commands::{check, unwrap, wrap};
use crate::config::PicklingConfig;

/// Creates the root clap Command with global `--verbose` and `--pretty` flags
/// and the `wrap`, `unwrap` and `check` subcommands.
pub fn create_root_command() -> Command {
    Command::new("pickling")
        .about("Wrap and unwrap JSON documents in the pickling envelope")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose output and debug logging"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Indent output JSON"),
        )
        .subcommand(wrap::wrap_command())
        .subcommand(unwrap::unwrap_command())
        .subcommand(check::check_command())
}

/// Returns whether verbose mode is active based on parsed matches.
pub fn is_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

/// Output options for a command: `--pretty` wins, otherwise the configured indent.
pub fn output_options(matches: &ArgMatches, config: &PicklingConfig) -> ArchiveOptions {
    if matches.get_flag("pretty") {
        ArchiveOptions::pretty()
    } else {
        config.archive_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Indent;

    #[test]
    fn test_root_command_has_verbose_flag() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["pickling", "--verbose"]).unwrap();
        assert!(is_verbose(&matches));
    }

    #[test]
    fn test_short_verbose_flag() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["pickling", "-v"]).unwrap();
        assert!(is_verbose(&matches));
    }

    #[test]
    fn test_no_flags_not_verbose() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["pickling"]).unwrap();
        assert!(!is_verbose(&matches));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cmd = create_root_command();
        let matches = cmd
            .try_get_matches_from(["pickling", "wrap", "--pretty", "-v"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "wrap");
        assert!(is_verbose(sub));
        assert!(sub.get_flag("pretty"));
    }

    #[test]
    fn test_output_options_pretty_overrides_config() {
        let config = PicklingConfig {
            debug: false,
            indent: Indent::Tabs(1),
        };
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["pickling", "--pretty"]).unwrap();
        assert_eq!(output_options(&matches, &config), ArchiveOptions::pretty());

        let matches = create_root_command()
            .try_get_matches_from(["pickling"])
            .unwrap();
        assert_eq!(output_options(&matches, &config).indent, Indent::Tabs(1));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        let cmd = create_root_command();
        assert!(cmd.try_get_matches_from(["pickling", "explode"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        create_root_command().debug_assert();
    }
}
