use pickling_lib::cli::{create_root_command, is_verbose};
use pickling_lib::commands::dispatch_command;
use pickling_lib::config::PicklingConfig;
use pickling_lib::errors::{handle_command_error, handle_fatal, PicklingError};

fn main() {
    // Step 1: Parse arguments
    let matches = create_root_command().get_matches();

    // Step 2: Load configuration from the environment
    let config = PicklingConfig::init();

    // Step 3: Initialize Logger (verbose flag or PICKLING_DEBUG)
    let verbose = is_verbose(&matches) || config.as_ref().is_ok_and(|c| c.debug);
    pickling_lib::logger::init(verbose);
    pickling_lib::logger::set_verbose(verbose);

    let config = config.unwrap_or_else(|e| handle_fatal(e));

    // Step 4: Dispatch to subcommand handler
    match matches.subcommand() {
        Some((name, sub_matches)) => {
            tracing::debug!(command = name, "Executing command");
            match dispatch_command(name, sub_matches, config) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    handle_command_error(&e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            // No subcommand: print help
            let mut cmd = create_root_command();
            if let Err(e) = cmd.print_help().map_err(PicklingError::from) {
                handle_fatal(e);
            }
        }
    }
}
