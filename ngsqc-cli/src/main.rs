mod profile;

use clap::Command;
use env_logger::Env;
use log::error;

use ngsqc_core::NgsQcError;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "ngsqc";

    /// Exit status for malformed input and failed reads or writes.
    pub const EXIT_FAILURE: i32 = 1;
    /// Exit status for a bad configuration, the same clap uses for usage errors.
    pub const EXIT_CONFIG_ERROR: i32 = 2;
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Binned read-depth profiles and local QC scores for sequencing quality control.")
        .subcommand_required(true)
        .subcommand(profile::cli::create_profile_cli())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    let is_config_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<NgsQcError>())
        .is_some_and(|cause| !cause.is_input_error());

    if is_config_error {
        consts::EXIT_CONFIG_ERROR
    } else {
        consts::EXIT_FAILURE
    }
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn main() {
    let app = build_parser();
    let matches = app.get_matches();

    let result = match matches.subcommand() {
        //
        // PROFILE
        //
        Some((profile::cli::PROFILE_CMD, matches)) => {
            init_logging(matches.get_flag("quiet"));
            profile::handlers::run_profile(matches)
        }

        _ => unreachable!("Subcommand not found"),
    };

    if let Err(err) = result {
        error!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}
