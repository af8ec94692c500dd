//! # Command Line Interface
//!
//! The command tree is in `cli.rs`, the subcommands are in the `commands` module.

use env_logger;
#[cfg(windows)]
use colored;
use acornkit::commands;
use acornkit::cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).unwrap();
    let matches = cli::build_cli().get_matches();

    if let Some(cmd) = matches.subcommand_matches("tokenize") {
        return commands::langx::tokenize(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("detokenize") {
        return commands::langx::detokenize(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("keywords") {
        return commands::langx::keywords(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("pack") {
        return commands::tape::pack(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("unpack") {
        return commands::tape::unpack(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("blocks") {
        return commands::tape::blocks(cmd);
    }

    log::error!("No subcommand was found, try `acornkit --help`");
    return Err(Box::new(commands::CommandError::InvalidCommand));
}
