pub mod handlers;
pub mod setup;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("cmdtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluate commands against the demonstration command tree")
        .long_about(
            "Evaluate commands against the demonstration command tree.\n\n\
             With COMMAND words, evaluates them as one command line. Without, reads \
             one command per line from stdin until EOF, `exit` or `quit`.\n\
             End any command with `help` to list what it accepts.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Read dispatcher settings from this TOML file"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("TEXT")
                .help("Text prepended to help and failure output"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .short('j')
                .action(ArgAction::SetTrue)
                .help("Print each outcome as a JSON object"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Command words, e.g. `device connect alpha`"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_trailing_words_captured_verbatim() -> Result<(), clap::Error> {
        let matches = build_cli().try_get_matches_from([
            "cmdtree", "--json", "device", "connect", "-x", "help",
        ])?;

        let words: Vec<&String> = matches
            .get_many::<String>("command")
            .map(Iterator::collect)
            .unwrap_or_default();
        assert_eq!(words, ["device", "connect", "-x", "help"]);
        assert!(matches.get_flag("json"));
        Ok(())
    }
}
