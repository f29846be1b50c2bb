pub mod repl;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use cmdtree_core::{Dispatcher, DispatcherConfig};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::{
    demo,
    output::{self, OutputFormat},
};

/// Overall result of a `cmdtree` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    CommandFailed,
}

impl RunStatus {
    #[must_use]
    pub const fn from_failed(failed: bool) -> Self {
        if failed {
            Self::CommandFailed
        } else {
            Self::Success
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::CommandFailed => 1,
        }
    }
}

pub fn format_error(err: &anyhow::Error) -> String {
    let msg = err.to_string();
    if let Some(source) = err.source() {
        let source_msg = source.to_string();
        if !msg.contains(&source_msg) && !source_msg.is_empty() {
            return format!("{msg}\nCause: {source_msg}");
        }
    }
    msg
}

pub fn run(matches: &ArgMatches) -> Result<RunStatus> {
    let config = load_config(matches)?;
    let tree = demo::build_tree().context("Failed to build the demo command tree")?;
    for group in tree.groups_without_default() {
        warn!(%group, "group has no default command");
    }

    let dispatcher = Dispatcher::with_config(&tree, config);
    let format = OutputFormat::from_json_flag(matches.get_flag("json"));

    let stdout = io::stdout();
    let stderr = io::stderr();
    let (mut out, mut err) = (stdout.lock(), stderr.lock());

    if let Some(line) = command_line(matches) {
        let failed = output::emit(&dispatcher.eval(&line), &line, format, &mut out, &mut err)?;
        return Ok(RunStatus::from_failed(failed));
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    debug!(interactive, "reading commands from stdin");
    repl::run(&dispatcher, format, stdin.lock(), interactive, &mut out, &mut err)
}

/// Trailing command words joined back into one line, if any were given
fn command_line(matches: &ArgMatches) -> Option<String> {
    matches
        .get_many::<String>("command")
        .map(|mut words| words.join(" "))
}

fn load_config(matches: &ArgMatches) -> Result<DispatcherConfig> {
    let explicit = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let mut config = DispatcherConfig::load(explicit).context("Failed to load configuration")?;

    if let Some(prefix) = matches.get_one::<String>("prefix") {
        config.help_prefix.clone_from(prefix);
    }

    debug!(?config, "configuration loaded");
    Ok(config)
}
