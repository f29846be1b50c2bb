//! Line-by-line evaluation of stdin
//!
//! Interactive sessions get a `> ` prompt; piped input is evaluated as a
//! batch. Blank lines are skipped and `exit` / `quit` stop the loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use cmdtree_core::Dispatcher;
use tracing::debug;

use super::RunStatus;
use crate::output::{self, OutputFormat};

const PROMPT: &str = "> ";
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

pub fn run<R, W, E>(
    dispatcher: &Dispatcher<'_>,
    format: OutputFormat,
    input: R,
    interactive: bool,
    out: &mut W,
    err: &mut E,
) -> Result<RunStatus>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut failed = false;
    prompt(out, interactive)?;

    for line in input.lines() {
        let line = line.context("Failed to read command from stdin")?;
        let command = line.trim();

        if EXIT_WORDS.contains(&command) {
            debug!(command, "leaving");
            break;
        }

        if !command.is_empty() {
            let outcome = dispatcher.eval(command);
            failed |= output::emit(&outcome, command, format, out, err)?;
        }
        prompt(out, interactive)?;
    }

    Ok(RunStatus::from_failed(failed))
}

fn prompt<W: Write>(out: &mut W, interactive: bool) -> Result<()> {
    if interactive {
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    Ok(())
}
