//! Rendering dispatch outcomes for the terminal
//!
//! Text mode prints values and help to stdout and failure reports to stderr.
//! JSON mode prints one object per evaluated command to stdout.

use std::io::Write;

use anyhow::Result;
use cmdtree_core::{CommandPath, FailureKind, Outcome};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// JSON shape of one evaluated command
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeOutput<'a> {
    Success {
        command: &'a str,
        value: &'a Value,
    },
    Help {
        command: &'a str,
        text: &'a str,
    },
    Failure {
        command: &'a str,
        kind: FailureKind,
        path: &'a CommandPath,
        message: String,
        report: &'a str,
    },
}

impl<'a> OutcomeOutput<'a> {
    pub fn new(command: &'a str, outcome: &'a Outcome) -> Self {
        match outcome {
            Outcome::Success(value) => Self::Success { command, value },
            Outcome::Help(text) => Self::Help { command, text },
            Outcome::Failure(failure) => Self::Failure {
                command,
                kind: failure.error().kind(),
                path: failure.error().path(),
                message: failure.error().to_string(),
                report: failure.report(),
            },
        }
    }
}

/// Strings print bare; everything else prints as JSON
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Write one outcome. Returns `true` if it was a failure.
pub fn emit<W: Write, E: Write>(
    outcome: &Outcome,
    command: &str,
    format: OutputFormat,
    out: &mut W,
    err: &mut E,
) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let payload = OutcomeOutput::new(command, outcome);
            writeln!(out, "{}", serde_json::to_string(&payload)?)?;
        }
        OutputFormat::Text => match outcome {
            Outcome::Success(value) => writeln!(out, "{}", display_value(value))?,
            Outcome::Help(text) => writeln!(out, "{}", text.trim_end_matches('\n'))?,
            Outcome::Failure(failure) => {
                writeln!(err, "{}", failure.report().trim_end_matches('\n'))?;
            }
        },
    }

    Ok(outcome.is_failure())
}

#[cfg(test)]
mod tests {
    use cmdtree_core::Dispatcher;

    use super::*;
    use crate::demo::build_tree;

    fn emit_to_strings(line: &str, format: OutputFormat) -> Result<(bool, String, String)> {
        let tree = build_tree()?;
        let outcome = Dispatcher::new(&tree).eval(line);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let failed = emit(&outcome, line, format, &mut out, &mut err)?;
        Ok((failed, String::from_utf8(out)?, String::from_utf8(err)?))
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::from("plain")), "plain");
        assert_eq!(display_value(&Value::Bool(true)), "true");
        assert_eq!(display_value(&serde_json::json!(["a", 1])), "[\"a\",1]");
    }

    #[test]
    fn test_text_failure_goes_to_stderr() -> Result<()> {
        let (failed, out, err) = emit_to_strings("device bogus", OutputFormat::Text)?;
        assert!(failed);
        assert!(out.is_empty());
        assert!(err.starts_with("Command 'bogus' not found at 'device'."));
        Ok(())
    }

    #[test]
    fn test_json_success_shape() -> Result<()> {
        let (failed, out, err) = emit_to_strings("device connect a b", OutputFormat::Json)?;
        assert!(!failed);
        assert!(err.is_empty());

        let parsed: Value = serde_json::from_str(&out)?;
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["command"], "device connect a b");
        assert_eq!(parsed["value"], "Connecting to device(s). [a, b]");
        Ok(())
    }

    #[test]
    fn test_json_failure_shape() -> Result<()> {
        let (failed, out, _) = emit_to_strings("device status", OutputFormat::Json)?;
        assert!(failed);

        let parsed: Value = serde_json::from_str(&out)?;
        assert_eq!(parsed["status"], "failure");
        assert_eq!(parsed["kind"], "invocation_error");
        assert_eq!(parsed["path"], serde_json::json!(["device", "status"]));
        Ok(())
    }
}
