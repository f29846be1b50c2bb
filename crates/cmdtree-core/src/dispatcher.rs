//! Tree walker
//!
//! [`Dispatcher::eval`] splits a command line on whitespace and walks the
//! tree one token per level:
//!
//! 1. a trailing `help` token switches to help rendering
//! 2. a leaf is invoked with whatever tokens remain
//! 3. a group with no tokens left resolves its `default`
//! 4. otherwise the first token selects a child
//!
//! Failures are threaded back up as [`DispatchError`]s, each level adding the
//! token it consumed to the error's path.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::DispatcherConfig,
    error::{CommandPath, DispatchError, FailureKind, Result},
    help::HelpRenderer,
    node::CommandNode,
};

/// The reserved last token that asks for help instead of invoking
pub const HELP_TOKEN: &str = "help";

/// Split a command line into tokens
#[must_use]
pub fn tokenize(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_owned).collect()
}

/// Successful result of [`Dispatcher::dispatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Value(Value),
    Help(String),
}

/// A failure together with the text shown to the user
#[derive(Debug)]
pub struct Failure {
    error: DispatchError,
    report: String,
}

impl Failure {
    #[must_use]
    pub const fn error(&self) -> &DispatchError {
        &self.error
    }

    /// Detail, separator line, then the full help listing
    #[must_use]
    pub fn report(&self) -> &str {
        &self.report
    }
}

/// Result of [`Dispatcher::eval`]
#[derive(Debug)]
pub enum Outcome {
    Success(Value),
    Help(String),
    Failure(Failure),
}

impl Outcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Help(_) | Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Self::Help(text) => Some(text),
            Self::Success(_) | Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failure(failure) => Some(failure),
            Self::Success(_) | Self::Help(_) => None,
        }
    }
}

/// Dispatches command lines against a borrowed, read-only tree
#[derive(Debug, Clone)]
pub struct Dispatcher<'tree> {
    tree: &'tree CommandNode,
    config: DispatcherConfig,
    help: HelpRenderer,
}

impl<'tree> Dispatcher<'tree> {
    #[must_use]
    pub fn new(tree: &'tree CommandNode) -> Self {
        Self::with_config(tree, DispatcherConfig::default())
    }

    #[must_use]
    pub fn with_config(tree: &'tree CommandNode, config: DispatcherConfig) -> Self {
        let help = HelpRenderer::new(config.indent_step);
        Self { tree, config, help }
    }

    /// Default configuration with `prefix` prepended to help and error output
    #[must_use]
    pub fn with_help_prefix(tree: &'tree CommandNode, prefix: impl Into<String>) -> Self {
        Self::with_config(
            tree,
            DispatcherConfig {
                help_prefix: prefix.into(),
                ..DispatcherConfig::default()
            },
        )
    }

    /// Evaluate a command line, rendering any failure for display
    pub fn eval(&self, command: &str) -> Outcome {
        match self.dispatch(command) {
            Ok(Reply::Value(value)) => Outcome::Success(value),
            Ok(Reply::Help(text)) => Outcome::Help(text),
            Err(error) => {
                let report = self.report(&error);
                Outcome::Failure(Failure { error, report })
            }
        }
    }

    /// Evaluate a command line, returning failures as structured errors
    pub fn dispatch(&self, command: &str) -> Result<Reply> {
        let tokens = tokenize(command);
        debug!(command, tokens = tokens.len(), "dispatching");

        self.walk(&tokens, self.tree).inspect_err(log_failure)
    }

    fn walk(&self, tokens: &[String], node: &CommandNode) -> Result<Reply> {
        if let Some((last, prefix)) = tokens.split_last() {
            if last == HELP_TOKEN {
                return self.render_help(prefix, node).map(Reply::Help);
            }
        }

        match node {
            CommandNode::Invocable(invocable) => {
                debug!(args = ?tokens, "invoking handler");
                invocable
                    .invoke(tokens)
                    .map(Reply::Value)
                    .map_err(|source| DispatchError::Invocation {
                        path: CommandPath::root(),
                        args: tokens.to_vec(),
                        source,
                    })
            }
            CommandNode::Group(group) => match tokens.split_first() {
                None => {
                    let default = group.default_node().ok_or(DispatchError::MalformedTree {
                        path: CommandPath::root(),
                    })?;
                    debug!("input exhausted, using default");
                    self.walk(&[], default)
                }
                Some((token, rest)) => {
                    let child = group
                        .get(token)
                        .ok_or_else(|| DispatchError::not_found(token, group))?;
                    debug!(token = %token, "descending");
                    self.walk(rest, child).map_err(|e| e.within(token))
                }
            },
        }
    }

    fn render_help(&self, tokens: &[String], node: &CommandNode) -> Result<String> {
        let body = self.help.render(tokens, node)?;
        Ok(format!("{}{body}", self.config.help_prefix))
    }

    fn report(&self, error: &DispatchError) -> String {
        // An empty token list never looks anything up, so this cannot fail.
        let listing = self.help.render(&[], self.tree).unwrap_or_default();
        format!(
            "{error}\n{}\n{}{listing}",
            "-".repeat(self.config.separator_width),
            self.config.help_prefix
        )
    }
}

fn log_failure(err: &DispatchError) {
    match err.kind() {
        FailureKind::NotFound | FailureKind::InvocationError => {
            warn!(kind = %err.kind(), path = %err.path(), "{err}");
        }
        FailureKind::MalformedTree => {
            error!(path = %err.path(), "{err}");
        }
    }
}
