//! Error types for cmdtree-core
//!
//! - [`DispatchError`]: failures while walking the tree (surfaced to users)
//! - [`HandlerError`]: a handler rejecting its arguments
//! - [`TreeError`]: invalid tree construction
//! - [`ConfigError`]: invalid or unreadable configuration

use std::{fmt, path::PathBuf};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::node::{Arity, Group};

/// Tokens consumed from the root down to the point of a failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// The empty path, i.e. the root of the tree
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, token: &str) {
        self.0.push(token.to_owned());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    fn prepend(&mut self, token: &str) {
        self.0.insert(0, token.to_owned());
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join(" "))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CommandPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Category of a dispatch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    InvocationError,
    MalformedTree,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvocationError => write!(f, "invocation_error"),
            Self::MalformedTree => write!(f, "malformed_tree"),
        }
    }
}

/// Failure raised while walking the command tree
///
/// `path` holds the tokens consumed before the failure. It is built up on the
/// way back out of the recursion, one token per level.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A token has no matching key at its level of the tree
    #[error(
        "Command '{token}' not found at '{path}'. Available: [{}]",
        .available.iter().join(", ")
    )]
    NotFound {
        path: CommandPath,
        token: String,
        available: Vec<String>,
    },

    /// A handler rejected the arguments it was called with
    #[error("Command '{path}' failed with arguments [{}]: {source}", .args.join(", "))]
    Invocation {
        path: CommandPath,
        args: Vec<String>,
        source: HandlerError,
    },

    /// Input ran out at a group that defines no `default`
    #[error("Group '{path}' has no default command")]
    MalformedTree { path: CommandPath },
}

impl DispatchError {
    pub(crate) fn not_found(token: &str, group: &Group) -> Self {
        Self::NotFound {
            path: CommandPath::root(),
            token: token.to_owned(),
            available: group.names().map(str::to_owned).collect(),
        }
    }

    /// Record that this failure happened below `token`
    #[must_use]
    pub(crate) fn within(mut self, token: &str) -> Self {
        match &mut self {
            Self::NotFound { path, .. }
            | Self::Invocation { path, .. }
            | Self::MalformedTree { path } => path.prepend(token),
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Invocation { .. } => FailureKind::InvocationError,
            Self::MalformedTree { .. } => FailureKind::MalformedTree,
        }
    }

    #[must_use]
    pub const fn path(&self) -> &CommandPath {
        match self {
            Self::NotFound { path, .. }
            | Self::Invocation { path, .. }
            | Self::MalformedTree { path } => path,
        }
    }
}

/// Why a handler refused to run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("expected {expected}, got {got}")]
    Arity { expected: Arity, got: usize },

    #[error("invalid argument {position}: {reason}")]
    InvalidArgument { position: usize, reason: String },
}

impl HandlerError {
    /// Reject the argument at `position` (zero based)
    pub fn invalid_argument(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            position,
            reason: reason.into(),
        }
    }
}

/// Errors building a command tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("'{0}' is a reserved key and cannot name a command")]
    ReservedKey(String),

    #[error("Invalid command name '{0}': names must be non-empty and contain no whitespace")]
    InvalidName(String),

    #[error("Command '{0}' is already defined in this group")]
    DuplicateName(String),
}

/// Errors loading dispatcher configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
