//! cmdtree-core - Command tree dispatch
//!
//! This crate provides:
//! - The command tree model (`Invocable` leaves, `Group` nodes)
//! - The dispatcher that walks a tree for a command line
//! - Help rendering from summaries and handler documentation
//! - Structured, path-carrying dispatch errors
//! - Layered dispatcher configuration

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatcher;
pub mod error;
mod help;
pub mod node;

pub use config::DispatcherConfig;
pub use dispatcher::{tokenize, Dispatcher, Failure, Outcome, Reply, HELP_TOKEN};
pub use error::{
    CommandPath, ConfigError, DispatchError, FailureKind, HandlerError, Result, TreeError,
};
pub use node::{
    is_reserved, Arity, CommandNode, Group, Handler, HandlerResult, Invocable, DEFAULT_KEY,
    RESERVED_KEYS, SUMMARY_KEY,
};
