//! cmdtree - Demonstration shell for the cmdtree dispatcher
//!
//! Wires a fixed example command tree behind a small command line.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod demo;
pub mod output;
