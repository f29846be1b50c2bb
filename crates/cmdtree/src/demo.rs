//! The demonstration command tree
//!
//! ```text
//! test
//! test1               (documented, multi-line)
//! device
//!   connect <name>...
//!   disconnect <name>
//!   status <name>
//!   default
//! status
//!   default
//! ```

use cmdtree_core::{Arity, CommandNode, Group, Invocable, TreeError};
use itertools::Itertools;
use serde_json::Value;

const TEST1_DOC: &str = "\
Test docstring.

And we can have multiple lines, too.
  - some
  - list

  ```
  example = \"code\"
  ```";

/// Build the tree wired into the `cmdtree` binary
pub fn build_tree() -> Result<CommandNode, TreeError> {
    let tree = Group::new()
        .with_default(text(Arity::NONE, |_| "Use 'help' for all commands.".into()))
        .with("test", text(Arity::NONE, |_| "Starting test.".into()))?
        .with(
            "test1",
            text(Arity::NONE, |_| "Starting test.".into()).with_doc(TEST1_DOC),
        )?
        .with("device", device()?)?
        .with(
            "status",
            Group::new()
                .with_summary("Overall status")
                .with_default(text(Arity::NONE, |_| "Displaying status.".into())),
        )?;

    Ok(tree.into())
}

fn device() -> Result<Group, TreeError> {
    Group::new()
        .with_summary("Device management")
        .with_default(text(Arity::NONE, |_| {
            "Use 'device help' for all options.".into()
        }))
        .with(
            "connect",
            text(Arity::ANY, |names| {
                format!("Connecting to device(s). [{}]", names.iter().join(", "))
            })
            .with_doc("Connect to any number of devices by name."),
        )?
        .with(
            "disconnect",
            single(|name| format!("Disconnecting device. {name}"))
                .with_doc("Disconnect one device."),
        )?
        .with(
            "status",
            single(|name| format!("Displaying device status for {name}.")),
        )
}

/// Leaf that always produces a string
fn text<F>(arity: Arity, render: F) -> Invocable
where
    F: Fn(&[String]) -> String + Send + Sync + 'static,
{
    Invocable::new(arity, move |args| Ok(Some(Value::String(render(args)))))
}

/// Leaf taking exactly one argument; the count is checked before it runs
fn single<F>(render: F) -> Invocable
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Invocable::new(Arity::Exactly(1), move |args| {
        Ok(args.first().map(|name| Value::String(render(name))))
    })
}
