//! Help rendering
//!
//! Walks the same path as dispatch, but instead of invoking the leaf it
//! renders an indented listing built from group summaries and handler
//! documentation:
//!
//! ```text
//! device: Device management
//!   connect
//!     Connect to one or more devices.
//!   disconnect
//! ```

use crate::{
    error::{DispatchError, Result},
    node::{CommandNode, Group},
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct HelpRenderer {
    indent_step: usize,
}

impl HelpRenderer {
    pub(crate) const fn new(indent_step: usize) -> Self {
        Self { indent_step }
    }

    /// Render help for the node reached by following `tokens` from `node`.
    ///
    /// Tokens left over once a leaf is reached are that leaf's arguments and
    /// do not affect the output.
    pub(crate) fn render(&self, tokens: &[String], node: &CommandNode) -> Result<String> {
        let mut out = String::new();
        self.render_node(tokens, node, None, 0, &mut out)?;
        Ok(out)
    }

    fn render_node(
        &self,
        tokens: &[String],
        node: &CommandNode,
        name: Option<&str>,
        indent: usize,
        out: &mut String,
    ) -> Result<()> {
        let group = match node {
            CommandNode::Invocable(invocable) => {
                self.write_leaf(name, invocable.doc(), indent, out);
                return Ok(());
            }
            CommandNode::Group(group) => group,
        };

        let inner = match name {
            Some(name) => {
                write_heading(name, group.summary(), indent, out);
                indent + self.indent_step
            }
            None => indent,
        };

        match tokens.split_first() {
            Some((token, rest)) => {
                let child = group
                    .get(token)
                    .ok_or_else(|| DispatchError::not_found(token, group))?;
                self.render_node(rest, child, Some(token), inner, out)
                    .map_err(|e| e.within(token))
            }
            None => {
                self.write_listing(group, inner, out);
                Ok(())
            }
        }
    }

    fn write_leaf(&self, name: Option<&str>, doc: Option<&str>, indent: usize, out: &mut String) {
        match (name, doc) {
            (Some(name), Some(doc)) => {
                let mut lines = doc.lines();
                let first = lines.next().unwrap_or_default();
                push_line(out, indent, &format!("{name}: {first}"));
                write_lines(lines, indent + self.indent_step, out);
            }
            (Some(name), None) => push_line(out, indent, name),
            (None, Some(doc)) => write_lines(doc.lines(), indent, out),
            (None, None) => {}
        }
    }

    /// Every non-reserved key of `group`, each followed by its own rendering
    fn write_listing(&self, group: &Group, indent: usize, out: &mut String) {
        let inner = indent + self.indent_step;
        for (name, child) in group.iter() {
            match child {
                CommandNode::Invocable(invocable) => {
                    push_line(out, indent, name);
                    if let Some(doc) = invocable.doc() {
                        write_lines(doc.lines(), inner, out);
                    }
                }
                CommandNode::Group(nested) => {
                    write_heading(name, nested.summary(), indent, out);
                    self.write_listing(nested, inner, out);
                }
            }
        }
    }
}

fn write_heading(name: &str, summary: Option<&str>, indent: usize, out: &mut String) {
    match summary {
        Some(summary) => push_line(out, indent, &format!("{name}: {summary}")),
        None => push_line(out, indent, name),
    }
}

fn write_lines<'a>(lines: impl Iterator<Item = &'a str>, indent: usize, out: &mut String) {
    for line in lines {
        push_line(out, indent, line);
    }
}

fn push_line(out: &mut String, indent: usize, line: &str) {
    let line = line.trim_end();
    if !line.is_empty() {
        out.extend(std::iter::repeat(' ').take(indent));
        out.push_str(line);
    }
    out.push('\n');
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::{
        error::TreeError,
        node::{Arity, Invocable},
    };

    fn leaf(doc: &str) -> Invocable {
        Invocable::new(Arity::ANY, |_| Ok(None)).with_doc(doc)
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    fn tree() -> std::result::Result<CommandNode, TreeError> {
        Ok(Group::new()
            .with("test", leaf("Run the self test."))?
            .with(
                "device",
                Group::new()
                    .with_summary("Device management")
                    .with("connect", leaf("Connect a device.\n\nAccepts many names."))?
                    .with("disconnect", leaf(""))?
                    .with_default(leaf("never listed")),
            )?
            .into())
    }

    #[test]
    fn test_root_listing() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let text = HelpRenderer::new(2).render(&[], &tree()?)?;
        assert_eq!(
            text,
            concat!(
                "device: Device management\n",
                "  connect\n    Connect a device.\n\n    Accepts many names.\n",
                "  disconnect\n",
                "test\n  Run the self test.\n",
            )
        );
        Ok(())
    }

    #[test]
    fn test_group_drill_down() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let text = HelpRenderer::new(2).render(&tokens(&["device"]), &tree()?)?;
        assert_eq!(
            text,
            concat!(
                "device: Device management\n",
                "  connect\n    Connect a device.\n\n    Accepts many names.\n",
                "  disconnect\n",
            )
        );
        assert!(!text.contains("never listed"));
        Ok(())
    }

    #[test]
    fn test_leaf_drill_down() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let renderer = HelpRenderer::new(2);
        let tree = tree()?;

        assert_eq!(
            renderer.render(&tokens(&["device", "connect"]), &tree)?,
            "device: Device management\n  connect: Connect a device.\n\n    Accepts many names.\n"
        );
        assert_eq!(
            renderer.render(&tokens(&["device", "disconnect", "extra"]), &tree)?,
            "device: Device management\n  disconnect\n"
        );
        Ok(())
    }

    #[test]
    fn test_unknown_key_reports_full_path() -> std::result::Result<(), TreeError> {
        let err = HelpRenderer::new(2)
            .render(&tokens(&["device", "bogus"]), &tree()?)
            .err();

        match err {
            Some(DispatchError::NotFound {
                path,
                token,
                available,
            }) => {
                assert_eq!(path.segments(), ["device"]);
                assert_eq!(token, "bogus");
                assert_eq!(available, ["connect", "disconnect"]);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_undocumented_root_leaf_renders_empty() -> std::result::Result<(), DispatchError> {
        let root = CommandNode::from(Invocable::new(Arity::ANY, |_| Ok(None)));
        assert_eq!(HelpRenderer::new(2).render(&[], &root)?, "");
        Ok(())
    }

    #[test]
    fn test_indent_step_is_cosmetic() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let text = HelpRenderer::new(4).render(&tokens(&["device"]), &tree()?)?;
        assert!(text.starts_with("device: Device management\n    connect\n        Connect"));
        Ok(())
    }
}
