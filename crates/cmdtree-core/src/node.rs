//! Command tree data model
//!
//! A tree is a [`CommandNode`]: either an [`Invocable`] leaf bound to a
//! handler, or a [`Group`] of named children. Groups carry two reserved
//! slots, `default` and `summary`, which are stored apart from the children
//! and can never be reached by a token.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde_json::Value;

use crate::error::{CommandPath, HandlerError, TreeError};

/// Key of the node used when input runs out at a group
pub const DEFAULT_KEY: &str = "default";

/// Key of a group's one-line description
pub const SUMMARY_KEY: &str = "summary";

/// Keys that are never dispatchable and never listed
pub const RESERVED_KEYS: [&str; 2] = [DEFAULT_KEY, SUMMARY_KEY];

/// Check whether `name` is one of [`RESERVED_KEYS`]
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// What a handler returns. `Ok(None)` means "ran with no output".
pub type HandlerResult = Result<Option<Value>, HandlerError>;

/// Shared handler function
pub type Handler = Arc<dyn Fn(&[String]) -> HandlerResult + Send + Sync>;

/// Number of positional arguments a handler accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    /// Inclusive on both ends
    Between(usize, usize),
}

impl Arity {
    /// No arguments at all
    pub const NONE: Self = Self::Exactly(0);
    /// Any number of arguments, including none
    pub const ANY: Self = Self::AtLeast(0);

    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Between(min, max) => count >= min && count <= max,
        }
    }

    pub fn check(self, count: usize) -> Result<(), HandlerError> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(HandlerError::Arity {
                expected: self,
                got: count,
            })
        }
    }
}

const fn arguments(n: usize) -> &'static str {
    if n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exactly(n) => write!(f, "exactly {n} {}", arguments(n)),
            Self::AtLeast(n) => write!(f, "at least {n} {}", arguments(n)),
            Self::Between(min, max) => write!(f, "between {min} and {max} arguments"),
        }
    }
}

/// A leaf of the tree: a handler plus its declared arity and documentation
#[derive(Clone)]
pub struct Invocable {
    arity: Arity,
    doc: Option<String>,
    handler: Handler,
}

impl Invocable {
    pub fn new<F>(arity: Arity, handler: F) -> Self
    where
        F: Fn(&[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            arity,
            doc: None,
            handler: Arc::new(handler),
        }
    }

    /// Attach documentation shown by help. Blank text is treated as none.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        let doc = doc.into();
        let trimmed = doc.trim();
        self.doc = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Run the handler after checking the argument count.
    ///
    /// A handler that produced nothing yields `true`.
    pub fn invoke(&self, args: &[String]) -> Result<Value, HandlerError> {
        self.arity.check(args.len())?;
        (self.handler)(args).map(|value| value.unwrap_or(Value::Bool(true)))
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocable")
            .field("arity", &self.arity)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// A named collection of child nodes
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: BTreeMap<String, CommandNode>,
    default: Option<Box<CommandNode>>,
    summary: Option<String>,
}

impl Group {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child under `name`
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        node: impl Into<CommandNode>,
    ) -> Result<(), TreeError> {
        let name = name.into();

        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(TreeError::InvalidName(name));
        }
        if is_reserved(&name) {
            return Err(TreeError::ReservedKey(name));
        }
        if self.children.contains_key(&name) {
            return Err(TreeError::DuplicateName(name));
        }

        self.children.insert(name, node.into());
        Ok(())
    }

    /// Builder form of [`Group::insert`]
    pub fn with(
        mut self,
        name: impl Into<String>,
        node: impl Into<CommandNode>,
    ) -> Result<Self, TreeError> {
        self.insert(name, node)?;
        Ok(self)
    }

    pub fn with_default(mut self, node: impl Into<CommandNode>) -> Self {
        self.default = Some(Box::new(node.into()));
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Look up a dispatchable child. Reserved keys never match.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(name)
    }

    #[must_use]
    pub fn default_node(&self) -> Option<&CommandNode> {
        self.default.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Dispatchable child names, in listing order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandNode)> + '_ {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node of the command tree
#[derive(Debug, Clone)]
pub enum CommandNode {
    Invocable(Invocable),
    Group(Group),
}

impl CommandNode {
    /// Paths of every group that would fail with a malformed-tree error when
    /// input runs out there.
    #[must_use]
    pub fn groups_without_default(&self) -> Vec<CommandPath> {
        let mut missing = Vec::new();
        collect_missing_defaults(self, &mut CommandPath::root(), &mut missing);
        missing
    }
}

fn collect_missing_defaults(
    node: &CommandNode,
    path: &mut CommandPath,
    out: &mut Vec<CommandPath>,
) {
    let CommandNode::Group(group) = node else {
        return;
    };

    match group.default_node() {
        Some(default) => collect_missing_defaults(default, path, out),
        None => out.push(path.clone()),
    }

    for (name, child) in group.iter() {
        path.push(name);
        collect_missing_defaults(child, path, out);
        path.pop();
    }
}

impl From<Invocable> for CommandNode {
    fn from(invocable: Invocable) -> Self {
        Self::Invocable(invocable)
    }
}

impl From<Group> for CommandNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
