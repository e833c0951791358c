//! # Command Tree Nodes
//!
//! A tree is a strict hierarchy of [`Node`]s. Every node owns its children in
//! declaration order, and that order decides ambiguity: the first child that
//! matches wins and no sibling after it is tried.
//!
//! ## Variants
//!
//! - **Root**: the entry point. Matches nothing itself.
//! - **Literal**: one or more fixed names, possibly multi-word. Records its
//!   id (simple form) or the payload mapped to the matched name (keyed form).
//! - **Argument**: wraps an [`Argument`] and records whatever it parses.
//!
//! ## Build, then freeze
//!
//! Trees are assembled with the consuming builder methods ([`Node::then`],
//! [`Node::executes`], ...) or with [`Node::add_child`]. The entry points in
//! [`traversal`] only take `&self`, so once a tree is shared (for example
//! behind an `Arc`) it can no longer change, and any number of threads may
//! parse against it at once.
//!
//! ## Usage
//! ```rust
//! use cmdtree::arguments::IntegerArgument;
//! use cmdtree::node::Node;
//!
//! let tree: Node<(), String> = Node::root().then(
//!     Node::literal("give").then(
//!         Node::argument("amount", IntegerArgument::new())
//!             .executes(|ctx| format!("giving {}", ctx.get_argument::<i32>("amount").unwrap())),
//!     ),
//! );
//! assert_eq!(tree.execute("give 3", ()).unwrap(), "giving 3");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::arguments::{Argument, ErasedArgument};
use crate::context::{Context, Executor, Payload, Suggester};

pub mod literal;
pub mod traversal;

use literal::Literal;

pub(crate) enum NodeKind<S, R> {
    Root,
    Literal(Literal),
    Argument(Box<dyn ErasedArgument<S, R>>),
}

/// One element of a command tree.
pub struct Node<S, R> {
    id: String,
    kind: NodeKind<S, R>,
    children: Vec<Node<S, R>>,
    executor: Option<Executor<S, R>>,
    failure: Option<Executor<S, R>>,
    suggester: Option<Suggester<S, R>>,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl<S, R> Node<S, R> {
    fn with_kind(id: String, kind: NodeKind<S, R>) -> Self {
        Self {
            id,
            kind,
            children: Vec::new(),
            executor: None,
            failure: None,
            suggester: None,
        }
    }

    /// The tree's entry point.
    pub fn root() -> Self {
        Self::with_kind("root".to_string(), NodeKind::Root)
    }

    /// A literal matched by its own id, recording the id as a `String`.
    pub fn literal(id: impl Into<String>) -> Self {
        Self::literal_with_aliases(id, std::iter::empty::<String>())
    }

    /// A literal matched by its id or any alias, recording the id as a `String`.
    ///
    /// Blank names are ignored and duplicates collapse.
    pub fn literal_with_aliases<I, N>(id: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let id = id.into();
        let names = std::iter::once(id.clone()).chain(aliases.into_iter().map(Into::into));
        let literal = Literal::simple(names, Arc::new(id.clone()));
        Self::with_kind(id, NodeKind::Literal(literal))
    }

    /// A literal whose names each record a distinct payload under `id`.
    ///
    /// The id itself is not a name unless it appears among the pairs.
    pub fn keyed_literal<I, K, A>(id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Payload,
    {
        Self::with_kind(id.into(), NodeKind::Literal(Literal::keyed(pairs)))
    }

    /// A node that parses its input with `argument`.
    pub fn argument<T>(id: impl Into<String>, argument: T) -> Self
    where
        T: Argument<S, R> + 'static,
    {
        Self::with_kind(id.into(), NodeKind::Argument(Box::new(argument)))
    }

    /// Appends `child` and returns `self` for chaining.
    pub fn then(mut self, child: Node<S, R>) -> Self {
        self.children.push(child);
        self
    }

    /// Appends `child` and returns it for further building in place.
    pub fn add_child(&mut self, child: Node<S, R>) -> &mut Node<S, R> {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Sets the handler run when parsing ends on this node.
    pub fn executes<F>(mut self, executor: F) -> Self
    where
        F: Fn(&Context<S, R>) -> R + Send + Sync + 'static,
    {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Sets the handler run when this argument rejects its input.
    pub fn on_failure<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Context<S, R>) -> R + Send + Sync + 'static,
    {
        self.failure = Some(Arc::new(handler));
        self
    }

    /// Overrides completion candidates for this node.
    pub fn suggests<F>(mut self, suggester: F) -> Self
    where
        F: Fn(&Context<S, R>, &str) -> Vec<String> + Send + Sync + 'static,
    {
        self.suggester = Some(Arc::new(suggester));
        self
    }
}

// ============================================================================
// INTROSPECTION
// ============================================================================

impl<S, R> Node<S, R> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[Node<S, R>] {
        &self.children
    }

    /// Finds a direct child by id.
    pub fn child(&self, id: &str) -> Option<&Node<S, R>> {
        self.children.iter().find(|child| child.id == id)
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    pub fn is_argument(&self) -> bool {
        matches!(self.kind, NodeKind::Argument(_))
    }

    /// Short variant name: `root`, `literal` or `argument`.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Root => "root",
            NodeKind::Literal(_) => "literal",
            NodeKind::Argument(_) => "argument",
        }
    }

    /// Surface names of a literal in declaration order; empty otherwise.
    pub fn literal_names(&self) -> Vec<&str> {
        match &self.kind {
            NodeKind::Literal(literal) => literal.names().collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    pub fn has_failure_handler(&self) -> bool {
        self.failure.is_some()
    }

    pub fn has_suggester(&self) -> bool {
        self.suggester.is_some()
    }
}

impl<S, R> fmt::Debug for Node<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind_name())
            .field("names", &self.literal_names())
            .field("executor", &self.has_executor())
            .field("children", &self.children)
            .finish()
    }
}
