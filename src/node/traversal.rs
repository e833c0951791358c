//! Walking a tree against input.
//!
//! Starting at the node the entry point is called on, each step tries the
//! current node's children in declaration order and descends into the first
//! that matches. The walk stops when no child matches or an argument rejects
//! its input. Trailing text the walk cannot consume is left in
//! [`Context::unparsed`] and is not an error.
//!
//! An argument that rejects present input is still reached: its slot is
//! recorded as failed and no later sibling is tried. Only a child that does
//! not match at all hands over to the next one, and it leaves the reader
//! where it was.

use tracing::{debug, trace};

use crate::arguments::filter_prefix;
use crate::context::{Context, Slot, Value};
use crate::node::{Node, NodeKind};
use crate::reader::CursorReader;
use crate::CommandError;

pub(crate) enum MatchOutcome {
    Matched(Value),
    Rejected(Option<Value>),
    NotMatched,
}

struct Step<'n, S, R> {
    node: &'n Node<S, R>,
    value: Option<Value>,
    present: bool,
}

impl<S, R> Step<'_, S, R> {
    fn into_slot(self) -> Slot {
        match self.value {
            Some(value) if self.present => Slot::present(&self.node.id, value),
            value => Slot::absent(&self.node.id, value),
        }
    }
}

impl<S, R> Node<S, R> {
    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// Parses `text` into a context. Never fails: unmatched input shows up as
    /// a short or non-executable context.
    pub fn parse(&self, text: &str, source: S) -> Context<S, R> {
        let mut reader = CursorReader::new(text);
        let mut context = Context::new(source, text);
        let mut current = self;

        reader.skip_whitespace();
        while let Some(step) = current.match_child(&mut reader, &context) {
            let present = step.present;
            current = step.node;
            context.push(step.into_slot());
            if !present {
                debug!("argument '{}' rejected its input", current.id);
                break;
            }
            reader.skip_whitespace();
        }

        // Nothing matched: the entry node only handles input it fully consumed.
        let executor = if context.is_empty() && reader.can_read() {
            None
        } else {
            current.executor.clone()
        };
        context.resolve(executor, current.failure.clone(), reader.offset());
        debug!(
            "parsed {} slot(s), executable: {}, unparsed: {:?}",
            context.size(),
            context.is_executable(),
            context.unparsed()
        );
        context
    }

    /// Parses `text` and runs the resolved executor.
    pub fn execute(&self, text: &str, source: S) -> Result<R, CommandError> {
        self.parse(text, source).execute()
    }

    /// Parses `text` and runs the resolved executor, or `fallback` when the
    /// walk succeeded but ended on a node without one.
    pub fn execute_or<F>(&self, text: &str, source: S, fallback: F) -> Result<R, CommandError>
    where
        F: FnOnce(&Context<S, R>) -> R,
    {
        self.parse(text, source).execute_or(fallback)
    }

    /// Completion candidates for the token under the cursor.
    ///
    /// Every token before the last one must match fully; the last one (empty
    /// when `text` ends in whitespace) is treated as a prefix. Candidates come
    /// from the children of the node it hangs off, in declaration order.
    pub fn suggest(&self, text: &str, source: S) -> Vec<String> {
        let mut reader = CursorReader::new(text);
        let mut context = Context::new(source, text);
        let mut current = self;
        let trailing = reader.ends_with_separator();

        reader.skip_whitespace();
        while reader.can_read() {
            let mark = reader.mark();
            let Some(step) = current.match_child(&mut reader, &context) else {
                break;
            };
            let finished = if reader.can_read() {
                reader.at_boundary()
            } else {
                trailing
            };
            if !step.present || !finished {
                reader.reset(mark);
                break;
            }
            current = step.node;
            context.push(step.into_slot());
            reader.skip_whitespace();
        }

        let remaining = reader.remaining();
        let suggestions = current.child_suggestions(&context, remaining);
        debug!(
            "suggesting {} candidate(s) under '{}' for {:?}",
            suggestions.len(),
            current.id,
            remaining
        );
        suggestions
    }

    // ========================================================================
    // MATCHING
    // ========================================================================

    pub(crate) fn try_match(
        &self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> MatchOutcome {
        match &self.kind {
            NodeKind::Root => MatchOutcome::NotMatched,
            NodeKind::Literal(literal) => match literal.try_match(reader) {
                Some(value) => MatchOutcome::Matched(value),
                None => MatchOutcome::NotMatched,
            },
            NodeKind::Argument(argument) => {
                if reader.can_read() {
                    let mark = reader.mark();
                    match argument.parse_erased(reader, context).into_parts() {
                        (Some(value), true) => MatchOutcome::Matched(value),
                        (value, _) => {
                            reader.reset(mark);
                            MatchOutcome::Rejected(value)
                        }
                    }
                } else {
                    match argument.default_erased(context.source()) {
                        Some(result) => match result.into_parts() {
                            (Some(value), true) => MatchOutcome::Matched(value),
                            (value, _) => MatchOutcome::Rejected(value),
                        },
                        None => MatchOutcome::NotMatched,
                    }
                }
            }
        }
    }

    fn match_child<'n>(
        &'n self,
        reader: &mut CursorReader<'_>,
        context: &Context<S, R>,
    ) -> Option<Step<'n, S, R>> {
        for child in &self.children {
            let mark = reader.mark();
            match child.try_match(reader, context) {
                MatchOutcome::Matched(value) => {
                    trace!("'{}' matched at offset {}", child.id, mark.offset());
                    return Some(Step {
                        node: child,
                        value: Some(value),
                        present: true,
                    });
                }
                MatchOutcome::Rejected(value) => {
                    trace!("'{}' rejected input at offset {}", child.id, mark.offset());
                    reader.reset(mark);
                    return Some(Step {
                        node: child,
                        value,
                        present: false,
                    });
                }
                MatchOutcome::NotMatched => reader.reset(mark),
            }
        }
        None
    }

    fn child_suggestions(&self, context: &Context<S, R>, remaining: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        for child in &self.children {
            if let Some(suggester) = &child.suggester {
                suggestions.extend(suggester(context, remaining));
                continue;
            }
            match &child.kind {
                NodeKind::Literal(literal) => {
                    suggestions.extend(filter_prefix(literal.names(), remaining));
                }
                NodeKind::Argument(argument) => {
                    suggestions.extend(argument.suggest_erased(context, remaining));
                }
                NodeKind::Root => {}
            }
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::IntegerArgument;

    fn tree() -> Node<(), String> {
        Node::root()
            .then(Node::literal("a").then(Node::literal("b")))
            .then(Node::literal("n").then(Node::argument("int", IntegerArgument::new())))
    }

    #[test]
    fn failed_children_leave_the_reader_alone() {
        let tree = tree();
        let context = Context::new((), "zzz");
        let mut reader = CursorReader::new("zzz");
        assert!(tree.match_child(&mut reader, &context).is_none());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn rejected_arguments_reset_the_reader() {
        let tree = tree();
        let numbers = tree.child("n").unwrap();
        let context = Context::new((), "x");
        let mut reader = CursorReader::new("x");
        let step = numbers.match_child(&mut reader, &context).unwrap();
        assert!(!step.present);
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn rejection_ends_the_sibling_loop() {
        use crate::arguments::StringArgument;

        let tree: Node<(), ()> = Node::root()
            .then(Node::argument("n", IntegerArgument::range(0, 9)))
            .then(Node::argument("s", StringArgument::new()));
        let context = Context::new((), "abc");
        let mut reader = CursorReader::new("abc");
        let step = tree.match_child(&mut reader, &context).unwrap();
        assert_eq!(step.node.id(), "n");
        assert!(!step.present);
    }

    #[test]
    fn unparsed_reports_the_leftover() {
        let context = tree().parse("a b c d", ());
        assert_eq!(context.size(), 2);
        assert_eq!(context.unparsed(), "c d");
    }
}
