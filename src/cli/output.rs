//! Handles all user-facing output for the CLI.
//!
//! Colored text goes through `termcolor`; machine-readable reports go
//! through `serde_json`.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::definition::{render_value, CommandTree};
use crate::Context;

// ============================================================================
// PARSE REPORTS
// ============================================================================

/// JSON view of a parsed context.
#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub input: String,
    pub slots: Vec<SlotReport>,
    pub executable: bool,
    pub unparsed: String,
}

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub key: String,
    pub present: bool,
    pub value: Option<String>,
}

impl ParseReport {
    pub fn from_context(context: &Context<String, String>) -> Self {
        Self {
            input: context.input().to_string(),
            slots: context
                .slots()
                .map(|slot| SlotReport {
                    key: slot.key().to_string(),
                    present: slot.is_present(),
                    value: slot.raw_value().map(render_value),
                })
                .collect(),
            executable: context.is_executable(),
            unparsed: context.unparsed().to_string(),
        }
    }
}

pub fn print_json(report: &ParseReport) {
    match serde_json::to_string_pretty(report) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("failed to encode report: {err}"),
    }
}

// ============================================================================
// COLORED OUTPUT
// ============================================================================

fn paint(stdout: &mut StandardStream, color: Color, bold: bool, text: &str) {
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(stdout, "{text}");
    let _ = stdout.reset();
}

/// Prints one line per slot, then the executable flag and any leftover.
pub fn print_context(context: &Context<String, String>) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for (index, slot) in context.slots().enumerate() {
        let _ = write!(stdout, "{index:>3} ");
        paint(&mut stdout, Color::Cyan, true, slot.key());
        let _ = write!(stdout, " = ");
        let value = slot
            .raw_value()
            .map(render_value)
            .unwrap_or_else(|| "<none>".to_string());
        if slot.is_present() {
            paint(&mut stdout, Color::Green, false, &value);
        } else {
            paint(&mut stdout, Color::Red, false, &format!("{value} (rejected)"));
        }
        let _ = writeln!(stdout);
    }
    let (color, label) = if context.is_executable() {
        (Color::Green, "executable")
    } else {
        (Color::Yellow, "not executable")
    };
    paint(&mut stdout, color, true, label);
    let _ = writeln!(stdout);
    if !context.unparsed().is_empty() {
        let _ = write!(stdout, "unparsed: ");
        paint(&mut stdout, Color::Yellow, false, context.unparsed());
        let _ = writeln!(stdout);
    }
}

/// Prints an indented outline of the tree.
pub fn print_tree(tree: &CommandTree) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    print_node(&mut stdout, tree, 0);
}

fn print_node(stdout: &mut StandardStream, node: &CommandTree, depth: usize) {
    let _ = write!(stdout, "{:indent$}", "", indent = depth * 2);
    let color = match node.kind_name() {
        "literal" => Color::Cyan,
        "argument" => Color::Magenta,
        _ => Color::White,
    };
    paint(stdout, color, true, node.id());
    let _ = write!(stdout, " [{}]", node.kind_name());
    let names = node.literal_names();
    if names.len() > 1 || names.first().is_some_and(|name| *name != node.id()) {
        let _ = write!(stdout, " {}", names.join(" | "));
    }
    if node.has_executor() {
        paint(stdout, Color::Green, false, " *");
    }
    let _ = writeln!(stdout);
    for child in node.children() {
        print_node(stdout, child, depth + 1);
    }
}
