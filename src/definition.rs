//! Declarative command trees.
//!
//! A [`TreeDefinition`] describes a `Node<String, String>` tree in JSON or
//! YAML. The source is a plain name (who is running the command) and every
//! handler produces a `String` from a template.
//!
//! ```yaml
//! executes: "usage: give <amount>"
//! children:
//!   - kind: literal
//!     id: give
//!     aliases: [g]
//!     children:
//!       - kind: argument
//!         id: amount
//!         argument: { type: integer, min: 1 }
//!         default: 1
//!         executes: "{source} gives {amount}"
//!         on_failure: "not a valid amount"
//! ```
//!
//! ## Templates
//!
//! `{id}` expands to the rendered value of the slot recorded under `id` and
//! `{source}` to the source name. Placeholders with no successful slot expand
//! to nothing; a `{` without a closing `}` is copied as-is.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::arguments::{
    filter_prefix, Argument, ArgumentExt, BooleanArgument, ChoiceArgument, DoubleArgument,
    LongArgument, StringArgument,
};
use crate::context::{Context, Payload};
use crate::node::Node;
use crate::{definition_err, CommandError};

/// The tree type every definition builds.
pub type CommandTree = Node<String, String>;

// ============================================================================
// DEFINITION SCHEMA
// ============================================================================

/// Root of a definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDefinition {
    /// Template run for blank input.
    #[serde(default)]
    pub executes: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDefinition {
    Literal(LiteralDefinition),
    Argument(ArgumentDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiteralDefinition {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Turns the literal into a keyed literal: each name records its value.
    #[serde(default)]
    pub payloads: Vec<PayloadDefinition>,
    #[serde(default)]
    pub executes: Option<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub children: Vec<NodeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadDefinition {
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentDefinition {
    pub id: String,
    pub argument: ArgumentType,
    /// Substituted when the input ends at this argument.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub executes: Option<String>,
    /// Template run when this argument rejects its input.
    #[serde(default)]
    pub on_failure: Option<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub children: Vec<NodeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArgumentType {
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Double {
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
        #[serde(default)]
        greedy: bool,
    },
    Choice {
        choices: Vec<String>,
        #[serde(default)]
        ignore_case: bool,
    },
}

impl ArgumentType {
    pub fn name(&self) -> &'static str {
        match self {
            ArgumentType::Integer { .. } => "integer",
            ArgumentType::Double { .. } => "double",
            ArgumentType::Boolean => "boolean",
            ArgumentType::String { .. } => "string",
            ArgumentType::Choice { .. } => "choice",
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl TreeDefinition {
    /// Reads a definition, choosing JSON for `.json` files and YAML otherwise.
    pub fn from_path(path: &Path) -> Result<Self, CommandError> {
        let text = fs::read_to_string(path).map_err(|source| CommandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_named(&name, &text),
            _ => Self::from_yaml_named(&name, &text),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, CommandError> {
        Self::from_json_named("tree.json", text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, CommandError> {
        Self::from_yaml_named("tree.yaml", text)
    }

    fn from_json_named(name: &str, text: &str) -> Result<Self, CommandError> {
        serde_json::from_str(text).map_err(|err| {
            let location = (err.line() > 0).then(|| (err.line(), err.column()));
            CommandError::decode("JSON", name, text, err.to_string(), location)
        })
    }

    fn from_yaml_named(name: &str, text: &str) -> Result<Self, CommandError> {
        serde_yaml::from_str(text).map_err(|err| {
            let location = err
                .location()
                .map(|location| (location.line(), location.column()));
            CommandError::decode("YAML", name, text, err.to_string(), location)
        })
    }

    // ========================================================================
    // BUILDING
    // ========================================================================

    /// Builds the executable tree.
    pub fn build(&self) -> Result<CommandTree, CommandError> {
        let mut root = Node::root();
        if let Some(template) = &self.executes {
            root = with_template(root, template);
        }
        for child in &self.children {
            root = root.then(child.build()?);
        }
        Ok(root)
    }
}

impl NodeDefinition {
    pub fn id(&self) -> &str {
        match self {
            NodeDefinition::Literal(literal) => &literal.id,
            NodeDefinition::Argument(argument) => &argument.id,
        }
    }

    fn build(&self) -> Result<CommandTree, CommandError> {
        let (mut node, suggestions, children) = match self {
            NodeDefinition::Literal(literal) => (
                literal.build()?,
                &literal.suggestions,
                &literal.children,
            ),
            NodeDefinition::Argument(argument) => (
                argument.build()?,
                &argument.suggestions,
                &argument.children,
            ),
        };
        if let Some(candidates) = suggestions.clone() {
            node = node.suggests(move |_, remaining| filter_prefix(&candidates, remaining));
        }
        for child in children {
            node = node.then(child.build()?);
        }
        Ok(node)
    }
}

impl LiteralDefinition {
    fn build(&self) -> Result<CommandTree, CommandError> {
        if self.id.trim().is_empty() {
            return Err(definition_err!("literal ids must not be blank"));
        }
        let mut node = if self.payloads.is_empty() {
            Node::literal_with_aliases(self.id.clone(), self.aliases.iter().cloned())
        } else {
            if !self.aliases.is_empty() {
                return Err(CommandError::Definition {
                    message: format!("literal '{}' has both aliases and payloads", self.id),
                    help: Some("list every accepted name under `payloads` instead".to_string()),
                });
            }
            Node::keyed_literal(
                self.id.clone(),
                self.payloads
                    .iter()
                    .map(|payload| (payload.name.clone(), payload.value.clone())),
            )
        };
        if let Some(template) = &self.executes {
            node = with_template(node, template);
        }
        Ok(node)
    }
}

impl ArgumentDefinition {
    fn build(&self) -> Result<CommandTree, CommandError> {
        if self.id.trim().is_empty() {
            return Err(definition_err!("argument ids must not be blank"));
        }
        let id = self.id.as_str();
        let default = self.default.as_ref();
        let mut node = match &self.argument {
            ArgumentType::Integer { min, max } => {
                let mut argument = LongArgument::new();
                if let Some(min) = min {
                    argument = argument.min(*min);
                }
                if let Some(max) = max {
                    argument = argument.max(*max);
                }
                let default = self.convert_default(default, serde_json::Value::as_i64)?;
                argument_node(id, argument, default)
            }
            ArgumentType::Double { min, max } => {
                let mut argument = DoubleArgument::new();
                if let Some(min) = min {
                    argument = argument.min(*min);
                }
                if let Some(max) = max {
                    argument = argument.max(*max);
                }
                let default = self.convert_default(default, serde_json::Value::as_f64)?;
                argument_node(id, argument, default)
            }
            ArgumentType::Boolean => {
                let default = self.convert_default(default, serde_json::Value::as_bool)?;
                argument_node(id, BooleanArgument, default)
            }
            ArgumentType::String {
                min_length,
                max_length,
                greedy,
            } => {
                let mut argument = if *greedy {
                    StringArgument::greedy()
                } else {
                    StringArgument::new()
                };
                if let Some(min_length) = min_length {
                    argument = argument.min_length(*min_length);
                }
                if let Some(max_length) = max_length {
                    argument = argument.max_length(*max_length);
                }
                let default =
                    self.convert_default(default, |value| value.as_str().map(str::to_string))?;
                argument_node(id, argument, default)
            }
            ArgumentType::Choice {
                choices,
                ignore_case,
            } => {
                if choices.is_empty() {
                    return Err(definition_err!("choice argument '{}' has no choices", id));
                }
                let default =
                    self.convert_default(default, |value| value.as_str().map(str::to_string))?;
                if let Some(value) = &default {
                    if !choices.contains(value) {
                        return Err(definition_err!(
                            "default '{}' of argument '{}' is not one of its choices",
                            value,
                            id
                        ));
                    }
                }
                let argument = ChoiceArgument::from_names(choices.iter().cloned())
                    .ignore_case(*ignore_case);
                argument_node(id, argument, default)
            }
        };
        if let Some(template) = &self.executes {
            node = with_template(node, template);
        }
        if let Some(template) = self.on_failure.clone() {
            node = node.on_failure(move |context| render_template(&template, context));
        }
        Ok(node)
    }

    fn convert_default<T>(
        &self,
        value: Option<&serde_json::Value>,
        convert: impl Fn(&serde_json::Value) -> Option<T>,
    ) -> Result<Option<T>, CommandError> {
        match value {
            None => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| {
                definition_err!(
                    "default {} of argument '{}' is not a valid {}",
                    value,
                    self.id,
                    self.argument.name()
                )
            }),
        }
    }
}

fn argument_node<T>(id: &str, argument: T, default: Option<T::Output>) -> CommandTree
where
    T: Argument<String, String> + 'static,
    T::Output: Clone,
{
    match default {
        Some(value) => Node::argument(
            id,
            ArgumentExt::<String, String>::with_default(argument, value),
        ),
        None => Node::argument(id, argument),
    }
}

fn with_template(node: CommandTree, template: &str) -> CommandTree {
    let template = template.to_string();
    node.executes(move |context| render_template(&template, context))
}

// ============================================================================
// RENDERING
// ============================================================================

/// Renders a slot value for display.
///
/// Known scalar types print plainly, JSON strings lose their quotes, and
/// anything else falls back to its `Debug` form.
pub fn render_value(value: &dyn Payload) -> String {
    let any = value.as_any();
    if let Some(text) = any.downcast_ref::<String>() {
        return text.clone();
    }
    if let Some(json) = any.downcast_ref::<serde_json::Value>() {
        return match json {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }
    if let Some(number) = any.downcast_ref::<i64>() {
        return number.to_string();
    }
    if let Some(number) = any.downcast_ref::<i32>() {
        return number.to_string();
    }
    if let Some(number) = any.downcast_ref::<f64>() {
        return number.to_string();
    }
    if let Some(number) = any.downcast_ref::<f32>() {
        return number.to_string();
    }
    if let Some(flag) = any.downcast_ref::<bool>() {
        return flag.to_string();
    }
    format!("{value:?}")
}

/// Expands `{id}` and `{source}` placeholders against a context.
pub fn render_template(template: &str, context: &Context<String, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            output.push_str(&rest[open..]);
            return output;
        };
        let key = &after[..close];
        if key == "source" {
            output.push_str(context.source());
        } else if let Some(value) = context.raw_argument(key) {
            output.push_str(&render_value(value));
        }
        rest = &after[close + 1..];
    }
    output.push_str(rest);
    output
}
