use crate::error::{DocsError, Result};
use crate::{io, paths};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use std::cmp::Ordering;
use std::path::Path;

pub const DEFAULT_DESCRIPTION: &str = "No description available";

// ---------------------------------------------------------------------------
// InputSpec / OutputSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSpec {
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSpec {
    pub description: Option<String>,
}

/// Anything that renders as a table row needs at least a description.
pub trait Described {
    fn description(&self) -> Option<&str>;
}

impl Described for InputSpec {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Described for OutputSpec {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

/// Normalized metadata for one unit, built from its `action.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// Directory name of the unit.
    pub identifier: String,
    pub display_name: String,
    pub description: String,
    pub inputs: IndexMap<String, InputSpec>,
    pub outputs: IndexMap<String, OutputSpec>,
}

// Raw shape of action.yml. Scalars are kept as `Value` because real-world
// definitions mix strings, numbers and booleans for the same key.
#[derive(Debug, Default, Deserialize)]
struct RawAction {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    inputs: Option<IndexMap<String, Option<RawInput>>>,
    #[serde(default)]
    outputs: Option<IndexMap<String, Option<RawOutput>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInput {
    #[serde(default)]
    description: Value,
    #[serde(default)]
    required: Value,
    #[serde(default)]
    default: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    #[serde(default)]
    description: Value,
}

impl ActionRecord {
    /// Load `<root>/<identifier>/action.yml`.
    pub fn load(root: &Path, identifier: &str) -> Result<Self> {
        let path = paths::action_file(root, identifier);
        let data = io::read_document(&path)?;
        Self::parse(identifier, &data).map_err(|e| DocsError::Parse {
            path,
            message: e.to_string(),
        })
    }

    /// Build a record from definition text. Fields missing from the text fall
    /// back to their defaults.
    pub fn parse(identifier: &str, data: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let raw: RawAction = if data.trim().is_empty() {
            RawAction::default()
        } else {
            serde_yaml::from_str(data)?
        };

        let inputs = raw
            .inputs
            .unwrap_or_default()
            .into_iter()
            .map(|(name, input)| {
                let input = input.unwrap_or_default();
                let spec = InputSpec {
                    description: scalar_text(&input.description),
                    required: is_true(&input.required),
                    default: truthy_text(&input.default),
                };
                (name, spec)
            })
            .collect();

        let outputs = raw
            .outputs
            .unwrap_or_default()
            .into_iter()
            .map(|(name, output)| {
                let spec = OutputSpec {
                    description: output.and_then(|o| scalar_text(&o.description)),
                };
                (name, spec)
            })
            .collect();

        Ok(Self {
            identifier: identifier.to_string(),
            display_name: scalar_text(&raw.name).unwrap_or_else(|| identifier.to_string()),
            description: scalar_text(&raw.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            inputs,
            outputs,
        })
    }
}

/// Non-empty scalar rendered as text. Null, empty strings and collections
/// count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Like `scalar_text`, but `false` and zero are absent too. Used for input
/// defaults, where those values mean "nothing to show".
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => scalar_text(other),
    }
}

fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Names of every top-level directory under `root` that holds an
/// `action.yml`, sorted by name. Hidden directories and the dependency cache
/// are never units.
pub fn discover(root: &Path) -> Result<Vec<String>> {
    let mut units = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !paths::is_candidate_dir(&name) || !entry.path().is_dir() {
            continue;
        }
        if paths::action_file(root, &name).is_file() {
            units.push(name);
        }
    }
    units.sort();
    Ok(units)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Locale-style name comparison: case-insensitive first, lowercase before
/// uppercase on ties, code points last so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Stable sort by display name.
pub fn sort_by_display_name(actions: &mut [ActionRecord]) {
    actions.sort_by(|a, b| compare_names(&a.display_name, &b.display_name));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
