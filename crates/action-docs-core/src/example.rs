//! Usage examples for a unit.
//!
//! An example is taken from the unit's own README when one of the extraction
//! rules matches, and synthesized from the action's inputs otherwise.
//!
//! # Extraction rules
//! Evaluated in order, first match wins:
//! 1. `UsageSection`: the first fenced example block after a `## Usage` heading.
//! 2. `AnyUses`: any fenced example block with a `uses:` step.
//! 3. `OwnUses`: a fenced example block whose `uses:` line names this unit.

use crate::action::{ActionRecord, InputSpec};
use crate::config::Config;
use crate::error::{DocsError, Result};
use crate::{io, paths};
use indexmap::IndexMap;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Optional inputs shown in a synthesized example, after all required ones.
pub const MAX_OPTIONAL_INPUTS: usize = 2;

/// Placeholder for inputs no keyword rule or default covers.
pub const GENERIC_VALUE: &str = "value";

/// Example values chosen by substring of the input name, first match wins.
/// A declared default only applies when none of these match.
const KEYWORD_VALUES: [(&str, &str); 4] = [
    ("token", "${{ secrets.TOKEN_NAME }}"),
    ("version", "lts/*"),
    ("message", "Your message here"),
    ("tag", "tag-name"),
];

/// Lazily matched block body that cannot run past a closing fence.
const BLOCK_BODY: &str = r"(?:[^`]|`[^`]|``[^`])*?";

static STEP_HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn step_header_re() -> &'static Regex {
    STEP_HEADER_RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*-[ \t]*(?:name|uses):").unwrap())
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    UsageSection,
    AnyUses,
    OwnUses,
}

pub const RULES: [Rule; 3] = [Rule::UsageSection, Rule::AnyUses, Rule::OwnUses];

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::UsageSection => "usage-section",
            Rule::AnyUses => "any-uses",
            Rule::OwnUses => "own-uses",
        }
    }
}

// ---------------------------------------------------------------------------
// ExampleExtractor
// ---------------------------------------------------------------------------

pub struct ExampleExtractor {
    config: Config,
    fence: String,
    usage_section: Regex,
    any_uses: Regex,
}

impl ExampleExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let fence = format!(r"```{}[ \t]*\r?\n", regex::escape(&config.example_language));
        let usage_section = Regex::new(&format!(r"(?is)## usage.*?{fence}(.*?)\r?\n[ \t]*```"))?;
        let any_uses = Regex::new(&format!(
            r"(?is){fence}({BLOCK_BODY}uses:\s*[.\w/-]+{BLOCK_BODY})\r?\n[ \t]*```"
        ))?;
        Ok(Self {
            config: config.clone(),
            fence,
            usage_section,
            any_uses,
        })
    }

    /// Example for `action`: extracted from its README when possible,
    /// synthesized otherwise.
    pub fn usage_example(&self, unit_dir: &Path, action: &ActionRecord) -> String {
        self.extract(unit_dir, &action.identifier)
            .unwrap_or_else(|| self.synthesize(&action.identifier, &action.inputs))
    }

    /// Look for an example in `<unit_dir>/README.md`. `None` when the README
    /// is missing or unreadable, or no rule matches.
    pub fn extract(&self, unit_dir: &Path, identifier: &str) -> Option<String> {
        let readme = unit_dir.join(paths::README_MD);
        let content = match io::read_document(&readme) {
            Ok(content) => content,
            Err(DocsError::NotFound(_)) => return None,
            Err(e) => {
                tracing::warn!(path = %readme.display(), error = %e, "error reading unit README");
                return None;
            }
        };
        self.find_example(&content, identifier)
    }

    /// Apply the extraction rules to README text and normalize the capture.
    pub fn find_example(&self, content: &str, identifier: &str) -> Option<String> {
        let (rule, captured) = self.first_match(content, identifier)?;
        tracing::debug!(unit = identifier, rule = rule.name(), "extracted usage example");

        let example = captured.trim();
        if step_header_re().is_match(example) {
            Some(example.to_string())
        } else {
            Some(self.wrap(identifier, example))
        }
    }

    /// The first rule that matches, with its raw capture. A blank capture
    /// counts as no match.
    pub fn first_match<'a>(&self, content: &'a str, identifier: &str) -> Option<(Rule, &'a str)> {
        for rule in RULES {
            let own_uses;
            let pattern = match rule {
                Rule::UsageSection => &self.usage_section,
                Rule::AnyUses => &self.any_uses,
                Rule::OwnUses => match self.own_uses_pattern(identifier) {
                    Ok(re) => {
                        own_uses = re;
                        &own_uses
                    }
                    Err(e) => {
                        tracing::warn!(unit = identifier, error = %e, "skipping own-uses rule");
                        continue;
                    }
                },
            };
            let captured = pattern
                .captures(content)
                .and_then(|c| c.get(1))
                .filter(|m| !m.as_str().trim().is_empty());
            if let Some(m) = captured {
                return Some((rule, m.as_str()));
            }
        }
        None
    }

    fn own_uses_pattern(&self, identifier: &str) -> std::result::Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"(?is){}({BLOCK_BODY}uses:\s*[^\n]*{}{BLOCK_BODY})\r?\n[ \t]*```",
            self.fence,
            regex::escape(identifier)
        ))
    }

    /// Put a bare `with:` block (or similar fragment) under an invocation
    /// line for the unit.
    fn wrap(&self, identifier: &str, example: &str) -> String {
        let indented: Vec<String> = example.lines().map(|line| format!("  {line}")).collect();
        format!("{}\n{}", self.config.invocation_line(identifier), indented.join("\n"))
    }

    /// Minimal step invoking the unit. Lists every required input, then the
    /// first `MAX_OPTIONAL_INPUTS` optional ones, in declaration order.
    pub fn synthesize(&self, identifier: &str, inputs: &IndexMap<String, InputSpec>) -> String {
        let invocation = self.config.invocation_line(identifier);
        if inputs.is_empty() {
            return invocation;
        }

        let required = inputs.iter().filter(|(_, spec)| spec.required);
        let optional = inputs
            .iter()
            .filter(|(_, spec)| !spec.required)
            .take(MAX_OPTIONAL_INPUTS);

        let mut lines = vec![invocation, "  with:".to_string()];
        for (name, spec) in required.chain(optional) {
            lines.push(format!("    {name}: {}", example_value(name, spec)));
        }
        lines.join("\n")
    }
}

/// Value shown for `name` in a synthesized `with:` block.
pub fn example_value(name: &str, spec: &InputSpec) -> String {
    if let Some((_, value)) = KEYWORD_VALUES.iter().find(|(kw, _)| name.contains(kw)) {
        return value.to_string();
    }
    spec.default.clone().unwrap_or_else(|| GENERIC_VALUE.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
