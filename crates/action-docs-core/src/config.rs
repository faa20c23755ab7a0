// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Fixed knobs for one generation run.
///
/// The repository and ref are baked into every synthesized `uses:` line, so
/// they must match where the actions are actually published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `owner/repo` that hosts the actions.
    pub repository: String,
    pub git_ref: String,
    /// Info string of fenced example blocks, both when searching unit READMEs
    /// and when emitting the usage block.
    pub example_language: String,
    /// Executable name of the formatter run after all documents are written.
    pub formatter: String,
}

fn default_repository() -> String {
    "codfish/actions".to_string()
}

fn default_git_ref() -> String {
    "main".to_string()
}

fn default_example_language() -> String {
    "yaml".to_string()
}

fn default_formatter() -> String {
    "prettier".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            git_ref: default_git_ref(),
            example_language: default_example_language(),
            formatter: default_formatter(),
        }
    }
}

impl Config {
    /// The step line that invokes a unit, e.g.
    /// `- uses: codfish/actions/comment@main`.
    pub fn invocation_line(&self, identifier: &str) -> String {
        format!("- uses: {}/{}@{}", self.repository, identifier, self.git_ref)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
