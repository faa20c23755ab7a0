//! One documentation run over a repository of actions.
//!
//! A run is three passes over the project root:
//! 1. load every unit and splice the aggregated docs into the root README
//! 2. splice each unit's inputs/outputs tables into its own README
//! 3. hand every rewritten document to the formatter
//!
//! Only the root README can fail the run. Everything per unit is logged,
//! recorded in the `RunReport`, and skipped.

use crate::action::{self, ActionRecord};
use crate::config::Config;
use crate::error::{DocsError, Result};
use crate::example::ExampleExtractor;
use crate::marker::{self, MarkerPair};
use crate::{formatter, io, paths, section, table};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// A unit or document that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

/// State accumulated over one run. Created empty at the start, filled by each
/// pass, and handed back to the caller at the end.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Loaded actions, sorted by display name.
    pub actions: Vec<ActionRecord>,
    /// Documents rewritten during the run, in write order.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
    /// Formatter failure, if the formatting pass did not succeed.
    pub format_error: Option<String>,
}

impl RunReport {
    fn skip(&mut self, path: &Path, err: &DocsError) {
        tracing::warn!(path = %path.display(), error = %err, "skipped");
        self.skipped.push(Skipped {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct Generator {
    root: PathBuf,
    config: Config,
    extractor: ExampleExtractor,
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let extractor = ExampleExtractor::new(&config)?;
        Ok(Self {
            root: root.into(),
            config,
            extractor,
        })
    }

    /// Run all three passes. Fails only when the root README is missing or
    /// its markers are absent or misordered.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();
        self.update_root_readme(&mut report)?;
        self.update_unit_readmes(&mut report);
        self.format(&mut report);
        Ok(report)
    }

    /// Discover and load every unit into `report.actions`, sorted by display
    /// name. Units whose definition cannot be loaded are skipped.
    pub fn load_actions(&self, report: &mut RunReport) -> Result<()> {
        let units = action::discover(&self.root)?;
        tracing::info!(count = units.len(), units = ?units, "found action directories");

        for identifier in units {
            match ActionRecord::load(&self.root, &identifier) {
                Ok(action) => report.actions.push(action),
                Err(e) => report.skip(&paths::action_file(&self.root, &identifier), &e),
            }
        }
        action::sort_by_display_name(&mut report.actions);
        Ok(())
    }

    /// The full block placed between the root markers.
    pub fn render_actions(&self, actions: &[ActionRecord]) -> String {
        let sections = actions.iter().map(|action| {
            let unit_dir = paths::unit_dir(&self.root, &action.identifier);
            let example = self.extractor.usage_example(&unit_dir, action);
            section::compose(action, &example, &self.config.example_language)
        });
        section::compose_all(sections)
    }

    /// Pass 1. Markers are checked before any unit is loaded so a bad README
    /// fails fast.
    pub fn update_root_readme(&self, report: &mut RunReport) -> Result<()> {
        let path = paths::root_readme(&self.root);
        let original = io::read_document(&path)?;
        marker::ACTION_DOCS.locate(&original)?;

        self.load_actions(report)?;
        let docs = self.render_actions(&report.actions);
        let updated = marker::splice(&original, marker::ACTION_DOCS, &docs)?;

        if io::write_if_changed(&path, &original, &updated)? {
            report.written.push(path);
        }
        Ok(())
    }

    /// Pass 2. Each unit README is read once, both tables are spliced in
    /// memory, and the file is rewritten only if something changed.
    pub fn update_unit_readmes(&self, report: &mut RunReport) {
        let actions = std::mem::take(&mut report.actions);
        for action in &actions {
            let path = paths::unit_readme(&self.root, &action.identifier);
            match self.update_unit_readme(&path, action) {
                Ok(true) => report.written.push(path),
                Ok(false) => {}
                Err(DocsError::NotFound(_)) => {
                    tracing::debug!(path = %path.display(), "no unit README");
                }
                Err(e) => report.skip(&path, &e),
            }
        }
        report.actions = actions;
    }

    fn update_unit_readme(&self, path: &Path, action: &ActionRecord) -> Result<bool> {
        let original = io::read_document(path)?;
        let tables = [
            (marker::INPUTS, table::render(&action.inputs)),
            (marker::OUTPUTS, table::render(&action.outputs)),
        ];

        let mut updated = original.clone();
        for (pair, rendered) in &tables {
            updated = splice_or_keep(path, updated, *pair, rendered);
        }
        io::write_if_changed(path, &original, &updated)
    }

    /// Pass 3. Failure is recorded and logged; written documents stand.
    pub fn format(&self, report: &mut RunReport) {
        if let Err(e) = formatter::run(&self.root, &self.config.formatter, &report.written) {
            tracing::warn!(error = %e, "formatting pass failed, documents left unformatted");
            report.format_error = Some(e.to_string());
        }
    }
}

/// Splice `replacement` into `document`, or return it untouched when the
/// marker pair is not usable.
fn splice_or_keep(path: &Path, document: String, pair: MarkerPair, replacement: &str) -> String {
    match marker::splice(&document, pair, replacement) {
        Ok(updated) => updated,
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                marker = pair.start,
                error = %e,
                "region left unmodified"
            );
            document
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ROOT_README: &str = "# Actions\n\nShared CI actions.\n\n## Available Actions\n\n<!-- start action docs -->\nstale\n<!-- end action docs -->\n\n## License\n\nMIT\n";

    fn config() -> Config {
        Config {
            formatter: "definitely-not-a-real-formatter".to_string(),
            ..Config::default()
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        std::fs::read_to_string(root.join(rel)).unwrap()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", ROOT_README);
        write(
            dir.path(),
            "zz-setup/action.yml",
            "name: setup\ndescription: Set up the toolchain\ninputs:\n  node-version:\n    description: Node version\n    default: lts/*\n",
        );
        write(
            dir.path(),
            "comment/action.yml",
            "name: Comment\ndescription: Post a PR comment\ninputs:\n  message:\n    description: Body\n    required: true\noutputs:\n  comment-id:\n    description: Id of the comment\n",
        );
        dir
    }

    #[test]
    fn end_to_end_preserves_outside_text_and_sorts() {
        let dir = fixture();
        let generator = Generator::new(dir.path(), config()).unwrap();
        let report = generator.run().unwrap();

        let names: Vec<_> = report.actions.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, ["Comment", "setup"]);

        let out = read(dir.path(), "README.md");
        let (before, rest) = out.split_at(out.find("<!-- start action docs -->").unwrap());
        assert_eq!(
            before,
            "# Actions\n\nShared CI actions.\n\n## Available Actions\n\n"
        );
        assert!(rest.ends_with("\n<!-- end action docs -->\n\n## License\n\nMIT\n"));
        assert!(!out.contains("stale"));

        let comment = out.find("### [Comment](./comment/)").unwrap();
        let setup = out.find("### [setup](./zz-setup/)").unwrap();
        assert!(comment < setup);
        assert!(out.contains("- uses: codfish/actions/zz-setup@main\n  with:\n    node-version: lts/*"));
        assert!(out.contains("| `comment-id` | Id of the comment |"));

        assert_eq!(report.written, vec![dir.path().join("README.md")]);
        assert!(report.format_error.is_some());
    }

    #[test]
    fn run_is_idempotent() {
        let dir = fixture();
        let generator = Generator::new(dir.path(), config()).unwrap();
        generator.run().unwrap();
        let first = read(dir.path(), "README.md");

        let report = generator.run().unwrap();
        assert_eq!(read(dir.path(), "README.md"), first);
        assert!(report.written.is_empty());
        assert!(report.format_error.is_none());
    }

    #[test]
    fn missing_root_readme_is_fatal() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(dir.path(), config()).unwrap();
        assert!(matches!(generator.run().unwrap_err(), DocsError::NotFound(_)));
    }

    #[test]
    fn missing_root_marker_is_fatal_and_leaves_readme_alone() {
        let dir = fixture();
        write(dir.path(), "README.md", "# Actions\n\n<!-- end action docs -->\n");
        write(dir.path(), "comment/README.md", "<!-- start inputs -->\n<!-- end inputs -->\n");

        let generator = Generator::new(dir.path(), config()).unwrap();
        let err = generator.run().unwrap_err();
        assert!(matches!(err, DocsError::MissingStartMarker(_)));
        assert_eq!(read(dir.path(), "README.md"), "# Actions\n\n<!-- end action docs -->\n");
        assert_eq!(
            read(dir.path(), "comment/README.md"),
            "<!-- start inputs -->\n<!-- end inputs -->\n"
        );
    }

    #[test]
    fn malformed_unit_is_skipped() {
        let dir = fixture();
        write(dir.path(), "broken/action.yml", "inputs: [unclosed\n");

        let generator = Generator::new(dir.path(), config()).unwrap();
        let report = generator.run().unwrap();

        assert_eq!(report.actions.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken/action.yml"));
        assert!(!read(dir.path(), "README.md").contains("broken"));
    }

    #[test]
    fn unit_readme_tables_are_spliced_independently() {
        let dir = fixture();
        let unit = "# Comment\n\n## Inputs\n\n<!-- start inputs -->\nold\n<!-- end inputs -->\n\n## Outputs\n\n<!-- end outputs -->\n<!-- start outputs -->\n";
        write(dir.path(), "comment/README.md", unit);

        let generator = Generator::new(dir.path(), config()).unwrap();
        let report = generator.run().unwrap();

        let out = read(dir.path(), "comment/README.md");
        assert!(out.contains(
            "<!-- start inputs -->\n| Input | Description | Required | Default |\n|-------|-------------|----------|---------|\n| `message` | Body | Yes | - |\n<!-- end inputs -->"
        ));
        assert!(out.ends_with("## Outputs\n\n<!-- end outputs -->\n<!-- start outputs -->\n"));
        assert!(report.written.contains(&dir.path().join("comment/README.md")));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn unit_readme_without_markers_is_untouched() {
        let dir = fixture();
        write(dir.path(), "comment/README.md", "# Comment\n\nNo markers.\n");

        let generator = Generator::new(dir.path(), config()).unwrap();
        let report = generator.run().unwrap();

        assert_eq!(read(dir.path(), "comment/README.md"), "# Comment\n\nNo markers.\n");
        assert!(!report.written.contains(&dir.path().join("comment/README.md")));
    }

    #[test]
    fn usage_example_is_extracted_from_unit_readme() {
        let dir = fixture();
        write(
            dir.path(),
            "comment/README.md",
            "# Comment\n\n## Usage\n\n```yaml\n- name: Say hi\n  uses: codfish/actions/comment@main\n  with:\n    message: hi\n```\n",
        );

        let generator = Generator::new(dir.path(), config()).unwrap();
        generator.run().unwrap();

        let out = read(dir.path(), "README.md");
        assert!(out.contains(
            "**Usage:**\n\n```yaml\n- name: Say hi\n  uses: codfish/actions/comment@main\n  with:\n    message: hi\n```"
        ));
    }

    #[test]
    fn no_units_empties_the_region() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", ROOT_README);

        let generator = Generator::new(dir.path(), config()).unwrap();
        generator.run().unwrap();

        assert!(read(dir.path(), "README.md")
            .contains("<!-- start action docs -->\n\n<!-- end action docs -->"));
    }
}
