use action_docs_core::config::Config;
use action_docs_core::generate::Generator;
use action_docs_core::paths;
use anyhow::Context;
use std::path::Path;

/// `action-docs`: regenerate the root README docs block and every unit's
/// inputs/outputs tables, then run the formatter.
///
/// Fails only when the root README cannot be updated. Per-unit problems are
/// reported and skipped.
pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Scanning for actions in: {}", root.display());

    let generator = Generator::new(root, Config::default())?;
    let report = generator.run().with_context(|| {
        format!("failed to update {}", paths::root_readme(root).display())
    })?;

    for skipped in &report.skipped {
        println!(
            "  skipped: {} ({})",
            display_relative(root, &skipped.path),
            skipped.reason
        );
    }
    for path in &report.written {
        println!("  updated: {}", display_relative(root, path));
    }
    if report.written.is_empty() {
        println!("  unchanged: documentation is already up to date");
    }
    if let Some(err) = &report.format_error {
        println!("  warning: {err}");
    }

    println!("\nGenerated documentation for {} actions.", report.actions.len());
    println!("Run `git diff` to see the changes.");
    Ok(())
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
