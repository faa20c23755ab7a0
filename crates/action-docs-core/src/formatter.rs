//! Final formatting pass over rewritten documents.
//!
//! The formatter is an external executable (prettier by default) invoked as
//! `<formatter> --write <paths...>` from the project root. It runs after all
//! text mutations are done; its failure never rolls back written documents.
//!
//! # Resolution order
//! 1. `node_modules/.bin/<formatter>` under the project root
//! 2. `<formatter>` on `PATH`

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{DocsError, Result};
use crate::paths;

/// Locate the formatter executable, preferring the project-local install.
pub fn resolve(root: &Path, formatter: &str) -> Option<PathBuf> {
    let local = paths::local_bin(root, formatter);
    if local.is_file() {
        return Some(local);
    }
    which::which(formatter).ok()
}

/// Run the formatter over `files`. Does nothing when `files` is empty.
///
/// Stdout and stderr are captured; on failure the first part of stderr is
/// carried in the error so the caller can log it.
pub fn run(root: &Path, formatter: &str, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Ok(());
    }

    let program = resolve(root, formatter).ok_or_else(|| {
        DocsError::ExternalTool(format!("{formatter} not found in node_modules/.bin or PATH"))
    })?;

    let mut cmd = build_command(&program, files);
    cmd.current_dir(root);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd
        .output()
        .map_err(|e| DocsError::ExternalTool(format!("failed to spawn {formatter}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let hint = stderr.trim().chars().take(500).collect::<String>();
        return Err(DocsError::ExternalTool(format!(
            "{formatter} exited with {}: {hint}",
            output.status
        )));
    }

    tracing::debug!(formatter, files = files.len(), "formatted documents");
    Ok(())
}

fn build_command(program: &Path, files: &[PathBuf]) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("--write");
    cmd.args(files);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn run_with_no_files_is_noop() {
        let dir = TempDir::new().unwrap();
        run(dir.path(), "definitely-not-a-real-formatter", &[]).unwrap();
    }

    #[test]
    fn missing_formatter_is_external_tool_error() {
        let dir = TempDir::new().unwrap();
        let files = vec![dir.path().join("README.md")];
        let err = run(dir.path(), "definitely-not-a-real-formatter", &files).unwrap_err();
        assert!(matches!(err, DocsError::ExternalTool(_)));
        assert!(err.to_string().contains("definitely-not-a-real-formatter"));
    }

    #[test]
    fn resolve_prefers_local_bin() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("fmt-tool"), "#!/bin/sh\n").unwrap();
        assert_eq!(resolve(dir.path(), "fmt-tool"), Some(bin.join("fmt-tool")));
    }

    #[test]
    fn build_command_passes_write_flag_first() {
        let files = vec![PathBuf::from("README.md"), PathBuf::from("a/README.md")];
        let cmd = build_command(Path::new("prettier"), &files);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["--write", "README.md", "a/README.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn failing_formatter_reports_stderr() {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join("broken-fmt");
        {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .mode(0o755)
                .open(&script)
                .unwrap();
            file.write_all(b"#!/bin/sh\necho 'syntax error' >&2\nexit 2\n")
                .unwrap();
            file.sync_all().unwrap();
        }

        let files = vec![dir.path().join("README.md")];
        let err = run(dir.path(), "broken-fmt", &files).unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}
