use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const ACTION_FILE: &str = "action.yml";
pub const README_MD: &str = "README.md";

/// Dependency cache that sits at the top level of most action repositories
/// and is never a unit, even when a package ships its own `action.yml`.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

pub const LOCAL_BIN_DIR: &str = "node_modules/.bin";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn unit_dir(root: &Path, identifier: &str) -> PathBuf {
    root.join(identifier)
}

pub fn action_file(root: &Path, identifier: &str) -> PathBuf {
    unit_dir(root, identifier).join(ACTION_FILE)
}

pub fn unit_readme(root: &Path, identifier: &str) -> PathBuf {
    unit_dir(root, identifier).join(README_MD)
}

pub fn root_readme(root: &Path) -> PathBuf {
    root.join(README_MD)
}

pub fn local_bin(root: &Path, name: &str) -> PathBuf {
    root.join(LOCAL_BIN_DIR).join(name)
}

/// Whether a top-level directory name can hold a unit at all.
pub fn is_candidate_dir(name: &str) -> bool {
    !name.starts_with('.') && name != DEPENDENCY_CACHE_DIR
}

/// Relative link used in generated headings, e.g. `./setup-node/`.
pub fn relative_link(identifier: &str) -> String {
    format!("./{identifier}/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/actions");
        assert_eq!(
            action_file(root, "comment"),
            PathBuf::from("/tmp/actions/comment/action.yml")
        );
        assert_eq!(
            unit_readme(root, "comment"),
            PathBuf::from("/tmp/actions/comment/README.md")
        );
        assert_eq!(root_readme(root), PathBuf::from("/tmp/actions/README.md"));
        assert_eq!(
            local_bin(root, "prettier"),
            PathBuf::from("/tmp/actions/node_modules/.bin/prettier")
        );
    }

    #[test]
    fn hidden_and_cache_dirs_are_not_candidates() {
        for name in [".github", ".git", "node_modules"] {
            assert!(!is_candidate_dir(name), "expected excluded: {name}");
        }
        for name in ["setup-node", "npm-publish-pr", "_shared"] {
            assert!(is_candidate_dir(name), "expected candidate: {name}");
        }
    }

    #[test]
    fn relative_link_has_trailing_slash() {
        assert_eq!(relative_link("comment"), "./comment/");
    }
}
