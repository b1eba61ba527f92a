//! Source tree discovery: find the Lua files a run should document.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Find all Lua files under `root`, as sorted `/`-separated relative paths.
///
/// Excluded anywhere in the relative path: directories named `data`, `test`,
/// or `.git`. The top-level `lib/` directory is excluded as well (it has its
/// own published docs); `tac/lib/` does not start at the top level and stays
/// in.
pub fn lua_files(root: &Path) -> Result<Vec<String>> {
    let pattern = root.join("**").join("*.lua");
    let pattern = pattern.to_string_lossy();

    let mut files = Vec::new();
    for path in glob::glob(&pattern)
        .with_context(|| format!("invalid scan pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
    {
        if !path.is_file() {
            continue;
        }
        let rel = match path.strip_prefix(root) {
            Ok(rel) => relative_slash_path(rel),
            Err(_) => continue,
        };
        if !is_excluded(&rel) {
            files.push(rel);
        }
    }

    // Sort for deterministic output
    files.sort();
    Ok(files)
}

/// File names (e.g. `door.lua`) directly inside `tac/commands/`, sorted.
///
/// Used by the manifest reconciliation pass; returns an empty list when the
/// directory does not exist.
pub fn command_files(root: &Path) -> Result<Vec<String>> {
    let dir = root.join("tac").join("commands");
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("lua") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn relative_slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_excluded(rel: &str) -> bool {
    let components: Vec<&str> = rel.split('/').collect();
    let dirs = &components[..components.len().saturating_sub(1)];

    if dirs
        .iter()
        .any(|c| *c == "data" || *c == "test" || *c == ".git")
    {
        return true;
    }
    // Top-level lib/ is documented elsewhere; tac/lib/ stays in.
    components.first() == Some(&"lib")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "-- stub\n").unwrap();
    }

    #[test]
    fn excludes_data_test_git_anywhere() {
        assert!(is_excluded("tac/data/cards.lua"));
        assert!(is_excluded("tac/extensions/shop/test/spec.lua"));
        assert!(is_excluded(".git/hooks/x.lua"));
        assert!(!is_excluded("tac/core/auth.lua"));
        // Component match, not substring: a "testdata" directory stays in
        assert!(!is_excluded("tac/testdata/x.lua"));
    }

    #[test]
    fn excludes_top_level_lib_only() {
        assert!(is_excluded("lib/vendor.lua"));
        assert!(!is_excluded("tac/lib/util.lua"));
    }

    #[test]
    fn file_named_like_excluded_dir_stays() {
        assert!(!is_excluded("tac/commands/test.lua"));
    }

    #[test]
    fn finds_and_sorts_lua_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tac/init.lua");
        touch(dir.path(), "tac/core/auth.lua");
        touch(dir.path(), "tac/data/cards.lua");
        touch(dir.path(), "lib/vendor.lua");
        touch(dir.path(), "README.md");

        let files = lua_files(dir.path()).unwrap();
        assert_eq!(files, vec!["tac/core/auth.lua", "tac/init.lua"]);
    }

    #[test]
    fn command_files_lists_lua_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tac/commands/door.lua");
        touch(dir.path(), "tac/commands/admin.lua");
        touch(dir.path(), "tac/commands/notes.txt");

        let names = command_files(dir.path()).unwrap();
        assert_eq!(names, vec!["admin.lua", "door.lua"]);
    }

    #[test]
    fn command_files_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(command_files(dir.path()).unwrap().is_empty());
    }
}
