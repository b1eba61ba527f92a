//! Fixed TAC project constants: namespace layout and source-hosting URLs.

/// Base URL for raw file downloads (installer/updater).
pub const RAW_BASE_URL: &str = "https://raw.githubusercontent.com/Twijn/tac/main";

/// Base URL for browsing source on GitHub.
pub const BLOB_BASE_URL: &str = "https://github.com/Twijn/tac/blob/main";

/// Installer entry point shown in the index quick-install box.
pub const INSTALLER_URL: &str = "https://raw.githubusercontent.com/Twijn/tac/main/installer.lua";

/// Logical name of the top-level system module.
pub const INIT_MODULE: &str = "tac.init";

/// Source path of the top-level system module.
pub const INIT_PATH: &str = "tac/init.lua";

pub const CORE_PREFIX: &str = "tac/core/";
pub const LIB_PREFIX: &str = "tac/lib/";
pub const COMMANDS_PREFIX: &str = "tac/commands/";
pub const EXTENSIONS_PREFIX: &str = "tac/extensions/";

/// Download URL for a module's source file.
pub fn download_url(path: &str) -> String {
    format!("{}/{}", RAW_BASE_URL, path)
}

/// Browsing URL for a module's source file.
pub fn blob_url(path: &str) -> String {
    format!("{}/{}", BLOB_BASE_URL, path)
}

/// Path segments below the extensions root, or None for non-extension paths.
/// `tac/extensions/shop.lua` → `["shop.lua"]`,
/// `tac/extensions/shop/commands.lua` → `["shop", "commands.lua"]`.
pub fn extension_segments(path: &str) -> Option<Vec<&str>> {
    path.strip_prefix(EXTENSIONS_PREFIX)
        .map(|rest| rest.split('/').collect())
}

/// True for a top-level extension module (one segment below the root).
pub fn is_extension_root(path: &str) -> bool {
    extension_segments(path).is_some_and(|segs| segs.len() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_for_extension_paths() {
        assert_eq!(
            extension_segments("tac/extensions/shop.lua"),
            Some(vec!["shop.lua"])
        );
        assert_eq!(
            extension_segments("tac/extensions/shop/commands.lua"),
            Some(vec!["shop", "commands.lua"])
        );
        assert_eq!(extension_segments("tac/core/auth.lua"), None);
    }

    #[test]
    fn extension_root_depth() {
        assert!(is_extension_root("tac/extensions/shop.lua"));
        assert!(!is_extension_root("tac/extensions/shop/commands.lua"));
        assert!(!is_extension_root("tac/lib/util.lua"));
    }

    #[test]
    fn urls_join_with_slash() {
        assert_eq!(
            download_url("tac/init.lua"),
            "https://raw.githubusercontent.com/Twijn/tac/main/tac/init.lua"
        );
        assert_eq!(
            blob_url("tac/core/auth.lua"),
            "https://github.com/Twijn/tac/blob/main/tac/core/auth.lua"
        );
    }
}
