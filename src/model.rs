//! Data model for parsed documentation.

/// One source file's extracted documentation.
#[derive(Debug, Default, Clone)]
pub struct Module {
    /// Dotted logical name derived from the path: `tac/core/auth.lua` → `tac.core.auth`.
    pub name: String,
    /// Relative source path, `/`-separated. Source of truth for identity.
    pub path: String,
    /// One-paragraph description, joined with single spaces.
    pub description: String,
    pub version: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Code samples in discovery order: block-comment `@example` blocks
    /// first, then `---@usage` blocks.
    pub examples: Vec<String>,
    /// Documented functions in order of first appearance.
    pub functions: Vec<Function>,
}

impl Module {
    /// A module is worth keeping when it has a description or any
    /// documented function.
    pub fn is_documented(&self) -> bool {
        !self.description.is_empty() || !self.functions.is_empty()
    }

    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or("0.0.0")
    }

    /// Output page file name: dots become underscores.
    pub fn page_name(&self) -> String {
        format!("{}.html", self.name.replace('.', "_"))
    }
}

/// One documented function within a module.
#[derive(Debug, Default, Clone)]
pub struct Function {
    /// Identifier as written at the definition site (`obj.method`, `obj:method`).
    pub name: String,
    pub params: Vec<Param>,
    /// `@return` payload; last tag wins. Empty when absent.
    pub returns: String,
    pub description: String,
    /// 1-based line of the definition, for `#L<n>` deep links.
    pub line: usize,
}

impl Function {
    /// Bare declarations are dropped: keep only functions with a
    /// description, at least one parameter, or a return value.
    pub fn is_documented(&self) -> bool {
        !self.description.is_empty() || !self.params.is_empty() || !self.returns.is_empty()
    }
}

/// A `@param` entry. `name` may carry a trailing `?` marking it optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_via_returns_only() {
        let func = Function {
            name: "obj.method".into(),
            returns: "string".into(),
            ..Default::default()
        };
        assert!(func.is_documented());
    }

    #[test]
    fn bare_function_not_documented() {
        assert!(!Function::default().is_documented());
    }

    #[test]
    fn page_name_replaces_dots() {
        let module = Module {
            name: "tac.core.auth".into(),
            ..Default::default()
        };
        assert_eq!(module.page_name(), "tac_core_auth.html");
    }

    #[test]
    fn version_default() {
        let module = Module::default();
        assert_eq!(module.version_or_default(), "0.0.0");
    }
}
