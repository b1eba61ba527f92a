//! Annotation parser: raw source text to the structured module model.

pub mod extract;
pub mod module;

use crate::model::Module;

/// Parse one source file into its module model.
pub fn parse_file(rel_path: &str, content: &str) -> Module {
    module::parse(rel_path, content)
}
