//! Module parser: assemble one Module record per source file.
//!
//! Consumes tag-extractor output and applies the precedence and filtering
//! policy: block-comment metadata over in-code fallbacks, block description
//! over leading line comments, and the heuristics that drop private or
//! undocumented functions.

use crate::model::{Function, Module, Param};
use crate::parser::extract::{self, Signature};
use regex::Regex;
use std::sync::LazyLock;

// Name token (optionally `?`-suffixed), type token, optional description.
static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@param\s+(\w+\??)\s+(\S+)(?:\s+(.+))?").unwrap());

/// Parse one source file into its Module record.
///
/// `rel_path` is the `/`-separated path relative to the scan root; it is the
/// sole source of the module's identity.
pub fn parse(rel_path: &str, content: &str) -> Module {
    let mut module = Module {
        name: module_name(rel_path),
        path: rel_path.to_string(),
        ..Default::default()
    };

    // Block-comment tags take precedence for metadata and description.
    let block = extract::block_comment(content);
    if let Some(block) = block {
        module.version = extract::version_tag(block);
        module.author = extract::author_tag(block);
        module.license = extract::license_tag(block);
        module.description = extract::block_description(block);
    }

    if module.version.is_none() {
        module.version = extract::version_assignment(content);
    }

    if module.description.is_empty() {
        module.description = leading_comment_description(content);
    }

    // Block-style examples first, then usage-style, each in encounter order.
    if let Some(block) = block {
        module.examples.extend(extract::block_examples(block));
    }
    module.examples.extend(extract::usage_examples(content));

    for sig in extract::signatures(content) {
        if is_private(&sig) {
            continue;
        }
        let mut func = parse_function_doc(&sig);
        func.line = extract::line_number(content, sig.offset);
        if func.is_documented() {
            module.functions.push(func);
        }
    }

    module
}

/// Dotted logical name: strip the extension, turn separators into dots.
fn module_name(rel_path: &str) -> String {
    rel_path
        .strip_suffix(".lua")
        .unwrap_or(rel_path)
        .replace('/', ".")
}

/// Private-function heuristics.
///
/// Locally-scoped bare names are file-internal helpers; an underscore at
/// the start of the identifier or of any dotted segment marks an internal
/// function. Underscores elsewhere in a segment are fine (`foo.bar_baz`).
fn is_private(sig: &Signature) -> bool {
    if sig.is_local && !sig.name.contains('.') && !sig.name.contains(':') {
        return true;
    }
    sig.name.starts_with('_') || sig.name.contains("._")
}

/// Description fallback: a run of `---` comments starting at the first line
/// of the file, stopped by the first tag line or non-comment line.
fn leading_comment_description(content: &str) -> String {
    let mut collected = Vec::new();
    for raw in content.lines() {
        let Some(rest) = raw.strip_prefix("---") else {
            break;
        };
        let cleaned = rest.trim();
        if cleaned.starts_with('@') {
            break;
        }
        if !cleaned.is_empty() {
            collected.push(cleaned);
        }
    }
    collected.join(" ")
}

/// Parse the comment block attached to a signature into a Function.
///
/// Only `--`/`---` lines count. `@param` lines accumulate; for `@return`
/// the last line wins; remaining non-tag, non-empty lines become the
/// description.
fn parse_function_doc(sig: &Signature) -> Function {
    let mut func = Function {
        name: sig.name.clone(),
        ..Default::default()
    };
    let mut desc_lines = Vec::new();

    for raw in sig.doc_block.lines() {
        let trimmed = raw.trim();
        let line = if let Some(rest) = trimmed.strip_prefix("---") {
            rest.trim()
        } else if let Some(rest) = trimmed.strip_prefix("--") {
            rest.trim()
        } else {
            continue;
        };

        if line.starts_with("@param") {
            if let Some(caps) = RE_PARAM.captures(line) {
                func.params.push(Param {
                    name: caps[1].to_string(),
                    ty: caps[2].to_string(),
                    description: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
                });
            }
        } else if let Some(rest) = line.strip_prefix("@return") {
            func.returns = rest.trim().to_string();
        } else if !line.starts_with('@') && !line.is_empty() {
            desc_lines.push(line);
        }
    }

    func.description = desc_lines.join(" ");
    func
}
