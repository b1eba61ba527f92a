//! Tag extractor: locate raw text spans for annotation constructs.
//!
//! Everything here is pure pattern matching over one file's text. No
//! interpretation happens at this level; precedence and filtering rules
//! live in the module parser.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)--\[\[(.*?)\]\]").unwrap());

// Tag payloads end at the line break. Requiring whitespace after the keyword
// keeps `@versionfoo` and `@authors` from matching.
static RE_VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@version[ \t]+([^\n]+)").unwrap());

static RE_AUTHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@author[ \t]+([^\n]+)").unwrap());

static RE_LICENSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@license[ \t]+([^\n]+)").unwrap());

// In-code fallback: `version = "1.2.0"` anywhere, keyword case-insensitive.
static RE_VERSION_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)version\s*=\s*["']([^"']+)["']"#).unwrap());

// Module-level tags that terminate an @example capture.
static RE_MODULE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(?:module|author|version|license)\b").unwrap());

// Comment block (-- or ---), optional blank lines, then a function
// declaration. The identifier may be dotted or colon-qualified.
static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:[ \t]*--[^\n]*\n)+)(?:[ \t]*\n)*[ \t]*((local\s+)?function\s+([\w.:]+)\s*\(([^)\n]*)\))")
        .unwrap()
});

// -- Block comments and inline tags -------------------------------------------

/// The body of the first `--[[ ... ]]` block comment, if any.
///
/// Later block comments are never consulted for module-level metadata.
pub fn block_comment(content: &str) -> Option<&str> {
    RE_BLOCK_COMMENT
        .captures(content)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// `@version` payload from a block-comment body.
pub fn version_tag(block: &str) -> Option<String> {
    tag_value(&RE_VERSION_TAG, block)
}

/// `@author` payload from a block-comment body.
pub fn author_tag(block: &str) -> Option<String> {
    tag_value(&RE_AUTHOR_TAG, block)
}

/// `@license` payload from a block-comment body.
pub fn license_tag(block: &str) -> Option<String> {
    tag_value(&RE_LICENSE_TAG, block)
}

fn tag_value(re: &Regex, block: &str) -> Option<String> {
    re.captures(block).map(|caps| caps[1].trim().to_string())
}

/// First quoted literal assigned to a `version` identifier in code.
pub fn version_assignment(content: &str) -> Option<String> {
    RE_VERSION_ASSIGN
        .captures(content)
        .map(|caps| caps[1].to_string())
}

// -- Module description -------------------------------------------------------

/// Candidate module description from a block-comment body.
///
/// The first non-empty, non-tag line is assumed to be a title and skipped;
/// subsequent non-empty lines are collected until the first tag line. A
/// block that opens directly with a tag yields an empty description.
pub fn block_description(block: &str) -> String {
    let mut collected = Vec::new();
    let mut in_description = false;

    for raw in block.lines() {
        let line = raw.trim();
        if !in_description {
            if !line.is_empty() && !line.starts_with('@') {
                // Title line
                in_description = true;
            }
            continue;
        }
        if line.starts_with('@') {
            break;
        }
        if !line.is_empty() {
            collected.push(line);
        }
    }

    collected.join(" ")
}

// -- Examples -----------------------------------------------------------------

/// `@example` blocks from a block-comment body, in order of appearance.
///
/// Each marker line starts a capture that runs until the next module-level
/// tag line or the end of the block. Captures are dedented by their minimum
/// common indentation and trimmed of surrounding blank lines; empty results
/// are dropped.
pub fn block_examples(block: &str) -> Vec<String> {
    let mut examples = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in block.lines() {
        if line.trim() == "@example" {
            if let Some(lines) = current.take() {
                push_example(&mut examples, &lines);
            }
            current = Some(Vec::new());
            continue;
        }
        if let Some(lines) = current.as_mut() {
            if RE_MODULE_TAG.is_match(line.trim()) {
                let lines = current.take().unwrap();
                push_example(&mut examples, &lines);
            } else {
                lines.push(line);
            }
        }
    }
    if let Some(lines) = current.take() {
        push_example(&mut examples, &lines);
    }

    examples
}

fn push_example(examples: &mut Vec<String>, lines: &[&str]) {
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .map(|l| if l.len() >= min_indent { &l[min_indent..] } else { *l })
        .collect();

    let text = dedented.join("\n").trim().to_string();
    if !text.is_empty() {
        examples.push(text);
    }
}

/// `---@usage` blocks from the raw file text, in order of appearance.
///
/// A `---@usage` line starts a block; following `---` line comments are
/// collected until a non-comment or tag line. The marker and at most one
/// space after it are stripped per line.
pub fn usage_examples(content: &str) -> Vec<String> {
    let mut examples = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        if !is_usage_marker(lines[i]) {
            i += 1;
            continue;
        }
        i += 1;

        let mut collected = Vec::new();
        while i < lines.len() && is_usage_continuation(lines[i]) {
            let text = strip_usage_line(lines[i]);
            if !text.is_empty() && !text.trim_start().starts_with('@') {
                collected.push(text);
            }
            i += 1;
        }
        if !collected.is_empty() {
            examples.push(collected.join("\n"));
        }
    }

    examples
}

fn is_usage_marker(line: &str) -> bool {
    line.strip_prefix("---@usage")
        .is_some_and(|rest| rest.trim().is_empty())
}

fn is_usage_continuation(line: &str) -> bool {
    match line.strip_prefix("---") {
        Some(rest) => !rest.is_empty() && !rest.starts_with('@'),
        None => false,
    }
}

fn strip_usage_line(line: &str) -> String {
    let rest = &line[3..];
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

// -- Function signatures ------------------------------------------------------

/// One matched documented function declaration.
#[derive(Debug)]
pub struct Signature {
    /// The contiguous comment block preceding the declaration, raw.
    pub doc_block: String,
    /// Whether the declaration carried the `local` keyword.
    pub is_local: bool,
    /// Identifier as written, possibly dotted or colon-qualified.
    pub name: String,
    /// Raw parameter-list text between the parentheses. The rendered
    /// signature uses `@param` names instead; kept for callers that want
    /// the declaration as written.
    #[allow(dead_code)]
    pub params: String,
    /// Byte offset of the declaration within the file.
    pub offset: usize,
}

/// All comment-block + function-declaration matches, in source order.
pub fn signatures(content: &str) -> Vec<Signature> {
    RE_FUNCTION
        .captures_iter(content)
        .map(|caps| Signature {
            doc_block: caps[1].to_string(),
            is_local: caps.get(3).is_some(),
            name: caps[4].to_string(),
            params: caps[5].to_string(),
            offset: caps.get(2).unwrap().start(),
        })
        .collect()
}

/// 1-based line number for a byte offset.
pub fn line_number(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_comment_only() {
        let content = "--[[\nFirst\n]]\ncode()\n--[[\nSecond\n]]\n";
        assert_eq!(block_comment(content), Some("\nFirst\n"));
    }

    #[test]
    fn no_block_comment_is_none() {
        assert_eq!(block_comment("-- just a line comment\n"), None);
    }

    #[test]
    fn tag_values_trimmed() {
        let block = "\nTitle\n@version  2.1.0 \n@author Twijn\n@license MIT\n";
        assert_eq!(version_tag(block).as_deref(), Some("2.1.0"));
        assert_eq!(author_tag(block).as_deref(), Some("Twijn"));
        assert_eq!(license_tag(block).as_deref(), Some("MIT"));
    }

    #[test]
    fn tag_requires_word_boundary() {
        assert_eq!(version_tag("@versions 2\n"), None);
        assert_eq!(author_tag("@authors many\n"), None);
        assert_eq!(license_tag("@licensed yes\n"), None);
    }

    #[test]
    fn version_assignment_case_insensitive() {
        assert_eq!(
            version_assignment("local m = {}\nm.VERSION = \"1.4.2\"\n").as_deref(),
            Some("1.4.2")
        );
        assert_eq!(
            version_assignment("version='0.9'\n").as_deref(),
            Some("0.9")
        );
        assert_eq!(version_assignment("local x = 1\n"), None);
    }

    #[test]
    fn description_skips_title_and_blanks() {
        let block = "Title line\n\nDoes the thing.\n@version 1.0\n";
        assert_eq!(block_description(block), "Does the thing.");
    }

    #[test]
    fn description_joins_lines_with_spaces() {
        let block = "Auth\nChecks cards\nagainst the registry.\n";
        assert_eq!(block_description(block), "Checks cards against the registry.");
    }

    #[test]
    fn description_empty_when_block_opens_with_tag() {
        let block = "@version 1.0\nNot a description\n";
        assert_eq!(block_description(block), "");
    }

    #[test]
    fn example_dedented_and_trimmed() {
        let block = "Title\n@example\n\n    local a = tac.get()\n      a:open()\n\n@version 1.0\n";
        let examples = block_examples(block);
        assert_eq!(examples, vec!["local a = tac.get()\n  a:open()"]);
    }

    #[test]
    fn example_stops_at_module_tag() {
        let block = "Title\n@example\nfirst()\n@author someone\nsecond()\n";
        let examples = block_examples(block);
        assert_eq!(examples, vec!["first()"]);
    }

    #[test]
    fn multiple_examples_in_order() {
        let block = "Title\n@example\none()\n@example\ntwo()\n";
        assert_eq!(block_examples(block), vec!["one()", "two()"]);
    }

    #[test]
    fn empty_example_dropped() {
        let block = "Title\n@example\n\n@version 1.0\n";
        assert!(block_examples(block).is_empty());
    }

    #[test]
    fn usage_block_collected() {
        let content = "---@usage\n--- local t = require(\"tac\")\n--- t.start()\nprint()\n";
        let examples = usage_examples(content);
        assert_eq!(examples, vec!["local t = require(\"tac\")\nt.start()"]);
    }

    #[test]
    fn usage_stops_at_tag_line() {
        let content = "---@usage\n--- run()\n---@param x string\n--- not captured\n";
        assert_eq!(usage_examples(content), vec!["run()"]);
    }

    #[test]
    fn usage_strips_one_space_only() {
        let content = "---@usage\n---  indented()\n";
        assert_eq!(usage_examples(content), vec![" indented()"]);
    }

    #[test]
    fn signature_basic_match() {
        let content = "-- Opens the door\nfunction door.open(side, delay)\nend\n";
        let sigs = signatures(content);
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].name, "door.open");
        assert_eq!(sigs[0].params, "side, delay");
        assert!(!sigs[0].is_local);
        assert_eq!(line_number(content, sigs[0].offset), 2);
    }

    #[test]
    fn signature_local_flag_and_colon_name() {
        let content = "--- Helper\nlocal function Door:toggle()\nend\n";
        let sigs = signatures(content);
        assert_eq!(sigs.len(), 1);
        assert!(sigs[0].is_local);
        assert_eq!(sigs[0].name, "Door:toggle");
    }

    #[test]
    fn signature_allows_blank_lines_before_definition() {
        let content = "-- Doc line\n\n\nfunction m.run()\nend\n";
        let sigs = signatures(content);
        assert_eq!(sigs.len(), 1);
        assert_eq!(line_number(content, sigs[0].offset), 4);
    }

    #[test]
    fn undocumented_function_not_matched() {
        let content = "function bare()\nend\n";
        assert!(signatures(content).is_empty());
    }

    #[test]
    fn doc_block_raw_text_preserved() {
        let content = "  -- First line\n  --- @param x string value\nfunction m.f(x)\nend\n";
        let sigs = signatures(content);
        assert_eq!(sigs[0].doc_block, "  -- First line\n  --- @param x string value\n");
    }
}
