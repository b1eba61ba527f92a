//! Per-module HTML page: standalone document with embedded styles and
//! Prism highlighting for Lua samples.

use crate::model::{Function, Module};
use crate::project;
use crate::render::escape_angle;

const STYLE: &str = r#"        :root {
            --bg: #ffffff;
            --text: #1a1a1a;
            --link: #0066cc;
            --border: #e0e0e0;
            --code-bg: #f5f5f5;
        }
        @media (prefers-color-scheme: dark) {
            :root {
                --bg: #1a1a1a;
                --text: #e0e0e0;
                --link: #4d9fff;
                --border: #333333;
                --code-bg: #2a2a2a;
            }
        }
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: var(--text);
            background: var(--bg);
            padding: 2rem;
            max-width: 1200px;
            margin: 0 auto;
        }
        .header {
            border-bottom: 2px solid var(--border);
            padding-bottom: 1.5rem;
            margin-bottom: 2rem;
        }
        .header h1 {
            margin-bottom: 1rem;
            font-size: 2.5rem;
        }
        .header p {
            font-size: 1.1rem;
            line-height: 1.8;
            opacity: 0.9;
        }
        .metadata {
            font-size: 0.9rem;
            opacity: 0.8;
            margin-top: 0.5rem;
        }
        h2 {
            margin-top: 3rem;
            margin-bottom: 1.5rem;
            padding-bottom: 0.5rem;
            border-bottom: 1px solid var(--border);
            font-size: 1.8rem;
        }
        h3 {
            margin-top: 1.5rem;
            margin-bottom: 0.75rem;
            font-size: 1.3rem;
        }
        code {
            background: var(--code-bg);
            padding: 0.2rem 0.4rem;
            border-radius: 3px;
            font-family: 'Monaco', 'Courier New', monospace;
            font-size: 0.9em;
        }
        pre {
            padding: 1rem;
            border-radius: 4px;
            overflow-x: auto;
            margin: 1rem 0;
            border: 1px solid var(--border);
        }
        pre code {
            background: none;
            padding: 0;
            font-size: 0.95em;
        }
        .function:not(.token) {
            margin: 2rem 0;
            padding: 1.5rem;
            border: 1px solid var(--border);
            border-radius: 6px;
        }
        .function h3 {
            margin-top: 0;
        }
        .function > p {
            margin: 1rem 0;
            line-height: 1.7;
        }
        .params, .returns {
            margin-top: 1rem;
        }
        .params ul, .returns ul {
            list-style: none;
            padding-left: 0;
        }
        .params li, .returns li {
            padding: 0.5rem 0;
            padding-left: 1rem;
            border-left: 3px solid var(--border);
            margin: 0.25rem 0;
        }
        a {
            color: var(--link);
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        .back-link {
            margin-bottom: 1.5rem;
            font-size: 0.95rem;
        }
        .version-badge {
            display: inline-block;
            background: #2a3540;
            color: #8b949e;
            padding: 0.2rem 0.5rem;
            border-radius: 3px;
            font-size: 0.75em;
            font-weight: 500;
            margin-left: 1rem;
            vertical-align: middle;
        }
        .github-link {
            display: inline-block;
            padding: 0.5rem 1rem;
            background: var(--link);
            color: white;
            border: 1px solid var(--link);
            border-radius: 4px;
            text-decoration: none;
            font-size: 0.9em;
            transition: all 0.2s;
            margin-top: 1rem;
        }
        .github-link:hover {
            opacity: 0.85;
            text-decoration: none;
        }
"#;

/// Render a module's documentation page.
pub fn module_page(module: &Module) -> String {
    let github_url = project::blob_url(&module.path);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!(
        "    <title>{} - TAC Documentation</title>\n",
        module.name
    ));
    out.push_str("    <link href=\"https://cdnjs.cloudflare.com/ajax/libs/prism/1.29.0/themes/prism-tomorrow.min.css\" rel=\"stylesheet\" />\n");
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n");
    out.push_str("    <div class=\"back-link\"><a href=\"index.html\">← Back to index</a></div>\n");
    out.push_str("    <div class=\"header\">\n");
    out.push_str(&format!(
        "        <h1>{}{}</h1>\n",
        module.name,
        version_badge(module)
    ));
    out.push_str(&format!(
        "        <p>{}</p>\n",
        escape_angle(&module.description)
    ));
    out.push_str(&metadata_line(module));
    out.push_str(&format!(
        "        <a href=\"{}\" class=\"github-link\" target=\"_blank\">View on GitHub →</a>\n    </div>\n",
        github_url
    ));

    if !module.examples.is_empty() {
        out.push_str("    <h2>Examples</h2>\n");
        for example in &module.examples {
            out.push_str(&format!(
                "    <pre><code class='language-lua'>{}</code></pre>\n",
                escape_angle(example)
            ));
        }
    }

    if !module.functions.is_empty() {
        out.push_str("    <h2>Functions</h2>\n");
        for func in &module.functions {
            out.push_str(&render_function(func, &github_url));
        }
    }

    out.push_str("</body>\n");
    out.push_str("<script src=\"https://cdnjs.cloudflare.com/ajax/libs/prism/1.29.0/prism.min.js\"></script>\n");
    out.push_str("<script src=\"https://cdnjs.cloudflare.com/ajax/libs/prism/1.29.0/components/prism-lua.min.js\"></script>\n");
    out.push_str("</html>\n");
    out
}

fn version_badge(module: &Module) -> String {
    match &module.version {
        Some(version) => format!(" <span class=\"version-badge\">v{}</span>", version),
        None => String::new(),
    }
}

fn metadata_line(module: &Module) -> String {
    if module.author.is_none() && module.license.is_none() {
        return String::new();
    }
    let mut out = String::from("        <div class='metadata'>");
    if let Some(ref author) = module.author {
        out.push_str(&format!(" Author: {}", author));
    }
    if let Some(ref license) = module.license {
        out.push_str(&format!(" • License: {}", license));
    }
    out.push_str("</div>\n");
    out
}

fn render_function(func: &Function, github_url: &str) -> String {
    let mut out = String::new();
    out.push_str("    <div class='function'>\n");

    let params: Vec<&str> = func.params.iter().map(|p| p.name.as_str()).collect();
    out.push_str(&format!(
        "        <h3><code>{}({})</code></h3>\n",
        func.name,
        params.join(", ")
    ));
    out.push_str(&format!(
        "        <a href='{}#L{}' target='_blank' style='font-size: 0.85em; opacity: 0.7;'>View source</a>\n",
        github_url, func.line
    ));

    if !func.description.is_empty() {
        out.push_str(&format!("        <p>{}</p>\n", func.description));
    }

    if !func.params.is_empty() {
        out.push_str("        <div class='params'>\n");
        out.push_str("            <strong>Parameters:</strong>\n");
        out.push_str("            <ul>\n");
        for param in &func.params {
            out.push_str(&format!(
                "                <li><code>{}</code> ({})",
                param.name, param.ty
            ));
            if !param.description.is_empty() {
                out.push_str(&format!(": {}", param.description));
            }
            out.push_str("</li>\n");
        }
        out.push_str("            </ul>\n");
        out.push_str("        </div>\n");
    }

    if !func.returns.is_empty() {
        out.push_str(&format!(
            "        <div class='returns'><strong>Returns:</strong> {}</div>\n",
            func.returns
        ));
    }

    out.push_str("    </div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Param;

    fn sample_module() -> Module {
        Module {
            name: "tac.core.auth".into(),
            path: "tac/core/auth.lua".into(),
            description: "Card <auth> checks.".into(),
            version: Some("2.0.0".into()),
            author: Some("Twijn".into()),
            license: Some("MIT".into()),
            examples: vec!["local ok = auth.check(card)".into()],
            functions: vec![Function {
                name: "auth.check".into(),
                params: vec![Param {
                    name: "card".into(),
                    ty: "table".into(),
                    description: "card data".into(),
                }],
                returns: "boolean allowed".into(),
                description: "Validate a card.".into(),
                line: 12,
            }],
        }
    }

    #[test]
    fn page_has_sections_and_deep_link() {
        let page = module_page(&sample_module());
        assert!(page.contains("<h2>Examples</h2>"));
        assert!(page.contains("<h2>Functions</h2>"));
        assert!(page.contains("auth.check(card)"));
        assert!(page.contains("tac/core/auth.lua#L12"));
        assert!(page.contains("<span class=\"version-badge\">v2.0.0</span>"));
        assert!(page.contains("Author: Twijn"));
        assert!(page.contains("License: MIT"));
    }

    #[test]
    fn empty_module_has_no_section_headers() {
        let module = Module {
            name: "tac.lib.util".into(),
            path: "tac/lib/util.lua".into(),
            description: "Helpers.".into(),
            ..Default::default()
        };
        let page = module_page(&module);
        assert!(!page.contains("<h2>Examples</h2>"));
        assert!(!page.contains("<h2>Functions</h2>"));
        assert!(!page.contains("version-badge"));
        assert!(!page.contains("class='metadata'"));
    }

    #[test]
    fn description_and_examples_escape_angle_brackets() {
        let page = module_page(&sample_module());
        assert!(page.contains("Card &lt;auth&gt; checks."));
    }

    #[test]
    fn function_without_returns_omits_returns_block() {
        let mut module = sample_module();
        module.functions[0].returns.clear();
        let page = module_page(&module);
        assert!(!page.contains("Returns:"));
    }
}
