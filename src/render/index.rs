//! Index page: all modules grouped into categories, with the extension
//! hierarchy rendered as parent entries and nested children.

use crate::model::Module;
use crate::project;
use crate::render::truncate;
use std::collections::BTreeMap;

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
        h1 {
            margin-bottom: 1rem;
            padding-bottom: 0.5rem;
            border-bottom: 2px solid var(--border);
        }
        h2 {
            margin-top: 2rem;
            margin-bottom: 1rem;
        }
        .module {
            padding: 1rem;
            margin: 0.5rem 0;
            border: 1px solid var(--border);
            border-radius: 4px;
        }
        .module h3 {
            margin: 0 0 0.5rem 0;
        }
        .module p {
            opacity: 0.8;
        }
        a {
            color: var(--link);
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        .version-badge {
            display: inline-block;
            background: #2a3540;
            color: #8b949e;
            padding: 0.15rem 0.4rem;
            border-radius: 3px;
            font-size: 0.7em;
            font-weight: 500;
            margin-left: 0.5rem;
            vertical-align: middle;
        }
        .install-box {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            border-radius: 8px;
            padding: 2rem;
            margin: 2rem 0;
            color: white;
        }
        .install-box h2 {
            margin-top: 0;
            color: white;
            border: none;
        }
        .install-box p {
            opacity: 0.95;
            margin-bottom: 1rem;
        }
        .install-command {
            position: relative;
            background: rgba(0, 0, 0, 0.3);
            border: 1px solid rgba(255, 255, 255, 0.2);
            border-radius: 6px;
            padding: 1rem 1.5rem;
            font-family: 'Monaco', 'Courier New', monospace;
            font-size: 1rem;
            margin: 1rem 0;
            display: flex;
            align-items: center;
            justify-content: space-between;
            gap: 1rem;
            flex-wrap: wrap;
        }
        .install-command code {
            background: none;
            color: #fff;
            padding: 0;
            font-size: 1em;
            word-break: break-all;
            flex: 1;
            min-width: 0;
        }
        .copy-button {
            background: rgba(255, 255, 255, 0.2);
            border: 1px solid rgba(255, 255, 255, 0.3);
            color: white;
            padding: 0.5rem 1rem;
            border-radius: 4px;
            cursor: pointer;
            font-size: 0.9rem;
            font-weight: 500;
            transition: all 0.2s;
            white-space: nowrap;
            flex-shrink: 0;
        }
        .copy-button:hover {
            background: rgba(255, 255, 255, 0.3);
            transform: translateY(-1px);
        }
        .copy-button.copied {
            background: rgba(76, 175, 80, 0.8);
            border-color: rgba(76, 175, 80, 1);
        }
"#;

/// Render the documentation index for all retained modules.
pub fn index_page(modules: &[Module]) -> String {
    let groups = categorize(modules);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("    <title>TAC Documentation</title>\n");
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n");
    out.push_str("    <h1>TAC Documentation</h1>\n");
    out.push_str("    <p>Terminal Access Control (TAC) is a comprehensive access control system for ComputerCraft that provides card-based authentication, extensible modules, and integration with external services.</p>\n");
    out.push_str(&install_box());

    let sections: [(&str, &[&Module]); 4] = [
        ("Core Modules", &groups.core),
        ("Library Modules", &groups.lib),
        ("Command Modules", &groups.commands),
        ("Other Modules", &groups.other),
    ];
    for (title, mods) in sections {
        if mods.is_empty() {
            continue;
        }
        out.push_str(&format!("    <h2>{}</h2>\n", title));
        for module in mods {
            out.push_str(&module_entry(module));
        }
    }

    if !groups.extensions.is_empty() {
        out.push_str("    <h2>Extension Modules</h2>\n");
        for entry in &groups.extensions {
            out.push_str(&extension_entry(entry));
        }
    }

    out.push_str("</body>\n");
    out.push_str(&copy_script());
    out.push_str("</html>\n");
    out
}

struct Groups<'a> {
    core: Vec<&'a Module>,
    lib: Vec<&'a Module>,
    commands: Vec<&'a Module>,
    other: Vec<&'a Module>,
    extensions: Vec<ExtensionEntry<'a>>,
}

struct ExtensionEntry<'a> {
    module: &'a Module,
    children: Vec<&'a Module>,
}

/// First-match categorization; no module lands in two categories.
///
/// Extensions one segment below the root are parents, two segments are
/// children keyed by the shared first segment; anything deeper falls into
/// the catch-all. Children whose parent module was dropped are not listed.
fn categorize(modules: &[Module]) -> Groups<'_> {
    let mut groups = Groups {
        core: Vec::new(),
        lib: Vec::new(),
        commands: Vec::new(),
        other: Vec::new(),
        extensions: Vec::new(),
    };
    let mut parents: Vec<&Module> = Vec::new();
    let mut children: BTreeMap<&str, Vec<&Module>> = BTreeMap::new();

    for module in modules {
        if module.path.starts_with(project::CORE_PREFIX) {
            groups.core.push(module);
        } else if module.path.starts_with(project::LIB_PREFIX) {
            groups.lib.push(module);
        } else if module.path.starts_with(project::COMMANDS_PREFIX) {
            groups.commands.push(module);
        } else if let Some(segments) = project::extension_segments(&module.path) {
            match segments.len() {
                1 => parents.push(module),
                2 => children.entry(segments[0]).or_default().push(module),
                _ => groups.other.push(module),
            }
        } else {
            groups.other.push(module);
        }
    }

    parents.sort_by(|a, b| a.name.cmp(&b.name));
    groups.extensions = parents
        .into_iter()
        .map(|parent| {
            let stem = parent
                .path
                .rsplit('/')
                .next()
                .and_then(|f| f.strip_suffix(".lua"))
                .unwrap_or_default();
            let mut kids = children.remove(stem).unwrap_or_default();
            kids.sort_by(|a, b| a.name.cmp(&b.name));
            ExtensionEntry {
                module: parent,
                children: kids,
            }
        })
        .collect();

    groups
}

fn module_entry(module: &Module) -> String {
    format!(
        "    <div class=\"module\">\n        <h3><a href=\"{}\">{}</a>{}</h3>\n        <p>{}</p>\n    </div>\n",
        module.page_name(),
        module.name,
        version_badge(module),
        truncate(&module.description, 200)
    )
}

fn extension_entry(entry: &ExtensionEntry<'_>) -> String {
    let module = entry.module;
    let mut out = format!(
        "    <div class=\"module\">\n        <h3><a href=\"{}\">{}</a>{}</h3>\n        <p>{}</p>\n",
        module.page_name(),
        module.name,
        version_badge(module),
        truncate(&module.description, 200)
    );

    if !entry.children.is_empty() {
        out.push_str("        <div style=\"margin-left: 2rem; margin-top: 0.75rem; border-left: 2px solid var(--border); padding-left: 1rem;\">\n");
        for child in &entry.children {
            let short = child.name.rsplit('.').next().unwrap_or(&child.name);
            out.push_str(&format!(
                "            <div style=\"margin: 0.5rem 0;\">\n                <strong><a href=\"{}\">{}</a></strong>\n                <span style=\"opacity: 0.7; font-size: 0.9em;\"> - {}</span>\n            </div>\n",
                child.page_name(),
                short,
                truncate(&child.description, 150)
            ));
        }
        out.push_str("        </div>\n");
    }

    out.push_str("    </div>\n");
    out
}

fn version_badge(module: &Module) -> String {
    match &module.version {
        Some(version) => format!("<span class=\"version-badge\">v{}</span>", version),
        None => String::new(),
    }
}

fn install_box() -> String {
    format!(
        concat!(
            "    <div class=\"install-box\">\n",
            "        <h2>Quick Install</h2>\n",
            "        <p>Get started with TAC in seconds! Run this command in ComputerCraft:</p>\n",
            "        <div class=\"install-command\">\n",
            "            <code>wget run {}</code>\n",
            "            <button class=\"copy-button\" onclick=\"copyInstallCommand(this)\">Copy</button>\n",
            "        </div>\n",
            "        <p style=\"font-size: 0.9rem; opacity: 0.8; margin-top: 0.5rem;\">This will download and run the TAC installer, which will guide you through the setup process.</p>\n",
            "    </div>\n"
        ),
        project::INSTALLER_URL
    )
}

fn copy_script() -> String {
    format!(
        concat!(
            "<script>\n",
            "function copyInstallCommand(button) {{\n",
            "    const command = 'wget run {}';\n",
            "    navigator.clipboard.writeText(command).then(() => {{\n",
            "        const originalText = button.textContent;\n",
            "        button.textContent = 'Copied!';\n",
            "        button.classList.add('copied');\n",
            "        setTimeout(() => {{\n",
            "            button.textContent = originalText;\n",
            "            button.classList.remove('copied');\n",
            "        }}, 2000);\n",
            "    }});\n",
            "}}\n",
            "</script>\n"
        ),
        project::INSTALLER_URL
    )
}
