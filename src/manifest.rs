//! Version-discovery manifests consumed by the installer and updater.
//!
//! Builders are pure functions over the parsed module list; the
//! command-directory reconciliation input comes from the orchestrator so
//! no file system access happens here.

use crate::model::Module;
use crate::project;
use serde::Serialize;
use std::collections::BTreeMap;

/// One downloadable module version.
#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    pub version: String,
    pub path: String,
    pub download_url: String,
}

/// Categorized version map for the whole project.
#[derive(Debug, Serialize)]
pub struct ProjectVersions {
    pub version: String,
    pub init: VersionEntry,
    pub core: BTreeMap<String, VersionEntry>,
    pub lib: BTreeMap<String, VersionEntry>,
    pub commands: BTreeMap<String, VersionEntry>,
    pub extensions: BTreeMap<String, VersionEntry>,
}

/// Top-level shape of `api/versions.json`.
#[derive(Debug, Serialize)]
pub struct VersionsManifest {
    pub tac: ProjectVersions,
}

/// Shape of `api/latest.json`.
#[derive(Debug, Serialize)]
pub struct Latest {
    pub version: String,
    pub updated_at: String,
}

/// One submodule row in an extension manifest.
#[derive(Debug, Serialize)]
pub struct Submodule {
    pub name: String,
    pub path: String,
    pub version: Option<String>,
    pub download_url: String,
}

/// Shape of `api/<short-name>.json` for a top-level extension.
#[derive(Debug, Serialize)]
pub struct ExtensionManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: Option<String>,
    pub main_file: String,
    pub download_url: String,
    /// Ordered children, or null when the extension has none.
    pub submodules: Option<Vec<Submodule>>,
}

/// Build the categorized versions manifest.
///
/// `command_files` lists the `*.lua` file names found directly in the
/// commands directory on disk; any of them missing from the parsed module
/// list gets a placeholder entry so the installer can still resolve it.
pub fn build_versions(modules: &[Module], command_files: &[String]) -> VersionsManifest {
    let init_version = init_version(modules);

    let mut core = BTreeMap::new();
    let mut lib = BTreeMap::new();
    let mut commands = BTreeMap::new();
    let mut extensions = BTreeMap::new();

    for module in modules {
        if module.path.starts_with(project::CORE_PREFIX) {
            core.insert(short_name(module, project::CORE_PREFIX), entry(module));
        } else if module.path.starts_with(project::LIB_PREFIX) {
            lib.insert(short_name(module, project::LIB_PREFIX), entry(module));
        } else if module.path.starts_with(project::COMMANDS_PREFIX) {
            commands.insert(short_name(module, project::COMMANDS_PREFIX), entry(module));
        } else if project::is_extension_root(&module.path) {
            extensions.insert(short_name(module, project::EXTENSIONS_PREFIX), entry(module));
        }
    }

    // Reconciliation safety net: commands present on disk but dropped by
    // the parser still need to be installable.
    for file in command_files {
        let stem = file.strip_suffix(".lua").unwrap_or(file);
        if !commands.contains_key(stem) {
            let path = format!("{}{}", project::COMMANDS_PREFIX, file);
            commands.insert(
                stem.to_string(),
                VersionEntry {
                    version: "0.0.0".to_string(),
                    download_url: project::download_url(&path),
                    path,
                },
            );
        }
    }

    VersionsManifest {
        tac: ProjectVersions {
            version: init_version.clone(),
            init: VersionEntry {
                version: init_version,
                path: project::INIT_PATH.to_string(),
                download_url: project::download_url(project::INIT_PATH),
            },
            core,
            lib,
            commands,
            extensions,
        },
    }
}

/// Build the `latest.json` record.
pub fn build_latest(modules: &[Module], updated_at: String) -> Latest {
    Latest {
        version: init_version(modules),
        updated_at,
    }
}

/// Build one manifest per top-level extension, with its ordered children.
pub fn extension_manifests(modules: &[Module]) -> Vec<ExtensionManifest> {
    modules
        .iter()
        .filter(|m| project::is_extension_root(&m.path))
        .map(|module| {
            let child_prefix = format!(
                "{}/",
                module.path.strip_suffix(".lua").unwrap_or(&module.path)
            );
            let submodules: Vec<Submodule> = modules
                .iter()
                .filter(|s| s.path.starts_with(&child_prefix))
                .map(|s| Submodule {
                    name: s.name.rsplit('.').next().unwrap_or(&s.name).to_string(),
                    path: s.path.clone(),
                    version: s.version.clone(),
                    download_url: project::download_url(&s.path),
                })
                .collect();

            ExtensionManifest {
                name: short_name(module, project::EXTENSIONS_PREFIX),
                version: module.version_or_default().to_string(),
                description: module.description.clone(),
                author: module.author.clone(),
                main_file: module.path.clone(),
                download_url: project::download_url(&module.path),
                submodules: if submodules.is_empty() {
                    None
                } else {
                    Some(submodules)
                },
            }
        })
        .collect()
}

/// Version of the top-level system module, by exact logical name.
fn init_version(modules: &[Module]) -> String {
    modules
        .iter()
        .find(|m| m.name == project::INIT_MODULE)
        .and_then(|m| m.version.clone())
        .unwrap_or_else(|| "0.0.0".to_string())
}

fn entry(module: &Module) -> VersionEntry {
    VersionEntry {
        version: module.version_or_default().to_string(),
        path: module.path.clone(),
        download_url: project::download_url(&module.path),
    }
}

/// Short name within a category: the dotted category prefix stripped from
/// the logical name.
fn short_name(module: &Module, path_prefix: &str) -> String {
    let dotted = path_prefix.replace('/', ".");
    module
        .name
        .strip_prefix(&dotted)
        .unwrap_or(&module.name)
        .to_string()
}
