//! Extractor reading a JSON adjacency document and an optional SVG diagram.
//!
//! The adjacency document maps each module to the modules it imports:
//!
//! ```json
//! { "src/app.js": ["src/util.js"], "src/util.js": [] }
//! ```
//!
//! Document key order is preserved.

use crate::core::{DependencyTree, ModuleMap};
use crate::errors::{AuditError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use super::{DependencyExtractor, ExtractedDependencies};

#[derive(Debug, Clone)]
pub struct FileExtractor {
    tree_path: PathBuf,
    diagram_path: Option<PathBuf>,
    exclude: Vec<glob::Pattern>,
}

/// Normalize a module identifier to a forward-slash, project-relative path.
pub fn normalize_module_id(raw: &str) -> String {
    let mut id = raw.trim().replace('\\', "/");
    while let Some(rest) = id.strip_prefix("./") {
        id = rest.to_string();
    }
    id
}

impl FileExtractor {
    pub fn new(tree_path: impl Into<PathBuf>) -> Self {
        Self {
            tree_path: tree_path.into(),
            diagram_path: None,
            exclude: Vec::new(),
        }
    }

    pub fn with_diagram(mut self, diagram_path: impl Into<PathBuf>) -> Self {
        self.diagram_path = Some(diagram_path.into());
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<glob::Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    fn is_excluded(&self, module: &str) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches(module))
    }

    fn read_tree(&self) -> Result<DependencyTree> {
        let bytes = fs::read(&self.tree_path).map_err(|e| AuditError::io_at(e, &self.tree_path))?;
        let raw: ModuleMap<Vec<String>> = serde_json::from_slice(&bytes).map_err(|e| {
            AuditError::extraction(format!(
                "{} is not a module adjacency document: {}",
                self.tree_path.display(),
                e
            ))
        })?;
        Ok(self.clean_tree(raw))
    }

    /// Normalize ids, merge keys that normalize to the same id, drop
    /// duplicate and excluded entries.
    fn clean_tree(&self, raw: ModuleMap<Vec<String>>) -> DependencyTree {
        let mut tree = DependencyTree::with_capacity(raw.len());
        for (module, deps) in raw {
            let module = normalize_module_id(&module);
            if module.is_empty() || self.is_excluded(&module) {
                continue;
            }
            let normalized = deps
                .iter()
                .map(|dep| normalize_module_id(dep))
                .filter(|dep| !dep.is_empty() && !self.is_excluded(dep));
            match tree.get_mut(&module) {
                Some(existing) => existing.extend(normalized),
                None => {
                    tree.insert(module, normalized.collect());
                }
            }
        }

        tree.map_values(|_, deps| {
            let mut seen = HashSet::new();
            deps.into_iter()
                .filter(|dep| seen.insert(dep.clone()))
                .collect()
        })
    }

    fn read_diagram(&self, warnings: &mut Vec<String>) -> Option<Vec<u8>> {
        let path = self.diagram_path.as_ref()?;
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warnings.push(format!("Could not read diagram {}: {}", path.display(), e));
                None
            }
        }
    }
}

/// One warning per dependency that is not itself a listed module.
fn skipped_module_warnings(tree: &DependencyTree) -> Vec<String> {
    let mut reported = HashSet::new();
    tree.iter()
        .flat_map(|(module, deps)| deps.iter().map(move |dep| (module, dep)))
        .filter(|(_, dep)| !tree.contains_key(dep))
        .filter(|(_, dep)| reported.insert(dep.as_str()))
        .map(|(module, dep)| format!("Skipped {dep} (imported by {module}, not in analyzed set)"))
        .collect()
}

impl DependencyExtractor for FileExtractor {
    fn extract(&self) -> Result<ExtractedDependencies> {
        let tree = self.read_tree()?;
        tracing::debug!(
            modules = tree.len(),
            path = %self.tree_path.display(),
            "read dependency tree"
        );

        let mut warnings = skipped_module_warnings(&tree);
        let diagram = self.read_diagram(&mut warnings);

        let mut extracted = ExtractedDependencies::from_tree(tree).with_warnings(warnings);
        extracted.diagram = diagram;
        Ok(extracted)
    }
}
