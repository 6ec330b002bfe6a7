//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Inliner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlinerConfig {
    /// Directories consulted in order when an include is not found next to
    /// the including file
    pub search_paths: Vec<PathBuf>,

    /// Include targets, exactly as written in source, whose directives are
    /// dropped without resolution
    pub ignored_headers: Vec<String>,
}

impl InlinerConfig {
    /// Append search paths and ignored headers from `other` after our own
    pub fn extend(&mut self, other: InlinerConfig) {
        self.search_paths.extend(other.search_paths);
        self.ignored_headers.extend(other.ignored_headers);
    }
}

/// A complete amalgamation job, as loaded from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Root header to amalgamate
    #[serde(default)]
    pub main_header: Option<PathBuf>,

    /// Destination of the single-header output
    #[serde(default)]
    pub output_file: Option<PathBuf>,

    /// Inliner settings
    #[serde(flatten)]
    pub inliner: InlinerConfig,
}

impl BuildConfig {
    /// Load a build configuration from a JSON or YAML file
    ///
    /// Relative paths inside the file are taken relative to the file's
    /// own directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::IoRead {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mut config: BuildConfig = match ext.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        if let Some(p) = self.main_header.as_mut() {
            join(p);
        }
        if let Some(p) = self.output_file.as_mut() {
            join(p);
        }
        self.inliner.search_paths.iter_mut().for_each(join);
    }
}
