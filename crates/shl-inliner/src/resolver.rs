//! Header File Resolver
//!
//! Maps include targets to concrete header files: first next to the
//! including file, then through the configured search paths in order.

use shl_core::{Error, HeaderRef, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header file resolver
#[derive(Debug, Clone, Default)]
pub struct HeaderResolver {
    /// Include search paths, consulted in order
    search_paths: Vec<PathBuf>,
}

impl HeaderResolver {
    /// Create a resolver with no search paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from a list of search paths
    pub fn with_search_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut resolver = Self::new();
        for path in paths {
            resolver.add_search_path(path);
        }
        resolver
    }

    /// Add a search path. Duplicates keep their first position.
    pub fn add_search_path(&mut self, path: PathBuf) {
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    /// Get all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Search paths that are not existing directories
    ///
    /// These are never matched; callers may want to warn about them.
    pub fn missing_search_paths(&self) -> Vec<&Path> {
        self.search_paths
            .iter()
            .filter(|p| !p.is_dir())
            .map(PathBuf::as_path)
            .collect()
    }

    /// Resolve an include target
    ///
    /// Tries `including_dir/target`, then each search path joined with
    /// `target`. Only regular files match. The returned header remembers
    /// the joined path it was found by, so a symlinked header resolves its
    /// own relative includes from the link's directory.
    pub fn resolve<T: AsRef<Path>>(&self, including_dir: &Path, target: T) -> Option<HeaderRef> {
        let target = target.as_ref();
        let relative = including_dir.join(target);
        if let Some(header) = Self::existing(&relative) {
            debug!("Resolved {} relative to {:?}", target.display(), including_dir);
            return Some(header);
        }

        self.search(target)
    }

    /// Resolve the root header given on the command line
    ///
    /// The path is taken as given (relative to the current directory), then
    /// looked up through the search paths.
    pub fn resolve_root(&self, path: &Path) -> Result<HeaderRef> {
        if path.as_os_str().is_empty() {
            return Err(Error::not_found("", None));
        }

        if let Some(header) = Self::existing(path) {
            debug!("Resolved root header {:?}", path);
            return Ok(header);
        }

        self.search(path)
            .ok_or_else(|| Error::not_found(path.to_string_lossy(), None))
    }

    fn search(&self, target: &Path) -> Option<HeaderRef> {
        for search_path in &self.search_paths {
            let full_path = search_path.join(target);
            if let Some(header) = Self::existing(&full_path) {
                debug!("Resolved {} in {:?}", target.display(), search_path);
                return Some(header);
            }
        }

        debug!("Failed to resolve header: {}", target.display());
        None
    }

    fn existing(path: &Path) -> Option<HeaderRef> {
        if path.is_file() {
            HeaderRef::canonicalize(path).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("src/detail")).unwrap();
        fs::create_dir_all(root.join("p1/lib")).unwrap();
        fs::create_dir_all(root.join("p2/lib")).unwrap();

        fs::write(root.join("src/main.h"), "#include \"detail/a.h\"\n").unwrap();
        fs::write(root.join("src/detail/a.h"), "int a;\n").unwrap();
        fs::write(root.join("p1/lib/shared.h"), "// p1\n").unwrap();
        fs::write(root.join("p2/lib/shared.h"), "// p2\n").unwrap();
        fs::write(root.join("p2/only2.h"), "// p2 only\n").unwrap();

        temp
    }

    #[test]
    fn test_resolve_relative_first() {
        let temp = create_test_tree();
        let root = temp.path();
        fs::create_dir_all(root.join("src/lib")).unwrap();
        fs::write(root.join("src/lib/shared.h"), "// local lib\n").unwrap();

        let resolver = HeaderResolver::with_search_paths(vec![root.join("p1")]);
        let resolved = resolver.resolve(&root.join("src"), "lib/shared.h").unwrap();
        assert!(resolved.path().ends_with("src/lib/shared.h"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_keeps_symlink_location() {
        let temp = create_test_tree();
        let root = temp.path();
        std::os::unix::fs::symlink(root.join("src/detail/a.h"), root.join("p1/linked.h")).unwrap();

        let resolver = HeaderResolver::with_search_paths(vec![root.join("p1")]);
        let resolved = resolver.resolve(&root.join("src"), "linked.h").unwrap();
        assert!(resolved.path().ends_with("src/detail/a.h"));
        assert_eq!(resolved.found_path(), root.join("p1/linked.h"));
        assert_eq!(resolved.directory(), root.join("p1"));
    }

    #[test]
    fn test_search_path_order() {
        let temp = create_test_tree();
        let root = temp.path();

        let resolver = HeaderResolver::with_search_paths(vec![root.join("p1"), root.join("p2")]);
        let resolved = resolver.resolve(&root.join("src"), "lib/shared.h").unwrap();
        assert!(resolved.path().ends_with("p1/lib/shared.h"));

        let reversed = HeaderResolver::with_search_paths(vec![root.join("p2"), root.join("p1")]);
        let resolved = reversed.resolve(&root.join("src"), "lib/shared.h").unwrap();
        assert!(resolved.path().ends_with("p2/lib/shared.h"));
    }

    #[test]
    fn test_directories_do_not_match() {
        let temp = create_test_tree();
        let root = temp.path();

        let resolver = HeaderResolver::with_search_paths(vec![root.to_path_buf()]);
        assert!(resolver.resolve(&root.join("src"), "detail").is_none());
        assert!(resolver.resolve(&root.join("src"), "p2").is_none());
    }

    #[test]
    fn test_unresolved() {
        let temp = create_test_tree();
        let resolver = HeaderResolver::with_search_paths(vec![temp.path().join("missing")]);
        assert!(resolver.resolve(&temp.path().join("src"), "nope.h").is_none());
    }

    #[test]
    fn test_resolve_canonicalizes() {
        let temp = create_test_tree();
        let root = temp.path();
        let resolver = HeaderResolver::new();

        let a = resolver.resolve(&root.join("src"), "detail/a.h").unwrap();
        let b = resolver
            .resolve(&root.join("src/detail"), "../detail/a.h")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_root() {
        let temp = create_test_tree();
        let root = temp.path();
        let resolver = HeaderResolver::with_search_paths(vec![root.join("p2")]);

        let direct = resolver.resolve_root(&root.join("src/main.h")).unwrap();
        assert!(direct.path().ends_with("src/main.h"));

        let via_search = resolver.resolve_root(Path::new("only2.h")).unwrap();
        assert!(via_search.path().ends_with("p2/only2.h"));

        let err = resolver.resolve_root(Path::new("")).unwrap_err();
        assert!(matches!(err, Error::HeaderNotFound { .. }));

        let err = resolver.resolve_root(Path::new("absent.h")).unwrap_err();
        assert!(matches!(err, Error::HeaderNotFound { ref target, .. } if target == "absent.h"));
    }

    #[test]
    fn test_duplicate_and_missing_search_paths() {
        let temp = create_test_tree();
        let root = temp.path();

        let resolver = HeaderResolver::with_search_paths(vec![
            root.join("p1"),
            root.join("nowhere"),
            root.join("p1"),
        ]);
        assert_eq!(resolver.search_paths().len(), 2);
        assert_eq!(resolver.missing_search_paths(), vec![root.join("nowhere").as_path()]);
    }
}
