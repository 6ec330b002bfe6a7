//! Core type definitions

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::location::Location;

/// A concrete header file
///
/// Identity is the canonical path: two references compare equal iff their
/// canonical paths are equal, so `a/../b.h` and `b.h` (or a symlink to it)
/// are the same header. The path the header was found by is kept alongside,
/// with symlinks unresolved, because relative includes inside the header are
/// looked up from that path's directory.
#[derive(Debug, Clone)]
pub struct HeaderRef {
    canonical: PathBuf,
    found: PathBuf,
}

impl HeaderRef {
    /// Canonicalize `path`, failing if it does not exist
    pub fn canonicalize(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            canonical: path.canonicalize()?,
            found: path.to_path_buf(),
        })
    }

    /// Canonical path of the header file
    pub fn path(&self) -> &Path {
        &self.canonical
    }

    /// Path the header was reached by
    pub fn found_path(&self) -> &Path {
        &self.found
    }

    /// Directory containing the header as found, used for relative includes
    pub fn directory(&self) -> &Path {
        self.found
            .parent()
            .or_else(|| self.canonical.parent())
            .unwrap_or_else(|| Path::new("/"))
    }
}

impl PartialEq for HeaderRef {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for HeaderRef {}

impl std::hash::Hash for HeaderRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl AsRef<Path> for HeaderRef {
    fn as_ref(&self) -> &Path {
        &self.canonical
    }
}

impl std::fmt::Display for HeaderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.found.display())
    }
}

/// What the inliner did with a directive line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    /// `#pragma once` dropped
    RemovedPragma,
    /// Include of an ignored header dropped
    RemovedIgnored,
    /// First include of a standard header kept verbatim
    KeptStandard,
    /// User header body inlined in place
    InlinedUser,
    /// Repeated include of a standard or user header dropped
    ElidedDuplicate,
}

impl TraceAction {
    /// Human-readable description used in trace lines
    pub fn describe(&self) -> &'static str {
        match self {
            TraceAction::RemovedPragma => "Removing unneeded #pragma once",
            TraceAction::RemovedIgnored => "Removing ignored #include:",
            TraceAction::KeptStandard => "Keeping STL #include:",
            TraceAction::InlinedUser => "Inlining #include:",
            TraceAction::ElidedDuplicate => "Eliding duplicate #include:",
        }
    }
}

/// One decision taken while scanning a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Line holding the directive
    pub location: Location,
    /// Decision taken
    pub action: TraceAction,
    /// Include target as written between the delimiters (none for pragmas)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TraceEvent {
    /// Create a trace event
    pub fn new(location: Location, action: TraceAction, target: Option<String>) -> Self {
        Self {
            location,
            action,
            target,
        }
    }
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.action.describe())?;
        if let Some(target) = &self.target {
            write!(f, " {}", target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_header_ref_equality_through_dotdot() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.h"), "int a;\n").unwrap();

        let direct = HeaderRef::canonicalize(&temp.path().join("a.h")).unwrap();
        let dotted = HeaderRef::canonicalize(&temp.path().join("sub/../a.h")).unwrap();
        assert_eq!(direct, dotted);
        assert_eq!(direct.directory(), temp.path());
        assert_eq!(direct.path(), temp.path().canonicalize().unwrap().join("a.h"));
    }

    #[cfg(unix)]
    #[test]
    fn test_header_ref_symlink_keeps_found_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::create_dir_all(temp.path().join("include")).unwrap();
        fs::write(temp.path().join("src/impl.h"), "int i;\n").unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("src/impl.h"),
            temp.path().join("include/lib.h"),
        )
        .unwrap();

        let link = HeaderRef::canonicalize(&temp.path().join("include/lib.h")).unwrap();
        let target = HeaderRef::canonicalize(&temp.path().join("src/impl.h")).unwrap();
        assert_eq!(link, target);
        assert_eq!(link.directory(), temp.path().join("include"));
        assert_eq!(target.directory(), temp.path().join("src"));
    }

    #[test]
    fn test_trace_event_display() {
        let event = TraceEvent::new(
            Location::new("main.h", 3),
            TraceAction::KeptStandard,
            Some("vector".to_string()),
        );
        assert_eq!(event.to_string(), "main.h:3: Keeping STL #include: vector");

        let pragma = TraceEvent::new(
            Location::new("main.h", 1),
            TraceAction::RemovedPragma,
            None,
        );
        assert_eq!(pragma.to_string(), "main.h:1: Removing unneeded #pragma once");
    }

    #[test]
    fn test_trace_event_json() {
        let event = TraceEvent::new(
            Location::new("a.h", 2),
            TraceAction::InlinedUser,
            Some("b.h".to_string()),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "inlined_user");
        assert_eq!(json["location"]["line"], 2);
        assert_eq!(json["target"], "b.h");
    }
}
