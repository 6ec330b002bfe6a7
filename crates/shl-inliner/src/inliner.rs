//! Include inliner
//!
//! One [`Inliner`] is one traversal session. It owns the visited sets and the
//! output buffer, walks the include graph depth-first in document order, and
//! is consumed by [`Inliner::process`].

use shl_core::{Error, HeaderRef, InlinerConfig, Location, Result, TraceAction, TraceEvent};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::directive::{classify, split_lines, Directive};
use crate::resolver::HeaderResolver;
use crate::stdlib::is_standard_header;

/// Result of a successful run
#[derive(Debug, Clone, Default)]
pub struct Amalgamation {
    /// Output lines in emission order, each with its original terminator
    pub lines: Vec<Vec<u8>>,
    /// One event per directive or pragma line processed
    pub trace: Vec<TraceEvent>,
    /// Headers whose bodies were inlined, root first
    pub headers: Vec<HeaderRef>,
}

impl Amalgamation {
    /// Concatenated output
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }

    /// Write the output to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in &self.lines {
            writer.write_all(line)?;
        }
        writer.flush()
    }

    /// Headers whose bodies were inlined, in inlining order
    pub fn inlined_headers(&self) -> &[HeaderRef] {
        &self.headers
    }
}

/// Callback invoked for each trace event as it is recorded
pub type TraceObserver = Box<dyn FnMut(&TraceEvent)>;

/// A single amalgamation session
pub struct Inliner {
    resolver: HeaderResolver,
    ignored_headers: HashSet<Vec<u8>>,
    visited_standard: HashSet<String>,
    visited_user: HashSet<HeaderRef>,
    observer: Option<TraceObserver>,
    output: Amalgamation,
}

impl Inliner {
    /// Create a session from an inliner configuration
    pub fn new(config: &InlinerConfig) -> Self {
        Self {
            resolver: HeaderResolver::with_search_paths(config.search_paths.iter().cloned()),
            ignored_headers: config
                .ignored_headers
                .iter()
                .map(|h| h.as_bytes().to_vec())
                .collect(),
            visited_standard: HashSet::new(),
            visited_user: HashSet::new(),
            observer: None,
            output: Amalgamation::default(),
        }
    }

    /// Report each decision to `observer` as soon as it is taken
    ///
    /// Events recorded before a failure are still delivered, which the
    /// collected trace in [`Amalgamation`] cannot offer.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&TraceEvent) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The resolver used by this session
    pub fn resolver(&self) -> &HeaderResolver {
        &self.resolver
    }

    /// Expand `root` into a single flat stream
    pub fn process(mut self, root: &Path) -> Result<Amalgamation> {
        let root = self.resolver.resolve_root(root)?;
        self.visit(root)?;
        Ok(self.output)
    }

    /// Inline one header. The header is recorded as visited before its
    /// lines are scanned so that an include cycle back to it is elided.
    fn visit(&mut self, header: HeaderRef) -> Result<()> {
        self.visited_user.insert(header.clone());
        self.output.headers.push(header.clone());

        let content = read_header(&header)?;

        for (index, line) in split_lines(&content).enumerate() {
            match classify(line) {
                Directive::Text => self.output.lines.push(line.to_vec()),
                Directive::PragmaOnce => {
                    self.record(&header, index, TraceAction::RemovedPragma, None);
                }
                Directive::Include(raw) => self.include(&header, index, line, raw)?,
            }
        }

        Ok(())
    }

    /// Classify one include. The ignore list is matched on the raw target
    /// bytes; the decoded form is only used for the standard set, which is
    /// all ASCII, and for messages.
    fn include(
        &mut self,
        header: &HeaderRef,
        index: usize,
        line: &[u8],
        raw: &[u8],
    ) -> Result<()> {
        let target = String::from_utf8_lossy(raw);

        if self.ignored_headers.contains(raw) {
            self.record(header, index, TraceAction::RemovedIgnored, Some(&*target));
            return Ok(());
        }

        let standard = std::str::from_utf8(raw).map_or(false, is_standard_header);
        if standard {
            if self.visited_standard.insert(target.to_string()) {
                self.record(header, index, TraceAction::KeptStandard, Some(&*target));
                self.output.lines.push(line.to_vec());
            } else {
                self.record(header, index, TraceAction::ElidedDuplicate, Some(&*target));
            }
            return Ok(());
        }

        let resolved = self
            .resolver
            .resolve(header.directory(), target_path(raw))
            .ok_or_else(|| {
                Error::not_found(&*target, Some(header.found_path().to_path_buf()))
            })?;

        if self.visited_user.contains(&resolved) {
            self.record(header, index, TraceAction::ElidedDuplicate, Some(&*target));
            return Ok(());
        }

        self.record(header, index, TraceAction::InlinedUser, Some(&*target));
        self.visit(resolved)
    }

    fn record(
        &mut self,
        header: &HeaderRef,
        index: usize,
        action: TraceAction,
        target: Option<&str>,
    ) {
        let event = TraceEvent::new(
            Location::new(header.found_path(), index + 1),
            action,
            target.map(str::to_string),
        );
        debug!("{}", event);
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
        self.output.trace.push(event);
    }
}

/// Read a whole header; the file handle is closed before scanning starts
fn read_header(header: &HeaderRef) -> Result<Vec<u8>> {
    std::fs::read(header.path()).map_err(|source| Error::IoRead {
        path: header.found_path().to_path_buf(),
        source,
    })
}

/// File-system form of an include target, kept byte-exact where the
/// platform allows it
#[cfg(unix)]
fn target_path(raw: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(raw))
}

#[cfg(not(unix))]
fn target_path(raw: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(raw).into_owned())
}

/// Amalgamate `root` with a fresh session
pub fn amalgamate(root: &Path, config: &InlinerConfig) -> Result<Amalgamation> {
    Inliner::new(config).process(root)
}
