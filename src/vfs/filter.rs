//! Rule-filtered view over another filesystem

use crate::rules::RuleChain;
use crate::vfs::path;
use crate::vfs::{not_found, FileSystem, Metadata, VfsFile};
use std::io;

/// Decorator exposing only the entries no rule skips.
///
/// A skipped directory hides its whole subtree: it is left out of its
/// parent's listing, and opening, stating or listing it or any descendant
/// fails with `NotFound`. The root itself is always visible.
pub struct Filtered<F> {
    inner: F,
    rules: RuleChain,
}

impl<F: FileSystem> Filtered<F> {
    pub fn new(inner: F, rules: RuleChain) -> Self {
        Self { inner, rules }
    }

    pub fn rules(&self) -> &RuleChain {
        &self.rules
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Name of the rule hiding `path`, checking every ancestor outermost first.
    pub fn hidden_by(&self, virtual_path: &str) -> io::Result<Option<&'static str>> {
        let cleaned = path::clean(virtual_path);
        for ancestor in path::ancestors(&cleaned) {
            let metadata = self.inner.stat(ancestor)?;
            if let Some(rule) = self.rules.explain(ancestor, &metadata) {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    fn ensure_visible(&self, virtual_path: &str) -> io::Result<()> {
        match self.hidden_by(virtual_path)? {
            Some(_) => Err(not_found(&path::clean(virtual_path))),
            None => Ok(()),
        }
    }
}

impl<F: FileSystem> FileSystem for Filtered<F> {
    fn open(&self, virtual_path: &str) -> io::Result<Box<dyn VfsFile>> {
        self.ensure_visible(virtual_path)?;
        self.inner.open(virtual_path)
    }

    fn stat(&self, virtual_path: &str) -> io::Result<Metadata> {
        self.ensure_visible(virtual_path)?;
        self.inner.stat(virtual_path)
    }

    fn read_dir(&self, virtual_path: &str) -> io::Result<Vec<Metadata>> {
        self.ensure_visible(virtual_path)?;
        let dir = path::clean(virtual_path);
        let children = self.inner.read_dir(&dir)?;
        Ok(children
            .into_iter()
            .filter(|child| !self.rules.should_skip(&path::join(&dir, &child.name), child))
            .collect())
    }
}
