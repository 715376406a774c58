use std::path::{Path, PathBuf};

use crate::manager::{FileManager, Result};
use crate::playground::Buildable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Symbolic,
    Hard,
}

/// A link named `name` pointing at `target`.
///
/// Both are resolved against the directory the link is built in, so the
/// target usually names a sibling that was added earlier.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    name: String,
    target: PathBuf,
    kind: LinkKind,
}

impl Link {
    /// A symbolic link.
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, target: P) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            kind: LinkKind::Symbolic,
        }
    }

    /// A hard link. The target must already exist when the link is built.
    pub fn hard<S: Into<String>, P: Into<PathBuf>>(name: S, target: P) -> Self {
        Self {
            kind: LinkKind::Hard,
            ..Self::new(name, target)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }
}

impl Buildable for Link {
    fn build<F: FileManager>(&self, base: &Path, fs: &F) -> Result<()> {
        let link = base.join(&self.name);
        let target = base.join(&self.target);
        match self.kind {
            LinkKind::Symbolic => fs.soft_link(&target, &link),
            LinkKind::Hard => fs.hard_link(&target, &link),
        }
    }
}
