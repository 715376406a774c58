//! Declarative file-system fixtures for tests.
//!
//! A [`Playground`] describes a tree of files, directories and links, builds
//! it under a fresh directory and removes it again once the test is done:
//!
//! ```
//! use file_manager_kit::{Directory, File, FileManager, Link, Playground};
//!
//! Playground::new()
//!     .with(
//!         Directory::new("docs")
//!             .with(File::new("note.txt").string("Hello"))
//!             .with(Link::new("latest", "note.txt")),
//!     )
//!     .with("empty.txt")
//!     .test(|fs, root| {
//!         assert_eq!(fs.read(root.join("docs/latest"))?, b"Hello");
//!         assert!(fs.file_exists(root.join("empty.txt")));
//!         Ok(())
//!     })
//!     .unwrap();
//! ```

mod directory;
mod file;
mod item;
mod json;
mod link;

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::fs::HostFS;
use crate::manager::{FileManager, Result};
use crate::utils;

pub use directory::Directory;
pub use file::File;
pub use item::{Buildable, BuildableItem, Item};
pub use json::Json;
pub use link::{Link, LinkKind};

/// A throwaway directory tree built through a [`FileManager`].
///
/// The tree lives in `<root>/<name>`. `root` defaults to the temporary
/// directory of the file manager and `name` to `playground_<uuid>`.
/// The name must be a single plain path component; anything else (empty,
/// `.`, `..`, nested or absolute) makes [`build`](Playground::build) fail.
/// Root directories missing at build time are created and later removed
/// again, newest first, as long as they are empty.
///
/// A built playground removes itself on drop unless auto-clean is turned off.
pub struct Playground<F: FileManager = HostFS> {
    fs: F,
    root: PathBuf,
    directory: Directory,
    created_root_parents: Vec<PathBuf>,
    is_built: bool,
    is_auto_clean: bool,
}

impl Playground<HostFS> {
    /// An empty playground on the host file system.
    pub fn new() -> Self {
        Self::with_file_manager(HostFS::new())
    }
}

impl Default for Playground<HostFS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileManager> Playground<F> {
    pub fn with_file_manager(fs: F) -> Self {
        let root = fs.temporary_directory();
        Self {
            fs,
            root,
            directory: Directory::new(format!("playground_{}", Uuid::new_v4().simple())),
            created_root_parents: Vec::new(),
            is_built: false,
            is_auto_clean: true,
        }
    }

    /// Places the playground directory inside `root`.
    pub fn root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = utils::normalize(root);
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.directory.name = name.into();
        self
    }

    pub fn with<I: BuildableItem>(mut self, item: I) -> Self {
        self.directory.push(item);
        self
    }

    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: BuildableItem,
    {
        for item in items {
            self.directory.push(item);
        }
        self
    }

    /// Changes the auto-clean flag. When it's off, dropping a built
    /// playground leaves everything on disk.
    pub fn set_auto_clean(&mut self, clean: bool) {
        self.is_auto_clean = clean;
    }

    /// Chained form of [`set_auto_clean`](Self::set_auto_clean).
    pub fn auto_clean(mut self, clean: bool) -> Self {
        self.is_auto_clean = clean;
        self
    }

    /// Path of the playground directory itself.
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.directory.name)
    }

    pub fn file_manager(&self) -> &F {
        &self.fs
    }

    pub fn is_built(&self) -> bool {
        self.is_built
    }

    fn check_name(&self) -> Result<()> {
        let mut components = Path::new(&self.directory.name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid playground name {:?}", self.directory.name),
            )
            .into()),
        }
    }

    /// Creates the whole tree and returns the playground path.
    ///
    /// Items are created depth-first in insertion order. The first failure
    /// stops the build; whatever was created so far is still removed by
    /// [`remove`](Self::remove) or on drop.
    pub fn build(&mut self) -> Result<PathBuf> {
        self.check_name()?;
        self.is_built = true;

        if !self.fs.directory_exists(&self.root) {
            // Looking for the closest existing parent
            let missing: Vec<PathBuf> = self
                .root
                .ancestors()
                .take_while(|p| !p.as_os_str().is_empty() && !self.fs.directory_exists(p))
                .map(Path::to_path_buf)
                .collect();

            for dir in missing.into_iter().rev() {
                self.fs.create_directory_with(&dir, None)?;
                self.created_root_parents.push(dir);
            }
        }

        let path = self.path();
        debug!(path = %path.display(), "building playground");
        self.directory.build(&self.root, &self.fs)?;
        Ok(path)
    }

    /// Deletes the playground directory and the root parents created for it.
    /// With an invalid name nothing but the created root parents is touched.
    pub fn remove(&mut self) -> Result<()> {
        let path = self.path();
        let is_present = self.fs.exists(&path) || self.fs.link_exists(&path);
        if is_present && self.check_name().is_ok() {
            debug!(path = %path.display(), "removing playground");
            self.fs.delete(&path)?;
        }
        self.is_built = false;

        while let Some(parent) = self.created_root_parents.pop() {
            if self.fs.directory_exists(&parent) && self.fs.list_directory(&parent, true).is_empty() {
                self.fs.delete(&parent)?;
            }
        }
        Ok(())
    }

    /// Builds the tree, runs `check` against it and removes the tree again.
    ///
    /// Removal happens even if building or `check` fails. The first error is
    /// returned.
    pub fn test<T, C>(&mut self, check: C) -> Result<T>
    where
        C: FnOnce(&F, &Path) -> Result<T>,
    {
        let outcome = self.build().and_then(|path| check(&self.fs, &path));
        let cleanup = self.remove();
        let value = outcome?;
        cleanup?;
        Ok(value)
    }
}

impl<F: FileManager> Drop for Playground<F> {
    fn drop(&mut self) {
        if !self.is_built || !self.is_auto_clean {
            return;
        }

        if let Err(error) = self.remove() {
            warn!(path = %self.path().display(), error = %error, "Failed to remove playground");
        }
    }
}
