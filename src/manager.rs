use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::fs::{AttributeChanges, Attributes, FindOptions};
use crate::utils;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Permissions applied by [`FileManager::create_directory`].
pub const DEFAULT_DIRECTORY_PERMISSIONS: u32 = 0o744;

/// A friendlier face for a file system.
///
/// Queries (`exists`, `file_exists`, ...) never fail, they answer `false`.
/// Everything that touches the disk returns [`Result`]; the underlying
/// [`std::io::Error`] stays reachable through `anyhow::Error::downcast_ref`.
///
/// Only the primitive operations must be implemented. Recursive listing,
/// searching, merge-copying and the typed attribute accessors are provided
/// on top of them.
pub trait FileManager {
    /// Checks whether anything exists at `path`. Links are followed, so a
    /// dangling link does not exist.
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Checks whether `path` is a directory (links are followed).
    fn directory_exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Checks whether something that is not a directory exists at `path`.
    fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Checks whether `path` itself is a symbolic link.
    fn link_exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Creates a directory and its missing parents.
    /// Does nothing if the directory already exists.
    fn create_directory_with<P: AsRef<Path>>(
        &self,
        path: P,
        attributes: Option<&AttributeChanges>,
    ) -> Result<()>;

    /// Creates (or truncates) a file and writes `contents` into it.
    /// The parent directory must exist.
    fn create_file<P: AsRef<Path>>(
        &self,
        path: P,
        contents: Option<&[u8]>,
        attributes: Option<&AttributeChanges>,
    ) -> Result<()>;

    /// Returns the raw, sorted names of every immediate child of `path`.
    /// Anything that is not a readable directory yields an empty list.
    fn read_directory<P: AsRef<Path>>(&self, path: P) -> Vec<OsString>;

    /// Copies a file, a link or a whole directory. `to` must not exist.
    fn copy<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()>;

    /// Moves an item. `to` must not exist.
    fn move_item<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()>;

    /// Creates a symbolic link at `to` pointing to `from`.
    fn soft_link<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()>;

    /// Creates a hard link at `to` for the file at `from`.
    fn hard_link<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()>;

    /// Deletes a file, a link or a directory with everything inside it.
    fn delete<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Reads the entire contents of a file.
    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>>;

    /// Returns the target stored in the symbolic link at `path`.
    fn link_destination<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf>;

    /// Returns the attributes of the item itself (links are not followed).
    fn attributes<P: AsRef<Path>>(&self, path: P) -> Result<Attributes>;

    /// Applies every attribute set in `changes`.
    fn set_attributes<P: AsRef<Path>>(&self, path: P, changes: &AttributeChanges) -> Result<()>;

    /// Size in bytes of a file, or the allocated size of every regular file
    /// under a directory. Returns `0` when nothing exists at `path`.
    fn size<P: AsRef<Path>>(&self, path: P) -> Result<u64>;

    fn temporary_directory(&self) -> PathBuf {
        std::env::temp_dir()
    }

    /// Creates a directory with [`DEFAULT_DIRECTORY_PERMISSIONS`].
    fn create_directory<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let attributes = AttributeChanges::new().with_permissions(DEFAULT_DIRECTORY_PERMISSIONS);
        self.create_directory_with(path, Some(&attributes))
    }

    /// Returns the sorted names of the immediate children of `path`.
    ///
    /// Names that are not valid UTF-8 are converted lossily, use
    /// [`read_directory`](Self::read_directory) to get them untouched.
    fn list_directory<P: AsRef<Path>>(&self, path: P, include_hidden: bool) -> Vec<String> {
        self.read_directory(path)
            .into_iter()
            .filter(|name| include_hidden || !name.as_encoded_bytes().starts_with(b"."))
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    /// Lists every non-directory item under `path`, depth first.
    ///
    /// Directories are descended into, not listed. A link to a directory is
    /// reported as a leaf, which keeps link cycles from recursing forever.
    fn list_directory_recursively<P: AsRef<Path>>(&self, path: P) -> Vec<PathBuf> {
        let path = path.as_ref();
        let mut result = Vec::new();
        for name in self.read_directory(path) {
            let item = path.join(name);
            if self.directory_exists(&item) && !self.link_exists(&item) {
                result.extend(self.list_directory_recursively(&item));
            } else {
                result.push(item);
            }
        }
        result
    }

    /// Finds items under `path` matching `options`.
    /// Results are relative to `path` and use `/` as separator.
    fn find<P: AsRef<Path>>(&self, path: P, options: &FindOptions) -> Vec<String> {
        let path = path.as_ref();
        let candidates = if options.recursive {
            self.list_directory_recursively(path)
                .iter()
                .map(|item| utils::relative_path(item, path))
                .collect()
        } else {
            self.list_directory(path, true)
        };
        candidates
            .into_iter()
            .filter(|candidate| options.matches(candidate))
            .collect()
    }

    /// Merges the directory `from` into `to`.
    ///
    /// Directories are merged recursively; everything else (files, links)
    /// is copied, replacing a non-directory of the same name. `to` is created
    /// when missing. Does nothing if `from` is not a directory.
    fn copy_recursively<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        if !self.directory_exists(from) {
            return Ok(());
        }
        if !self.directory_exists(to) {
            self.create_directory(to)?;
        }

        for name in self.read_directory(from) {
            let source = from.join(&name);
            let destination = to.join(&name);
            if self.directory_exists(&source) {
                self.copy_recursively(&source, &destination)?;
            } else {
                if self.file_exists(&destination) || self.link_exists(&destination) {
                    self.delete(&destination)?;
                }
                self.copy(&source, &destination)?;
            }
        }
        Ok(())
    }

    /// POSIX permission bits of the item at `path`.
    fn permissions<P: AsRef<Path>>(&self, path: P) -> Result<u32> {
        Ok(self.attributes(path)?.permissions)
    }

    fn set_permissions<P: AsRef<Path>>(&self, path: P, mode: u32) -> Result<()> {
        self.set_attributes(path, &AttributeChanges::new().with_permissions(mode))
    }

    /// Creation time, or the modification time on platforms that do not
    /// record one.
    fn creation_date<P: AsRef<Path>>(&self, path: P) -> Result<SystemTime> {
        let attributes = self.attributes(path)?;
        Ok(attributes.created.unwrap_or(attributes.modified))
    }

    fn modification_date<P: AsRef<Path>>(&self, path: P) -> Result<SystemTime> {
        Ok(self.attributes(path)?.modified)
    }
}
