//! The [`FileManager`] backed by the operating system.
//!
//! Every method is a thin forwarder to `std::fs` (and `filetime` for
//! timestamps). Failures are wrapped with the operation and path that failed
//! while keeping the original [`io::Error`] as the root cause.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use filetime::FileTime;
use tracing::debug;

use crate::fs::{AttributeChanges, Attributes};
use crate::manager::{FileManager, Result};
use crate::utils;

/// The host file system.
///
/// ### Example:
/// ```
/// use file_manager_kit::{FileManager, HostFS};
///
/// let fs = HostFS::new();
/// let dir = fs.temporary_directory().join(format!("host_fs_doc_{}", std::process::id()));
/// fs.create_directory(&dir).unwrap();
/// fs.create_file(dir.join("note.txt"), Some(b"Hello".as_slice()), None).unwrap();
/// assert!(fs.file_exists(dir.join("note.txt")));
///
/// fs.delete(&dir).unwrap();
/// assert!(!fs.exists(&dir));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFS;

impl HostFS {
    pub fn new() -> Self {
        Self
    }
}

fn already_exists(path: &Path) -> anyhow::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} already exists", path.display()),
    )
    .into()
}

/// Fails with `NotFound` unless `path` exists (links are not followed).
fn require_item(path: &Path) -> Result<()> {
    std::fs::symlink_metadata(path)
        .map(|_| ())
        .with_context(|| format!("No such file or directory: {}", path.display()))
}

/// Fails with `AlreadyExists` when anything, even a dangling link, is at `path`.
fn require_vacant(path: &Path) -> Result<()> {
    if std::fs::symlink_metadata(path).is_ok() {
        return Err(already_exists(path));
    }
    Ok(())
}

#[cfg(unix)]
fn create_dir_all_on_host(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    if let Some(mode) = mode {
        builder.mode(mode);
    }
    builder.create(path)
}

#[cfg(not(unix))]
fn create_dir_all_on_host(path: &Path, _mode: Option<u32>) -> io::Result<()> {
    std::fs::DirBuilder::new().recursive(true).create(path)
}

#[cfg(unix)]
fn set_mode_on_host(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode_on_host(path: &Path, mode: u32) -> io::Result<()> {
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o200 == 0);
    std::fs::set_permissions(path, permissions)
}

/// Renames with `rename`, falling back to copy and delete when the two paths
/// are on different devices.
fn rename_or_copy<R>(from: &Path, to: &Path, rename: R) -> Result<()>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(from = %from.display(), to = %to.display(), "rename crosses devices, copying");
            utils::copy_on_host(from, to)?;
            utils::rm_on_host(from).with_context(|| format!("Failed to remove {}", from.display()))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to move {} to {}", from.display(), to.display()))),
    }
}

impl FileManager for HostFS {
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }

    fn directory_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        path.exists() && !path.is_dir()
    }

    fn link_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_symlink()
    }

    fn create_directory_with<P: AsRef<Path>>(
        &self,
        path: P,
        attributes: Option<&AttributeChanges>,
    ) -> Result<()> {
        let path = path.as_ref();
        if self.directory_exists(path) {
            return Ok(());
        }
        debug!(path = %path.display(), "creating directory");

        let mode = attributes.and_then(|attributes| attributes.permissions);
        create_dir_all_on_host(path, mode)
            .with_context(|| format!("Failed to create dir {}", path.display()))?;

        // The umask may have trimmed the requested mode, so it is set again
        // together with the timestamps.
        if let Some(attributes) = attributes.filter(|attributes| !attributes.is_empty()) {
            self.set_attributes(path, attributes)?;
        }
        Ok(())
    }

    fn create_file<P: AsRef<Path>>(
        &self,
        path: P,
        contents: Option<&[u8]>,
        attributes: Option<&AttributeChanges>,
    ) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "creating file");

        std::fs::write(path, contents.unwrap_or_default())
            .with_context(|| format!("Failed to create file {}", path.display()))?;

        if let Some(attributes) = attributes.filter(|attributes| !attributes.is_empty()) {
            self.set_attributes(path, attributes)?;
        }
        Ok(())
    }

    fn read_directory<P: AsRef<Path>>(&self, path: P) -> Vec<OsString> {
        let path = path.as_ref();
        if !self.directory_exists(path) {
            return Vec::new();
        }
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };

        let mut names: Vec<OsString> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name())
            .collect();
        names.sort();
        names
    }

    fn copy<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        require_item(from)?;
        require_vacant(to)?;
        debug!(from = %from.display(), to = %to.display(), "copying");

        utils::copy_on_host(from, to)
    }

    fn move_item<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        require_item(from)?;
        require_vacant(to)?;
        debug!(from = %from.display(), to = %to.display(), "moving");

        rename_or_copy(from, to, |from, to| std::fs::rename(from, to))
    }

    fn soft_link<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        debug!(original = %from.display(), link = %to.display(), "creating symbolic link");

        utils::symlink_on_host(from, to).with_context(|| {
            format!("Failed to link {} to {}", to.display(), from.display())
        })
    }

    fn hard_link<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        debug!(original = %from.display(), link = %to.display(), "creating hard link");

        std::fs::hard_link(from, to).with_context(|| {
            format!("Failed to hard link {} to {}", to.display(), from.display())
        })
    }

    fn delete<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "deleting");

        utils::rm_on_host(path).with_context(|| format!("Failed to delete {}", path.display()))
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))
    }

    fn link_destination<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        std::fs::read_link(path).with_context(|| format!("Failed to read link {}", path.display()))
    }

    fn attributes<P: AsRef<Path>>(&self, path: P) -> Result<Attributes> {
        let path = path.as_ref();
        let metadata = std::fs::symlink_metadata(path)
            .with_context(|| format!("Failed to get attributes of {}", path.display()))?;
        Ok(Attributes::try_from(&metadata)?)
    }

    fn set_attributes<P: AsRef<Path>>(&self, path: P, changes: &AttributeChanges) -> Result<()> {
        let path = path.as_ref();
        require_item(path)?;
        debug!(path = %path.display(), ?changes, "setting attributes");

        if let Some(mode) = changes.permissions {
            set_mode_on_host(path, mode)
                .with_context(|| format!("Failed to set permissions of {}", path.display()))?;
        }
        if let Some(modified) = changes.modified {
            filetime::set_file_mtime(path, FileTime::from_system_time(modified))
                .with_context(|| format!("Failed to set modification date of {}", path.display()))?;
        }
        if let Some(accessed) = changes.accessed {
            filetime::set_file_atime(path, FileTime::from_system_time(accessed))
                .with_context(|| format!("Failed to set access date of {}", path.display()))?;
        }
        Ok(())
    }

    fn size<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        let path = path.as_ref();
        if self.file_exists(path) {
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to get size of {}", path.display()))?;
            return Ok(metadata.len());
        }
        if self.directory_exists(path) {
            return utils::dir_size_on_host(path);
        }
        Ok(0)
    }
}
