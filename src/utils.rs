use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::manager::Result;

/// Resolves `.` and `..` lexically and drops trailing separators.
/// The file system is never consulted, so links are not resolved.
///
/// A `..` that has nothing left to cancel is kept in relative paths and
/// dropped at the root.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => result.push(component),
            },
            _ => result.push(component),
        }
    }
    result
}

/// Renders `path` relative to `base`, joined with `/`.
///
/// Both sides are normalized and their common leading components removed.
pub fn relative_path<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> String {
    let path = normalize(path);
    let base = normalize(base);
    let shared = path
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();
    path.components()
        .skip(shared)
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when any component of the `/`-separated `path` starts with a dot.
pub(crate) fn is_hidden(path: &str) -> bool {
    path.split('/')
        .any(|component| component.starts_with('.') && component != "." && component != "..")
}

/// Removes `path` without following links.
pub(crate) fn rm_on_host(path: &Path) -> std::io::Result<()> {
    let metadata = std::fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        remove_link_or_file(path, &metadata)
    }
}

#[cfg(windows)]
fn remove_link_or_file(path: &Path, metadata: &Metadata) -> std::io::Result<()> {
    use std::os::windows::fs::FileTypeExt;
    if metadata.file_type().is_symlink_dir() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_link_or_file(path: &Path, _metadata: &Metadata) -> std::io::Result<()> {
    std::fs::remove_file(path)
}

/// Copies `from` to `to` on the host: links are recreated, directories are
/// copied entry by entry, regular files byte by byte.
pub(crate) fn copy_on_host(from: &Path, to: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(from)
        .with_context(|| format!("Failed to read metadata of {}", from.display()))?;

    if metadata.file_type().is_symlink() {
        let target = std::fs::read_link(from)
            .with_context(|| format!("Failed to read link {}", from.display()))?;
        symlink_on_host(&target, to)
            .with_context(|| format!("Failed to create link {}", to.display()))?;
    } else if metadata.is_dir() {
        std::fs::create_dir(to)
            .with_context(|| format!("Failed to create dir {}", to.display()))?;
        for entry in std::fs::read_dir(from)
            .with_context(|| format!("Failed to read dir {}", from.display()))?
        {
            let entry = entry?;
            copy_on_host(&entry.path(), &to.join(entry.file_name()))?;
        }
        std::fs::set_permissions(to, metadata.permissions())
            .with_context(|| format!("Failed to set permissions of {}", to.display()))?;
    } else {
        std::fs::copy(from, to).with_context(|| {
            format!("Failed to copy {} to {}", from.display(), to.display())
        })?;
    }
    Ok(())
}

#[cfg(unix)]
pub(crate) fn symlink_on_host(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
pub(crate) fn symlink_on_host(target: &Path, link: &Path) -> std::io::Result<()> {
    let resolved = link.parent().map(|parent| parent.join(target));
    if resolved.is_some_and(|path| path.is_dir()) {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// Space a regular file occupies on disk, never less than its length.
#[cfg(unix)]
fn allocated_size(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    // st_blocks is always counted in 512-byte units.
    (metadata.blocks() * 512).max(metadata.len())
}

#[cfg(not(unix))]
fn allocated_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Sums the allocated size of every regular file under `path`.
/// Links are not followed.
pub(crate) fn dir_size_on_host(path: &Path) -> Result<u64> {
    let mut size = 0;
    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Failed to read dir {}", path.display()))?
    {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            size += dir_size_on_host(&entry.path())?;
        } else if metadata.is_file() {
            size += allocated_size(&metadata);
        }
    }
    Ok(size)
}
