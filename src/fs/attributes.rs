use std::fs::Metadata;
use std::time::SystemTime;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    SymbolicLink,
    /// Sockets, fifos, devices and whatever else the platform reports.
    Other,
}

impl From<std::fs::FileType> for FileType {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            FileType::SymbolicLink
        } else if file_type.is_dir() {
            FileType::Directory
        } else if file_type.is_file() {
            FileType::File
        } else {
            FileType::Other
        }
    }
}

/// Attributes of a single file system item.
///
/// Values the host platform does not provide are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub file_type: FileType,
    pub size: u64,
    /// POSIX mode bits (`mode & 0o7777`).
    pub permissions: u32,
    pub modified: SystemTime,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
    /// Inode number.
    pub file_number: Option<u64>,
    pub link_count: Option<u64>,
    pub owner_id: Option<u32>,
    pub group_id: Option<u32>,
}

impl Attributes {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::SymbolicLink
    }
}

impl TryFrom<&Metadata> for Attributes {
    type Error = std::io::Error;

    fn try_from(metadata: &Metadata) -> Result<Self, Self::Error> {
        #[cfg(unix)]
        let (permissions, file_number, link_count, owner_id, group_id) = {
            use std::os::unix::fs::MetadataExt;
            (
                metadata.mode() & 0o7777,
                Some(metadata.ino()),
                Some(metadata.nlink()),
                Some(metadata.uid()),
                Some(metadata.gid()),
            )
        };
        #[cfg(not(unix))]
        let (permissions, file_number, link_count, owner_id, group_id) = {
            let mode = if metadata.permissions().readonly() {
                0o444
            } else {
                0o644
            };
            (mode, None, None, None, None)
        };

        Ok(Self {
            file_type: metadata.file_type().into(),
            size: metadata.len(),
            permissions,
            modified: metadata.modified()?,
            accessed: metadata.accessed().ok(),
            created: metadata.created().ok(),
            file_number,
            link_count,
            owner_id,
            group_id,
        })
    }
}

/// A set of attribute updates. Unset fields are left untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeChanges {
    pub permissions: Option<u32>,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
}

impl AttributeChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn with_modified(mut self, time: SystemTime) -> Self {
        self.modified = Some(time);
        self
    }

    pub fn with_accessed(mut self, time: SystemTime) -> Self {
        self.accessed = Some(time);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_none() && self.modified.is_none() && self.accessed.is_none()
    }
}
