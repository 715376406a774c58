//! A convenience layer over the host file system, plus declarative fixtures for tests.
//!
//! ### Overview
//!
//! `file-manager-kit` wraps the everyday file operations (existence checks, creating,
//! listing, searching, copying, moving, linking, deleting and inspecting attributes)
//! behind the [`FileManager`] trait. [`HostFS`] implements it on top of `std::fs`.
//!
//! **Key ideas**:
//! - **Forgiving queries**: existence checks and listings answer `false` or an empty list
//!   instead of failing.
//! - **Typed attributes**: sizes, permissions and dates come back as plain Rust values.
//! - **Playgrounds**: describe a tree of files, directories and links in code, build it in
//!   a fresh temporary directory, run your checks and have it removed afterwards.
//!
//! ```
//! use file_manager_kit::{FileManager, FindOptions, HostFS};
//!
//! let fs = HostFS::new();
//! let root = std::env::temp_dir().join(format!("fmk_doc_{}", std::process::id()));
//!
//! fs.create_directory(root.join("notes")).unwrap();
//! fs.create_file(root.join("notes/todo.md"), Some(b"- write docs".as_slice()), None).unwrap();
//!
//! let found = fs.find(&root, &FindOptions::new().extensions(["md"]).recursive(true));
//! assert_eq!(found, vec!["notes/todo.md"]);
//!
//! fs.delete(&root).unwrap();
//! ```

mod fs;
mod manager;
mod playground;
mod utils;

pub use fs::{AttributeChanges, Attributes, FileType, FindOptions, HostFS};
pub use manager::{DEFAULT_DIRECTORY_PERMISSIONS, FileManager, Result};
pub use playground::{
    Buildable, BuildableItem, Directory, File, Item, Json, Link, LinkKind, Playground,
};
pub use utils::{normalize, relative_path};
