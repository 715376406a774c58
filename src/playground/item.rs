use std::path::Path;

use crate::manager::{FileManager, Result};
use crate::playground::{Directory, File, Link};

/// Something that can create its on-disk form under a base directory.
pub trait Buildable {
    /// Creates the item inside `base` using `fs`. Stops at the first error.
    fn build<F: FileManager>(&self, base: &Path, fs: &F) -> Result<()>;
}

/// One node of a playground tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    File(File),
    Directory(Directory),
    Link(Link),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::File(file) => file.name(),
            Item::Directory(directory) => directory.name(),
            Item::Link(link) => link.name(),
        }
    }
}

impl Buildable for Item {
    fn build<F: FileManager>(&self, base: &Path, fs: &F) -> Result<()> {
        match self {
            Item::File(file) => file.build(base, fs),
            Item::Directory(directory) => directory.build(base, fs),
            Item::Link(link) => link.build(base, fs),
        }
    }
}

/// Conversion into an [`Item`].
///
/// Implement it for your own types to use them inside a playground, e.g. a
/// config file rendered from a struct. A bare string becomes an empty file.
pub trait BuildableItem {
    fn build_item(self) -> Item;
}

impl BuildableItem for Item {
    fn build_item(self) -> Item {
        self
    }
}

impl BuildableItem for File {
    fn build_item(self) -> Item {
        Item::File(self)
    }
}

impl BuildableItem for Directory {
    fn build_item(self) -> Item {
        Item::Directory(self)
    }
}

impl BuildableItem for Link {
    fn build_item(self) -> Item {
        Item::Link(self)
    }
}

impl BuildableItem for &str {
    fn build_item(self) -> Item {
        Item::File(File::new(self))
    }
}

impl BuildableItem for String {
    fn build_item(self) -> Item {
        Item::File(File::new(self))
    }
}
