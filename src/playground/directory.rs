use std::path::Path;

use crate::fs::AttributeChanges;
use crate::manager::{FileManager, Result};
use crate::playground::{Buildable, BuildableItem, Item};

/// A directory and everything below it.
///
/// Children are built in the order they were added, each one completely
/// (depth-first) before the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub(crate) name: String,
    attributes: Option<AttributeChanges>,
    contents: Vec<Item>,
}

impl Directory {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: None,
            contents: Vec::new(),
        }
    }

    /// Appends one child.
    pub fn with<I: BuildableItem>(mut self, item: I) -> Self {
        self.push(item);
        self
    }

    /// Appends every child yielded by `items`.
    ///
    /// Any iterator works, so optional children can be added with an
    /// `Option` and generated ones with a `map`.
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: BuildableItem,
    {
        self.contents
            .extend(items.into_iter().map(BuildableItem::build_item));
        self
    }

    pub fn attributes(mut self, attributes: AttributeChanges) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[Item] {
        &self.contents
    }

    pub(crate) fn push<I: BuildableItem>(&mut self, item: I) {
        self.contents.push(item.build_item());
    }
}

impl Buildable for Directory {
    fn build<F: FileManager>(&self, base: &Path, fs: &F) -> Result<()> {
        let path = base.join(&self.name);
        fs.create_directory_with(&path, self.attributes.as_ref())?;
        for item in &self.contents {
            item.build(&path, fs)?;
        }
        Ok(())
    }
}
