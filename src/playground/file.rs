use std::path::Path;

use crate::fs::AttributeChanges;
use crate::manager::{FileManager, Result};
use crate::playground::Buildable;

/// A file inside a playground tree.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    name: String,
    contents: Option<Vec<u8>>,
    attributes: Option<AttributeChanges>,
}

impl File {
    /// An empty file called `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            contents: None,
            attributes: None,
        }
    }

    pub fn contents<C: Into<Vec<u8>>>(mut self, contents: C) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Uses the UTF-8 bytes of `text` as contents.
    pub fn string<S: AsRef<str>>(self, text: S) -> Self {
        self.contents(text.as_ref().as_bytes())
    }

    pub fn attributes(mut self, attributes: AttributeChanges) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Buildable for File {
    fn build<F: FileManager>(&self, base: &Path, fs: &F) -> Result<()> {
        fs.create_file(
            base.join(&self.name),
            self.contents.as_deref(),
            self.attributes.as_ref(),
        )
    }
}
