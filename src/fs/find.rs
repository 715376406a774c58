use std::path::Path;

use crate::utils;

/// Filters for [`FileManager::find`](crate::FileManager::find).
///
/// By default everything non-hidden in the directory itself matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Base name to match, without extension.
    pub name: Option<String>,
    /// Accepted extensions, without the leading dot.
    pub extensions: Option<Vec<String>>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Drop anything with a path component starting with `.`.
    pub skip_hidden: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            name: None,
            extensions: None,
            recursive: false,
            skip_hidden: true,
        }
    }
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    /// Checks a `/`-separated relative path against the filters.
    pub(crate) fn matches(&self, candidate: &str) -> bool {
        if self.skip_hidden && utils::is_hidden(candidate) {
            return false;
        }

        let path = Path::new(candidate);
        let base_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .unwrap_or_default();

        let name_matches = self.name.as_deref().is_none_or(|name| base_name == name);
        let extension_matches = self
            .extensions
            .as_ref()
            .is_none_or(|extensions| extensions.iter().any(|ext| *ext == extension));

        name_matches && extension_matches
    }
}
