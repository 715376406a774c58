use serde::Serialize;
use serde_json::Value;

use crate::manager::Result;
use crate::playground::{BuildableItem, File, Item};

/// A file holding a value serialized as pretty-printed JSON.
///
/// Object keys are written in sorted order, so the output is stable between
/// runs. The file is named `<name>.<extension>`, `json` unless changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Json {
    name: String,
    extension: String,
    text: String,
}

impl Json {
    pub fn new<S, T>(name: S, contents: &T) -> Result<Self>
    where
        S: Into<String>,
        T: Serialize + ?Sized,
    {
        let value = sort_keys(serde_json::to_value(contents)?);
        Ok(Self {
            name: name.into(),
            extension: "json".to_string(),
            text: serde_json::to_string_pretty(&value)?,
        })
    }

    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Rebuilds every object with its keys in sorted order, whichever map
/// `serde_json` was compiled with.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

impl BuildableItem for Json {
    fn build_item(self) -> Item {
        Item::File(File::new(self.file_name()).string(self.text))
    }
}
