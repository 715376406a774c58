mod attributes;
mod find;
mod host;

pub use attributes::{AttributeChanges, Attributes, FileType};
pub use find::FindOptions;
pub use host::HostFS;
