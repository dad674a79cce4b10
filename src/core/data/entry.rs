use serde::Serialize;

/// A single leaf of the flattened message dictionary.
///
/// `path` is the dot-joined sequence of member names leading to the leaf
/// (e.g. `"Home.hero.title"`) and is unique within one flattened set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedEntry {
    pub path: String,
    pub value: String,
}

impl OrderedEntry {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}
