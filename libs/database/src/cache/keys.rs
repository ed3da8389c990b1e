use std::fmt::Display;

/// Naming scheme for one entity's cache keys.
///
/// `KeySpace::new("event", "events")` yields `events_all` for the collection
/// and `event_{id}` for a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpace {
    singular: &'static str,
    plural: &'static str,
}

impl KeySpace {
    pub const fn new(singular: &'static str, plural: &'static str) -> Self {
        Self { singular, plural }
    }

    pub fn all(&self) -> String {
        format!("{}_all", self.plural)
    }

    pub fn entity(&self, id: impl Display) -> String {
        format!("{}_{}", self.singular, id)
    }
}

/// Metric label for a key: everything before the first `_`.
pub(crate) fn key_space_label(key: &str) -> String {
    key.split_once('_')
        .map(|(prefix, _)| prefix)
        .unwrap_or(key)
        .to_string()
}
