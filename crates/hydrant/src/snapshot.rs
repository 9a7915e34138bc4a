use crate::FieldValue;

use indexmap::IndexMap;

/// The fields a hydration call actually wrote, keyed by field name.
///
/// Callers keep this as the baseline for later change detection. Lazy
/// references and collections are shared with the object, embedded objects
/// are copied.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    fields: IndexMap<String, FieldValue>,
}

impl Snapshot {
    pub(crate) fn insert(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &FieldValue)> + '_ {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for Snapshot {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
