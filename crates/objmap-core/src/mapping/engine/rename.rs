//! Member rename maps

use std::fmt;

/// Source member name to target member name pairs
///
/// Lookups by target name are case-insensitive. Inserting a source name that
/// is already present replaces its target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    entries: Vec<(String, String)>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map source member `source` onto target member `target`
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == source) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((source, target)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn rename(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source, target);
        self
    }

    /// Source member feeding `target`, if one was renamed onto it
    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, candidate)| candidate.eq_ignore_ascii_case(target))
            .map(|(source, _)| source.as_str())
    }

    /// The same pairs with source and target exchanged
    pub fn inverted(&self) -> Self {
        self.entries
            .iter()
            .map(|(source, target)| (target.clone(), source.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for RenameMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = RenameMap::new();
        for (source, target) in iter {
            map.insert(source, target);
        }
        map
    }
}

impl IntoIterator for RenameMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for RenameMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|(source, target)| format!("{source} => {target}"))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_is_case_insensitive() {
        let renames: RenameMap = [("FirstName", "GivenName"), ("Address", "PostalAddress")]
            .into_iter()
            .collect();

        assert_eq!(renames.source_for("givenname"), Some("FirstName"));
        assert_eq!(renames.source_for("PostalAddress"), Some("Address"));
        assert_eq!(renames.source_for("FirstName"), None);
    }

    #[test]
    fn test_inverted_swaps_direction() {
        let renames = RenameMap::new().rename("Street", "Line1");
        let inverted = renames.inverted();

        assert_eq!(inverted.source_for("Street"), Some("Line1"));
        assert_eq!(inverted.source_for("Line1"), None);
        assert_eq!(inverted.inverted(), renames);
    }

    #[test]
    fn test_insert_replaces_existing_source() {
        let mut renames = RenameMap::new();
        renames.insert("Zip", "Postcode");
        renames.insert("Zip", "PostalCode");

        assert_eq!(renames.len(), 1);
        assert_eq!(renames.source_for("PostalCode"), Some("Zip"));
        assert_eq!(renames.to_string(), "{Zip => PostalCode}");
    }
}
