/// Case-insensitive exact-name lookup over a catalog snapshot.
///
/// The query is trimmed and lowercased once; candidate names are only lowercased. Matching is
/// a linear scan in catalog order, so the first of several equal names wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameQuery {
    key: String,
}

impl NameQuery {
    pub fn new(raw: &str) -> Self {
        Self { key: raw.trim().to_lowercase() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase() == self.key
    }

    pub fn find_first<'a, T, F>(&self, items: &'a [T], name_of: F) -> Option<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        items.iter().find(|item| self.matches(name_of(item)))
    }
}
