//! Ignore lists and detected empty-name sets.

use indexmap::IndexSet;
use smol_str::SmolStr;

/// Property names excluded from an operation.
///
/// An empty list excludes nothing. Order is kept for stable logging but has
/// no effect on the operations.
///
/// ```rust
/// use propwise_core::IgnoreList;
///
/// let ignore = IgnoreList::from(["page", "size"]).with(["sort"]);
/// assert!(ignore.contains("size"));
/// assert!(!ignore.contains("status"));
/// assert_eq!(ignore.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    names: IndexSet<SmolStr>,
}

impl IgnoreList {
    /// An ignore list that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether a name is ignored.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<SmolStr>) -> bool {
        self.names.insert(name.into())
    }

    /// Union with more names.
    pub fn with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Number of ignored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Ignored names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(SmolStr::as_str)
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::none().with(iter)
    }
}

impl<S: Into<SmolStr>, const N: usize> From<[S; N]> for IgnoreList {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl From<&[&str]> for IgnoreList {
    fn from(names: &[&str]) -> Self {
        names.iter().copied().collect()
    }
}

impl From<Vec<String>> for IgnoreList {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<EmptyNames> for IgnoreList {
    fn from(empty: EmptyNames) -> Self {
        empty.names.into_iter().collect()
    }
}

/// Names of properties whose value was absent when detected.
///
/// Holds no duplicates; iteration follows the shape's declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyNames {
    names: IndexSet<&'static str>,
}

impl EmptyNames {
    pub(crate) fn insert(&mut self, name: &'static str) {
        self.names.insert(name);
    }

    /// Check whether a name was detected as empty.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of empty properties.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if every property had a value.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Empty property names.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Convert into an ignore list extended with `extra`.
    pub fn into_ignore_list(self, extra: &IgnoreList) -> IgnoreList {
        IgnoreList::from(self).with(extra.iter())
    }
}

impl IntoIterator for EmptyNames {
    type Item = &'static str;
    type IntoIter = indexmap::set::IntoIter<&'static str>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}
