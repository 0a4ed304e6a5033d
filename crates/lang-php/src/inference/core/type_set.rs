//! Inference output: a duplicate-free set of type names.

use indexmap::IndexSet;
use std::fmt;

/// One inferred type, as it should appear in an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    name: String,
    is_alias: bool,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_alias: false,
        }
    }

    /// A name written through a `use ... as Alias` import. It is surfaced as
    /// written and never turned into an absolute name.
    pub fn alias(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_alias: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn is_alias(&self) -> bool {
        self.is_alias
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName::new(name)
    }
}

/// Insertion-ordered; equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet(IndexSet<TypeName>);

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<TypeName>) -> bool {
        self.0.insert(name.into())
    }

    pub fn extend(&mut self, other: TypeSet) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.0.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(TypeName::as_str).collect()
    }
}

impl<T: Into<TypeName>> FromIterator<T> for TypeSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TypeSet(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for TypeSet {
    type Item = TypeName;
    type IntoIter = indexmap::set::IntoIter<TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.names();
        f.write_str(&joined.join("|"))
    }
}
