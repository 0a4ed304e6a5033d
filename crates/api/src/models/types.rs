//! Static type model.
//!
//! Pure data: values are produced by a [`crate::oracle::TypeOracle`] and only
//! compared, hashed and canonicalized afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use xxhash_rust::xxh3::Xxh3;

/// Primitive kinds.
///
/// Declaration order is significant: it drives the iteration order of
/// union/intersection members, and `Null` sorts last so canonical output
/// reads `string|null`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Int,
    Float,
    Bool,
    String,
    Callable,
    Object,
    Mixed,
    Error,
    Null,
}

impl PrimitiveKind {
    /// The reserved type keyword, if this kind has one that is worth writing down.
    ///
    /// `mixed` and `error` carry no information for an annotation.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            PrimitiveKind::Int => Some("int"),
            PrimitiveKind::Float => Some("float"),
            PrimitiveKind::Bool => Some("bool"),
            PrimitiveKind::String => Some("string"),
            PrimitiveKind::Callable => Some("callable"),
            PrimitiveKind::Object => Some("object"),
            PrimitiveKind::Null => Some("null"),
            PrimitiveKind::Mixed | PrimitiveKind::Error => None,
        }
    }
}

/// A static type, as evaluated for an expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StaticType {
    /// Class or interface reference. Stored absolute, without the leading `\`.
    Named(String),
    ArrayOf(Box<StaticType>),
    Primitive(PrimitiveKind),
    Union(BTreeSet<StaticType>),
    Intersection(BTreeSet<StaticType>),
}

impl StaticType {
    pub fn named(name: impl AsRef<str>) -> Self {
        StaticType::Named(name.as_ref().trim_start_matches('\\').to_string())
    }

    pub fn array_of(item: StaticType) -> Self {
        StaticType::ArrayOf(Box::new(item))
    }

    pub fn mixed_array() -> Self {
        StaticType::array_of(StaticType::mixed())
    }

    pub fn int() -> Self {
        StaticType::Primitive(PrimitiveKind::Int)
    }

    pub fn float() -> Self {
        StaticType::Primitive(PrimitiveKind::Float)
    }

    pub fn bool() -> Self {
        StaticType::Primitive(PrimitiveKind::Bool)
    }

    pub fn string() -> Self {
        StaticType::Primitive(PrimitiveKind::String)
    }

    pub fn callable() -> Self {
        StaticType::Primitive(PrimitiveKind::Callable)
    }

    pub fn object() -> Self {
        StaticType::Primitive(PrimitiveKind::Object)
    }

    pub fn null() -> Self {
        StaticType::Primitive(PrimitiveKind::Null)
    }

    pub fn mixed() -> Self {
        StaticType::Primitive(PrimitiveKind::Mixed)
    }

    pub fn error() -> Self {
        StaticType::Primitive(PrimitiveKind::Error)
    }

    pub fn union(members: impl IntoIterator<Item = StaticType>) -> Self {
        StaticType::Union(members.into_iter().collect())
    }

    pub fn intersection(members: impl IntoIterator<Item = StaticType>) -> Self {
        StaticType::Intersection(members.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StaticType::Primitive(PrimitiveKind::Null))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StaticType::Primitive(PrimitiveKind::Error))
    }

    /// Structural hash, stable across runs for equal values.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_order_is_irrelevant() {
        let a = StaticType::union([StaticType::int(), StaticType::named("Foo")]);
        let b = StaticType::union([StaticType::named("Foo"), StaticType::int()]);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_duplicate_members_collapse() {
        let t = StaticType::intersection([StaticType::int(), StaticType::int()]);
        match t {
            StaticType::Intersection(members) => assert_eq!(members.len(), 1),
            other => panic!("Expected intersection, got {:?}", other),
        }
    }

    #[test]
    fn test_named_is_stored_without_leading_slash() {
        assert_eq!(
            StaticType::named("\\App\\Entity\\User"),
            StaticType::Named("App\\Entity\\User".to_string())
        );
    }

    #[test]
    fn test_union_and_intersection_differ() {
        let u = StaticType::union([StaticType::int()]);
        let i = StaticType::intersection([StaticType::int()]);
        assert_ne!(u, i);
        assert_ne!(u.fingerprint(), i.fingerprint());
    }

    #[test]
    fn test_null_sorts_after_named() {
        let union = StaticType::union([StaticType::null(), StaticType::named("Foo")]);
        let members: Vec<_> = match union {
            StaticType::Union(m) => m.into_iter().collect(),
            _ => unreachable!(),
        };
        assert_eq!(members, vec![StaticType::named("Foo"), StaticType::null()]);
    }
}
