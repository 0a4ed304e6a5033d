//! Class-name helpers and the per-file name scope.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Namespace separator.
pub const NAMESPACE_SEPARATOR: char = '\\';

const RESERVED_TYPES: &[&str] = &[
    "string",
    "int",
    "integer",
    "float",
    "double",
    "bool",
    "boolean",
    "true",
    "false",
    "null",
    "array",
    "iterable",
    "callable",
    "object",
    "mixed",
    "void",
    "never",
    "resource",
    "self",
    "static",
    "parent",
    "$this",
    "scalar",
    "numeric",
    "list",
    "array-key",
    "class-string",
    "non-empty-array",
    "non-empty-string",
    "positive-int",
];

/// Whether `type_name` is a reserved (non class-like) type keyword.
///
/// Array suffixes are ignored, so `int[]` and `mixed[][]` are reserved too.
pub fn is_reserved_type(type_name: &str) -> bool {
    let mut base = type_name.trim();
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
    }
    let base = base.to_ascii_lowercase();
    RESERVED_TYPES.contains(&base.as_str())
}

/// Last segment of a namespaced name: `App\Entity\User` -> `User`.
pub fn short_name(name: &str) -> &str {
    let trimmed = name.trim_start_matches(NAMESPACE_SEPARATOR);
    match trimmed.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) if pos + 1 < trimmed.len() => &trimmed[pos + 1..],
        _ => trimmed,
    }
}

pub fn is_namespaced(name: &str) -> bool {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
        .contains(NAMESPACE_SEPARATOR)
}

/// Namespace and `use` imports in effect for a declaration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NameScope {
    /// Identifies the file the scope belongs to, when known.
    pub file: Option<String>,
    pub namespace: Option<String>,
    /// Alias (as written, or the short name) -> fully qualified name.
    pub uses: IndexMap<String, String>,
}

impl NameScope {
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            file: None,
            namespace: namespace
                .map(|ns| ns.trim_matches(NAMESPACE_SEPARATOR).to_string())
                .filter(|ns| !ns.is_empty()),
            uses: IndexMap::new(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add `use Fqn;`.
    pub fn with_use(mut self, fqn: &str) -> Self {
        let fqn = fqn.trim_start_matches(NAMESPACE_SEPARATOR);
        self.uses.insert(short_name(fqn).to_string(), fqn.to_string());
        self
    }

    /// Add `use Fqn as Alias;`.
    pub fn with_aliased_use(mut self, fqn: &str, alias: &str) -> Self {
        let fqn = fqn.trim_start_matches(NAMESPACE_SEPARATOR);
        self.uses.insert(alias.to_string(), fqn.to_string());
        self
    }

    /// Key under which per-file state (pending imports) is tracked.
    pub fn file_key(&self) -> String {
        self.file
            .clone()
            .or_else(|| self.namespace.clone())
            .unwrap_or_default()
    }

    /// Fully qualified name imported under `alias`, matched case-insensitively.
    pub fn imported_as(&self, alias: &str) -> Option<&str> {
        self.uses
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(alias))
            .map(|(_, fqn)| fqn.as_str())
    }

    /// Resolve a class name as written in source to its fully qualified form
    /// (without a leading `\`).
    pub fn resolve_class_name(&self, name: &str) -> String {
        if let Some(fully_qualified) = name.strip_prefix(NAMESPACE_SEPARATOR) {
            return fully_qualified.to_string();
        }

        let (first, rest) = match name.find(NAMESPACE_SEPARATOR) {
            Some(pos) => (&name[..pos], Some(&name[pos..])),
            None => (name, None),
        };

        if let Some(fqn) = self.imported_as(first) {
            return match rest {
                Some(rest) => format!("{}{}", fqn, rest),
                None => fqn.to_string(),
            };
        }

        match &self.namespace {
            Some(ns) => format!("{}{}{}", ns, NAMESPACE_SEPARATOR, name),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_types_ignore_case_and_array_suffix() {
        assert!(is_reserved_type("int"));
        assert!(is_reserved_type("Bool"));
        assert!(is_reserved_type("mixed[]"));
        assert!(is_reserved_type("string[][]"));
        assert!(is_reserved_type("$this"));
        assert!(!is_reserved_type("Foo"));
        assert!(!is_reserved_type("\\App\\Entity\\User[]"));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("\\App\\Entity\\User"), "User");
        assert_eq!(short_name("User"), "User");
    }

    #[test]
    fn test_resolve_class_name() {
        let scope = NameScope::new(Some("App\\Service"))
            .with_use("App\\Entity\\User")
            .with_aliased_use("Doctrine\\ORM\\Mapping", "ORM");

        assert_eq!(scope.resolve_class_name("User"), "App\\Entity\\User");
        assert_eq!(scope.resolve_class_name("user"), "App\\Entity\\User");
        assert_eq!(scope.resolve_class_name("ORM\\Column"), "Doctrine\\ORM\\Mapping\\Column");
        assert_eq!(scope.resolve_class_name("Mailer"), "App\\Service\\Mailer");
        assert_eq!(scope.resolve_class_name("\\DateTime"), "DateTime");
    }

    #[test]
    fn test_resolve_in_global_namespace() {
        let scope = NameScope::default();
        assert_eq!(scope.resolve_class_name("DateTime"), "DateTime");
    }
}
