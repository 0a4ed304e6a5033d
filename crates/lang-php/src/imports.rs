//! Pending `use` imports per file.

use docsync_api::models::NameScope;
use docsync_api::models::naming::{NAMESPACE_SEPARATOR, short_name};
use docsync_api::oracle::UseImportCommander;
use indexmap::{IndexMap, IndexSet};

/// Collects `use` imports requested while rewriting doc comments.
///
/// The framework applies them to the file afterwards; until then they count
/// as imported for every later request in the same file.
#[derive(Debug, Default)]
pub struct UseAddingCommander {
    use_imports_by_file: IndexMap<String, IndexSet<String>>,
}

impl UseAddingCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports requested for the file of `scope`, in request order.
    pub fn imports_for(&self, scope: &NameScope) -> Vec<&str> {
        self.use_imports_by_file
            .get(&scope.file_key())
            .map(|imports| imports.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.use_imports_by_file.values().all(IndexSet::is_empty)
    }

    /// Hand over every pending import, grouped by file key.
    pub fn drain(&mut self) -> IndexMap<String, IndexSet<String>> {
        std::mem::take(&mut self.use_imports_by_file)
    }

    /// The fully qualified name occupying the short name of `fqn`, if any.
    fn occupant<'s>(&'s self, scope: &'s NameScope, fqn: &str) -> Option<&'s str> {
        let short = short_name(fqn);
        if let Some(imported) = scope.imported_as(short) {
            return Some(imported);
        }

        self.use_imports_by_file
            .get(&scope.file_key())?
            .iter()
            .find(|pending| short_name(pending).eq_ignore_ascii_case(short))
            .map(String::as_str)
    }
}

impl UseImportCommander for UseAddingCommander {
    fn is_short_imported(&self, scope: &NameScope, fqn: &str) -> bool {
        self.occupant(scope, fqn).is_some()
    }

    fn is_import_shortable(&self, scope: &NameScope, fqn: &str) -> bool {
        let fqn = fqn.trim_start_matches(NAMESPACE_SEPARATOR);
        self.occupant(scope, fqn)
            .is_some_and(|occupant| occupant.eq_ignore_ascii_case(fqn))
    }

    fn add_use_import(&mut self, scope: &NameScope, fqn: &str) {
        let fqn = fqn.trim_start_matches(NAMESPACE_SEPARATOR).to_string();
        if scope.uses.values().any(|existing| existing.eq_ignore_ascii_case(&fqn)) {
            return;
        }
        self.use_imports_by_file
            .entry(scope.file_key())
            .or_default()
            .insert(fqn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_imports_occupy_short_names() {
        let scope = NameScope::new(Some("App")).with_file("src/Foo.php");
        let mut commander = UseAddingCommander::new();
        assert!(!commander.is_short_imported(&scope, "Psr\\Log\\LoggerInterface"));

        commander.add_use_import(&scope, "\\Psr\\Log\\LoggerInterface");
        assert!(commander.is_short_imported(&scope, "Psr\\Log\\LoggerInterface"));
        assert!(commander.is_import_shortable(&scope, "Psr\\Log\\LoggerInterface"));

        // same short name, other class
        assert!(commander.is_short_imported(&scope, "Monolog\\LoggerInterface"));
        assert!(!commander.is_import_shortable(&scope, "Monolog\\LoggerInterface"));

        assert_eq!(commander.imports_for(&scope), vec!["Psr\\Log\\LoggerInterface"]);
    }

    #[test]
    fn test_existing_use_statements_count() {
        let scope = NameScope::new(Some("App")).with_use("Doctrine\\ORM\\EntityManager");
        let mut commander = UseAddingCommander::new();
        assert!(commander.is_import_shortable(&scope, "Doctrine\\ORM\\EntityManager"));

        commander.add_use_import(&scope, "Doctrine\\ORM\\EntityManager");
        assert!(commander.is_empty());
    }

    #[test]
    fn test_files_are_tracked_separately() {
        let first = NameScope::new(Some("App")).with_file("a.php");
        let second = NameScope::new(Some("App")).with_file("b.php");
        let mut commander = UseAddingCommander::new();
        commander.add_use_import(&first, "Vendor\\Thing");

        assert!(!commander.is_short_imported(&second, "Vendor\\Thing"));
        let drained = commander.drain();
        assert_eq!(drained.len(), 1);
        assert!(commander.is_empty());
    }
}
