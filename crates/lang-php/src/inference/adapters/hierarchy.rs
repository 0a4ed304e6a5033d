use docsync_api::oracle::{ClassRegistry, SubtypeOracle};
use std::collections::{HashMap, HashSet, VecDeque};

/// Known classes and their direct parents (superclass and interfaces).
///
/// Class names are compared case-insensitively and without a leading `\`.
#[derive(Debug, Default, Clone)]
pub struct ClassHierarchy {
    parents: HashMap<String, Vec<String>>,
}

fn key(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fqn` with its direct parents.
    pub fn with_class(mut self, fqn: &str, parents: &[&str]) -> Self {
        self.add_class(fqn, parents);
        self
    }

    pub fn add_class(&mut self, fqn: &str, parents: &[&str]) {
        let entry = self.parents.entry(key(fqn)).or_default();
        entry.extend(parents.iter().map(|parent| key(parent)));
    }

    /// All ancestors of `fqn`, nearest first.
    pub fn ancestors(&self, fqn: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        let mut ancestors = Vec::new();

        queue.push_back(key(fqn));
        while let Some(current) = queue.pop_front() {
            let Some(parents) = self.parents.get(&current) else {
                continue;
            };
            for parent in parents {
                if visited.insert(parent.clone()) {
                    ancestors.push(parent.clone());
                    queue.push_back(parent.clone());
                }
            }
        }
        ancestors
    }
}

impl SubtypeOracle for ClassHierarchy {
    fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool {
        let ancestor = key(ancestor);
        if key(name) == ancestor {
            return true;
        }
        self.ancestors(name).contains(&ancestor)
    }
}

impl ClassRegistry for ClassHierarchy {
    fn class_exists(&self, fqn: &str) -> bool {
        let fqn = key(fqn);
        self.parents.contains_key(&fqn) || self.parents.values().any(|p| p.contains(&fqn))
    }
}
