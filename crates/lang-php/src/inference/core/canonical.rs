//! Static type to canonical type strings.
//!
//! Unions and intersections both flatten to "every type string that appears
//! anywhere": consumers only need the enumerated possibilities.

use docsync_api::models::StaticType;
use indexmap::IndexSet;

pub const MIXED_ARRAY: &str = "mixed[]";

/// Resolve a static type into its canonical strings, e.g. `int`, `\Foo\Bar`,
/// `Foo[]`. `None` yields the empty set.
pub fn resolve(static_type: Option<&StaticType>) -> IndexSet<String> {
    match static_type {
        Some(ty) => resolve_type(ty),
        None => IndexSet::new(),
    }
}

fn resolve_type(ty: &StaticType) -> IndexSet<String> {
    match ty {
        StaticType::Primitive(kind) => kind.keyword().map(str::to_string).into_iter().collect(),
        StaticType::ArrayOf(item) => {
            let items = resolve_type(item);
            if items.is_empty() {
                return IndexSet::from([MIXED_ARRAY.to_string()]);
            }
            items.into_iter().map(|item| format!("{}[]", item)).collect()
        }
        StaticType::Union(members) => members.iter().flat_map(resolve_type).collect(),
        StaticType::Intersection(members) => {
            let types: IndexSet<String> = members.iter().flat_map(resolve_type).collect();
            remove_mixed_array_if_specific_present(types)
        }
        StaticType::Named(fqn) => IndexSet::from([format!("\\{}", fqn)]),
    }
}

/// `mixed[]` is redundant once a concrete array element type was observed.
fn remove_mixed_array_if_specific_present(mut types: IndexSet<String>) -> IndexSet<String> {
    let has_specific_array = types
        .iter()
        .any(|t| t.ends_with("[]") && t != MIXED_ARRAY);
    if has_specific_array {
        types.shift_remove(MIXED_ARRAY);
    }
    types
}
