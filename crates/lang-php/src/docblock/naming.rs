//! Tag name normalization.

/// `var`, `@var` -> `@var`.
pub fn normalize_tag_name(name: &str) -> String {
    format!("@{}", name.trim().trim_start_matches('@'))
}

/// The annotation class a tag name refers to: `@DI\Inject` -> `DI\Inject`.
pub fn annotation_class(name: &str) -> &str {
    name.trim_start_matches('@').trim_start_matches('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name("var"), "@var");
        assert_eq!(normalize_tag_name("@return"), "@return");
        assert_eq!(annotation_class("@\\JMS\\Inject"), "JMS\\Inject");
    }
}
