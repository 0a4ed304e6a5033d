#[derive(Debug, thiserror::Error)]
pub enum DocsyncError {
    /// The surrounding framework broke a precondition of an accessor.
    #[error("Contract violation in {accessor}: {message}")]
    ContractViolation {
        accessor: &'static str,
        message: String,
    },
    #[error("Tag \"{tag}\" was not found at \"{node}\" node.")]
    MissingTag { tag: String, node: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocsyncError {
    pub fn contract(accessor: &'static str, message: impl Into<String>) -> Self {
        DocsyncError::ContractViolation {
            accessor,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tag_message_names_tag_and_node() {
        let err = DocsyncError::MissingTag {
            tag: "var".to_string(),
            node: "property $name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tag \"var\" was not found at \"property $name\" node."
        );
    }

    #[test]
    fn test_contract_violation_names_accessor() {
        let err =
            DocsyncError::contract("create_php_doc_info_from_node", "node must have a comment");
        assert!(err.to_string().contains("create_php_doc_info_from_node"));
    }
}
