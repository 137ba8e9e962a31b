// Tue Jan 13 2026 - Alex

use thiserror::Error;

/// Fatal conditions of a generation run.
///
/// Every variant aborts the whole run; nothing is skipped or retried.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Unresolvable dependency cycle: {from} -> {to} (via {via})")]
    UnresolvableCycle {
        from: String,
        to: String,
        via: String,
    },
    #[error("Layout inconsistency in {node}, member {member}: {reason}")]
    LayoutInconsistency {
        node: String,
        member: String,
        reason: String,
    },
    #[error("Name space exhausted in scope {scope} for '{proposed}'")]
    NameSpaceExhausted {
        scope: String,
        proposed: String,
    },
    #[error("Dangling reference from {node} ({member}) to unknown index {target}")]
    DanglingReference {
        node: String,
        member: String,
        target: u64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    pub fn layout(node: &str, member: &str, reason: impl Into<String>) -> Self {
        Self::LayoutInconsistency {
            node: node.to_string(),
            member: member.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the four kinds raised by the core itself.
    pub fn is_core_fault(&self) -> bool {
        matches!(
            self,
            Self::UnresolvableCycle { .. }
                | Self::LayoutInconsistency { .. }
                | Self::NameSpaceExhausted { .. }
                | Self::DanglingReference { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprits() {
        let err = GeneratorError::UnresolvableCycle {
            from: "FX".to_string(),
            to: "FY".to_string(),
            via: "Other".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("FX"));
        assert!(text.contains("FY"));
        assert!(err.is_core_fault());

        let err = GeneratorError::layout("FVector", "X", "exceeds size");
        assert!(err.to_string().contains("FVector"));
        assert!(!GeneratorError::InvalidConfig("x".into()).is_core_fault());
    }
}
