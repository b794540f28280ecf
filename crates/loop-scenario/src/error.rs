//! Error types for patch sets
//!
//! A patch set that fails validation is a programming error in the scenario
//! that produced it. Nothing is applied when validation fails.

use loop_model::CollectionKind;

/// Patch set validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// More than one patch targets the same collection
    #[error("collection patched more than once: {0}")]
    DuplicateCollection(CollectionKind),

    /// A service update names a service that does not exist
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// A service update list names the same service more than once
    #[error("service updated more than once: {0}")]
    DuplicateService(String),

    /// A prepended entity reuses an existing id
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId {
        /// Collection the entity was prepended to
        collection: CollectionKind,
        /// The clashing id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_error_display() {
        let err = PatchError::UnknownService("svc-99".to_string());
        assert_eq!(err.to_string(), "unknown service: svc-99");

        let err = PatchError::DuplicateId {
            collection: CollectionKind::Incidents,
            id: "inc-1".to_string(),
        };
        assert!(err.to_string().contains("incidents"));

        let err = PatchError::DuplicateService("svc-2".to_string());
        assert_eq!(err.to_string(), "service updated more than once: svc-2");
    }
}
