//! Error type for hierarchy creation.

use thiserror::Error;

use crate::clients::HttpError;
use crate::hierarchy::outcome::OutcomeSet;
use crate::hierarchy::validate::ValidationReport;

/// Error returned by `create_hierarchy`.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::hierarchy::{validate, AssetNode, HierarchyError};
///
/// let report = validate(&[AssetNode::new("a", "A").with_parent("a")]);
/// let error = HierarchyError::InvalidStructure(report);
///
/// assert!(error.to_string().contains("cycles: 1"));
/// assert!(!error.may_have_written());
/// ```
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The input failed validation. Nothing was sent.
    #[error("Invalid asset hierarchy ({0})")]
    InvalidStructure(ValidationReport),

    /// Some nodes were not created.
    #[error("Asset hierarchy was only partially created ({0})")]
    PartialSubmission(OutcomeSet),

    /// Looking up parents outside the input failed. Nothing was created.
    #[error("Failed to check for existing parent assets: {0}")]
    ExistenceCheck(#[source] HttpError),
}

impl HierarchyError {
    /// Returns `true` if any asset may have been written before the error.
    #[must_use]
    pub fn may_have_written(&self) -> bool {
        match self {
            Self::PartialSubmission(outcome) => {
                !outcome.created.is_empty() || !outcome.unknown.is_empty()
            }
            Self::InvalidStructure(_) | Self::ExistenceCheck(_) => false,
        }
    }

    /// Returns the validation report of a structure error.
    #[must_use]
    pub const fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::InvalidStructure(report) => Some(report),
            _ => None,
        }
    }

    /// Returns the outcome of a partial submission.
    #[must_use]
    pub const fn outcome(&self) -> Option<&OutcomeSet> {
        match self {
            Self::PartialSubmission(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{AssetNode, CreatedAsset};

    #[test]
    fn test_partial_submission_message() {
        let error = HierarchyError::PartialSubmission(OutcomeSet {
            created: vec![CreatedAsset {
                external_id: "root".to_string(),
                id: 10,
            }],
            unknown: vec![AssetNode::new("child", "Child")],
            failed: vec![],
        });
        assert_eq!(
            error.to_string(),
            "Asset hierarchy was only partially created (created: 1, unknown: 1, failed: 0)"
        );
        assert!(error.may_have_written());
        assert!(error.outcome().is_some());
        assert!(error.report().is_none());
    }

    #[test]
    fn test_only_failures_wrote_nothing() {
        let error = HierarchyError::PartialSubmission(OutcomeSet {
            failed: vec![AssetNode::new("a", "A")],
            ..OutcomeSet::default()
        });
        assert!(!error.may_have_written());
    }
}
