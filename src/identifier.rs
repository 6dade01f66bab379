//! Resource identifiers.
//!
//! Every CDF resource can be addressed either by its platform-assigned
//! internal id or by a caller-assigned external id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest internal id the API accepts (2^53 - 1).
pub const MAX_VALID_INTERNAL_ID: u64 = 9_007_199_254_740_991;

/// Returns `true` if `id` lies in `1..=MAX_VALID_INTERNAL_ID`.
#[must_use]
pub const fn is_valid_internal_id(id: u64) -> bool {
    id >= 1 && id <= MAX_VALID_INTERNAL_ID
}

/// An internal id or an external id.
///
/// Serializes to the shape the API expects in by-id requests.
///
/// # Example
///
/// ```rust
/// use cognite_sdk::Identifier;
///
/// let by_xid = Identifier::external_id("pump-1");
/// assert_eq!(serde_json::to_string(&by_xid).unwrap(), r#"{"externalId":"pump-1"}"#);
/// assert_eq!(serde_json::to_string(&Identifier::Id(42)).unwrap(), r#"{"id":42}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identifier {
    /// Platform-assigned id.
    #[serde(rename = "id")]
    Id(u64),
    /// Caller-assigned id.
    #[serde(rename = "externalId")]
    ExternalId(String),
}

impl Identifier {
    /// Shorthand for [`Identifier::ExternalId`].
    #[must_use]
    pub fn external_id(xid: impl Into<String>) -> Self {
        Self::ExternalId(xid.into())
    }

    /// Returns the external id, if this is one.
    #[must_use]
    pub fn as_external_id(&self) -> Option<&str> {
        match self {
            Self::ExternalId(xid) => Some(xid),
            Self::Id(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::ExternalId(xid) => write!(f, "external_id={xid}"),
        }
    }
}
