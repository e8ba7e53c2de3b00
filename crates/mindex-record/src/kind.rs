use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// The kind of an index record.
///
/// The set is closed: every consumer matches exhaustively, so a new variant
/// has to be handled everywhere before the workspace builds again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// Chunk descriptor carrying the repository id.
    Descriptor,
    /// Listing of every group id in the index.
    AllGroups,
    /// Listing of the root group ids in the index.
    RootGroups,
    /// An artifact added to the repository.
    ArtifactAdd,
    /// A deletion marker for an artifact.
    ArtifactRemove,
}

impl RecordType {
    /// All record types, in declaration order.
    pub const ALL: [RecordType; 5] = [
        Self::Descriptor,
        Self::AllGroups,
        Self::RootGroups,
        Self::ArtifactAdd,
        Self::ArtifactRemove,
    ];

    /// The textual tag used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descriptor => "DESCRIPTOR",
            Self::AllGroups => "ALL_GROUPS",
            Self::RootGroups => "ROOT_GROUPS",
            Self::ArtifactAdd => "ARTIFACT_ADD",
            Self::ArtifactRemove => "ARTIFACT_REMOVE",
        }
    }

    /// Whether records of this type are keyed by artifact coordinates.
    pub fn is_artifact(&self) -> bool {
        matches!(self, Self::ArtifactAdd | Self::ArtifactRemove)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RecordError::UnknownType(s.to_string()))
    }
}
