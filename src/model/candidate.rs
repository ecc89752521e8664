use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque candidate identifier, stable across the candidate's lifetime.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl Display for CandidateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CandidateId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A proposed album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate unique ID.
    pub id: CandidateId,
    /// Title.
    pub primary_label: String,
    /// Artist.
    pub secondary_label: String,
    /// Cover art reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// When the candidate was proposed.
    pub created_at: DateTime<Utc>,
    /// Whether the candidate is in the selectable pool, as opposed to archived.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Candidate {
    /// Create a new, active candidate with no cover art.
    pub fn new(
        id: impl Into<CandidateId>,
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            primary_label: primary_label.into(),
            secondary_label: secondary_label.into(),
            image_ref: None,
            created_at,
            active: true,
        }
    }

    /// The `(primary, secondary)` label pair.
    pub fn labels(&self) -> (&str, &str) {
        (&self.primary_label, &self.secondary_label)
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.primary_label, self.secondary_label)
    }
}
