//! Enumerated lead attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a lead in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    /// Just entered the pipeline.
    #[default]
    New,
    Qualified,
    Proposal,
    Negotiation,
    /// Deal signed.
    #[serde(rename = "Closed Won")]
    ClosedWon,
    /// Deal lost or abandoned.
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl LeadStatus {
    /// All statuses in pipeline order.
    pub const ALL: [LeadStatus; 6] = [
        Self::New,
        Self::Qualified,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    /// Converts the status to its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// Parses a status from its wire string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Returns true once the deal is decided either way.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How warm the relationship with a lead currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Temperature {
    Hot,
    #[default]
    Warm,
    Cold,
}

impl Temperature {
    pub const ALL: [Temperature; 3] = [Self::Hot, Self::Warm, Self::Cold];

    /// Converts the temperature to its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Warm => "Warm",
            Self::Cold => "Cold",
        }
    }

    /// Parses a temperature from its wire string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
