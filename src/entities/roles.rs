use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffRole {
    /// Manages seasons, teams, owners and staff
    Admin,
    /// Runs the live auction
    Auctioneer,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StaffRole {
    /// Convert from database string representation
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "AUCTIONEER" => Some(Self::Auctioneer),
            _ => None,
        }
    }

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Auctioneer => "AUCTIONEER",
        }
    }
}

/// Playing role of a registered cricketer. Stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeperBatsman,
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PlayerRole {
    pub const ALL: [Self; 4] = [
        Self::Batsman,
        Self::Bowler,
        Self::AllRounder,
        Self::WicketKeeperBatsman,
    ];

    /// Parse a role as typed on the registration form, e.g. `"All Rounder"` or
    /// `"all-rounder"`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace('-', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Self::ALL.into_iter().find(|r| r.as_str() == normalized)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Batsman => "batsman",
            Self::Bowler => "bowler",
            Self::AllRounder => "all rounder",
            Self::WicketKeeperBatsman => "wicket keeper batsman",
        }
    }
}
