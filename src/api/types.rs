use std::str::FromStr;

use serde::Deserialize;

/// One entry of the `homeworks` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkItemRecord {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: String,
}

/// The closed set of review states the API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Fixed operator-facing text for this state.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Review completed: the reviewer liked everything. Hooray!",
            ReviewStatus::Reviewing => "The work has been taken up for review by the reviewer.",
            ReviewStatus::Rejected => "Review completed: the reviewer has comments.",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReviewStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or(())
    }
}
