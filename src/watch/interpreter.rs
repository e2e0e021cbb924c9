use thiserror::Error;

use crate::api::types::{ReviewStatus, WorkItemRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("undocumented status `{0}`")]
    UnknownStatus(String),
}

/// Turn a work item into the operator message for its current status.
pub fn interpret(record: &WorkItemRecord) -> Result<String, InterpretError> {
    let status: ReviewStatus = record
        .status
        .parse()
        .map_err(|_| InterpretError::UnknownStatus(record.status.clone()))?;

    Ok(format!(
        "Changed review status for \"{}\". {}",
        record.name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: &str) -> WorkItemRecord {
        WorkItemRecord {
            name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_known_statuses_render_verdicts() {
        assert_eq!(
            interpret(&record("hw1", "approved")).unwrap(),
            "Changed review status for \"hw1\". Review completed: the reviewer liked everything. Hooray!"
        );
        assert_eq!(
            interpret(&record("hw1", "reviewing")).unwrap(),
            "Changed review status for \"hw1\". The work has been taken up for review by the reviewer."
        );
        assert_eq!(
            interpret(&record("hw2", "rejected")).unwrap(),
            "Changed review status for \"hw2\". Review completed: the reviewer has comments."
        );
    }

    #[test]
    fn test_unknown_status() {
        for status in ["", "APPROVED", "pending", "approved "] {
            assert_eq!(
                interpret(&record("hw1", status)),
                Err(InterpretError::UnknownStatus(status.to_string()))
            );
        }
    }
}
