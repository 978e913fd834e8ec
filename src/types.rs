/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a notification fires before or after the change is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Before,
    After,
}

/// Kind of record change carried by a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Undelete,  // Restore of a previously deleted record, never has a before phase
}

impl Operation {
    /// Check if the platform supplies new record snapshots for this operation
    pub fn carries_new_records(&self) -> bool {
        matches!(self, Operation::Insert | Operation::Update | Operation::Undelete)
    }

    /// Check if the platform supplies old record snapshots for this operation
    pub fn carries_old_records(&self) -> bool {
        matches!(self, Operation::Update | Operation::Delete)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Before => write!(f, "before"),
            Phase::After => write!(f, "after"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert => write!(f, "insert"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Undelete => write!(f, "undelete"),
        }
    }
}
