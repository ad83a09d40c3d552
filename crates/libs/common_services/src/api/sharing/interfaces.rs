use serde::{Deserialize, Serialize};

/// What one reconciliation pass changed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSummary {
    pub accepted_invites: usize,
    pub expired_invites: usize,
    pub accepted_family: usize,
}
