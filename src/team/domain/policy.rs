//! Admin succession policy.

use serde::{Deserialize, Serialize};

/// How a successor is picked when the admin leaves without naming one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessionPolicy {
    /// Pick uniformly at random among the remaining members.
    #[default]
    Random,
    /// Refuse to leave until the admin names a successor.
    Explicit,
}
