//! Read-only dashboard services.

mod views;

pub use views::{AssigneeScope, DashboardError, DashboardResult, DashboardService};
