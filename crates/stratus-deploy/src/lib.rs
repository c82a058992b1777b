//! Cluster actions for stratus.
//!
//! An action is a fixed, linear sequence of resource manager calls: no
//! branching, no rollback, no continue-on-error. Errors propagate to the
//! caller untouched.

pub mod action;
pub mod bootstrap;
pub mod teardown;

// Re-exports
pub use action::{ActionContext, ClusterAction};
pub use bootstrap::ClusterBootstrap;
pub use teardown::ClusterTeardown;
