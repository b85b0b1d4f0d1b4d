//! Grade derivation and performance aggregation for the records tracker
//! dashboards, plus the stdio sidecar that serves them.

pub mod calc;
pub mod config;
pub mod entry;
pub mod grade;
pub mod ipc;
pub mod notify;
pub mod records;
pub mod trend;
