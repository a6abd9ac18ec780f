//! Decision-support core for the Roadmap career-guidance site.
//!
//! The crate hosts the logic behind the interactive tools: the career
//! decision matrix, the APS calculator and pass advisor, the funding
//! eligibility wizard, the readiness checklist, and the weekly study
//! planner. Everything persists through a namespaced key-value store so
//! the tools can be exercised against an in-memory substrate in tests and
//! a flat file in the CLI host.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod tools;
