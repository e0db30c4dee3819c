//! Job-board backend: identity, companies, job postings, and applications behind one
//! cookie-authenticated HTTP surface.

pub mod applications;
pub mod board;
pub mod companies;
pub mod config;
pub mod error;
pub mod extract;
pub mod identity;
pub mod ids;
pub mod jobs;
pub mod policy;
pub mod session;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod wire;

#[cfg(test)]
mod test_support;

pub use board::{board_router, JobBoard};
