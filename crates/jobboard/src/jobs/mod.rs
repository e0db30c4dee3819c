//! Job postings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Job, JobPatch, JobType, JobView, NewJob, WorkType};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::JobService;
