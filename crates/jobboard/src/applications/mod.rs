//! Applications submitted by applicants and reviewed by the posting recruiter.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationStatus, ApplicationView, NewApplication, StatusUpdate,
    TransitionError,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::ApplicationService;
