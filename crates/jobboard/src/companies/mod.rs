//! Recruiter-owned companies.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Company, CompanyPatch, NewCompany};
pub use repository::CompanyRepository;
pub use router::company_router;
pub use service::CompanyService;
