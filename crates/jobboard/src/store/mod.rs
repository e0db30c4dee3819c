//! Persistence seams.
//!
//! Each record module declares its own repository trait; a [`DocumentStore`] is anything that
//! implements all of them, so services can share a single injected store.

pub mod memory;

use crate::applications::ApplicationRepository;
use crate::companies::CompanyRepository;
use crate::identity::UserRepository;
use crate::jobs::JobRepository;

pub use memory::{MemoryObjectStorage, MemoryStore};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub trait DocumentStore:
    UserRepository + CompanyRepository + JobRepository + ApplicationRepository
{
}

impl<T> DocumentStore for T where
    T: UserRepository + CompanyRepository + JobRepository + ApplicationRepository
{
}
