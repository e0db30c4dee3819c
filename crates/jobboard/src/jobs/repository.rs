use super::domain::Job;
use crate::ids::{CompanyId, JobId, UserId};
use crate::store::RepositoryError;

/// Storage abstraction for job postings. Listings are returned newest first.
pub trait JobRepository: Send + Sync {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn delete_job(&self, id: &JobId) -> Result<Job, RepositoryError>;
    fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError>;
    fn jobs_by_company(&self, company: &CompanyId) -> Result<Vec<Job>, RepositoryError>;
}
