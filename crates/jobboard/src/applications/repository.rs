use super::domain::Application;
use crate::ids::{ApplicationId, JobId, UserId};
use crate::store::RepositoryError;

/// Storage abstraction for applications. Listings are returned newest first.
pub trait ApplicationRepository: Send + Sync {
    fn insert_application(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update_application(&self, application: Application) -> Result<Application, RepositoryError>;
    fn find_application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// The application `applicant` already filed for `job`, if any.
    fn find_application_for(
        &self,
        applicant: &UserId,
        job: &JobId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn applications_by_recruiter(
        &self,
        recruiter: &UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
}
