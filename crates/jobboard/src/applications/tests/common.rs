use std::sync::Arc;

use crate::applications::{Application, ApplicationRepository, NewApplication};
use crate::board::JobBoard;
use crate::companies::{Company, CompanyRepository};
use crate::config::AuthConfig;
use crate::identity::{Role, User, UserRepository};
use crate::ids::{ApplicationId, CompanyId, JobId, UserId};
use crate::jobs::{Job, JobRepository};
use crate::store::{MemoryObjectStorage, MemoryStore, RepositoryError};
use crate::test_support::{Fixture, FILES_BASE};

/// One recruiter with a company and a posting, one applicant, and a second recruiter.
pub(super) struct HiringScene {
    pub fixture: Fixture,
    pub recruiter: User,
    pub recruiter_cookie: String,
    pub rival: User,
    pub rival_cookie: String,
    pub applicant: User,
    pub applicant_cookie: String,
    pub company: Company,
    pub job: Job,
}

pub(super) async fn hiring_scene() -> HiringScene {
    let fixture = Fixture::new();
    let (recruiter, recruiter_cookie) = fixture.register("Rita", "rita@acme.io", Role::Recruiter).await;
    let (rival, rival_cookie) = fixture.register("Ray", "ray@rival.io", Role::Recruiter).await;
    let (applicant, applicant_cookie) = fixture.register("Ada", "ada@example.com", Role::Applicant).await;
    let company = fixture.company(&recruiter, "Acme");
    let job = fixture.job(&recruiter, &company, "Backend Engineer");

    HiringScene {
        fixture,
        recruiter,
        recruiter_cookie,
        rival,
        rival_cookie,
        applicant,
        applicant_cookie,
        company,
        job,
    }
}

pub(super) fn application_for(job: &Job) -> NewApplication {
    NewApplication {
        job_id: job.id.to_string(),
        message: Some("I would love to join".to_string()),
    }
}

/// Delegates to an in-memory store but refuses every application write.
#[derive(Debug, Default)]
pub(super) struct ReadOnlyApplications {
    inner: MemoryStore,
}

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("applications collection offline".to_string())
}

impl UserRepository for ReadOnlyApplications {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        self.inner.insert_user(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        self.inner.update_user(user)
    }

    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.inner.find_user(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.inner.find_user_by_email(email)
    }
}

impl CompanyRepository for ReadOnlyApplications {
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError> {
        self.inner.insert_company(company)
    }

    fn update_company(&self, company: Company) -> Result<Company, RepositoryError> {
        self.inner.update_company(company)
    }

    fn find_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        self.inner.find_company(id)
    }

    fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        self.inner.find_company_by_name(name)
    }

    fn find_owned_company(
        &self,
        id: &CompanyId,
        recruiter: &UserId,
    ) -> Result<Option<Company>, RepositoryError> {
        self.inner.find_owned_company(id, recruiter)
    }

    fn companies_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Company>, RepositoryError> {
        self.inner.companies_by_recruiter(recruiter)
    }

    fn all_companies(&self) -> Result<Vec<Company>, RepositoryError> {
        self.inner.all_companies()
    }
}

impl JobRepository for ReadOnlyApplications {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.insert_job(job)
    }

    fn update_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.update_job(job)
    }

    fn delete_job(&self, id: &JobId) -> Result<Job, RepositoryError> {
        self.inner.delete_job(id)
    }

    fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.find_job(id)
    }

    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.inner.all_jobs()
    }

    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        self.inner.jobs_by_recruiter(recruiter)
    }

    fn jobs_by_company(&self, company: &CompanyId) -> Result<Vec<Job>, RepositoryError> {
        self.inner.jobs_by_company(company)
    }
}

impl ApplicationRepository for ReadOnlyApplications {
    fn insert_application(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(unavailable())
    }

    fn update_application(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(unavailable())
    }

    fn find_application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.inner.find_application(id)
    }

    fn find_application_for(
        &self,
        applicant: &UserId,
        job: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        self.inner.find_application_for(applicant, job)
    }

    fn applications_by_recruiter(
        &self,
        recruiter: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.inner.applications_by_recruiter(recruiter)
    }

    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.inner.applications_by_applicant(applicant)
    }
}

pub(super) fn read_only_board() -> Arc<JobBoard<ReadOnlyApplications, MemoryObjectStorage>> {
    Arc::new(JobBoard::new(
        Arc::new(ReadOnlyApplications::default()),
        Arc::new(MemoryObjectStorage::new(FILES_BASE)),
        &AuthConfig::for_tests(),
    ))
}
