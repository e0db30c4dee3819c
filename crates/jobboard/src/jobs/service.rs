use std::sync::Arc;

use tracing::info;

use super::domain::{Job, JobPatch, JobView, NewJob};
use super::repository::JobRepository;
use crate::companies::{Company, CompanyRepository};
use crate::error::BoardError;
use crate::identity::{User, UserRepository};
use crate::ids::{CompanyId, JobId, UserId};
use crate::policy::{authorize, Action, Resource};

const COMPANY_NOT_OWNED: &str =
    "Company not found or you are not authorized to post jobs for this company";

/// Job postings: recruiter-side management and public browsing.
pub struct JobService<S> {
    store: Arc<S>,
}

impl<S> JobService<S>
where
    S: JobRepository + CompanyRepository + UserRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, caller: &User, request: NewJob) -> Result<Job, BoardError> {
        authorize(caller, Action::CreateJob, Resource::None)?;

        let company = self.owned_company(&request.company_id, &caller.id)?;
        let job = request.into_job(&company, caller.id)?;

        let job = self.store.insert_job(job)?;
        info!(job_id = %job.id, company_id = %company.id, "job posted");
        Ok(job)
    }

    pub fn list_all(&self) -> Result<Vec<JobView>, BoardError> {
        self.expand_all(self.store.all_jobs()?)
    }

    pub fn list_mine(&self, caller: &User) -> Result<Vec<JobView>, BoardError> {
        self.expand_all(self.store.jobs_by_recruiter(&caller.id)?)
    }

    pub fn get(&self, job_id: &JobId) -> Result<JobView, BoardError> {
        let job = self.load(job_id)?;
        expand_job(self.store.as_ref(), job)
    }

    pub fn list_by_company(&self, company_id: &CompanyId) -> Result<Vec<JobView>, BoardError> {
        self.expand_all(self.store.jobs_by_company(company_id)?)
    }

    pub fn update(&self, caller: &User, job_id: &JobId, patch: JobPatch) -> Result<Job, BoardError> {
        let mut job = self.load(job_id)?;
        authorize(caller, Action::UpdateJob, Resource::Job(&job))?;

        let target = patch
            .target_company()
            .map_err(|_| BoardError::bad_request(COMPANY_NOT_OWNED))?;
        if let Some(target) = target {
            if target != job.company_id {
                let company = self
                    .store
                    .find_owned_company(&target, &caller.id)?
                    .ok_or_else(|| BoardError::bad_request(COMPANY_NOT_OWNED))?;
                job.company_id = company.id;
            }
        }

        patch.apply(&mut job);
        Ok(self.store.update_job(job)?)
    }

    pub fn delete(&self, caller: &User, job_id: &JobId) -> Result<Job, BoardError> {
        let job = self.load(job_id)?;
        authorize(caller, Action::DeleteJob, Resource::Job(&job))?;

        let removed = self.store.delete_job(&job.id)?;
        info!(job_id = %removed.id, "job removed");
        Ok(removed)
    }

    fn load(&self, job_id: &JobId) -> Result<Job, BoardError> {
        self.store
            .find_job(job_id)?
            .ok_or_else(|| BoardError::not_found("Job not found"))
    }

    /// Ownership is proven by querying for the company under the caller, never trusted from
    /// input. A malformed, unknown, or foreign company id are all the same `BadRequest`.
    fn owned_company(&self, raw_id: &str, recruiter: &UserId) -> Result<Company, BoardError> {
        let not_owned = || BoardError::bad_request(COMPANY_NOT_OWNED);
        let company_id = CompanyId::parse(raw_id).map_err(|_| not_owned())?;
        self.store
            .find_owned_company(&company_id, recruiter)?
            .ok_or_else(not_owned)
    }

    fn expand_all(&self, jobs: Vec<Job>) -> Result<Vec<JobView>, BoardError> {
        jobs.into_iter()
            .map(|job| expand_job(self.store.as_ref(), job))
            .collect()
    }
}

/// Attach the company and the recruiter's contact card. Dangling references expand to nothing.
pub(crate) fn expand_job<S>(store: &S, job: Job) -> Result<JobView, BoardError>
where
    S: CompanyRepository + UserRepository + ?Sized,
{
    let company = store.find_company(&job.company_id)?;
    let recruiter = store
        .find_user(&job.recruiter_id)?
        .map(|user| user.contact_card());
    Ok(JobView {
        job,
        company,
        recruiter,
    })
}
