use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Application, ApplicationStatus, ApplicationView, NewApplication, StatusUpdate};
use super::repository::ApplicationRepository;
use crate::companies::CompanyRepository;
use crate::error::BoardError;
use crate::identity::{Role, User, UserRepository};
use crate::ids::{ApplicationId, JobId};
use crate::jobs::service::expand_job;
use crate::jobs::JobRepository;
use crate::policy::{authorize, require_role, Action, Resource};
use crate::store::RepositoryError;
use crate::wire::non_empty;

const DUPLICATE_APPLICATION: &str = "You have already applied to this job";

/// Application intake for applicants and the review pipeline for recruiters.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

impl<S> ApplicationService<S>
where
    S: ApplicationRepository + JobRepository + CompanyRepository + UserRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn submit(&self, caller: &User, request: NewApplication) -> Result<Application, BoardError> {
        authorize(caller, Action::SubmitApplication, Resource::None)?;

        let job_id = JobId::parse(&request.job_id)?;
        let job = self
            .store
            .find_job(&job_id)?
            .ok_or_else(|| BoardError::not_found("Job not found"))?;

        if self
            .store
            .find_application_for(&caller.id, &job.id)?
            .is_some()
        {
            return Err(BoardError::conflict(DUPLICATE_APPLICATION));
        }

        let now = Utc::now();
        let application = Application {
            id: ApplicationId::new(),
            applicant_id: caller.id,
            job_id: job.id,
            recruiter_id: job.recruiter_id,
            resume_url: caller.resume_url().map(str::to_string),
            message: non_empty(request.message),
            status: ApplicationStatus::Submitted,
            applied_at: now,
            updated_at: now,
        };

        let application = self.store.insert_application(application).map_err(|err| match err {
            RepositoryError::Conflict(_) => BoardError::conflict(DUPLICATE_APPLICATION),
            other => other.into(),
        })?;
        info!(
            application_id = %application.id,
            job_id = %application.job_id,
            "application submitted"
        );
        Ok(application)
    }

    /// Recruiters get applications received for their postings, applicants the ones they sent.
    pub fn list_mine(&self, caller: &User) -> Result<Vec<ApplicationView>, BoardError> {
        let applications = match caller.role {
            Role::Recruiter => self.store.applications_by_recruiter(&caller.id)?,
            Role::Applicant => self.store.applications_by_applicant(&caller.id)?,
        };

        applications
            .into_iter()
            .map(|application| self.expand(caller.role, application))
            .collect()
    }

    pub fn update_status(
        &self,
        caller: &User,
        update: StatusUpdate,
    ) -> Result<Application, BoardError> {
        require_role(caller, Role::Recruiter, Action::TransitionApplication)?;

        let application_id = ApplicationId::parse(&update.id)?;
        let mut application = self
            .store
            .find_application(&application_id)?
            .ok_or_else(|| BoardError::not_found("Application not found"))?;
        authorize(
            caller,
            Action::TransitionApplication,
            Resource::Application(&application),
        )?;

        let previous = application.status;
        application
            .advance(update.status)
            .map_err(|err| BoardError::conflict(err.to_string()))?;

        let application = self.store.update_application(application)?;
        info!(
            application_id = %application.id,
            from = previous.label(),
            to = application.status.label(),
            "application status updated"
        );
        Ok(application)
    }

    fn expand(&self, viewer: Role, application: Application) -> Result<ApplicationView, BoardError> {
        let job = match self.store.find_job(&application.job_id)? {
            Some(job) => Some(expand_job(self.store.as_ref(), job)?),
            None => None,
        };

        let (applicant, recruiter) = match viewer {
            Role::Recruiter => (
                self.store
                    .find_user(&application.applicant_id)?
                    .map(|user| user.public_profile()),
                None,
            ),
            Role::Applicant => (
                None,
                self.store
                    .find_user(&application.recruiter_id)?
                    .map(|user| user.contact_card()),
            ),
        };

        Ok(ApplicationView {
            application,
            applicant,
            job,
            recruiter,
        })
    }
}
