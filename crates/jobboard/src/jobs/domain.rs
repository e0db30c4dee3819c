use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companies::Company;
use crate::error::BoardError;
use crate::identity::{normalize_skills, ContactCard, Location};
use crate::ids::{CompanyId, JobId, UserId};
use crate::wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    OnSite,
    Remote,
    Hybrid,
}

/// A posting owned by one company and attributed to the recruiter who owns that company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub job_type: JobType,
    pub work_type: WorkType,
    #[serde(default)]
    pub skills: Vec<String>,
    pub company_id: CompanyId,
    pub recruiter_id: UserId,
    pub posted_at: DateTime<Utc>,
}

/// Body of a job posting request. `company` is accepted as an alias of `companyId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[serde(alias = "company")]
    pub company_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "wire::structured")]
    pub location: Option<Location>,
    pub job_type: JobType,
    pub work_type: WorkType,
    #[serde(default, deserialize_with = "wire::structured")]
    pub skills: Option<Vec<String>>,
}

impl NewJob {
    /// Build the record once the company has been verified as owned by `recruiter_id`.
    pub(crate) fn into_job(self, company: &Company, recruiter_id: UserId) -> Result<Job, BoardError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(BoardError::bad_request("title is required"));
        }

        Ok(Job {
            id: JobId::new(),
            title,
            description: wire::non_empty(self.description),
            salary: wire::non_empty(self.salary),
            location: self.location,
            job_type: self.job_type,
            work_type: self.work_type,
            skills: self
                .skills
                .as_deref()
                .map(normalize_skills)
                .unwrap_or_default(),
            company_id: company.id,
            recruiter_id,
            posted_at: Utc::now(),
        })
    }
}

/// Partial job update. Absent fields and blank strings are untouched; `null` clears
/// description, salary, or location. Moving to another company goes through the same
/// ownership proof as posting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "wire::clearable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "wire::clearable")]
    pub salary: Option<Option<String>>,
    #[serde(default, deserialize_with = "wire::clearable_structured")]
    pub location: Option<Option<Location>>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub work_type: Option<WorkType>,
    #[serde(default, alias = "company")]
    pub company_id: Option<String>,
    #[serde(default, deserialize_with = "wire::structured")]
    pub skills: Option<Vec<String>>,
}

impl JobPatch {
    /// The target company if this patch moves the job.
    pub fn target_company(&self) -> Result<Option<CompanyId>, BoardError> {
        wire::non_empty(self.company_id.clone())
            .map(|raw| CompanyId::parse(&raw))
            .transpose()
    }

    pub(crate) fn apply(self, job: &mut Job) {
        if let Some(title) = wire::non_empty(self.title) {
            job.title = title;
        }
        wire::merge_text(&mut job.description, self.description);
        wire::merge_text(&mut job.salary, self.salary);
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
        if let Some(work_type) = self.work_type {
            job.work_type = work_type;
        }
        if let Some(skills) = self.skills {
            job.skills = normalize_skills(&skills);
        }
    }
}

/// A job with its company and recruiter expanded for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<ContactCard>,
}
