//! In-process implementations of the store and object storage, used by the server's default
//! wiring, the demo command, and tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::RepositoryError;
use crate::applications::{Application, ApplicationRepository};
use crate::companies::{Company, CompanyRepository};
use crate::identity::{User, UserRepository};
use crate::ids::{ApplicationId, CompanyId, JobId, UserId};
use crate::jobs::{Job, JobRepository};
use crate::storage::{ObjectStorage, PutObject, StorageError, StoredObject};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
}

fn same_name(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

/// Document store kept in insertion order behind per-collection locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    companies: Mutex<Vec<Company>>,
    jobs: Mutex<Vec<Job>>,
    applications: Mutex<Vec<Application>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = lock(&self.users)?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict("User already exists".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = lock(&self.users)?;
        if users
            .iter()
            .any(|existing| existing.id != user.id && existing.email == user.email)
        {
            return Err(RepositoryError::Conflict("Email already in use".to_string()));
        }
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = lock(&self.users)?;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = lock(&self.users)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}

impl CompanyRepository for MemoryStore {
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut companies = lock(&self.companies)?;
        if companies
            .iter()
            .any(|existing| same_name(&existing.company_name, &company.company_name))
        {
            return Err(RepositoryError::Conflict(
                "Company with this name already exists".to_string(),
            ));
        }
        companies.push(company.clone());
        Ok(company)
    }

    fn update_company(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut companies = lock(&self.companies)?;
        if companies.iter().any(|existing| {
            existing.id != company.id && same_name(&existing.company_name, &company.company_name)
        }) {
            return Err(RepositoryError::Conflict(
                "Company with this name already exists".to_string(),
            ));
        }
        let slot = companies
            .iter_mut()
            .find(|existing| existing.id == company.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = company.clone();
        Ok(company)
    }

    fn find_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let companies = lock(&self.companies)?;
        Ok(companies.iter().find(|company| company.id == *id).cloned())
    }

    fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        let companies = lock(&self.companies)?;
        Ok(companies
            .iter()
            .find(|company| same_name(&company.company_name, name))
            .cloned())
    }

    fn find_owned_company(
        &self,
        id: &CompanyId,
        recruiter: &UserId,
    ) -> Result<Option<Company>, RepositoryError> {
        let companies = lock(&self.companies)?;
        Ok(companies
            .iter()
            .find(|company| company.id == *id && company.recruiter_id == *recruiter)
            .cloned())
    }

    fn companies_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Company>, RepositoryError> {
        let companies = lock(&self.companies)?;
        Ok(companies
            .iter()
            .filter(|company| company.recruiter_id == *recruiter)
            .cloned()
            .collect())
    }

    fn all_companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(lock(&self.companies)?.clone())
    }
}

impl JobRepository for MemoryStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut jobs = lock(&self.jobs)?;
        if jobs.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict("job already exists".to_string()));
        }
        jobs.push(job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut jobs = lock(&self.jobs)?;
        let slot = jobs
            .iter_mut()
            .find(|existing| existing.id == job.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = job.clone();
        Ok(job)
    }

    fn delete_job(&self, id: &JobId) -> Result<Job, RepositoryError> {
        let mut jobs = lock(&self.jobs)?;
        let index = jobs
            .iter()
            .position(|job| job.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(jobs.remove(index))
    }

    fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let jobs = lock(&self.jobs)?;
        Ok(jobs.iter().find(|job| job.id == *id).cloned())
    }

    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let jobs = lock(&self.jobs)?;
        Ok(jobs.iter().rev().cloned().collect())
    }

    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        let jobs = lock(&self.jobs)?;
        Ok(jobs
            .iter()
            .rev()
            .filter(|job| job.recruiter_id == *recruiter)
            .cloned()
            .collect())
    }

    fn jobs_by_company(&self, company: &CompanyId) -> Result<Vec<Job>, RepositoryError> {
        let jobs = lock(&self.jobs)?;
        Ok(jobs
            .iter()
            .rev()
            .filter(|job| job.company_id == *company)
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut applications = lock(&self.applications)?;
        if applications.iter().any(|existing| {
            existing.applicant_id == application.applicant_id && existing.job_id == application.job_id
        }) {
            return Err(RepositoryError::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }
        applications.push(application.clone());
        Ok(application)
    }

    fn update_application(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut applications = lock(&self.applications)?;
        let slot = applications
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = application.clone();
        Ok(application)
    }

    fn find_application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let applications = lock(&self.applications)?;
        Ok(applications
            .iter()
            .find(|application| application.id == *id)
            .cloned())
    }

    fn find_application_for(
        &self,
        applicant: &UserId,
        job: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        let applications = lock(&self.applications)?;
        Ok(applications
            .iter()
            .find(|application| application.applicant_id == *applicant && application.job_id == *job)
            .cloned())
    }

    fn applications_by_recruiter(
        &self,
        recruiter: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let applications = lock(&self.applications)?;
        Ok(applications
            .iter()
            .rev()
            .filter(|application| application.recruiter_id == *recruiter)
            .cloned()
            .collect())
    }

    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let applications = lock(&self.applications)?;
        Ok(applications
            .iter()
            .rev()
            .filter(|application| application.applicant_id == *applicant)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Object storage that keeps blobs in memory and mints URLs under a public base.
#[derive(Debug)]
pub struct MemoryObjectStorage {
    public_base_url: String,
    objects: Mutex<BTreeMap<String, StoredBlob>>,
}

impl MemoryObjectStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    /// Object currently stored under `folder/public_id`.
    pub fn object(&self, folder: &str, public_id: &str) -> Option<StoredBlob> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(&format!("{folder}/{public_id}")).cloned())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStorage for MemoryObjectStorage {
    fn put(&self, object: PutObject) -> Result<StoredObject, StorageError> {
        let key = format!("{}/{}", object.folder, object.public_id);
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Transport("object storage lock poisoned".to_string()))?;
        objects.insert(
            key.clone(),
            StoredBlob {
                content_type: object.content_type,
                bytes: object.bytes,
            },
        );

        Ok(StoredObject {
            url: format!("{}/{}", self.public_base_url, key),
            public_id: object.public_id,
        })
    }

    fn delete(&self, folder: &str, public_id: &str) -> Result<(), StorageError> {
        let key = format!("{folder}/{public_id}");
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Transport("object storage lock poisoned".to_string()))?;
        objects
            .remove(&key)
            .map(|_| ())
            .ok_or(StorageError::NotFound(key))
    }
}
