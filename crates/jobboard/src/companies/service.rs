use std::sync::Arc;

use tracing::info;

use super::domain::{Company, CompanyPatch, NewCompany};
use super::repository::CompanyRepository;
use crate::error::BoardError;
use crate::identity::User;
use crate::ids::{CompanyId, UserId};
use crate::policy::{authorize, Action, Resource};
use crate::storage::{ObjectStorage, PutObject, UploadKind, UploadedFile};

const DUPLICATE_NAME: &str = "Company with this name already exists";

/// Company lifecycle for recruiters plus the public company directory.
pub struct CompanyService<S, O> {
    store: Arc<S>,
    storage: Arc<O>,
}

impl<S, O> CompanyService<S, O>
where
    S: CompanyRepository + 'static,
    O: ObjectStorage + 'static,
{
    pub fn new(store: Arc<S>, storage: Arc<O>) -> Self {
        Self { store, storage }
    }

    pub fn create(&self, caller: &User, request: NewCompany) -> Result<Company, BoardError> {
        authorize(caller, Action::CreateCompany, Resource::None)?;

        let company = request.into_company(caller.id)?;
        if self
            .store
            .find_company_by_name(&company.company_name)?
            .is_some()
        {
            return Err(BoardError::conflict(DUPLICATE_NAME));
        }

        let company = self.store.insert_company(company)?;
        info!(company_id = %company.id, recruiter_id = %caller.id, "company created");
        Ok(company)
    }

    pub fn list_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Company>, BoardError> {
        Ok(self.store.companies_by_recruiter(recruiter)?)
    }

    pub fn list_all(&self) -> Result<Vec<Company>, BoardError> {
        Ok(self.store.all_companies()?)
    }

    pub fn update(
        &self,
        caller: &User,
        company_id: &CompanyId,
        patch: CompanyPatch,
    ) -> Result<Company, BoardError> {
        let mut company = self
            .store
            .find_company(company_id)?
            .ok_or_else(|| BoardError::not_found("Company not found"))?;
        authorize(caller, Action::UpdateCompany, Resource::Company(&company))?;

        if let Some(name) = patch.new_name() {
            let taken = self
                .store
                .find_company_by_name(&name)?
                .is_some_and(|other| other.id != company.id);
            if taken {
                return Err(BoardError::conflict(DUPLICATE_NAME));
            }
        }

        patch.apply(&mut company);
        Ok(self.store.update_company(company)?)
    }

    /// Store a logo keyed by the recruiter and attach it to the recruiter's first company.
    pub fn upload_logo(&self, caller: &User, file: UploadedFile) -> Result<Company, BoardError> {
        authorize(caller, Action::UploadCompanyLogo, Resource::None)?;
        UploadKind::Logo.check(&file)?;

        let mut company = self
            .store
            .companies_by_recruiter(&caller.id)?
            .into_iter()
            .next()
            .ok_or_else(|| BoardError::not_found("No company found for this recruiter"))?;

        let stored = self.storage.put(PutObject::new(
            UploadKind::Logo,
            UploadKind::Logo.public_id(caller.id),
            file,
        ))?;
        company.logo_url = Some(stored.url);

        let company = self.store.update_company(company)?;
        info!(company_id = %company.id, "company logo updated");
        Ok(company)
    }
}
