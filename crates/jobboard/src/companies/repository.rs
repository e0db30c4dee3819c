use super::domain::Company;
use crate::ids::{CompanyId, UserId};
use crate::store::RepositoryError;

/// Storage abstraction for companies. Names are unique (case-insensitive).
pub trait CompanyRepository: Send + Sync {
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError>;
    fn update_company(&self, company: Company) -> Result<Company, RepositoryError>;
    fn find_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
    fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError>;
    /// The company with `id` only if `recruiter` owns it; the ownership proof for job postings.
    fn find_owned_company(
        &self,
        id: &CompanyId,
        recruiter: &UserId,
    ) -> Result<Option<Company>, RepositoryError>;
    /// Companies owned by `recruiter`, in creation order.
    fn companies_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Company>, RepositoryError>;
    fn all_companies(&self) -> Result<Vec<Company>, RepositoryError>;
}
