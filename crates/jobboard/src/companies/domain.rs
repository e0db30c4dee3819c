use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::identity::Location;
use crate::ids::{CompanyId, UserId};
use crate::wire;

/// Recruiter-owned organization. Only the owning recruiter may mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub recruiter_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    #[serde(alias = "name")]
    pub company_name: String,
    #[serde(default, deserialize_with = "wire::structured")]
    pub location: Option<Location>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCompany {
    pub(crate) fn into_company(self, recruiter_id: UserId) -> Result<Company, BoardError> {
        let company_name = self.company_name.trim().to_string();
        if company_name.is_empty() {
            return Err(BoardError::bad_request("companyName is required"));
        }

        Ok(Company {
            id: CompanyId::new(),
            company_name,
            location: self.location,
            website: wire::non_empty(self.website),
            description: wire::non_empty(self.description),
            logo_url: None,
            recruiter_id,
            created_at: Utc::now(),
        })
    }
}

/// Partial company update.
///
/// Absent fields and empty strings leave the stored value untouched; an explicit `null`
/// clears location, website, or description. The name can be changed but never cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default, alias = "name")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "wire::clearable_structured")]
    pub location: Option<Option<Location>>,
    #[serde(default, deserialize_with = "wire::clearable")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "wire::clearable")]
    pub description: Option<Option<String>>,
}

impl CompanyPatch {
    /// The new name, if this patch renames the company.
    pub fn new_name(&self) -> Option<String> {
        wire::non_empty(self.company_name.clone())
    }

    pub(crate) fn apply(self, company: &mut Company) {
        if let Some(name) = self.new_name() {
            company.company_name = name;
        }
        if let Some(location) = self.location {
            company.location = location;
        }
        wire::merge_text(&mut company.website, self.website);
        wire::merge_text(&mut company.description, self.description);
    }
}
