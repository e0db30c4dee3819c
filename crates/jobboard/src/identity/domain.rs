use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::ids::UserId;
use crate::wire;

const MAX_BIO_CHARS: usize = 1000;

/// The two account kinds. Role is always read from the stored record, never from a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Applicant,
    Recruiter,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Recruiter => "recruiter",
        }
    }
}

/// Free-form postal location shared by users, companies, and jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, alias = "City", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, alias = "State", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, alias = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Reference to a stored resume; the bytes live in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub resume_url: String,
    pub public_id: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ResumeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

/// Bcrypt digest of a password. Deliberately not `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub(crate) fn from_digest(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Stored identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub phone_number: Option<String>,
    pub location: Option<Location>,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn resume_url(&self) -> Option<&str> {
        self.profile
            .resume_data
            .as_ref()
            .map(|resume| resume.resume_url.as_str())
    }

    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            location: self.location.clone(),
            role: self.role,
            profile: self.profile.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn contact_card(&self) -> ContactCard {
        ContactCard {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The only serialized shape of a user. It has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Name and email of a user, as embedded in job and application listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Registration {
    /// Trim names and normalize the email so uniqueness checks are case-insensitive.
    pub(crate) fn normalized(mut self) -> Result<Self, BoardError> {
        self.first_name = required_name(&self.first_name, "firstName")?;
        self.last_name = required_name(&self.last_name, "lastName")?;
        self.email = normalize_email(&self.email)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Partial profile update. Absent fields are untouched; `null` clears where clearing is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "wire::clearable")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "wire::clearable_structured")]
    pub location: Option<Option<Location>>,
    #[serde(default)]
    pub profile: Option<ProfileSectionPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSectionPatch {
    #[serde(default, deserialize_with = "wire::clearable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "wire::structured")]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "wire::structured")]
    pub education: Option<Vec<Education>>,
}

impl ProfilePatch {
    /// Apply every field except email and password, which need store/hash access.
    pub(crate) fn apply_fields(&self, user: &mut User) -> Result<(), BoardError> {
        if let Some(first_name) = &self.first_name {
            user.first_name = required_name(first_name, "firstName")?;
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = required_name(last_name, "lastName")?;
        }
        wire::merge_text(&mut user.phone_number, self.phone_number.clone());
        if let Some(location) = &self.location {
            user.location = location.clone();
        }
        if let Some(section) = &self.profile {
            if let Some(Some(text)) = &section.bio {
                if text.trim().chars().count() > MAX_BIO_CHARS {
                    return Err(BoardError::bad_request(format!(
                        "bio must be at most {MAX_BIO_CHARS} characters"
                    )));
                }
            }
            wire::merge_text(&mut user.profile.bio, section.bio.clone());
            if let Some(skills) = &section.skills {
                user.profile.skills = normalize_skills(skills);
            }
            if let Some(education) = &section.education {
                user.profile.education = education.clone();
            }
        }
        Ok(())
    }
}

pub(crate) fn normalize_email(raw: &str) -> Result<String, BoardError> {
    let email = raw.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(BoardError::bad_request("a valid email is required")),
    }
}

pub(crate) fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|skill| skill.trim())
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn required_name(raw: &str, field: &str) -> Result<String, BoardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardError::bad_request(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
