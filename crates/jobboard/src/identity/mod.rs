//! Accounts, credentials, and self-service profiles.

pub mod domain;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Avatar, ContactCard, Credentials, Education, Location, PasswordHash, Profile, ProfilePatch,
    ProfileSectionPatch, PublicProfile, Registration, ResumeData, Role, User,
};
pub(crate) use domain::normalize_skills;
pub use password::{PasswordError, PasswordHasher};
pub use repository::UserRepository;
pub use router::identity_router;
pub use service::{AuthenticatedSession, IdentityService};
