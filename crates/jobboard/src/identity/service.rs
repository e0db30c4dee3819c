use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{
    normalize_email, Avatar, Credentials, Profile, ProfilePatch, PublicProfile, Registration,
    ResumeData, User,
};
use super::password::PasswordHasher;
use super::repository::UserRepository;
use crate::error::BoardError;
use crate::ids::UserId;
use crate::session::SessionManager;
use crate::storage::{ObjectStorage, PutObject, StorageError, UploadKind, UploadedFile};
use crate::store::RepositoryError;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful registration or login: the public profile plus a fresh token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedSession {
    pub profile: PublicProfile,
    #[serde(skip)]
    pub token: String,
}

/// Account lifecycle: registration, login, self-service profile edits, and uploads.
pub struct IdentityService<S, O> {
    store: Arc<S>,
    storage: Arc<O>,
    hasher: PasswordHasher,
    sessions: Arc<SessionManager>,
}

impl<S, O> IdentityService<S, O>
where
    S: UserRepository + 'static,
    O: ObjectStorage + 'static,
{
    pub fn new(
        store: Arc<S>,
        storage: Arc<O>,
        hasher: PasswordHasher,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            store,
            storage,
            hasher,
            sessions,
        }
    }

    pub async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthenticatedSession, BoardError> {
        let registration = registration.normalized()?;

        if self.store.find_user_by_email(&registration.email)?.is_some() {
            return Err(BoardError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash(&registration.password).await?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            password_hash,
            phone_number: None,
            location: None,
            role: registration.role.unwrap_or_default(),
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        };

        let user = self.store.insert_user(user).map_err(|err| match err {
            RepositoryError::Conflict(_) => BoardError::conflict("User already exists"),
            other => other.into(),
        })?;
        info!(user_id = %user.id, role = user.role.label(), "user registered");

        self.open_session(&user)
    }

    pub async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticatedSession, BoardError> {
        let email = credentials.email.trim().to_ascii_lowercase();
        let Some(user) = self.store.find_user_by_email(&email)? else {
            return Err(BoardError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .await?
        {
            return Err(BoardError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "user logged in");
        self.open_session(&user)
    }

    /// The caller's own profile. There is no cross-user read.
    pub fn profile(&self, caller: &User) -> PublicProfile {
        caller.public_profile()
    }

    pub async fn update_profile(
        &self,
        caller: &User,
        patch: ProfilePatch,
    ) -> Result<PublicProfile, BoardError> {
        let mut user = caller.clone();
        patch.apply_fields(&mut user)?;

        if let Some(email) = &patch.email {
            let email = normalize_email(email)?;
            if email != user.email {
                let taken = self
                    .store
                    .find_user_by_email(&email)?
                    .is_some_and(|other| other.id != user.id);
                if taken {
                    return Err(BoardError::conflict("Email already in use"));
                }
                user.email = email;
            }
        }

        // Only a newly supplied password is hashed; the stored digest is never re-hashed.
        if let Some(password) = &patch.password {
            user.password_hash = self.hasher.hash(password).await?;
        }

        self.persist(user).map(|user| user.public_profile())
    }

    pub fn upload_resume(
        &self,
        caller: &User,
        file: UploadedFile,
    ) -> Result<ResumeData, BoardError> {
        UploadKind::Resume.check(&file)?;
        let original_name = file.file_name.clone();
        let stored = self.storage.put(PutObject::new(
            UploadKind::Resume,
            UploadKind::Resume.public_id(caller.id),
            file,
        ))?;

        let resume = ResumeData {
            resume_url: stored.url,
            public_id: stored.public_id,
            original_name,
            uploaded_at: Utc::now(),
        };

        let mut user = caller.clone();
        user.profile.resume_data = Some(resume.clone());
        self.persist(user)?;
        info!(user_id = %caller.id, "resume uploaded");
        Ok(resume)
    }

    pub fn update_avatar(&self, caller: &User, file: UploadedFile) -> Result<Avatar, BoardError> {
        UploadKind::Avatar.check(&file)?;
        let stored = self.storage.put(PutObject::new(
            UploadKind::Avatar,
            UploadKind::Avatar.public_id(caller.id),
            file,
        ))?;

        let avatar = Avatar {
            url: stored.url,
            public_id: stored.public_id,
        };

        let mut user = caller.clone();
        user.profile.avatar = Some(avatar.clone());
        self.persist(user)?;
        Ok(avatar)
    }

    pub fn delete_avatar(&self, caller: &User) -> Result<PublicProfile, BoardError> {
        let Some(avatar) = caller.profile.avatar.as_ref() else {
            return Err(BoardError::not_found("No avatar to delete"));
        };

        match self
            .storage
            .delete(UploadKind::Avatar.folder(), &avatar.public_id)
        {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(other) => return Err(other.into()),
        }

        let mut user = caller.clone();
        user.profile.avatar = None;
        self.persist(user).map(|user| user.public_profile())
    }

    fn open_session(&self, user: &User) -> Result<AuthenticatedSession, BoardError> {
        let token = self.sessions.issue(user)?;
        Ok(AuthenticatedSession {
            profile: user.public_profile(),
            token,
        })
    }

    fn persist(&self, mut user: User) -> Result<User, BoardError> {
        user.updated_at = Utc::now();
        self.store.update_user(user).map_err(|err| match err {
            RepositoryError::Conflict(message) => BoardError::Conflict(message),
            other => BoardError::internal(format!("Failed to update profile: {other}")),
        })
    }
}
