use super::domain::User;
use crate::ids::UserId;
use crate::store::RepositoryError;

/// Storage abstraction for identity records.
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    /// Fails with `NotFound` for unknown ids and `Conflict` when the new email belongs to
    /// another user.
    fn update_user(&self, user: User) -> Result<User, RepositoryError>;
    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}
