//! Service wiring and the combined HTTP surface.

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::Router;

use crate::applications::{application_router, ApplicationService};
use crate::companies::{company_router, CompanyService};
use crate::config::AuthConfig;
use crate::error::BoardError;
use crate::identity::{identity_router, IdentityService, PasswordHasher, User};
use crate::jobs::{job_router, JobService};
use crate::session::SessionManager;
use crate::storage::ObjectStorage;
use crate::store::DocumentStore;

/// Every service sharing one store, one object storage, and one session manager.
pub struct JobBoard<S, O> {
    pub identity: IdentityService<S, O>,
    pub companies: CompanyService<S, O>,
    pub jobs: JobService<S>,
    pub applications: ApplicationService<S>,
    sessions: Arc<SessionManager>,
    store: Arc<S>,
}

impl<S, O> JobBoard<S, O>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    pub fn new(store: Arc<S>, storage: Arc<O>, auth: &AuthConfig) -> Self {
        let sessions = Arc::new(SessionManager::new(auth));
        let hasher = PasswordHasher::new(auth.bcrypt_cost);

        Self {
            identity: IdentityService::new(
                Arc::clone(&store),
                Arc::clone(&storage),
                hasher,
                Arc::clone(&sessions),
            ),
            companies: CompanyService::new(Arc::clone(&store), storage),
            jobs: JobService::new(Arc::clone(&store)),
            applications: ApplicationService::new(Arc::clone(&store)),
            sessions,
            store,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Resolve the session cookie to a stored user. The role always comes from the store.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<User, BoardError> {
        let claims = self.sessions.claims_from_headers(headers)?;
        self.store
            .find_user(&claims.sub)?
            .ok_or_else(|| BoardError::unauthorized("Not authorized, token failed"))
    }
}

/// All resource routers under `/api/v1`.
pub fn board_router<S, O>(board: Arc<JobBoard<S, O>>) -> Router
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Router::new()
        .nest("/api/v1/user", identity_router(Arc::clone(&board)))
        .nest("/api/v1/companies", company_router(Arc::clone(&board)))
        .nest("/api/v1/jobs", job_router(Arc::clone(&board)))
        .nest("/api/v1/applications", application_router(board))
}
