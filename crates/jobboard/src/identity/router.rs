use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{Credentials, ProfilePatch, Registration};
use super::service::AuthenticatedSession;
use crate::board::JobBoard;
use crate::error::BoardError;
use crate::extract::{read_upload, Caller, JsonBody};
use crate::storage::ObjectStorage;
use crate::store::DocumentStore;

/// Account routes, mounted under `/api/v1/user`.
pub fn identity_router<S, O>(board: Arc<JobBoard<S, O>>) -> Router
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Router::new()
        .route("/register", post(register_handler::<S, O>))
        .route("/login", post(login_handler::<S, O>))
        .route("/logout", post(logout_handler::<S, O>))
        .route(
            "/profile",
            get(profile_handler::<S, O>).put(update_profile_handler::<S, O>),
        )
        .route("/profile/resume", post(resume_handler::<S, O>))
        .route(
            "/profile/avatar",
            put(avatar_handler::<S, O>).delete(delete_avatar_handler::<S, O>),
        )
        .with_state(board)
}

fn with_session<S, O>(
    board: &JobBoard<S, O>,
    status: StatusCode,
    session: AuthenticatedSession,
) -> Response
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let cookie = board.sessions().session_cookie(session.token);
    (
        status,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(session.profile),
    )
        .into_response()
}

pub(crate) async fn register_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    JsonBody(registration): JsonBody<Registration>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let session = board.identity.register(registration).await?;
    Ok(with_session(&board, StatusCode::CREATED, session))
}

pub(crate) async fn login_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let session = board.identity.authenticate(credentials).await?;
    Ok(with_session(&board, StatusCode::OK, session))
}

pub(crate) async fn logout_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(_caller): Caller,
) -> Response
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let cookie = board.sessions().logout_cookie();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

pub(crate) async fn profile_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
) -> Response
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Json(board.identity.profile(&caller)).into_response()
}

pub(crate) async fn update_profile_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let profile = board.identity.update_profile(&caller, patch).await?;
    Ok(Json(profile).into_response())
}

pub(crate) async fn resume_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let file = read_upload(multipart, "resume").await?;
    let resume = board.identity.upload_resume(&caller, file)?;
    Ok(Json(json!({
        "message": "Resume uploaded successfully",
        "resumeUrl": &resume.resume_url,
        "resumeData": resume,
    }))
    .into_response())
}

pub(crate) async fn avatar_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let file = read_upload(multipart, "avatar").await?;
    let avatar = board.identity.update_avatar(&caller, file)?;
    Ok(Json(avatar).into_response())
}

pub(crate) async fn delete_avatar_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let profile = board.identity.delete_avatar(&caller)?;
    Ok(Json(profile).into_response())
}
