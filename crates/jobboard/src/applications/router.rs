use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use super::domain::{NewApplication, StatusUpdate};
use crate::board::JobBoard;
use crate::error::BoardError;
use crate::extract::{Caller, JsonBody};
use crate::storage::ObjectStorage;
use crate::store::DocumentStore;

/// Application routes, mounted under `/api/v1/applications`.
pub fn application_router<S, O>(board: Arc<JobBoard<S, O>>) -> Router
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Router::new()
        .route("/", post(submit_handler::<S, O>))
        .route("/my-applications", get(my_applications_handler::<S, O>))
        .route("/update", put(update_status_handler::<S, O>))
        .with_state(board)
}

pub(crate) async fn submit_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<NewApplication>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let application = board.applications.submit(&caller, request)?;
    Ok((StatusCode::CREATED, Json(application)).into_response())
}

pub(crate) async fn my_applications_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Ok(Json(board.applications.list_mine(&caller)?).into_response())
}

pub(crate) async fn update_status_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let application = board.applications.update_status(&caller, update)?;
    Ok(Json(application).into_response())
}
