use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{CompanyPatch, NewCompany};
use crate::board::JobBoard;
use crate::error::BoardError;
use crate::extract::{read_upload, Caller, JsonBody};
use crate::ids::{CompanyId, UserId};
use crate::storage::ObjectStorage;
use crate::store::DocumentStore;

/// Company routes, mounted under `/api/v1/companies`.
pub fn company_router<S, O>(board: Arc<JobBoard<S, O>>) -> Router
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Router::new()
        .route(
            "/",
            post(create_handler::<S, O>).get(list_handler::<S, O>),
        )
        .route("/recruiter/:recruiter_id", get(by_recruiter_handler::<S, O>))
        .route("/logo", put(logo_handler::<S, O>))
        .route("/:company_id", put(update_handler::<S, O>))
        .with_state(board)
}

pub(crate) async fn create_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<NewCompany>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let company = board.companies.create(&caller, request)?;
    Ok((StatusCode::CREATED, Json(company)).into_response())
}

pub(crate) async fn list_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Ok(Json(board.companies.list_all()?).into_response())
}

pub(crate) async fn by_recruiter_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(_caller): Caller,
    Path(recruiter_id): Path<String>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let recruiter_id = UserId::parse(&recruiter_id)?;
    Ok(Json(board.companies.list_by_recruiter(&recruiter_id)?).into_response())
}

pub(crate) async fn update_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    Path(company_id): Path<String>,
    JsonBody(patch): JsonBody<CompanyPatch>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let company_id = CompanyId::parse(&company_id)?;
    let company = board.companies.update(&caller, &company_id, patch)?;
    Ok(Json(company).into_response())
}

pub(crate) async fn logo_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let file = read_upload(multipart, "logo").await?;
    let company = board.companies.upload_logo(&caller, file)?;
    Ok(Json(json!({ "logoUrl": company.logo_url })).into_response())
}
