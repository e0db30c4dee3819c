use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{JobPatch, NewJob};
use crate::board::JobBoard;
use crate::error::BoardError;
use crate::extract::{Caller, JsonBody};
use crate::ids::{CompanyId, JobId};
use crate::storage::ObjectStorage;
use crate::store::DocumentStore;

/// Job routes, mounted under `/api/v1/jobs`.
pub fn job_router<S, O>(board: Arc<JobBoard<S, O>>) -> Router
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Router::new()
        .route("/", get(list_handler::<S, O>))
        .route(
            "/my-jobs",
            post(create_handler::<S, O>).get(my_jobs_handler::<S, O>),
        )
        .route("/company-jobs/:company_id", get(company_jobs_handler::<S, O>))
        .route(
            "/:job_id",
            get(get_handler::<S, O>)
                .put(update_handler::<S, O>)
                .delete(delete_handler::<S, O>),
        )
        .with_state(board)
}

pub(crate) async fn create_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<NewJob>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let job = board.jobs.create(&caller, request)?;
    Ok((StatusCode::CREATED, Json(job)).into_response())
}

pub(crate) async fn list_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Ok(Json(board.jobs.list_all()?).into_response())
}

pub(crate) async fn my_jobs_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    Ok(Json(board.jobs.list_mine(&caller)?).into_response())
}

pub(crate) async fn company_jobs_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Path(company_id): Path<String>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let company_id = CompanyId::parse(&company_id)?;
    Ok(Json(board.jobs.list_by_company(&company_id)?).into_response())
}

pub(crate) async fn get_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Path(job_id): Path<String>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let job_id = JobId::parse(&job_id)?;
    Ok(Json(board.jobs.get(&job_id)?).into_response())
}

pub(crate) async fn update_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    Path(job_id): Path<String>,
    JsonBody(patch): JsonBody<JobPatch>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let job_id = JobId::parse(&job_id)?;
    let job = board.jobs.update(&caller, &job_id, patch)?;
    Ok(Json(job).into_response())
}

pub(crate) async fn delete_handler<S, O>(
    State(board): State<Arc<JobBoard<S, O>>>,
    Caller(caller): Caller,
    Path(job_id): Path<String>,
) -> Result<Response, BoardError>
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    let job_id = JobId::parse(&job_id)?;
    board.jobs.delete(&caller, &job_id)?;
    Ok(Json(json!({ "message": "Job removed" })).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::identity::Role;
    use crate::test_support::{json_request, send, Fixture};

    #[tokio::test]
    async fn recruiters_post_with_either_company_field_and_string_skills() {
        let fixture = Fixture::new();
        let router = fixture.router();
        let (recruiter, cookie) = fixture.register("Rita", "rita@acme.io", Role::Recruiter).await;
        let acme = fixture.company(&recruiter, "Acme");

        let (status, _, created) = send(
            &router,
            json_request(
                Method::POST,
                "/api/v1/jobs/my-jobs",
                Some(&cookie),
                Some(json!({
                    "company": acme.id,
                    "title": "Backend Engineer",
                    "jobType": "full-time",
                    "workType": "hybrid",
                    "skills": "[\"rust\",\"sql\"]"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["skills"], json!(["rust", "sql"]));
        assert_eq!(created["recruiterId"], recruiter.id.to_string());

        let (status, _, listed) = send(
            &router,
            json_request(Method::GET, "/api/v1/jobs", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["company"]["companyName"], "Acme");
        assert_eq!(listed[0]["recruiter"]["email"], "rita@acme.io");

        let uri = format!("/api/v1/jobs/company-jobs/{}", acme.id);
        let (status, _, by_company) = send(&router, json_request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_company.as_array().map(Vec::len), Some(1));

        let (status, _, mine) = send(
            &router,
            json_request(Method::GET, "/api/v1/jobs/my-jobs", Some(&cookie), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine[0]["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn reading_updating_and_deleting_by_id() {
        let fixture = Fixture::new();
        let router = fixture.router();
        let (recruiter, cookie) = fixture.register("Rita", "rita@acme.io", Role::Recruiter).await;
        let (_, rival_cookie) = fixture.register("Ray", "ray@rival.io", Role::Recruiter).await;
        let acme = fixture.company(&recruiter, "Acme");
        let job = fixture.job(&recruiter, &acme, "Engineer");
        let uri = format!("/api/v1/jobs/{}", job.id);

        let (status, _, body) = send(
            &router,
            json_request(Method::GET, "/api/v1/jobs/not-a-uuid", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _, body) = send(
            &router,
            json_request(
                Method::PUT,
                &uri,
                Some(&rival_cookie),
                Some(json!({ "title": "Hijacked" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Not authorized to update this job posting");

        let (status, _, body) = send(
            &router,
            json_request(
                Method::PUT,
                &uri,
                Some(&cookie),
                Some(json!({ "salary": "120k", "description": null })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["salary"], "120k");
        assert!(body.get("description").is_none());
        assert_eq!(body["title"], "Engineer");

        let (status, _, body) = send(&router, json_request(Method::DELETE, &uri, Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Job removed" }));

        let (status, _, body) = send(&router, json_request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job not found");
    }
}
