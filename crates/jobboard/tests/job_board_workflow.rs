//! End-to-end hiring scenarios driven through the public HTTP surface only.

mod common {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use jobboard::config::AuthConfig;
    use jobboard::store::{MemoryObjectStorage, MemoryStore};
    use jobboard::{board_router, JobBoard};

    pub(super) fn router() -> Router {
        let board = JobBoard::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryObjectStorage::new("http://files.test")),
            &AuthConfig::for_tests(),
        );
        board_router(Arc::new(board))
    }

    pub(super) struct Reply {
        pub status: StatusCode,
        pub cookie: Option<String>,
        pub body: Value,
    }

    pub(super) async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("json body")))
                .expect("request"),
            None => request.body(Body::empty()).expect("request"),
        };

        let response = router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json response")
        };

        Reply {
            status,
            cookie,
            body,
        }
    }

    /// Register an account and return its id and session cookie.
    pub(super) async fn sign_up(router: &Router, first_name: &str, email: &str, role: &str) -> (String, String) {
        let reply = call(
            router,
            Method::POST,
            "/api/v1/user/register",
            None,
            Some(serde_json::json!({
                "firstName": first_name,
                "lastName": "Example",
                "email": email,
                "password": "correct-horse",
                "role": role,
            })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
        let id = reply.body["id"].as_str().expect("user id").to_string();
        (id, reply.cookie.expect("session cookie"))
    }
}

use axum::http::{Method, StatusCode};
use common::{call, router, sign_up};
use serde_json::json;

#[tokio::test]
async fn recruiter_posts_and_hires_an_applicant() {
    let router = router();
    let (recruiter_id, recruiter) = sign_up(&router, "Rita", "rita@acme.io", "recruiter").await;
    let (applicant_id, applicant) = sign_up(&router, "Ada", "ada@example.com", "applicant").await;

    let company = call(
        &router,
        Method::POST,
        "/api/v1/companies",
        Some(&recruiter),
        Some(json!({ "companyName": "Acme", "website": "https://acme.example" })),
    )
    .await;
    assert_eq!(company.status, StatusCode::CREATED);

    let job = call(
        &router,
        Method::POST,
        "/api/v1/jobs/my-jobs",
        Some(&recruiter),
        Some(json!({
            "companyId": company.body["id"],
            "title": "Backend Engineer",
            "jobType": "full-time",
            "workType": "remote",
            "skills": ["rust", "sql"]
        })),
    )
    .await;
    assert_eq!(job.status, StatusCode::CREATED);
    assert_eq!(job.body["recruiterId"], recruiter_id.as_str());

    let application = call(
        &router,
        Method::POST,
        "/api/v1/applications",
        Some(&applicant),
        Some(json!({ "jobId": job.body["id"] })),
    )
    .await;
    assert_eq!(application.status, StatusCode::CREATED);
    assert_eq!(application.body["status"], "submitted");
    assert_eq!(application.body["applicantId"], applicant_id.as_str());

    let hired = call(
        &router,
        Method::PUT,
        "/api/v1/applications/update",
        Some(&recruiter),
        Some(json!({ "id": application.body["id"], "status": "hired" })),
    )
    .await;
    assert_eq!(hired.status, StatusCode::OK);
    assert_eq!(hired.body["appliedAt"], application.body["appliedAt"]);

    let mine = call(
        &router,
        Method::GET,
        "/api/v1/applications/my-applications",
        Some(&applicant),
        None,
    )
    .await;
    assert_eq!(mine.status, StatusCode::OK);
    let listed = mine.body.as_array().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "hired");
    assert_eq!(listed[0]["job"]["company"]["companyName"], "Acme");
}

#[tokio::test]
async fn rival_recruiter_cannot_edit_someone_elses_job() {
    let router = router();
    let (_, owner) = sign_up(&router, "Rita", "rita@acme.io", "recruiter").await;
    let (_, rival) = sign_up(&router, "Ray", "ray@rival.io", "recruiter").await;

    let company = call(
        &router,
        Method::POST,
        "/api/v1/companies",
        Some(&owner),
        Some(json!({ "companyName": "Acme" })),
    )
    .await;
    let job = call(
        &router,
        Method::POST,
        "/api/v1/jobs/my-jobs",
        Some(&owner),
        Some(json!({
            "company": company.body["id"],
            "title": "Backend Engineer",
            "jobType": "contract",
            "workType": "on-site"
        })),
    )
    .await;
    let uri = format!("/api/v1/jobs/{}", job.body["id"].as_str().expect("job id"));

    let attempt = call(
        &router,
        Method::PUT,
        &uri,
        Some(&rival),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(attempt.status, StatusCode::FORBIDDEN);

    let stored = call(&router, Method::GET, &uri, None, None).await;
    assert_eq!(stored.body["title"], "Backend Engineer");

    let foreign_post = call(
        &router,
        Method::POST,
        "/api/v1/jobs/my-jobs",
        Some(&rival),
        Some(json!({
            "companyId": company.body["id"],
            "title": "Sneaky",
            "jobType": "contract",
            "workType": "remote"
        })),
    )
    .await;
    assert_eq!(foreign_post.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        foreign_post.body["error"],
        "Company not found or you are not authorized to post jobs for this company"
    );
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict_and_passwords_never_leak() {
    let router = router();
    let (_, cookie) = sign_up(&router, "Ada", "ada@example.com", "applicant").await;

    let again = call(
        &router,
        Method::POST,
        "/api/v1/user/register",
        None,
        Some(json!({
            "firstName": "Ada",
            "lastName": "Again",
            "email": "ada@example.com",
            "password": "another-pass"
        })),
    )
    .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let login = call(
        &router,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "correct-horse" })),
    )
    .await;
    let profile = call(&router, Method::GET, "/api/v1/user/profile", Some(&cookie), None).await;
    for body in [&login.body, &profile.body] {
        let text = body.to_string();
        assert!(!text.contains("password"), "leaked: {text}");
        assert!(!text.contains("correct-horse"));
    }
}

#[tokio::test]
async fn skills_sent_as_text_or_list_read_back_identically() {
    let router = router();
    let (_, recruiter) = sign_up(&router, "Rita", "rita@acme.io", "recruiter").await;
    let company = call(
        &router,
        Method::POST,
        "/api/v1/companies",
        Some(&recruiter),
        Some(json!({ "companyName": "Acme" })),
    )
    .await;

    let mut posted = Vec::new();
    for skills in [json!(["rust", "sql"]), json!("[\"rust\",\"sql\"]")] {
        let job = call(
            &router,
            Method::POST,
            "/api/v1/jobs/my-jobs",
            Some(&recruiter),
            Some(json!({
                "companyId": company.body["id"],
                "title": "Engineer",
                "jobType": "part-time",
                "workType": "hybrid",
                "skills": skills
            })),
        )
        .await;
        assert_eq!(job.status, StatusCode::CREATED);
        posted.push(job.body["id"].as_str().expect("id").to_string());
    }

    let mut read_back = Vec::new();
    for id in posted {
        let job = call(&router, Method::GET, &format!("/api/v1/jobs/{id}"), None, None).await;
        read_back.push(job.body["skills"].clone());
    }
    assert_eq!(read_back[0], json!(["rust", "sql"]));
    assert_eq!(read_back[0], read_back[1]);
}

async fn post_job(router: &axum::Router, cookie: &str, company_name: &str) -> serde_json::Value {
    let company = call(
        router,
        Method::POST,
        "/api/v1/companies",
        Some(cookie),
        Some(json!({ "companyName": company_name })),
    )
    .await;
    assert_eq!(company.status, StatusCode::CREATED, "{:?}", company.body);

    let job = call(
        router,
        Method::POST,
        "/api/v1/jobs/my-jobs",
        Some(cookie),
        Some(json!({
            "companyId": company.body["id"],
            "title": "Engineer",
            "jobType": "contract",
            "workType": "hybrid"
        })),
    )
    .await;
    assert_eq!(job.status, StatusCode::CREATED, "{:?}", job.body);
    job.body
}

#[tokio::test]
async fn application_listings_are_scoped_to_the_caller() {
    let router = router();
    let (rita_id, rita) = sign_up(&router, "Rita", "rita@acme.io", "recruiter").await;
    let (ray_id, ray) = sign_up(&router, "Ray", "ray@rival.io", "recruiter").await;
    let (ada_id, ada) = sign_up(&router, "Ada", "ada@example.com", "applicant").await;
    let (bo_id, bo) = sign_up(&router, "Bo", "bo@example.com", "applicant").await;

    let acme_job = post_job(&router, &rita, "Acme").await;
    let rival_job = post_job(&router, &ray, "Rival Corp").await;

    for (cookie, job) in [(&ada, &acme_job), (&bo, &acme_job), (&bo, &rival_job)] {
        let reply = call(
            &router,
            Method::POST,
            "/api/v1/applications",
            Some(cookie.as_str()),
            Some(json!({ "jobId": job["id"] })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    }

    let listed = |cookie: String| {
        let router = router.clone();
        async move {
            let reply = call(
                &router,
                Method::GET,
                "/api/v1/applications/my-applications",
                Some(cookie.as_str()),
                None,
            )
            .await;
            assert_eq!(reply.status, StatusCode::OK);
            reply.body.as_array().cloned().expect("application list")
        }
    };

    let ada_sent = listed(ada.clone()).await;
    assert_eq!(ada_sent.len(), 1);
    assert_eq!(ada_sent[0]["applicantId"], ada_id.as_str());

    let bo_sent = listed(bo.clone()).await;
    assert_eq!(bo_sent.len(), 2);
    assert!(bo_sent.iter().all(|item| item["applicantId"] == bo_id.as_str()));

    let rita_received = listed(rita.clone()).await;
    assert_eq!(rita_received.len(), 2);
    assert!(rita_received
        .iter()
        .all(|item| item["recruiterId"] == rita_id.as_str() && item["jobId"] == acme_job["id"]));

    let ray_received = listed(ray.clone()).await;
    assert_eq!(ray_received.len(), 1);
    assert_eq!(ray_received[0]["recruiterId"], ray_id.as_str());
    assert_eq!(ray_received[0]["applicantId"], bo_id.as_str());
}
