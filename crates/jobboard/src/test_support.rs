use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::board::{board_router, JobBoard};
use crate::companies::{Company, NewCompany};
use crate::config::AuthConfig;
use crate::identity::{Registration, Role, User, UserRepository};
use crate::jobs::{Job, JobType, NewJob, WorkType};
use crate::store::{MemoryObjectStorage, MemoryStore};

pub(crate) const FILES_BASE: &str = "http://files.test";
const BOUNDARY: &str = "jobboard-test-boundary";

pub(crate) type TestBoard = JobBoard<MemoryStore, MemoryObjectStorage>;

/// A board wired to in-memory backends, with handles on both for assertions.
pub(crate) struct Fixture {
    pub board: Arc<TestBoard>,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryObjectStorage>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(MemoryObjectStorage::new(FILES_BASE));
        let board = Arc::new(JobBoard::new(
            Arc::clone(&store),
            Arc::clone(&storage),
            &AuthConfig::for_tests(),
        ));
        Self {
            board,
            store,
            storage,
        }
    }

    pub fn router(&self) -> Router {
        board_router(Arc::clone(&self.board))
    }

    /// Register through the service and return the stored user plus a cookie header value.
    pub async fn register(&self, first_name: &str, email: &str, role: Role) -> (User, String) {
        let session = self
            .board
            .identity
            .register(registration(first_name, email, role))
            .await
            .expect("registration succeeds");
        let user = self.user(&session.profile.id);
        (user, format!("jwt={}", session.token))
    }

    pub fn user(&self, id: &crate::ids::UserId) -> User {
        self.store
            .find_user(id)
            .expect("store reachable")
            .expect("user stored")
    }

    pub fn company(&self, recruiter: &User, name: &str) -> Company {
        self.board
            .companies
            .create(recruiter, new_company(name))
            .expect("company created")
    }

    pub fn job(&self, recruiter: &User, company: &Company, title: &str) -> Job {
        self.board
            .jobs
            .create(recruiter, new_job(company, title))
            .expect("job posted")
    }
}

pub(crate) fn registration(first_name: &str, email: &str, role: Role) -> Registration {
    Registration {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        password: "secret-pass".to_string(),
        role: Some(role),
    }
}

pub(crate) fn new_company(name: &str) -> NewCompany {
    NewCompany {
        company_name: name.to_string(),
        location: None,
        website: Some("https://acme.example".to_string()),
        description: None,
    }
}

pub(crate) fn new_job(company: &Company, title: &str) -> NewJob {
    NewJob {
        company_id: company.id.to_string(),
        title: title.to_string(),
        description: Some("Build things".to_string()),
        salary: None,
        location: None,
        job_type: JobType::FullTime,
        work_type: WorkType::Remote,
        skills: Some(vec!["rust".to_string()]),
    }
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).expect("serialize body"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid request")
}

pub(crate) fn multipart_request(
    method: Method,
    uri: &str,
    cookie: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

/// Drive one request through the router and decode the JSON body (`Null` when empty).
pub(crate) async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, headers, payload)
}
