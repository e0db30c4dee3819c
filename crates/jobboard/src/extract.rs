//! Request extractors shared by every router. Rejections are rendered as [`BoardError`]s so
//! clients always receive the `{"error": ...}` body.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::board::JobBoard;
use crate::error::BoardError;
use crate::identity::User;
use crate::storage::{ObjectStorage, UploadedFile};
use crate::store::DocumentStore;

/// The authenticated caller, loaded fresh from the store on every request.
#[derive(Debug, Clone)]
pub struct Caller(pub User);

#[axum::async_trait]
impl<S, O> FromRequestParts<Arc<JobBoard<S, O>>> for Caller
where
    S: DocumentStore + 'static,
    O: ObjectStorage + 'static,
{
    type Rejection = BoardError;

    async fn from_request_parts(
        parts: &mut Parts,
        board: &Arc<JobBoard<S, O>>,
    ) -> Result<Self, Self::Rejection> {
        board.authenticate(&parts.headers).map(Caller)
    }
}

/// JSON body whose decoding failures become `BadRequest`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, St> FromRequest<St> for JsonBody<T>
where
    T: DeserializeOwned,
    St: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request(request: Request, state: &St) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(request, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(|rejection| BoardError::bad_request(rejection.body_text()))
    }
}

/// Buffer the multipart field called `field_name`.
///
/// A part without a declared content type falls back to a guess from its file name.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    field_name: &str,
) -> Result<UploadedFile, BoardError> {
    let mut multipart = multipart.map_err(|rejection| BoardError::bad_request(rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| BoardError::bad_request(err.body_text()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(field_name).to_string();
        let content_type = match field.content_type() {
            Some(declared) => declared.to_string(),
            None => mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|err| BoardError::bad_request(err.body_text()))?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(BoardError::bad_request("No file uploaded"))
}
