//! Object storage collaborator for resumes, avatars, and company logos.
//!
//! Only reference URLs are kept on records; the bytes are handed to an [`ObjectStorage`]
//! implementation injected at startup.

use std::fmt;

use mime::Mime;

/// What an upload is for. Determines the MIME allow-list and where the object is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Resume,
    Avatar,
    Logo,
}

impl UploadKind {
    /// Accepted MIME essences (type/subtype, parameters ignored).
    pub const fn allowed_types(self) -> &'static [&'static str] {
        match self {
            UploadKind::Resume => &["application/pdf"],
            UploadKind::Avatar | UploadKind::Logo => &["image/png", "image/jpeg"],
        }
    }

    pub const fn folder(self) -> &'static str {
        match self {
            UploadKind::Resume => "resumes",
            UploadKind::Avatar => "avatars",
            UploadKind::Logo => "company_logos",
        }
    }

    /// Stable object key for an owner, so a new upload replaces the previous one.
    pub fn public_id(self, owner: impl fmt::Display) -> String {
        let prefix = match self {
            UploadKind::Resume => "resume",
            UploadKind::Avatar => "avatar",
            UploadKind::Logo => "logo",
        };
        format!("{prefix}_{owner}")
    }

    /// Allow-list check on the declared content type. The bytes are not sniffed.
    pub fn check(self, file: &UploadedFile) -> Result<(), StorageError> {
        if file.bytes.is_empty() {
            return Err(StorageError::Empty);
        }

        let declared = file.content_type.parse::<Mime>().ok();
        let allowed = declared.as_ref().is_some_and(|declared| {
            self.allowed_types()
                .iter()
                .any(|allowed| *allowed == declared.essence_str())
        });

        if allowed {
            Ok(())
        } else {
            Err(StorageError::UnsupportedType {
                kind: self,
                found: file.content_type.clone(),
            })
        }
    }

    fn describe(self) -> &'static str {
        match self {
            UploadKind::Resume => "Only PDF files allowed",
            UploadKind::Avatar | UploadKind::Logo => "Only PNG and JPEG images allowed",
        }
    }
}

/// A file received from a multipart request, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Request handed to the storage backend.
#[derive(Debug, Clone)]
pub struct PutObject {
    pub folder: &'static str,
    pub public_id: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PutObject {
    pub fn new(kind: UploadKind, public_id: String, file: UploadedFile) -> Self {
        Self {
            folder: kind.folder(),
            public_id,
            content_type: file.content_type,
            bytes: file.bytes,
        }
    }
}

/// Location of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub url: String,
    pub public_id: String,
}

pub trait ObjectStorage: Send + Sync {
    /// Store (or overwrite) an object, returning its public URL.
    fn put(&self, object: PutObject) -> Result<StoredObject, StorageError>;
    fn delete(&self, folder: &str, public_id: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{}: received '{found}'", .kind.describe())]
    UnsupportedType { kind: UploadKind, found: String },
    #[error("uploaded file is empty")]
    Empty,
    #[error("stored object '{0}' not found")]
    NotFound(String),
    #[error("object storage unavailable: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: "upload".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn resumes_accept_only_pdf() {
        assert!(UploadKind::Resume.check(&file("application/pdf")).is_ok());
        let error = UploadKind::Resume
            .check(&file("image/png"))
            .expect_err("png resume rejected");
        assert_eq!(error.to_string(), "Only PDF files allowed: received 'image/png'");
    }

    #[test]
    fn images_accept_png_and_jpeg_with_parameters() {
        assert!(UploadKind::Avatar.check(&file("image/png")).is_ok());
        assert!(UploadKind::Logo.check(&file("image/jpeg; charset=binary")).is_ok());
        assert!(UploadKind::Logo.check(&file("image/gif")).is_err());
        assert!(UploadKind::Avatar.check(&file("not a mime")).is_err());
    }

    #[test]
    fn empty_uploads_are_rejected() {
        let mut empty = file("application/pdf");
        empty.bytes.clear();
        assert!(matches!(
            UploadKind::Resume.check(&empty),
            Err(StorageError::Empty)
        ));
    }

    #[test]
    fn public_ids_are_keyed_by_owner() {
        assert_eq!(UploadKind::Logo.public_id("abc"), "logo_abc");
        assert_eq!(UploadKind::Resume.folder(), "resumes");
    }
}
