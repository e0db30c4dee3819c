use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{ContactCard, PublicProfile};
use crate::ids::{ApplicationId, JobId, UserId};
use crate::jobs::JobView;

/// Review state of an application.
///
/// Status only moves forward: `submitted -> reviewed -> interviewing -> hired | rejected`.
/// Intermediate steps may be skipped; `hired` and `rejected` are terminal. The legacy
/// `pending` spelling is read as `submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    #[serde(alias = "pending")]
    Submitted,
    Reviewed,
    Interviewing,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }

    const fn stage(self) -> u8 {
        match self {
            ApplicationStatus::Submitted => 0,
            ApplicationStatus::Reviewed => 1,
            ApplicationStatus::Interviewing => 2,
            ApplicationStatus::Hired | ApplicationStatus::Rejected => 3,
        }
    }

    pub const fn can_transition_to(self, next: ApplicationStatus) -> bool {
        !self.is_terminal() && next.stage() > self.stage()
    }

    pub fn transition(self, next: ApplicationStatus) -> Result<ApplicationStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move application from {} to {}", .from.label(), .to.label())]
pub struct TransitionError {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// Links an applicant, a job, and the recruiter owning that job at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_id: UserId,
    pub job_id: JobId,
    pub recruiter_id: UserId,
    /// Snapshot of the applicant's resume at submission; never refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Move to `next`, touching nothing but the status and its timestamp.
    pub(crate) fn advance(&mut self, next: ApplicationStatus) -> Result<(), TransitionError> {
        self.status = self.status.transition(next)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    #[serde(alias = "applicationId")]
    pub id: String,
    pub status: ApplicationStatus,
}

/// An application with the related records expanded for the caller's role.
///
/// Recruiters see the applicant's profile; applicants see the recruiter's contact card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<PublicProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<ContactCard>,
}
