//! Authorization policy.
//!
//! Every mutation runs `authenticate -> load -> authorize -> mutate -> persist`. The whole
//! rule table lives in [`authorize`]; handlers and services never compare roles or owner ids
//! themselves.

use std::fmt;

use tracing::warn;

use crate::applications::Application;
use crate::companies::Company;
use crate::identity::{Role, User};
use crate::ids::UserId;
use crate::jobs::Job;

/// A record with a single owning recruiter.
pub trait Owned {
    fn owner(&self) -> UserId;
}

impl Owned for Company {
    fn owner(&self) -> UserId {
        self.recruiter_id
    }
}

impl Owned for Job {
    fn owner(&self) -> UserId {
        self.recruiter_id
    }
}

impl Owned for Application {
    fn owner(&self) -> UserId {
        self.recruiter_id
    }
}

/// Every gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCompany,
    UpdateCompany,
    UploadCompanyLogo,
    CreateJob,
    UpdateJob,
    DeleteJob,
    SubmitApplication,
    TransitionApplication,
}

impl Action {
    pub const fn required_role(self) -> Role {
        match self {
            Action::SubmitApplication => Role::Applicant,
            _ => Role::Recruiter,
        }
    }

    pub const fn requires_ownership(self) -> bool {
        matches!(
            self,
            Action::UpdateCompany
                | Action::UpdateJob
                | Action::DeleteJob
                | Action::TransitionApplication
        )
    }

    const fn role_denied(self) -> &'static str {
        match self {
            Action::CreateCompany => "Only recruiters can create companies",
            Action::UpdateCompany => "Only recruiters can update companies",
            Action::UploadCompanyLogo => "Only recruiters can upload company logos",
            Action::CreateJob => "Only recruiters can post jobs",
            Action::UpdateJob => "Not authorized to update this job posting",
            Action::DeleteJob => "Not authorized to delete this job posting",
            Action::SubmitApplication => "Only applicants can apply to jobs",
            Action::TransitionApplication => "Only recruiters can update application status",
        }
    }

    const fn ownership_denied(self) -> &'static str {
        match self {
            Action::UpdateCompany => "You are not authorized to update this company",
            Action::TransitionApplication => {
                "You can only update applications for your own job postings"
            }
            _ => self.role_denied(),
        }
    }
}

/// The loaded record an action targets, if any.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    None,
    Company(&'a Company),
    Job(&'a Job),
    Application(&'a Application),
}

impl Resource<'_> {
    fn as_owned(&self) -> Option<&dyn Owned> {
        match *self {
            Resource::None => None,
            Resource::Company(company) => Some(company as &dyn Owned),
            Resource::Job(job) => Some(job as &dyn Owned),
            Resource::Application(application) => Some(application as &dyn Owned),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Role,
    Ownership,
}

/// A denied authorization decision. Renders as the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    pub action: Action,
    pub kind: ViolationKind,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind {
            ViolationKind::Role => self.action.role_denied(),
            ViolationKind::Ownership => self.action.ownership_denied(),
        };
        f.write_str(message)
    }
}

impl std::error::Error for PolicyViolation {}

pub fn require_role(caller: &User, role: Role, action: Action) -> Result<(), PolicyViolation> {
    if caller.is(role) {
        Ok(())
    } else {
        Err(PolicyViolation {
            action,
            kind: ViolationKind::Role,
        })
    }
}

pub fn require_ownership<R>(caller: &User, resource: &R, action: Action) -> Result<(), PolicyViolation>
where
    R: Owned + ?Sized,
{
    if resource.owner() == caller.id {
        Ok(())
    } else {
        Err(PolicyViolation {
            action,
            kind: ViolationKind::Ownership,
        })
    }
}

/// Evaluate `action` by `caller` against `resource`.
///
/// Ownership-gated actions without a loaded resource are denied.
pub fn authorize(caller: &User, action: Action, resource: Resource<'_>) -> Result<(), PolicyViolation> {
    let decision = require_role(caller, action.required_role(), action).and_then(|()| {
        if !action.requires_ownership() {
            return Ok(());
        }
        match resource.as_owned() {
            Some(owned) => require_ownership(caller, owned, action),
            None => Err(PolicyViolation {
                action,
                kind: ViolationKind::Ownership,
            }),
        }
    });

    if let Err(violation) = &decision {
        warn!(
            user_id = %caller.id,
            role = caller.role.label(),
            ?action,
            kind = ?violation.kind,
            "authorization denied"
        );
    }

    decision
}
