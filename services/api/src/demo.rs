use crate::infra::memory_backends;
use clap::Args;
use jobboard::applications::{ApplicationStatus, NewApplication, StatusUpdate};
use jobboard::companies::NewCompany;
use jobboard::config::AppConfig;
use jobboard::error::{AppError, BoardError};
use jobboard::identity::{Location, Registration, Role, User, UserRepository};
use jobboard::ids::UserId;
use jobboard::jobs::{JobType, NewJob, WorkType};
use jobboard::store::MemoryStore;
use serde_json::json;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the summary on a single line instead of pretty-printed JSON.
    #[arg(long)]
    pub(crate) compact: bool,
}

/// Recruiter posts a job, an applicant applies, the recruiter hires them.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let backends = memory_backends(&config.auth, config.storage.public_base_url(&config.server));
    let board = &backends.board;

    let recruiter = board
        .identity
        .register(registration("Rita", "Recruiter", "rita@acme.example", Role::Recruiter))
        .await?;
    let applicant = board
        .identity
        .register(registration("Ada", "Applicant", "ada@example.com", Role::Applicant))
        .await?;
    let recruiter = stored_user(&backends.store, &recruiter.profile.id)?;
    let applicant = stored_user(&backends.store, &applicant.profile.id)?;

    let company = board.companies.create(
        &recruiter,
        NewCompany {
            company_name: "Acme Rockets".to_string(),
            location: Some(Location {
                city: Some("Austin".to_string()),
                state: Some("TX".to_string()),
                country: Some("US".to_string()),
            }),
            website: Some("https://acme.example".to_string()),
            description: Some("Reusable launch vehicles".to_string()),
        },
    )?;

    let job = board.jobs.create(
        &recruiter,
        NewJob {
            company_id: company.id.to_string(),
            title: "Backend Engineer".to_string(),
            description: Some("Own the booking pipeline".to_string()),
            salary: Some("$150k".to_string()),
            location: None,
            job_type: JobType::FullTime,
            work_type: WorkType::Hybrid,
            skills: Some(vec!["rust".to_string(), "postgres".to_string()]),
        },
    )?;

    let application = board.applications.submit(
        &applicant,
        NewApplication {
            job_id: job.id.to_string(),
            message: Some("I have shipped three launch schedulers.".to_string()),
        },
    )?;

    let mut status_history = vec![application.status];
    for next in [ApplicationStatus::Reviewed, ApplicationStatus::Hired] {
        let updated = board.applications.update_status(
            &recruiter,
            StatusUpdate {
                id: application.id.to_string(),
                status: next,
            },
        )?;
        status_history.push(updated.status);
    }

    let summary = json!({
        "recruiter": recruiter.public_profile(),
        "applicant": applicant.public_profile(),
        "company": company,
        "job": job,
        "statusHistory": status_history,
        "applicantView": board.applications.list_mine(&applicant)?,
        "recruiterView": board.applications.list_mine(&recruiter)?,
    });

    let rendered = if args.compact {
        serde_json::to_string(&summary)
    } else {
        serde_json::to_string_pretty(&summary)
    }
    .map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn registration(first_name: &str, last_name: &str, email: &str, role: Role) -> Registration {
    Registration {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        password: "demo-password".to_string(),
        role: Some(role),
    }
}

fn stored_user(store: &MemoryStore, id: &UserId) -> Result<User, BoardError> {
    store
        .find_user(id)?
        .ok_or_else(|| BoardError::internal("registered user missing from store"))
}
